use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use originality::{
    CanonicalizeConfig, CorpusEntry, DetectionMode, Document, DocumentMetadata, Engine,
    EngineConfig, PerceptualConfig, fingerprint_tokens, normalize, tokenize_words,
};

const SENTENCES: [&str; 8] = [
    "Sensor readings are streamed over MQTT to a central broker.",
    "A React dashboard plots soil moisture for each field in real time.",
    "Irrigation valves open automatically when moisture drops below a threshold.",
    "The prediction model is trained with scikit-learn on three seasons of data.",
    "Farmers receive alerts on their phones when pumps fail.",
    "Weather forecasts adjust the watering schedule a day in advance.",
    "All readings are archived in PostgreSQL for later analysis.",
    "A field trial on two farms measured water savings against manual irrigation.",
];

/// Text of `n` sentences cycling through the sample set with a varying suffix.
fn document_text(n: usize, salt: usize) -> String {
    (0..n)
        .map(|i| {
            let base = SENTENCES[(i + salt) % SENTENCES.len()];
            format!("{} Batch {} of site {}.", base, i, salt)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn corpus(size: usize) -> Vec<CorpusEntry> {
    (0..size)
        .map(|i| {
            CorpusEntry::new(format!("entry-{i}"), format!("Smart Irrigation {i}"), document_text(12, i))
                .with_metadata(
                    DocumentMetadata::new()
                        .with_tags(["iot", "agriculture"])
                        .with_methodology("Field trial with quantitative analysis"),
                )
        })
        .collect()
}

fn upload() -> Document {
    Document::new(document_text(16, 3)).with_metadata(
        DocumentMetadata::new()
            .with_title("Smart Irrigation Controller")
            .with_tags(["iot"]),
    )
}

fn bench_fingerprint(c: &mut Criterion) {
    let canonical = CanonicalizeConfig::default();
    let perceptual = PerceptualConfig::default();
    let text = document_text(200, 0);

    let mut group = c.benchmark_group("fingerprint");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("normalize_and_shingle", |b| {
        b.iter(|| {
            let normalized = normalize(black_box(&text), &canonical);
            let tokens = tokenize_words(&normalized, &canonical);
            fingerprint_tokens(&tokens, &perceptual).unwrap()
        });
    });
    group.finish();
}

fn bench_check_modes(c: &mut Criterion) {
    let corpus = corpus(50);
    let upload = upload();

    let mut group = c.benchmark_group("check_modes");
    for mode in [
        DetectionMode::Structural,
        DetectionMode::Lexical,
        DetectionMode::Hybrid,
    ] {
        let engine = Engine::new(EngineConfig::new().with_mode(mode)).unwrap();
        group.bench_function(mode.as_str(), |b| {
            b.iter(|| engine.check(black_box(&upload), black_box(&corpus)));
        });
    }
    group.finish();
}

fn bench_corpus_scale(c: &mut Criterion) {
    let upload = upload();
    let serial = Engine::new(EngineConfig::default()).unwrap();
    let parallel = Engine::new(EngineConfig::new().with_parallel(true)).unwrap();

    let mut group = c.benchmark_group("corpus_scale");
    group.sample_size(20);
    for size in [10, 100, 500] {
        let corpus = corpus(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("serial", size), &corpus, |b, corpus| {
            b.iter(|| serial.check(&upload, corpus));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &corpus, |b, corpus| {
            b.iter(|| parallel.check(&upload, corpus));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fingerprint, bench_check_modes, bench_corpus_scale);
criterion_main!(benches);
