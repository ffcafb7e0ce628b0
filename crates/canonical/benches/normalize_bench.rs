use canonical::{canonicalize, tokenize_sentences, CanonicalizeConfig};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn sample_text(paragraphs: usize) -> String {
    let paragraph = "Smart campus parking uses IoT sensors and a React dashboard. \
        Occupancy is predicted with LSTM models trained in PyTorch! \
        Drivers receive real-time guidance through a Flutter app? ";
    paragraph.repeat(paragraphs)
}

fn bench_normalize(c: &mut Criterion) {
    let cfg = CanonicalizeConfig::default();
    let text = sample_text(200);

    c.bench_function("canonicalize_200_paragraphs", |b| {
        b.iter(|| canonicalize(black_box(&text), &cfg))
    });
    c.bench_function("tokenize_sentences_200_paragraphs", |b| {
        b.iter(|| tokenize_sentences(black_box(&text), &cfg))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
