use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use originality::{CorpusEntry, Document, Engine, EngineConfig, OriginalityConfig};
use tracing::info;

/// Score a document's originality against a reference corpus
#[derive(Parser, Debug)]
#[command(name = "originality")]
#[command(about = "Check a document against a corpus for copied content", long_about = None)]
struct Args {
    /// JSON document to check (`{"text": ..., "metadata": {...}}`)
    #[arg(short, long)]
    document: Option<PathBuf>,

    /// JSON array of corpus entries (`[{"id", "title", "document"}]`)
    #[arg(short, long)]
    corpus: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `matcher=debug`
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(args.log_level.as_str())
        .with_target(false)
        .with_writer(std::io::stderr);
    if args.json_logs {
        subscriber.with_thread_ids(true).json().init();
    } else {
        subscriber.init();
    }

    let engine = match &args.config {
        Some(path) => OriginalityConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?
            .build_engine()?,
        None => Engine::new(EngineConfig::default())?,
    };

    let report = match (&args.document, &args.corpus) {
        (Some(document), Some(corpus)) => {
            let document: Document = read_json(document)?;
            let corpus: Vec<CorpusEntry> = read_json(corpus)?;
            info!(entries = corpus.len(), mode = engine.config().mode.as_str(), "checking document");
            engine.check(&document, &corpus)
        }
        (None, None) => {
            info!("no inputs given, checking the bundled demo");
            let (document, corpus) = originality::demo_inputs()?;
            engine.check(&document, &corpus)
        }
        _ => anyhow::bail!("--document and --corpus must be given together"),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
