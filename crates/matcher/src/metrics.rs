// Metrics hooks for the `matcher` crate.
//
// Callers install a global `EngineMetrics` implementation via
// [`set_engine_metrics`]; every call to [`Engine::check`](crate::Engine::check)
// then reports its latency and how many corpus entries were scored or skipped.
use std::sync::{Arc, RwLock};
use std::time::Duration;

use once_cell::sync::OnceCell;

use crate::types::DetectionMode;

/// Metrics observer for originality checks.
pub trait EngineMetrics: Send + Sync {
    /// Record one completed check.
    ///
    /// `entries_scored` counts corpus entries that were evaluated and
    /// `entries_skipped` those rejected with a diagnostic.
    fn record_check(
        &self,
        mode: DetectionMode,
        latency: Duration,
        entries_scored: usize,
        entries_skipped: usize,
    );
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn EngineMetrics>>> {
    static METRICS: OnceCell<RwLock<Option<Arc<dyn EngineMetrics>>>> = OnceCell::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

pub(crate) fn metrics_recorder() -> Option<Arc<dyn EngineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

/// Install or clear the global engine metrics recorder.
pub fn set_engine_metrics(recorder: Option<Arc<dyn EngineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}
