use metrics::{counter, Counter};

/// Render pass telemetry.
///
/// Counts what happened to each definition during a render pass. The counters go through the
/// [`metrics`] facade, so they end up wherever the application's recorder sends them, or nowhere
/// if no recorder is installed.
pub(crate) struct Telemetry {
    rendered: Counter,
    skipped: Counter,
}

impl Telemetry {
    /// Creates a `Telemetry` instance bound to the current recorder.
    pub fn new() -> Self {
        Self {
            rendered: counter!("dashboard.metrics.rendered"),
            skipped: counter!("dashboard.metrics.skipped"),
        }
    }

    pub fn increment_rendered(&self) {
        self.rendered.increment(1);
    }

    pub fn increment_skipped(&self) {
        self.skipped.increment(1);
    }

    /// Records a failed computation for the given metric.
    pub fn increment_failed(&self, metric_id: &str) {
        counter!("dashboard.metrics.failed", "metric_id" => metric_id.to_owned()).increment(1);
    }
}
