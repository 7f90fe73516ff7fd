use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for censoring pipeline events.
///
/// Decouples use cases from specific output mechanisms (stdout, GUI signals,
/// log crate) so each caller can observe the pipeline without changing the
/// orchestration code.
pub trait CensorLogger: Send {
    /// Report block-level progress within one censoring pass.
    fn progress(&mut self, blocks_done: usize, blocks_total: usize);

    /// Record how long a named pipeline stage took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. face count, skipped regions).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent logger that discards all events.
pub struct NullCensorLogger;

impl CensorLogger for NullCensorLogger {
    fn progress(&mut self, _blocks_done: usize, _blocks_total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger that forwards to the `log` crate, tracks per-stage timing and
/// metrics, and reports a summary at the end of a run.
///
/// Progress is reported `progress_steps` times per pass (every 10% by
/// default) to avoid flooding the log on large regions.
pub struct LogCensorLogger {
    progress_steps: usize,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    start_time: Instant,
    reported: usize,
    messages: Vec<String>,
}

impl LogCensorLogger {
    pub fn new(progress_steps: usize) -> Self {
        Self {
            progress_steps: progress_steps.max(1),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            reported: 0,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.metrics.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Censor summary ({:.2}s total):",
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len().max(1) as f64;
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:7.1}ms  total {total_ms:7.0}ms  ({}x)",
                durations.len()
            ));
        }

        let mut metric_names: Vec<_> = self.metrics.keys().collect();
        metric_names.sort();
        for name in metric_names {
            let values = &self.metrics[name];
            let avg = values.iter().sum::<f64>() / values.len().max(1) as f64;
            lines.push(format!("  {name}: avg {avg:.1}"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.metrics.get(name).map(|v| v.as_slice())
    }

    /// Number of progress lines emitted so far.
    pub fn progress_reports(&self) -> usize {
        self.reported
    }
}

impl Default for LogCensorLogger {
    fn default() -> Self {
        Self::new(10)
    }
}

impl CensorLogger for LogCensorLogger {
    fn progress(&mut self, blocks_done: usize, blocks_total: usize) {
        if blocks_total == 0 {
            return;
        }
        let step = (blocks_total / self.progress_steps).max(1);
        if blocks_done % step == 0 {
            let pct = (blocks_done as f64 / blocks_total as f64 * 100.0).round();
            log::info!("    Progress: {pct}% ({blocks_done}/{blocks_total} blocks)");
            self.reported += 1;
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
