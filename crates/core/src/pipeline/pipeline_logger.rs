use std::collections::BTreeMap;
use std::time::Instant;

/// Sink for what a use case observes while it runs.
pub trait PipelineLogger: Send {
    /// `current` of `total` images are done.
    fn progress(&mut self, current: usize, total: usize);

    /// Milliseconds one image spent in `stage`.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// One sample of a per-image count such as `faces`.
    fn metric(&mut self, name: &str, value: f64);

    fn info(&mut self, message: &str);

    /// Called once after the last image.
    fn summary(&self) {}
}

/// Drops everything.
pub struct NullPipelineLogger;

impl PipelineLogger for NullPipelineLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Samples recorded under one stage or metric name.
#[derive(Debug, Default)]
struct Series {
    samples: Vec<f64>,
}

impl Series {
    fn total(&self) -> f64 {
        self.samples.iter().sum()
    }

    fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.total() / self.samples.len() as f64
        }
    }
}

/// Forwards events to `log` and keeps per-name series for a closing report.
///
/// Progress is logged every `every` images and always for the last one.
pub struct StdoutPipelineLogger {
    every: usize,
    stages: BTreeMap<String, Series>,
    counts: BTreeMap<String, Series>,
    started: Instant,
    images: usize,
}

impl StdoutPipelineLogger {
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            stages: BTreeMap::new(),
            counts: BTreeMap::new(),
            started: Instant::now(),
            images: 0,
        }
    }

    /// Report text, or `None` before anything was recorded.
    ///
    /// Names are listed alphabetically within stages and counts.
    pub fn summary_string(&self) -> Option<String> {
        if self.stages.is_empty() && self.counts.is_empty() {
            return None;
        }

        let mut report = vec![format!(
            "Processed {} image(s) in {:.2}s",
            self.images,
            self.started.elapsed().as_secs_f64()
        )];
        report.extend(self.stages.iter().map(|(stage, series)| {
            format!(
                "  {stage:<8} {:>3} run(s)  mean {:.2} ms  total {:.1} ms",
                series.samples.len(),
                series.mean(),
                series.total()
            )
        }));
        report.extend(self.counts.iter().map(|(name, series)| {
            format!(
                "  {name:<8} total {:.0}  mean {:.1} per image",
                series.total(),
                series.mean()
            )
        }));
        Some(report.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.stages.get(stage).map(|s| s.samples.as_slice())
    }

    pub fn metrics_for(&self, name: &str) -> Option<&[f64]> {
        self.counts.get(name).map(|s| s.samples.as_slice())
    }
}

impl Default for StdoutPipelineLogger {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PipelineLogger for StdoutPipelineLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.images = total;
        if total == 0 {
            return;
        }
        if current == total || current % self.every == 0 {
            log::info!("Image {current}/{total} done");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.stages
            .entry(stage.to_owned())
            .or_default()
            .samples
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.counts
            .entry(name.to_owned())
            .or_default()
            .samples
            .push(value);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(report) = self.summary_string() {
            log::info!("{report}");
        }
    }
}
