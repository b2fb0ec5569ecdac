//! Progress output for ingestion
//!
//! Two phases report progress: blaming (one tick per file, message = path)
//! and caching (one tick per edit written to SQLite). Scanner and store only
//! see these traits, so tests and benches run them silently.

use indicatif::{ProgressBar, ProgressStyle};

/// One running phase
pub trait ProgressHandle: Send + Sync {
    /// Advance by `n` files (blame) or edits (cache)
    fn inc(&self, n: u64);
    /// Name the file currently being blamed
    fn set_message(&self, msg: &str);
    fn finish(&self);
}

/// Opens a handle per ingestion phase
pub trait ProgressReporter: Send + Sync {
    fn start(&self, label: &str, total: u64) -> Box<dyn ProgressHandle>;
}

/// Terminal bars on stderr, shown before the TUI takes over the screen
pub struct IndicatifProgress;

impl ProgressReporter for IndicatifProgress {
    fn start(&self, label: &str, total: u64) -> Box<dyn ProgressHandle> {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&format!(
                    "{{spinner:.green}} {}: [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {{wide_msg}}",
                    label
                ))
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        Box::new(IndicatifHandle(pb))
    }
}

struct IndicatifHandle(ProgressBar);

impl ProgressHandle for IndicatifHandle {
    fn inc(&self, n: u64) {
        self.0.inc(n);
    }

    fn set_message(&self, msg: &str) {
        self.0.set_message(msg.to_string());
    }

    fn finish(&self) {
        // Cleared so the alternate screen starts from a clean terminal
        self.0.finish_and_clear();
    }
}

/// Silent phases: `--quiet`, `--profile` (timings only), tests and benches
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn start(&self, _label: &str, _total: u64) -> Box<dyn ProgressHandle> {
        Box::new(NoopHandle)
    }
}

struct NoopHandle;

impl ProgressHandle for NoopHandle {
    fn inc(&self, _n: u64) {}
    fn set_message(&self, _msg: &str) {}
    fn finish(&self) {}
}

/// Bars when the scanner is verbose, nothing otherwise
pub struct VerboseProgress {
    verbose: bool,
}

impl VerboseProgress {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProgressReporter for VerboseProgress {
    fn start(&self, label: &str, total: u64) -> Box<dyn ProgressHandle> {
        if self.verbose {
            IndicatifProgress.start(label, total)
        } else {
            NoopProgress.start(label, total)
        }
    }
}
