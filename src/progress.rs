//! Progress reporting for download runs.
//!
//! The reporter is an explicit object handed to each component for the
//! lifetime of one run, never a process-wide singleton. It owns one overall
//! bar pre-seeded with the task count plus per-file bars under a
//! [`MultiProgress`]; the [`hidden`](ProgressReporter::hidden) constructor
//! keeps tests and non-TTY runs quiet while still tracking counts.

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Shared progress reporter for one batch run.
///
/// Cloning is cheap; all clones drive the same bars, and `indicatif` bars are
/// internally thread-safe, so concurrent tasks may update them freely.
#[derive(Clone)]
pub struct ProgressReporter {
    multi: MultiProgress,
    overall: ProgressBar,
}

impl ProgressReporter {
    /// Creates a reporter drawing to stderr, pre-seeded with the task count.
    #[must_use]
    pub fn new(total_tasks: u64) -> Self {
        Self::with_target(total_tasks, ProgressDrawTarget::stderr())
    }

    /// Creates a reporter that draws nothing but still tracks counts.
    #[must_use]
    pub fn hidden(total_tasks: u64) -> Self {
        Self::with_target(total_tasks, ProgressDrawTarget::hidden())
    }

    fn with_target(total_tasks: u64, target: ProgressDrawTarget) -> Self {
        let multi = MultiProgress::with_draw_target(target);
        let overall = multi.add(ProgressBar::new(total_tasks));
        overall.set_style(
            ProgressStyle::with_template("{bar:30.green} {pos}/{len} wallpapers")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { multi, overall }
    }

    /// Adds a per-file bar: byte-sized when the server advertises a
    /// content length, indeterminate otherwise.
    #[must_use]
    pub fn file_bar(&self, name: &str, total_bytes: Option<u64>) -> ProgressBar {
        let bar = match total_bytes {
            Some(len) => ProgressBar::new(len).with_style(
                ProgressStyle::with_template("{msg:24!} {bytes:>10}/{total_bytes} {bar:25}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            ),
            None => ProgressBar::new_spinner().with_style(
                ProgressStyle::with_template("{spinner} {msg:24!} {bytes}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            ),
        };
        bar.set_message(name.to_string());
        self.multi.add(bar)
    }

    /// Removes a per-file bar from the display.
    pub fn clear_file_bar(&self, bar: &ProgressBar) {
        bar.finish_and_clear();
        self.multi.remove(bar);
    }

    /// Advances the overall bar. Called exactly once per terminal task,
    /// success or failure, so the bar always ends at the task count.
    pub fn task_done(&self) {
        self.overall.inc(1);
    }

    /// Number of tasks reported terminal so far.
    #[must_use]
    pub fn tasks_done(&self) -> u64 {
        self.overall.position()
    }

    /// Clears the overall bar once the batch is terminal.
    pub fn finish(&self) {
        self.overall.finish_and_clear();
    }
}
