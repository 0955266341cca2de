//! Spinner shown on stderr while the scan runs.

use indicatif::{ProgressBar, ProgressStyle};
use std::borrow::Cow;
use std::time::Duration;

/// Animated spinner ticking on its own thread.
///
/// It only displays what it is told; it never looks at scan state.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    /// Start spinning with an initial message
    pub fn start(message: impl Into<Cow<'static, str>>) -> Self {
        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.yellow} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["|", "/", "-", "\\", " "]);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(message);
        Self { pb }
    }

    /// A spinner that draws nothing
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn set_message(&self, message: impl Into<Cow<'static, str>>) {
        self.pb.set_message(message);
    }

    /// Stop the tick thread and erase the spinner line
    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner_lifecycle() {
        let spinner = Spinner::hidden();
        spinner.set_message("Scanning: src");
        spinner.finish();
    }

    #[test]
    fn test_spinner_finishes() {
        let spinner = Spinner::start("Scanning");
        spinner.set_message(format!("Scanning: {}", "target"));
        spinner.finish();
    }
}
