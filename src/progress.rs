//! Progress feedback for batch rating runs.
//!
//! Both pipeline stages report per-facility progress through `indicatif`.
//! Bars are suppressed in quiet mode (the `--quiet` flag or the
//! `CARESCORE_QUIET` env var) and whenever stderr is not a terminal, so
//! scheduled runs and piped output stay clean.

use indicatif::{ProgressBar, ProgressStyle};

pub const TEMPLATE_SCORING: &str = "{msg} {pos}/{len} facilities ({percent}%) - {eta}";
pub const TEMPLATE_RATING: &str = "{msg} {pos}/{len} facilities ({percent}%) - {eta}";

/// Configuration for progress display behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressConfig {
    /// Whether to suppress all progress output.
    pub quiet: bool,
}

impl ProgressConfig {
    /// Create progress configuration from environment and CLI arguments.
    pub fn from_env(quiet: bool) -> Self {
        let env_quiet = std::env::var("CARESCORE_QUIET").is_ok();
        Self {
            quiet: quiet || env_quiet,
        }
    }

    pub fn hidden() -> Self {
        Self { quiet: true }
    }

    /// Determine if progress bars should be displayed.
    pub fn should_show(&self) -> bool {
        if self.quiet {
            return false;
        }
        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }

    /// Create a progress bar for `len` facilities.
    ///
    /// Returns a hidden bar when progress should not be shown, so call
    /// sites never branch.
    pub fn bar(&self, len: u64, template: &str, msg: &str) -> ProgressBar {
        if !self.should_show() {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .expect("Invalid progress bar template")
                .progress_chars("█▓▒░  "),
        );
        pb.set_message(msg.to_string());
        pb
    }
}
