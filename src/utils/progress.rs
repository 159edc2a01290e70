//! Progress indicators for long-running operations
//!
//! Thin wrapper over [`indicatif`] used for archive downloads. Bars are
//! replaced by hidden no-op bars when progress is disabled, so callers never
//! branch on whether output is visible.
//!
//! # Environment Variables
//!
//! - `IONIC_NO_PROGRESS`: Set to any value to disable all progress indicators
//!
//! # Examples
//!
//! ```rust,no_run
//! use ionic_cli::utils::progress::ProgressBar;
//!
//! let pb = ProgressBar::download(Some(1024), true);
//! pb.set_prefix("ionic-v1.3.0.zip");
//! pb.inc(512);
//! pb.inc(512);
//! pb.finish_and_clear();
//! ```

use crate::constants::NO_PROGRESS_ENV;
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

/// Whether progress output is allowed, combining the CLI flag and `IONIC_NO_PROGRESS`.
#[must_use]
pub fn progress_enabled(no_progress_flag: bool) -> bool {
    !no_progress_flag && std::env::var_os(NO_PROGRESS_ENV).is_none()
}

/// Progress bar that is either visible or a hidden no-op.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Byte-counting bar for a download.
    ///
    /// With a known total this renders `[bar] percent eta`; without one it
    /// falls back to a spinner showing the bytes received so far.
    #[must_use]
    pub fn download(total: Option<u64>, enabled: bool) -> Self {
        if !enabled {
            return Self::hidden();
        }

        let bar = match total {
            Some(len) => {
                let bar = IndicatifBar::new(len);
                bar.set_style(download_style());
                bar
            }
            None => {
                let bar = IndicatifBar::new_spinner();
                bar.set_style(spinner_style());
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };
        Self { inner: bar }
    }

    /// A bar that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    pub fn set_prefix(&self, prefix: impl Into<String>) {
        self.inner.set_prefix(prefix.into());
    }

    pub fn inc(&self, delta: u64) {
        self.inner.inc(delta);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.inner.position()
    }

    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }
}

fn download_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{prefix:.bold.cyan} [{bar:40.cyan/blue}] {percent}% {bytes}/{total_bytes} ({eta})")
        .unwrap_or_else(|_| IndicatifStyle::default_bar())
        .progress_chars("━╸━")
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{prefix:.bold.cyan} {spinner:.cyan} {bytes}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_still_counts() {
        let pb = ProgressBar::download(Some(100), false);
        pb.inc(40);
        pb.inc(60);
        assert_eq!(pb.position(), 100);
        pb.finish_and_clear();
    }

    #[test]
    fn test_unknown_length_bar() {
        let pb = ProgressBar::hidden();
        pb.set_prefix("ionic.zip");
        pb.inc(7);
        assert_eq!(pb.position(), 7);
    }

    #[test]
    fn test_flag_disables_progress() {
        assert!(!progress_enabled(true));
    }

    #[test]
    #[serial_test::serial]
    fn test_env_disables_progress() {
        // SAFETY: serialized with every other test that touches this variable.
        unsafe { std::env::set_var(NO_PROGRESS_ENV, "1") };
        let enabled = progress_enabled(false);
        unsafe { std::env::remove_var(NO_PROGRESS_ENV) };

        assert!(!enabled);
    }
}
