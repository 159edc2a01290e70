//! Cross-cutting utilities
//!
//! - [`fs`] - atomic writes, directory helpers and zip extraction
//! - [`http`] - the shared `reqwest` client factory
//! - [`progress`] - download progress bars
//! - [`prompt`] - interactive questions behind the [`prompt::Prompter`] trait

pub mod fs;
pub mod http;
pub mod progress;
pub mod prompt;

pub use fs::{atomic_write, ensure_dir};
pub use http::{ClientOptions, RedirectMode, build_client};
pub use prompt::{Prompter, TerminalPrompter, is_affirmative};
