//! File system utilities
//!
//! - [`atomic`] - temp-file-and-rename writes for persisted state
//! - [`dirs`] - directory creation and tolerant file removal
//! - [`archive`] - zip extraction with path containment
//!
//! # Examples
//!
//! ```rust,no_run
//! use ionic_cli::utils::fs::{atomic_write, ensure_dir};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! ensure_dir(Path::new("www/lib"))?;
//! atomic_write(Path::new("state/cookies.json"), b"{}", true)?;
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod atomic;
pub mod dirs;

pub use archive::{extract_zip, extract_zip_async};
pub use atomic::atomic_write;
pub use dirs::{ensure_dir, remove_file_if_exists};
