//! Core types shared by every workflow.
//!
//! Currently this is the error layer: [`IonicError`] for typed failures and
//! [`user_friendly_error`] for presenting them.

pub mod error;

pub use error::{ErrorContext, ErrorKind, IonicError, user_friendly_error};
