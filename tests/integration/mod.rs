//! Integration test suite for the Ionic CLI
//!
//! Drives the `ionic` binary end to end against a scripted local HTTP server
//! standing in for the code host and the dashboard.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: argument parsing, help and error presentation
//! - **library**: `ionic lib` and `ionic lib update`
//! - **login**: `ionic login` credential sources and session reuse

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod library;
mod login;
