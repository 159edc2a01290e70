//! Error handling for the Ionic CLI
//!
//! This module provides the typed error used by the library and login
//! workflows, plus the user-facing presentation layer that turns any error
//! into a colored message with an actionable suggestion.
//!
//! # Architecture
//!
//! - [`IonicError`] - Enumerated failure cases, each carrying the context a
//!   user needs (paths, versions, HTTP statuses)
//! - [`ErrorKind`] - Coarse classification used by callers that branch on the
//!   category of a failure rather than the exact variant
//! - [`ErrorContext`] - Wrapper that adds suggestions and details for display
//!
//! Workflows return `Result<_, IonicError>` and never print or exit; only the
//! binary entry point converts a failure into a message via
//! [`user_friendly_error`] and exits with status 1.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ionic_cli::core::{IonicError, ErrorKind, user_friendly_error};
//!
//! let error = IonicError::VersionNotFound { version: "9.9.9".to_string() };
//! assert_eq!(error.kind(), ErrorKind::Remote);
//!
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Coarse category of an [`IonicError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Project layout, credential pairing or configuration file problems.
    Configuration,
    /// The request never produced an HTTP response.
    Network,
    /// The server answered, but not with what the workflow needed.
    Remote,
    /// Local files could not be read, written, moved or extracted.
    LocalState,
    /// The user declined a confirmation or input could not be read.
    UserAbort,
}

/// The main error type for Ionic CLI operations
///
/// Every workflow failure is one of these variants. The `Display` text is the
/// message shown to the user, so variants that mirror well-known CLI output
/// (`Invalid version: X`, `Email or Password incorrect...`) keep that exact
/// wording.
#[derive(Error, Debug, Clone)]
pub enum IonicError {
    /// The working directory is not an Ionic project
    ///
    /// Raised when `<project>/www` does not exist.
    #[error("Not an Ionic project: no www directory found in {path}")]
    ProjectNotFound {
        /// Directory that was checked
        path: String,
    },

    /// Exactly one of email/password was supplied through flags or environment
    #[error("{flag} command line flag, or {env} environment variable required")]
    MissingCredential {
        /// Flag spelling shown to the user, e.g. `--email or -e`
        flag: String,
        /// Environment variable that can supply the value
        env: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Transport-level failure (DNS, connect, TLS, reset)
    #[error("Network error while {operation}: {reason}")]
    NetworkError {
        /// What was being attempted, e.g. "downloading archive"
        operation: String,
        /// Underlying transport error
        reason: String,
    },

    /// The registry has no archive for the requested version (HTTP 404)
    #[error("Invalid version: {version}")]
    VersionNotFound {
        /// Requested version
        version: String,
    },

    /// The archive download returned an HTTP error other than 404
    #[error("Unable to download zip ({status})")]
    DownloadFailed {
        /// HTTP status code
        status: u16,
    },

    /// The connection closed before the declared content length arrived
    #[error("Incomplete download: received {received} of {expected} bytes")]
    IncompleteDownload {
        /// Bytes written to disk
        received: u64,
        /// Bytes announced by `Content-Length`
        expected: u64,
    },

    /// `latest.json` could not be parsed
    #[error("Invalid version metadata from {url}: {reason}")]
    InvalidMetadata {
        /// URL that was fetched
        url: String,
        /// Parse failure
        reason: String,
    },

    /// The dashboard rejected the submitted credentials
    #[error("Email or Password incorrect. Please visit {dashboard} for help.")]
    InvalidCredentials {
        /// Dashboard base URL
        dashboard: String,
    },

    /// The login handshake could not start
    #[error("Error logging in: {reason}")]
    LoginFailed {
        /// Why the handshake failed
        reason: String,
    },

    /// A request returned an unexpected HTTP status
    #[error("{operation} failed with HTTP status {status}")]
    RemoteStatus {
        /// What was being attempted
        operation: String,
        /// HTTP status code
        status: u16,
    },

    /// A local version descriptor exists but cannot be read or parsed
    #[error("Unable to read version descriptor {path}: {reason}")]
    VersionDescriptorUnreadable {
        /// Descriptor path
        path: String,
        /// Read or parse failure
        reason: String,
    },

    /// File system operation failed
    #[error("File system error during {operation} on {path}: {reason}")]
    FileSystemError {
        /// Operation, e.g. "move aside", "create directory"
        operation: String,
        /// Path involved
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// The downloaded archive could not be extracted
    #[error("Failed to extract archive {path}: {reason}")]
    ArchiveError {
        /// Archive path
        path: String,
        /// Extraction failure
        reason: String,
    },

    /// The package manager executable is not on PATH
    #[error("{name} is not installed or not found in PATH")]
    PackageManagerNotFound {
        /// Executable name
        name: String,
    },

    /// The package manager exited unsuccessfully
    #[error("'{command}' exited with {status}")]
    PackageManagerFailed {
        /// Full command line
        command: String,
        /// Exit status description
        status: String,
    },

    /// The user answered anything other than yes to a confirmation
    #[error("Update cancelled")]
    UserDeclined,

    /// Interactive input could not be read
    #[error("Failed to read input: {reason}")]
    PromptFailed {
        /// Underlying I/O failure
        reason: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl IonicError {
    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ProjectNotFound { .. }
            | Self::MissingCredential { .. }
            | Self::ConfigError { .. } => ErrorKind::Configuration,
            Self::NetworkError { .. } => ErrorKind::Network,
            Self::VersionNotFound { .. }
            | Self::DownloadFailed { .. }
            | Self::IncompleteDownload { .. }
            | Self::InvalidMetadata { .. }
            | Self::InvalidCredentials { .. }
            | Self::LoginFailed { .. }
            | Self::RemoteStatus { .. } => ErrorKind::Remote,
            Self::VersionDescriptorUnreadable { .. }
            | Self::FileSystemError { .. }
            | Self::ArchiveError { .. }
            | Self::PackageManagerNotFound { .. }
            | Self::PackageManagerFailed { .. }
            | Self::Other { .. } => ErrorKind::LocalState,
            Self::UserDeclined | Self::PromptFailed { .. } => ErrorKind::UserAbort,
        }
    }

    /// Shorthand for a [`IonicError::FileSystemError`] built from an I/O failure.
    pub fn file_system(
        operation: impl Into<String>,
        path: &std::path::Path,
        source: &std::io::Error,
    ) -> Self {
        Self::FileSystemError {
            operation: operation.into(),
            path: path.display().to_string(),
            reason: source.to_string(),
        }
    }

    /// Shorthand for a [`IonicError::NetworkError`] built from a transport failure.
    pub fn network(operation: impl Into<String>, source: &reqwest::Error) -> Self {
        Self::NetworkError {
            operation: operation.into(),
            reason: source.to_string(),
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// Displayed by the binary as three colored lines: the error in red, details
/// in yellow and the suggestion in green.
///
/// # Examples
///
/// ```rust,no_run
/// use ionic_cli::core::{IonicError, ErrorContext};
///
/// let context = ErrorContext::new(IonicError::UserDeclined)
///     .with_suggestion("Re-run with --yes to skip the confirmation");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: IonicError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: IonicError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, shown in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add an explanation of what went wrong, shown in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`]
///
/// [`IonicError`] values (including ones wrapped in `anyhow` context) get a
/// tailored suggestion. An [`ErrorContext`] that was attached deliberately
/// is passed through with its own details. Anything else is shown with its
/// full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    if let Some(ionic_error) = error.downcast_ref::<IonicError>() {
        return create_error_context(ionic_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(IonicError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                    reason: io_error.to_string(),
                })
                .with_suggestion("Check the ownership and permissions of the project and ~/.ionic directories");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(IonicError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                    reason: io_error.to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(IonicError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in ~/.ionic/config.toml or the file passed to --config");
    }

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(IonicError::Other { message })
}

fn create_error_context(error: IonicError) -> ErrorContext {
    match error {
        IonicError::ProjectNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Run this command from the root of an Ionic project, or pass --project-dir")
            .with_details("The library lives under www/lib/ionic, so a www directory is required"),

        IonicError::MissingCredential { .. } => ErrorContext::new(error)
            .with_suggestion("Supply both --email and --password, or neither to log in interactively"),

        IonicError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check ~/.ionic/config.toml or the file passed to --config"),

        IonicError::NetworkError { .. } => ErrorContext::new(error)
            .with_suggestion("Check your internet connection. If you are behind a proxy, set the PROXY environment variable"),

        IonicError::VersionNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'ionic lib' to see the latest published version")
            .with_details("The library directory was restored to its previous contents"),

        IonicError::DownloadFailed { .. } | IonicError::IncompleteDownload { .. } => {
            ErrorContext::new(error)
                .with_suggestion("Try again later")
                .with_details("The library directory was restored to its previous contents")
        }

        IonicError::InvalidMetadata { .. } | IonicError::RemoteStatus { .. } => {
            ErrorContext::new(error).with_suggestion("The server may be having problems. Try again later")
        }

        IonicError::InvalidCredentials { .. } => ErrorContext::new(error),

        IonicError::LoginFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the dashboard URL is reachable and try again"),

        IonicError::VersionDescriptorUnreadable { .. } => ErrorContext::new(error)
            .with_suggestion("Restore the descriptor or remove www/lib/ionic and run 'ionic lib update'"),

        IonicError::FileSystemError { .. } => ErrorContext::new(error)
            .with_suggestion("Check file permissions and available disk space"),

        IonicError::ArchiveError { .. } => ErrorContext::new(error)
            .with_suggestion("The downloaded archive may be corrupt. Try the update again")
            .with_details("The library directory was restored to its previous contents"),

        IonicError::PackageManagerNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Install Bower with 'npm install -g bower'")
            .with_details("This project manages the library with Bower (www/lib/ionic/bower.json)"),

        IonicError::PackageManagerFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'bower update ionic' manually to see the full output"),

        IonicError::UserDeclined => ErrorContext::new(error)
            .with_details("No files were changed"),

        IonicError::PromptFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Run in an interactive terminal, or supply the answer with flags"),

        IonicError::Other { .. } => ErrorContext::new(error),
    }
}
