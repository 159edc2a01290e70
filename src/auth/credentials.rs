//! Credential resolution.
//!
//! Email and password come from `--email`/`-e` and `--password`/`-p`, which
//! fall back to `IONIC_EMAIL` and `IONIC_PASSWORD`. Supplying both skips the
//! session cache entirely; supplying only one is a configuration error;
//! supplying neither allows a cached session or an interactive prompt.

use crate::constants::{EMAIL_ENV, PASSWORD_ENV};
use crate::core::IonicError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?$",
    )
    .ok()
});

/// Whether `email` looks like an account address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_some_and(|pattern| pattern.is_match(email.trim()))
}

/// Account credentials. Never persisted; `Debug` hides the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Email as submitted to the dashboard.
    #[must_use]
    pub fn username(&self) -> String {
        self.email.to_lowercase()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Values from flags or their environment fallbacks.
#[derive(Debug, Clone, Default)]
pub struct CredentialFlags {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// What the session manager should do with the supplied flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPlan {
    /// Both values given: log in with them and bypass the cache.
    UseFlags(Credentials),
    /// Neither given: try the cache, then prompt.
    CachedOrPrompt,
}

impl CredentialFlags {
    /// Decide the login path. Empty strings count as absent.
    pub fn plan(&self) -> Result<AuthPlan, IonicError> {
        let email = self.email.as_deref().filter(|value| !value.is_empty());
        let password = self.password.as_deref().filter(|value| !value.is_empty());

        match (email, password) {
            (Some(email), Some(password)) => {
                Ok(AuthPlan::UseFlags(Credentials::new(email, password)))
            }
            (None, Some(_)) => Err(IonicError::MissingCredential {
                flag: "--email or -e".to_string(),
                env: EMAIL_ENV.to_string(),
            }),
            (Some(_), None) => Err(IonicError::MissingCredential {
                flag: "--password or -p".to_string(),
                env: PASSWORD_ENV.to_string(),
            }),
            (None, None) => Ok(AuthPlan::CachedOrPrompt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    fn flags(email: Option<&str>, password: Option<&str>) -> CredentialFlags {
        CredentialFlags {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_both_flags() {
        let plan = flags(Some("Dev@Example.com"), Some("secret")).plan().unwrap();
        match plan {
            AuthPlan::UseFlags(credentials) => {
                assert_eq!(credentials.username(), "dev@example.com");
                assert_eq!(credentials.password, "secret");
            }
            AuthPlan::CachedOrPrompt => panic!("Expected UseFlags"),
        }
    }

    #[test]
    fn test_email_only() {
        let err = flags(Some("dev@example.com"), None).plan().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(
            err.to_string(),
            "--password or -p command line flag, or IONIC_PASSWORD environment variable required"
        );
    }

    #[test]
    fn test_password_only() {
        let err = flags(None, Some("secret")).plan().unwrap_err();
        assert_eq!(
            err.to_string(),
            "--email or -e command line flag, or IONIC_EMAIL environment variable required"
        );
    }

    #[test]
    fn test_neither_and_empty() {
        assert_eq!(flags(None, None).plan().unwrap(), AuthPlan::CachedOrPrompt);
        assert_eq!(flags(Some(""), Some("")).plan().unwrap(), AuthPlan::CachedOrPrompt);
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new("dev@example.com", "hunter2"));
        assert!(rendered.contains("dev@example.com"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("dev@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.io"));
        assert!(!is_valid_email("dev@"));
        assert!(!is_valid_email("not an email"));
        assert!(!is_valid_email("dev@example"));
        assert!(!is_valid_email(""));
    }
}
