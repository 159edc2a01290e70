//! Dashboard login handshake and session reuse.

use super::credentials::{AuthPlan, CredentialFlags, Credentials, is_valid_email};
use super::session::Session;
use crate::constants::{LOGIN_PATH, SIGNUP_PATH};
use crate::core::IonicError;
use crate::store::Store;
use crate::utils::prompt::Prompter;
use chrono::Utc;
use reqwest::StatusCode;
use reqwest::header::{COOKIE, REFERER};
use tracing::{debug, info, warn};

/// Where the session returned by [`SessionManager::ensure_session`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Already established earlier in this process.
    Memory,
    /// Reused from the cookie store.
    Cache,
    /// Fresh login with flag or environment credentials.
    Flags,
    /// Fresh login with prompted credentials.
    Prompt,
}

impl SessionSource {
    /// Whether a login request was made to obtain the session.
    #[must_use]
    pub fn is_fresh(self) -> bool {
        matches!(self, Self::Flags | Self::Prompt)
    }
}

/// An established session and how it was obtained.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: Session,
    pub source: SessionSource,
}

/// Produces authenticated dashboard sessions.
///
/// The client must not follow redirects: the dashboard answers a successful
/// form post with `302 Found`.
pub struct SessionManager {
    dashboard_url: String,
    client: reqwest::Client,
    store: Store,
    current: Option<Session>,
}

impl SessionManager {
    pub fn new(dashboard_url: &str, client: reqwest::Client, store: Store) -> Self {
        Self {
            dashboard_url: dashboard_url.trim_end_matches('/').to_string(),
            client,
            store,
            current: None,
        }
    }

    #[must_use]
    pub fn dashboard_url(&self) -> &str {
        &self.dashboard_url
    }

    /// The session established by this manager, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// The persisted session for this dashboard, valid or not.
    #[must_use]
    pub fn cached_session(&self) -> Option<Session> {
        self.store.get::<Session>(&self.dashboard_url)
    }

    /// Return a usable session, logging in if necessary.
    ///
    /// Resolution order: the in-process session, then explicit credentials
    /// (never cached), then a valid stored session, then an interactive prompt
    /// whose result is persisted.
    pub async fn ensure_session(
        &mut self,
        flags: &CredentialFlags,
        prompter: &dyn Prompter,
    ) -> Result<LoginOutcome, IonicError> {
        if let Some(session) = &self.current {
            debug!("Reusing in-memory session for {}", self.dashboard_url);
            return Ok(LoginOutcome {
                session: session.clone(),
                source: SessionSource::Memory,
            });
        }

        let (session, source) = match flags.plan()? {
            AuthPlan::UseFlags(credentials) => {
                let session = self.authenticate(&credentials).await?;
                (session, SessionSource::Flags)
            }
            AuthPlan::CachedOrPrompt => match self.valid_cached_session() {
                Some(session) => {
                    debug!("Using stored session for {}", self.dashboard_url);
                    (session, SessionSource::Cache)
                }
                None => {
                    let credentials = self.prompt_credentials(prompter)?;
                    let session = self.authenticate(&credentials).await?;
                    self.persist(&session).await;
                    (session, SessionSource::Prompt)
                }
            },
        };

        if source.is_fresh() {
            prompter.message("Logged in! :)");
        }

        self.current = Some(session.clone());
        Ok(LoginOutcome {
            session,
            source,
        })
    }

    fn valid_cached_session(&self) -> Option<Session> {
        self.cached_session().filter(|session| session.is_valid_at(Utc::now()))
    }

    fn prompt_credentials(&self, prompter: &dyn Prompter) -> Result<Credentials, IonicError> {
        prompter.message("\nTo continue, please login to your Ionic account.");
        prompter.message(&format!(
            "Don't have one? Create one at: {}{SIGNUP_PATH}\n",
            self.dashboard_url
        ));

        let email = loop {
            let answer = prompter.input("Email: ")?;
            let answer = answer.trim().to_string();
            if is_valid_email(&answer) {
                break answer;
            }
            prompter.message("Invalid email");
        };
        let password = prompter.password("Password: ")?;

        Ok(Credentials::new(email, password))
    }

    /// Perform the two-step form login and return the resulting cookies.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Session, IonicError> {
        let login_url = format!("{}{LOGIN_PATH}", self.dashboard_url);
        let mut session = Session::new(self.dashboard_url.clone());

        info!("Logging in to {}", self.dashboard_url);
        let response = self
            .client
            .get(&login_url)
            .send()
            .await
            .map_err(|e| IonicError::network("logging in", &e))?;
        session.absorb(response.headers(), Utc::now());

        let Some(token) = session.csrf_token().map(str::to_string) else {
            return Err(IonicError::LoginFailed {
                reason: "the dashboard did not issue a session cookie".to_string(),
            });
        };

        let mut request = self.client.post(&login_url).header(REFERER, &login_url).form(&[
            ("username", credentials.username()),
            ("password", credentials.password.clone()),
            ("csrfmiddlewaretoken", token),
        ]);
        if let Some(cookies) = session.cookie_header() {
            request = request.header(COOKIE, cookies);
        }

        let response = request.send().await.map_err(|e| IonicError::network("logging in", &e))?;
        let status = response.status();
        debug!("Login form answered {status}");

        if status == StatusCode::FOUND {
            session.absorb(response.headers(), Utc::now());
            return Ok(session);
        }
        if status.is_server_error() {
            return Err(IonicError::RemoteStatus {
                operation: "Login".to_string(),
                status: status.as_u16(),
            });
        }
        Err(IonicError::InvalidCredentials {
            dashboard: self.dashboard_url.clone(),
        })
    }

    async fn persist(&mut self, session: &Session) {
        let result = match self.store.set(&self.dashboard_url, session) {
            Ok(()) => self.store.save().await,
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!("Logged in, but the session could not be saved to {}: {e}", self.store.path().display());
        }
    }
}
