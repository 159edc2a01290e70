//! Ionic dashboard authentication.
//!
//! Logging in is a two-request form handshake against the dashboard: a `GET`
//! of the login page establishes the cookie jar and its anti-forgery token,
//! then a `POST` of the credentials succeeds only with `302 Found`. Sessions
//! obtained through the interactive prompt are persisted in the `cookies`
//! [`Store`](crate::store::Store), keyed by dashboard URL, and reused until
//! their `sessionid` cookie expires.
//!
//! # Credential sources
//!
//! | Email | Password | Result |
//! |-------|----------|--------|
//! | set   | set      | log in now, do not persist |
//! | set   | unset    | configuration error |
//! | unset | set      | configuration error |
//! | unset | unset    | stored session, else prompt and persist |

pub mod credentials;
pub mod login;
pub mod session;


pub use credentials::{AuthPlan, CredentialFlags, Credentials, is_valid_email};
pub use login::{LoginOutcome, SessionManager, SessionSource};
pub use session::{Cookie, Session};
