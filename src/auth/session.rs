//! Cookie-bearing dashboard sessions.
//!
//! A [`Session`] is the cookie jar collected during the login handshake for
//! one dashboard origin. It is usable while it holds a `sessionid` cookie
//! whose expiry is still in the future.

use crate::constants::SESSION_COOKIE;
use chrono::{DateTime, NaiveDateTime, TimeDelta, TimeZone, Utc};
use reqwest::header::{HeaderMap, SET_COOKIE};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    /// `None` for session cookies that carried no expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl Cookie {
    /// Parse a `Set-Cookie` header value received at `now`.
    ///
    /// `Max-Age` takes precedence over `Expires`. Attributes other than the
    /// expiry are ignored.
    #[must_use]
    pub fn parse_set_cookie(header: &str, now: DateTime<Utc>) -> Option<Self> {
        let mut parts = header.split(';');
        let (name, value) = parts.next()?.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut max_age = None;
        let mut expires = None;
        for attribute in parts {
            let Some((key, raw)) = attribute.split_once('=') else {
                continue;
            };
            let raw = raw.trim();
            if key.trim().eq_ignore_ascii_case("max-age") {
                max_age = raw.parse::<i64>().ok();
            } else if key.trim().eq_ignore_ascii_case("expires") {
                expires = parse_cookie_date(raw);
            }
        }

        let expires = match max_age {
            Some(seconds) => Some(expiry_after(now, seconds)),
            None => expires,
        };

        Some(Self {
            name: name.to_string(),
            value: value.trim().trim_matches('"').to_string(),
            expires,
        })
    }

    /// `true` once the expiry has passed. Cookies without one never expire here.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// `now + seconds`, clamped to the last instant of year 9999 so the stored
/// session still round-trips through RFC 3339.
fn expiry_after(now: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    if seconds <= 0 {
        return now;
    }
    let latest = Utc
        .with_ymd_and_hms(9999, 12, 31, 23, 59, 59)
        .single()
        .unwrap_or(DateTime::<Utc>::MAX_UTC);
    TimeDelta::try_seconds(seconds)
        .and_then(|delta| now.checked_add_signed(delta))
        .map_or(latest, |expires| expires.min(latest))
}

/// Accepts RFC 1123 dates and the dashed `Wdy, DD-Mon-YYYY` variant.
fn parse_cookie_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%a, %d-%b-%Y %H:%M:%S GMT")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Cookies collected for one dashboard origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    origin: String,
    #[serde(default)]
    cookies: Vec<Cookie>,
}

impl Session {
    #[must_use]
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            cookies: Vec::new(),
        }
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Cookies in the order they were first set.
    #[must_use]
    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Whether a `sessionid` cookie outlives `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.cookies.iter().any(|cookie| {
            cookie.name == SESSION_COOKIE && cookie.expires.is_some_and(|expires| expires > now)
        })
    }

    /// Add or replace a cookie by name; an already-expired cookie deletes it.
    pub fn insert(&mut self, cookie: Cookie, now: DateTime<Utc>) {
        let expired = cookie.is_expired_at(now);
        match self.cookies.iter().position(|existing| existing.name == cookie.name) {
            Some(index) if expired => {
                self.cookies.remove(index);
            }
            Some(index) => self.cookies[index] = cookie,
            None if expired => {}
            None => self.cookies.push(cookie),
        }
    }

    /// Take every `Set-Cookie` header of a response. Returns how many parsed.
    pub fn absorb(&mut self, headers: &HeaderMap, now: DateTime<Utc>) -> usize {
        let mut count = 0;
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else {
                continue;
            };
            if let Some(cookie) = Cookie::parse_set_cookie(raw, now) {
                debug!("Received cookie '{}'", cookie.name);
                self.insert(cookie, now);
                count += 1;
            }
        }
        count
    }

    /// `Cookie` request header value, or `None` for an empty jar.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|cookie| format!("{}={}", cookie.name, cookie.value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }

    /// Anti-forgery token submitted with the login form: the first cookie's value.
    #[must_use]
    pub fn csrf_token(&self) -> Option<&str> {
        self.cookies.first().map(|cookie| cookie.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use reqwest::header::HeaderValue;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn cookie(name: &str, expires: Option<DateTime<Utc>>) -> Cookie {
        Cookie {
            name: name.to_string(),
            value: format!("{name}-value"),
            expires,
        }
    }

    #[test]
    fn test_parse_expires_rfc1123() {
        let cookie = Cookie::parse_set_cookie(
            "sessionid=abc123; expires=Sat, 31 Oct 2026 12:00:00 GMT; HttpOnly; Path=/",
            now(),
        )
        .unwrap();

        assert_eq!(cookie.name, "sessionid");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.expires, Some(Utc.with_ymd_and_hms(2026, 10, 31, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_parse_expires_dashed() {
        let cookie =
            Cookie::parse_set_cookie("csrftoken=tok; expires=Sat, 16-Oct-2027 12:00:00 GMT", now())
                .unwrap();
        assert_eq!(cookie.expires, Some(Utc.with_ymd_and_hms(2027, 10, 16, 12, 0, 0).unwrap()));
    }

    #[test]
    fn test_max_age_wins() {
        let cookie = Cookie::parse_set_cookie(
            "sessionid=abc; Max-Age=60; expires=Sat, 31 Oct 2026 12:00:00 GMT",
            now(),
        )
        .unwrap();
        assert_eq!(cookie.expires, Some(now() + Duration::seconds(60)));
    }

    #[test]
    fn test_huge_max_age_is_clamped() {
        let far_future = Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap();

        let cookie = Cookie::parse_set_cookie("sessionid=x; Max-Age=10000000000000", now()).unwrap();
        assert_eq!(cookie.expires, Some(far_future));

        let cookie =
            Cookie::parse_set_cookie("sessionid=x; Max-Age=99999999999999999", now()).unwrap();
        assert_eq!(cookie.expires, Some(far_future));

        let mut session = Session::new("origin");
        session.insert(cookie, now());
        assert!(session.is_valid_at(now()));

        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(serde_json::from_str::<Session>(&json).unwrap(), session);
    }

    #[test]
    fn test_non_positive_max_age_is_expired() {
        for header in ["sessionid=x; Max-Age=0", "sessionid=x; Max-Age=-99999999999999999"] {
            let cookie = Cookie::parse_set_cookie(header, now()).unwrap();
            assert!(cookie.is_expired_at(now()), "{header}");
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Cookie::parse_set_cookie("no-equals-sign", now()).is_none());
        assert!(Cookie::parse_set_cookie("=value", now()).is_none());
    }

    #[test]
    fn test_validity_requires_future_sessionid() {
        let mut session = Session::new("https://apps.ionicframework.com");
        assert!(!session.is_valid_at(now()));

        session.insert(cookie("csrftoken", Some(now() + Duration::days(300))), now());
        assert!(!session.is_valid_at(now()));

        session.insert(cookie("sessionid", None), now());
        assert!(!session.is_valid_at(now()), "sessionid without expiry is not reusable");

        session.insert(cookie("sessionid", Some(now() + Duration::days(14))), now());
        assert!(session.is_valid_at(now()));
        assert!(!session.is_valid_at(now() + Duration::days(15)));
    }

    #[test]
    fn test_insert_replaces_and_deletes() {
        let mut session = Session::new("origin");
        session.insert(cookie("csrftoken", None), now());
        session.insert(cookie("sessionid", None), now());
        session.insert(
            Cookie {
                name: "csrftoken".to_string(),
                value: "new".to_string(),
                expires: None,
            },
            now(),
        );

        assert_eq!(session.cookies().len(), 2);
        assert_eq!(session.csrf_token(), Some("new"));

        session.insert(cookie("sessionid", Some(now() - Duration::seconds(1))), now());
        assert_eq!(session.cookies().len(), 1);
    }

    #[test]
    fn test_absorb_and_header() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("csrftoken=tok; Path=/"));
        headers.append(SET_COOKIE, HeaderValue::from_static("sessionid=sid; Max-Age=3600"));

        let mut session = Session::new("origin");
        assert_eq!(session.absorb(&headers, now()), 2);
        assert_eq!(session.cookie_header().as_deref(), Some("csrftoken=tok; sessionid=sid"));
        assert_eq!(session.csrf_token(), Some("tok"));
        assert!(session.is_valid_at(now()));
    }

    #[test]
    fn test_serde_round_trip_keeps_expiry() {
        let mut session = Session::new("https://apps.ionicframework.com");
        session.insert(cookie("sessionid", Some(now() + Duration::days(1))), now());

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
        assert!(restored.is_valid_at(now()));
    }
}
