// Session authentication
//
// Cookie-based login/logout. The daemon issues an opaque session cookie
// (normally `SID`) on login; the client stores exactly what the server sent
// and replays it on every later request. Nothing here refreshes or
// regenerates the cookie.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::catalog;
use crate::client::Client;
use crate::endpoint::{Args, Endpoint};
use crate::error::Error;

/// Body the daemon sends with a 200 when the credentials are wrong.
const LOGIN_REJECTED_BODY: &str = "Fails.";

/// The authentication cookie of a session.
///
/// The value is kept secret so it never appears in `Debug` output or logs.
#[derive(Clone)]
pub struct SessionCookie {
    name: String,
    value: SecretString,
    path: Option<String>,
    domain: Option<String>,
    expires: Option<SystemTime>,
    max_age: Option<Duration>,
    secure: bool,
    http_only: bool,
}

impl SessionCookie {
    /// A bare `name=value` cookie without attributes.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: SecretString::from(value.into()),
            path: None,
            domain: None,
            expires: None,
            max_age: None,
            secure: false,
            http_only: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &SecretString {
        &self.value
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn expires(&self) -> Option<SystemTime> {
        self.expires
    }

    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn http_only(&self) -> bool {
        self.http_only
    }

    /// Whether the server-declared expiry date has passed.
    ///
    /// Informational only: the cookie is still sent, the daemon decides.
    pub fn is_expired(&self) -> bool {
        self.expires.is_some_and(|at| at <= SystemTime::now())
    }

    /// `name=value`, as sent in the `Cookie` request header.
    pub fn header_value(&self) -> String {
        format!("{}={}", self.name, self.value.expose_secret())
    }
}

impl From<&reqwest::cookie::Cookie<'_>> for SessionCookie {
    fn from(cookie: &reqwest::cookie::Cookie<'_>) -> Self {
        Self {
            name: cookie.name().to_owned(),
            value: SecretString::from(cookie.value().to_owned()),
            path: cookie.path().map(str::to_owned),
            domain: cookie.domain().map(str::to_owned),
            expires: cookie.expires(),
            max_age: cookie.max_age(),
            secure: cookie.secure(),
            http_only: cookie.http_only(),
        }
    }
}

impl FromStr for SessionCookie {
    type Err = Error;

    /// Parse a `name=value` pair, e.g. a cookie saved from an earlier login.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pair = s.split(';').next().unwrap_or_default().trim();
        match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => {
                Ok(Self::new(name.trim(), value.trim()))
            }
            _ => Err(Error::Construction {
                operation: "SessionCookie",
                message: format!("expected 'name=value', got '{pair}'"),
            }),
        }
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookie")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .field("path", &self.path)
            .field("domain", &self.domain)
            .field("expires", &self.expires)
            .field("max_age", &self.max_age)
            .field("secure", &self.secure)
            .field("http_only", &self.http_only)
            .finish()
    }
}

impl Client {
    /// Authenticate with username and password.
    ///
    /// `POST /api/v2/auth/login` with a form body. On HTTP 200 the first
    /// cookie of the response replaces any stored credential. Any other
    /// status leaves the stored credential untouched.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let endpoint = &catalog::LOGIN;
        let args = Args::new()
            .text("username", username)
            .text("password", password.expose_secret());

        let resp = self.send(endpoint, &args).await?;
        let status = resp.status();

        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "login rejected");
            let message = if status == StatusCode::FORBIDDEN {
                "client IP is banned after too many failed attempts".to_owned()
            } else {
                format!("login failed with status code: {}", status.as_u16())
            };
            return Err(Error::AuthenticationFailed {
                status: status.as_u16(),
                message: if body.is_empty() {
                    message
                } else {
                    format!("{message} ({})", body.trim())
                },
            });
        }

        let cookie = resp.cookies().next().map(|c| SessionCookie::from(&c));
        let body = resp.text().await?;

        if body.trim() == LOGIN_REJECTED_BODY {
            warn!("login rejected: invalid username or password");
            return Err(Error::AuthenticationFailed {
                status: status.as_u16(),
                message: "invalid username or password".into(),
            });
        }

        let cookie = cookie.ok_or_else(|| Error::Protocol {
            operation: endpoint.name,
            message: "login succeeded but the response set no cookie".into(),
        })?;

        debug!(cookie = cookie.name(), "login successful");
        *self.session.write().await = Some(cookie);
        Ok(())
    }

    /// End the current session.
    ///
    /// `POST /api/v2/auth/logout` with the stored cookie. On HTTP 200 the
    /// credential is cleared; otherwise it is kept.
    pub async fn logout(&self) -> Result<(), Error> {
        let resp = self.send(&catalog::LOGOUT, &Args::new()).await?;
        let status = resp.status();

        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "logout rejected");
            return Err(Error::AuthenticationFailed {
                status: status.as_u16(),
                message: format!("logout failed with status code: {}", status.as_u16()),
            });
        }

        *self.session.write().await = None;
        debug!("logout complete");
        Ok(())
    }

    /// Run Login or Logout given as a catalog descriptor.
    ///
    /// Returns `None` for every other endpoint. The arguments are checked
    /// against the descriptor first, so a missing username or password is a
    /// construction error.
    pub(crate) async fn session_operation(
        &self,
        endpoint: &Endpoint,
        args: &Args,
    ) -> Option<Result<(), Error>> {
        if endpoint.path == catalog::LOGOUT.path {
            return Some(self.logout().await);
        }
        if endpoint.path != catalog::LOGIN.path {
            return None;
        }
        let resolved = match endpoint.resolve(args) {
            Ok(resolved) => resolved,
            Err(e) => return Some(Err(e)),
        };
        let field = |name: &str| {
            resolved
                .pairs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };
        let password = SecretString::from(field("password"));
        Some(self.login(&field("username"), &password).await)
    }

    /// Snapshot of the stored credential, or `None` when unauthenticated.
    pub async fn current_credential(&self) -> Option<SessionCookie> {
        self.session.read().await.clone()
    }

    /// Whether a credential is stored (not whether the daemon still accepts it).
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Replace the stored credential with one obtained elsewhere.
    pub async fn set_credential(&self, cookie: Option<SessionCookie>) {
        *self.session.write().await = cookie;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_value_pair() {
        let cookie: SessionCookie = "SID=abc123; HttpOnly; path=/".parse().unwrap();
        assert_eq!(cookie.name(), "SID");
        assert_eq!(cookie.value().expose_secret(), "abc123");
        assert_eq!(cookie.header_value(), "SID=abc123");
    }

    #[test]
    fn rejects_pair_without_name() {
        assert!("=abc".parse::<SessionCookie>().is_err());
        assert!("garbage".parse::<SessionCookie>().is_err());
    }

    #[test]
    fn debug_output_redacts_value() {
        let cookie = SessionCookie::new("SID", "topsecret");
        let rendered = format!("{cookie:?}");
        assert!(rendered.contains("SID"));
        assert!(!rendered.contains("topsecret"));
    }

    #[test]
    fn cookie_without_expiry_never_expires() {
        assert!(!SessionCookie::new("SID", "x").is_expired());
    }
}
