// qBittorrent Web API client
//
// Owns the HTTP transport, the daemon's base address and the session
// credential. Request mechanics live in `executor.rs`, the login lifecycle
// in `session.rs`, and the per-area operations (app, transfer, torrents,
// rss, search) are inherent methods spread over their own files.

use tokio::sync::RwLock;
use url::Url;

use crate::error::Error;
use crate::session::SessionCookie;
use crate::transport::TransportConfig;

/// Async client for one qBittorrent session.
///
/// Holds a single credential; use one `Client` per logical user. The client
/// is `Send + Sync` and can be shared behind an `Arc` across tasks: the
/// credential is read under a shared lock when a request is built and
/// replaced under an exclusive lock by login and logout.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    pub(crate) session: RwLock<Option<SessionCookie>>,
}

impl Client {
    /// Create an unauthenticated client with the default transport.
    ///
    /// `base_url` is the WebUI root, e.g. `http://127.0.0.1:8080` or
    /// `https://host/qbittorrent/` behind a reverse proxy.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_transport(base_url, &TransportConfig::default())
    }

    /// Create an unauthenticated client from a `TransportConfig`.
    pub fn with_transport(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, None)
    }

    /// Wrap a pre-built `reqwest::Client`, optionally pre-seeded with a
    /// session cookie obtained elsewhere.
    ///
    /// The supplied client should not carry its own cookie store; the
    /// session cookie is attached explicitly to every request.
    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        cookie: Option<SessionCookie>,
    ) -> Result<Self, Error> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            session: RwLock::new(cookie),
        })
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The daemon base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, Error> {
    let construction = |message: String| Error::Construction {
        operation: "Client",
        message,
    };

    if raw.trim().is_empty() {
        return Err(construction("base URL is empty".into()));
    }

    let url = Url::parse(raw.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(construction(format!(
            "unsupported URL scheme '{}'",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(construction(format!("'{raw}' cannot be used as a base URL")));
    }
    Ok(url)
}
