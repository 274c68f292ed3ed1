// qbitctl-api: Async Rust client for the qBittorrent Web API (v2)

pub mod catalog;
pub mod client;
pub mod endpoint;
pub mod error;
pub mod payload;
pub mod session;
pub mod transport;

mod app;
mod executor;
mod rss;
mod search;
mod torrents;
mod transfer;

pub use client::Client;
pub use endpoint::{ArgValue, Args, Delimiter, Encoding, Endpoint, Method, ParamKind, ParamSpec, Resolved, Shape};
pub use error::Error;
pub use payload::{Object, Payload};
pub use session::SessionCookie;
pub use torrents::{AddTorrentOptions, TorrentListQuery};
pub use transport::{TlsMode, TransportConfig};

/// Versioned path prefix shared by every Web API endpoint.
pub const API_PREFIX: &str = "/api/v2";
