// Application, log and sync operations

use serde_json::Value;

use crate::catalog;
use crate::client::Client;
use crate::endpoint::Args;
use crate::error::Error;
use crate::payload::Object;

impl Client {
    // ── Application ──────────────────────────────────────────────────

    /// Daemon version, e.g. `v4.6.2`.
    pub async fn application_version(&self) -> Result<String, Error> {
        self.text(&catalog::GET_APPLICATION_VERSION, Args::new()).await
    }

    /// Web API version, e.g. `2.9.3`.
    pub async fn api_version(&self) -> Result<String, Error> {
        self.text(&catalog::GET_API_VERSION, Args::new()).await
    }

    /// Library versions the daemon was built against (qt, libtorrent, ...).
    pub async fn build_info(&self) -> Result<Object, Error> {
        self.object(&catalog::GET_BUILD_INFO, Args::new()).await
    }

    pub async fn shutdown_application(&self) -> Result<(), Error> {
        self.unit(&catalog::SHUTDOWN_APPLICATION, Args::new()).await
    }

    pub async fn application_preferences(&self) -> Result<Object, Error> {
        self.object(&catalog::GET_APPLICATION_PREFERENCES, Args::new())
            .await
    }

    /// Change preferences. Only the keys present in `prefs` are modified.
    pub async fn set_application_preferences(&self, prefs: Object) -> Result<(), Error> {
        let args = Args::new().json("json", Value::Object(prefs));
        self.unit(&catalog::SET_APPLICATION_PREFERENCES, args).await
    }

    pub async fn default_save_path(&self) -> Result<String, Error> {
        self.text(&catalog::GET_DEFAULT_SAVE_PATH, Args::new()).await
    }

    // ── Log ──────────────────────────────────────────────────────────

    pub async fn log(&self) -> Result<Vec<Object>, Error> {
        self.objects(&catalog::GET_LOG, Args::new()).await
    }

    pub async fn peer_log(&self) -> Result<Vec<Object>, Error> {
        self.objects(&catalog::GET_PEER_LOG, Args::new()).await
    }

    // ── Sync ─────────────────────────────────────────────────────────

    /// Incremental main data since response id `rid` (0 for a full snapshot).
    pub async fn main_data(&self, rid: i64) -> Result<Object, Error> {
        self.object(&catalog::GET_MAIN_DATA, Args::new().text("rid", rid))
            .await
    }

    pub async fn torrent_peers_data(&self, hash: &str, rid: i64) -> Result<Object, Error> {
        let args = Args::new().text("hash", hash).text("rid", rid);
        self.object(&catalog::GET_TORRENT_PEERS_DATA, args).await
    }
}
