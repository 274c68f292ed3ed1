// Global transfer operations
//
// Speed limits are bytes per second; 0 means unlimited.

use crate::catalog;
use crate::client::Client;
use crate::endpoint::Args;
use crate::error::Error;
use crate::payload::Object;

impl Client {
    pub async fn global_transfer_info(&self) -> Result<Object, Error> {
        self.object(&catalog::GET_GLOBAL_TRANSFER_INFO, Args::new())
            .await
    }

    /// Whether the alternative speed limits are currently active.
    pub async fn alternative_speed_limits_enabled(&self) -> Result<bool, Error> {
        self.flag(&catalog::GET_ALTERNATIVE_SPEED_LIMITS_STATE, Args::new())
            .await
    }

    pub async fn toggle_alternative_speed_limits(&self) -> Result<(), Error> {
        self.unit(&catalog::TOGGLE_ALTERNATIVE_SPEED_LIMITS, Args::new())
            .await
    }

    pub async fn global_download_limit(&self) -> Result<i64, Error> {
        self.int(&catalog::GET_GLOBAL_DOWNLOAD_LIMIT, Args::new()).await
    }

    pub async fn set_global_download_limit(&self, limit: i64) -> Result<(), Error> {
        let args = Args::new().text("limit", limit);
        self.unit(&catalog::SET_GLOBAL_DOWNLOAD_LIMIT, args).await
    }

    pub async fn global_upload_limit(&self) -> Result<i64, Error> {
        self.int(&catalog::GET_GLOBAL_UPLOAD_LIMIT, Args::new()).await
    }

    pub async fn set_global_upload_limit(&self, limit: i64) -> Result<(), Error> {
        let args = Args::new().text("limit", limit);
        self.unit(&catalog::SET_GLOBAL_UPLOAD_LIMIT, args).await
    }

    /// Ban peers given as `host:port`.
    pub async fn ban_peers<S: AsRef<str>>(&self, peers: &[S]) -> Result<(), Error> {
        let args = Args::new().list("peers", peers.iter().map(|p| p.as_ref()));
        self.unit(&catalog::BAN_PEERS, args).await
    }
}
