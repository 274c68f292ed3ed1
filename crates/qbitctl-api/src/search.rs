// Search jobs and search plugins

use serde_json::Value;

use crate::catalog;
use crate::client::Client;
use crate::endpoint::Args;
use crate::error::Error;
use crate::payload::Object;

impl Client {
    /// Start a search job and return its id.
    ///
    /// `plugins` may name plugins or be `["all"]` / `["enabled"]`;
    /// `category` is a plugin category or `all`.
    pub async fn start_search<S: AsRef<str>>(
        &self,
        pattern: &str,
        plugins: &[S],
        category: &str,
    ) -> Result<i64, Error> {
        let endpoint = &catalog::START_SEARCH;
        let args = Args::new()
            .text("pattern", pattern)
            .list("plugins", plugins.iter().map(|p| p.as_ref()))
            .text("category", category);
        let reply = self.object(endpoint, args).await?;

        reply
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| Error::Decode {
                operation: endpoint.name,
                message: "reply has no integer 'id'".into(),
                body: Value::Object(reply.clone()).to_string(),
            })
    }

    pub async fn stop_search(&self, id: i64) -> Result<(), Error> {
        self.unit(&catalog::STOP_SEARCH, Args::new().text("id", id))
            .await
    }

    /// Status of one search job, or of all jobs when `id` is `None`.
    pub async fn search_status(&self, id: Option<i64>) -> Result<Vec<Object>, Error> {
        let args = Args::new().opt_text("id", id);
        self.objects(&catalog::GET_SEARCH_STATUS, args).await
    }

    /// Results of a job: `{"results": [...], "status": ..., "total": ...}`.
    pub async fn search_results(
        &self,
        id: i64,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Object, Error> {
        let args = Args::new()
            .text("id", id)
            .opt_text("limit", limit)
            .opt_text("offset", offset);
        self.object(&catalog::GET_SEARCH_RESULTS, args).await
    }

    pub async fn delete_search(&self, id: i64) -> Result<(), Error> {
        self.unit(&catalog::DELETE_SEARCH, Args::new().text("id", id))
            .await
    }

    pub async fn search_plugins(&self) -> Result<Vec<Object>, Error> {
        self.objects(&catalog::GET_SEARCH_PLUGINS, Args::new()).await
    }

    /// Install plugins from URLs or local file paths on the daemon host.
    pub async fn install_search_plugins<S: AsRef<str>>(&self, sources: &[S]) -> Result<(), Error> {
        let args = Args::new().list("sources", sources.iter().map(|s| s.as_ref()));
        self.unit(&catalog::INSTALL_SEARCH_PLUGIN, args).await
    }

    pub async fn uninstall_search_plugins<S: AsRef<str>>(&self, names: &[S]) -> Result<(), Error> {
        let args = Args::new().list("names", names.iter().map(|n| n.as_ref()));
        self.unit(&catalog::UNINSTALL_SEARCH_PLUGIN, args).await
    }

    pub async fn enable_search_plugins<S: AsRef<str>>(
        &self,
        names: &[S],
        enable: bool,
    ) -> Result<(), Error> {
        let args = Args::new()
            .list("names", names.iter().map(|n| n.as_ref()))
            .text("enable", enable);
        self.unit(&catalog::ENABLE_SEARCH_PLUGIN, args).await
    }

    pub async fn update_search_plugins(&self) -> Result<(), Error> {
        self.unit(&catalog::UPDATE_SEARCH_PLUGINS, Args::new()).await
    }
}
