// RSS feeds and auto-downloading rules
//
// Item paths use `\` as the folder separator, e.g. `Linux\Distros`.

use serde_json::Value;

use crate::catalog;
use crate::client::Client;
use crate::endpoint::Args;
use crate::error::Error;
use crate::payload::Object;

impl Client {
    pub async fn rss_add_folder(&self, path: &str) -> Result<(), Error> {
        self.unit(&catalog::ADD_FOLDER, Args::new().text("path", path))
            .await
    }

    /// Subscribe to `url`, placing the feed at `path` (empty for the root).
    pub async fn rss_add_feed(&self, url: &str, path: &str) -> Result<(), Error> {
        let args = Args::new().text("url", url).text("path", path);
        self.unit(&catalog::ADD_FEED, args).await
    }

    pub async fn rss_remove_item(&self, path: &str) -> Result<(), Error> {
        self.unit(&catalog::REMOVE_ITEM, Args::new().text("path", path))
            .await
    }

    pub async fn rss_move_item(&self, item_path: &str, dest_path: &str) -> Result<(), Error> {
        let args = Args::new()
            .text("itemPath", item_path)
            .text("destPath", dest_path);
        self.unit(&catalog::MOVE_ITEM, args).await
    }

    /// The feed tree. With `with_data` each feed also carries its articles.
    pub async fn rss_items(&self, with_data: bool) -> Result<Object, Error> {
        let args = Args::new().text("withData", with_data);
        self.object(&catalog::GET_ALL_ITEMS, args).await
    }

    /// Mark a whole feed, or one article of it, as read.
    pub async fn rss_mark_as_read(
        &self,
        item_path: &str,
        article_id: Option<&str>,
    ) -> Result<(), Error> {
        let args = Args::new()
            .text("itemPath", item_path)
            .opt_text("articleId", article_id);
        self.unit(&catalog::MARK_AS_READ, args).await
    }

    pub async fn rss_refresh_item(&self, item_path: &str) -> Result<(), Error> {
        self.unit(&catalog::REFRESH_ITEM, Args::new().text("itemPath", item_path))
            .await
    }

    /// Create or replace an auto-downloading rule.
    ///
    /// `rule_def` is sent as one JSON-encoded form field.
    pub async fn rss_set_rule(&self, rule_name: &str, rule_def: Value) -> Result<(), Error> {
        let args = Args::new()
            .text("ruleName", rule_name)
            .json("ruleDef", rule_def);
        self.unit(&catalog::SET_AUTO_DOWNLOADING_RULE, args).await
    }

    pub async fn rss_rename_rule(&self, rule_name: &str, new_rule_name: &str) -> Result<(), Error> {
        let args = Args::new()
            .text("ruleName", rule_name)
            .text("newRuleName", new_rule_name);
        self.unit(&catalog::RENAME_AUTO_DOWNLOADING_RULE, args).await
    }

    pub async fn rss_remove_rule(&self, rule_name: &str) -> Result<(), Error> {
        let args = Args::new().text("ruleName", rule_name);
        self.unit(&catalog::REMOVE_AUTO_DOWNLOADING_RULE, args).await
    }

    /// All rules, keyed by name.
    pub async fn rss_rules(&self) -> Result<Object, Error> {
        self.object(&catalog::GET_ALL_AUTO_DOWNLOADING_RULES, Args::new())
            .await
    }

    /// Articles matching a rule, keyed by feed name.
    pub async fn rss_matching_articles(&self, rule_name: &str) -> Result<Object, Error> {
        let args = Args::new().text("ruleName", rule_name);
        self.object(&catalog::GET_ALL_ARTICLES_MATCHING_RULE, args)
            .await
    }
}
