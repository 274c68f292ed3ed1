// Torrent management operations
//
// Hash lists are joined with `|`, tag lists with `,` and URL/category lists
// with newlines by the catalog descriptors; callers pass plain slices.

use serde_json::Value;

use crate::catalog;
use crate::client::Client;
use crate::endpoint::Args;
use crate::error::Error;
use crate::payload::Object;

// ── Query types ─────────────────────────────────────────────────────

/// Optional filters for [`Client::torrent_list`]. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TorrentListQuery {
    /// `all`, `downloading`, `seeding`, `completed`, `paused`, `active`, ...
    pub filter: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    /// Field name to sort by, e.g. `added_on`.
    pub sort: Option<String>,
    pub reverse: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub hashes: Vec<String>,
}

impl TorrentListQuery {
    fn into_args(self) -> Args {
        let args = Args::new()
            .opt_text("filter", self.filter)
            .opt_text("category", self.category)
            .opt_text("tag", self.tag)
            .opt_text("sort", self.sort)
            .opt_text("reverse", self.reverse)
            .opt_text("limit", self.limit)
            .opt_text("offset", self.offset);
        if self.hashes.is_empty() {
            args
        } else {
            args.list("hashes", self.hashes)
        }
    }
}

/// Optional fields sent alongside the URLs of [`Client::add_torrents`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddTorrentOptions {
    pub save_path: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub paused: Option<bool>,
    pub skip_checking: Option<bool>,
    pub rename: Option<String>,
    /// Bytes per second.
    pub upload_limit: Option<i64>,
    /// Bytes per second.
    pub download_limit: Option<i64>,
    pub auto_tmm: Option<bool>,
    pub sequential_download: Option<bool>,
    pub first_last_piece_prio: Option<bool>,
    /// Raw fields not covered above, forwarded verbatim.
    pub extra: Vec<(String, String)>,
}

impl AddTorrentOptions {
    /// Wire field pairs, in a stable order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key.to_owned(), value));
            }
        };

        push("savepath", self.save_path.clone());
        push("category", self.category.clone());
        push(
            "tags",
            (!self.tags.is_empty()).then(|| self.tags.join(",")),
        );
        push("paused", self.paused.map(|b| b.to_string()));
        push("skip_checking", self.skip_checking.map(|b| b.to_string()));
        push("rename", self.rename.clone());
        push("upLimit", self.upload_limit.map(|n| n.to_string()));
        push("dlLimit", self.download_limit.map(|n| n.to_string()));
        push("autoTMM", self.auto_tmm.map(|b| b.to_string()));
        push(
            "sequentialDownload",
            self.sequential_download.map(|b| b.to_string()),
        );
        push(
            "firstLastPiecePrio",
            self.first_last_piece_prio.map(|b| b.to_string()),
        );

        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

fn hash_list<S: AsRef<str>>(hashes: &[S]) -> Args {
    Args::new().list("hashes", hashes.iter().map(|h| h.as_ref()))
}

impl Client {
    // ── Listing and details ──────────────────────────────────────────

    pub async fn torrent_list(&self, query: TorrentListQuery) -> Result<Vec<Object>, Error> {
        self.objects(&catalog::GET_TORRENT_LIST, query.into_args())
            .await
    }

    pub async fn torrent_properties(&self, hash: &str) -> Result<Object, Error> {
        self.object(
            &catalog::GET_TORRENT_GENERIC_PROPERTIES,
            Args::new().text("hash", hash),
        )
        .await
    }

    pub async fn torrent_trackers(&self, hash: &str) -> Result<Vec<Object>, Error> {
        self.objects(&catalog::GET_TORRENT_TRACKERS, Args::new().text("hash", hash))
            .await
    }

    pub async fn torrent_web_seeds(&self, hash: &str) -> Result<Vec<Object>, Error> {
        self.objects(&catalog::GET_TORRENT_WEB_SEEDS, Args::new().text("hash", hash))
            .await
    }

    /// Files of a torrent, in the daemon's file index order.
    pub async fn torrent_contents(&self, hash: &str) -> Result<Vec<Object>, Error> {
        self.objects(&catalog::GET_TORRENT_CONTENTS, Args::new().text("hash", hash))
            .await
    }

    /// Per-piece states: 0 not downloaded, 1 downloading, 2 downloaded.
    pub async fn torrent_pieces_states(&self, hash: &str) -> Result<Vec<Value>, Error> {
        self.scalars(
            &catalog::GET_TORRENT_PIECES_STATES,
            Args::new().text("hash", hash),
        )
        .await
    }

    pub async fn torrent_pieces_hashes(&self, hash: &str) -> Result<Vec<Value>, Error> {
        self.scalars(
            &catalog::GET_TORRENT_PIECES_HASHES,
            Args::new().text("hash", hash),
        )
        .await
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Add torrents by URL or magnet link.
    pub async fn add_torrents<S: AsRef<str>>(
        &self,
        urls: &[S],
        options: &AddTorrentOptions,
    ) -> Result<(), Error> {
        let args = Args::new()
            .list("urls", urls.iter().map(|u| u.as_ref()))
            .pairs("options", options.to_pairs());
        self.unit(&catalog::ADD_NEW_TORRENT, args).await
    }

    pub async fn pause_torrents<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), Error> {
        self.unit(&catalog::PAUSE_TORRENTS, hash_list(hashes))
            .await
    }

    pub async fn resume_torrents<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), Error> {
        self.unit(&catalog::RESUME_TORRENTS, hash_list(hashes))
            .await
    }

    /// Remove torrents, optionally deleting their downloaded data.
    pub async fn delete_torrents<S: AsRef<str>>(
        &self,
        hashes: &[S],
        delete_files: bool,
    ) -> Result<(), Error> {
        let args = hash_list(hashes).text("deleteFiles", delete_files);
        self.unit(&catalog::DELETE_TORRENTS, args).await
    }

    pub async fn recheck_torrents<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), Error> {
        self.unit(&catalog::RECHECK_TORRENTS, hash_list(hashes))
            .await
    }

    pub async fn reannounce_torrents<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), Error> {
        self.unit(&catalog::REANNOUNCE_TORRENTS, hash_list(hashes))
            .await
    }

    // ── Trackers and peers ───────────────────────────────────────────

    pub async fn edit_tracker(
        &self,
        hash: &str,
        original_url: &str,
        new_url: &str,
    ) -> Result<(), Error> {
        let args = Args::new()
            .text("hash", hash)
            .text("originalUrl", original_url)
            .text("newUrl", new_url);
        self.unit(&catalog::EDIT_TRACKERS, args).await
    }

    pub async fn remove_trackers<S: AsRef<str>>(&self, hash: &str, urls: &[S]) -> Result<(), Error> {
        let args = Args::new()
            .text("hash", hash)
            .list("urls", urls.iter().map(|u| u.as_ref()));
        self.unit(&catalog::REMOVE_TRACKERS, args).await
    }

    pub async fn add_trackers<S: AsRef<str>>(&self, hash: &str, urls: &[S]) -> Result<(), Error> {
        let args = Args::new()
            .text("hash", hash)
            .list("urls", urls.iter().map(|u| u.as_ref()));
        self.unit(&catalog::ADD_TRACKERS_TO_TORRENT, args).await
    }

    /// Add peers (`host:port`) to a torrent.
    pub async fn add_peers<S: AsRef<str>>(&self, hash: &str, peers: &[S]) -> Result<(), Error> {
        let args = Args::new()
            .text("hash", hash)
            .list("peers", peers.iter().map(|p| p.as_ref()));
        self.unit(&catalog::ADD_PEERS, args).await
    }

    // ── Queue priority ───────────────────────────────────────────────

    pub async fn increase_priority<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), Error> {
        self.unit(&catalog::INCREASE_TORRENT_PRIORITY, hash_list(hashes))
            .await
    }

    pub async fn decrease_priority<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), Error> {
        self.unit(&catalog::DECREASE_TORRENT_PRIORITY, hash_list(hashes))
            .await
    }

    pub async fn top_priority<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), Error> {
        self.unit(&catalog::MAXIMAL_TORRENT_PRIORITY, hash_list(hashes))
            .await
    }

    pub async fn bottom_priority<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), Error> {
        self.unit(&catalog::MINIMAL_TORRENT_PRIORITY, hash_list(hashes))
            .await
    }

    /// Set the download priority of files by index (0 skips the file).
    pub async fn set_file_priority(
        &self,
        hash: &str,
        file_ids: &[u32],
        priority: u8,
    ) -> Result<(), Error> {
        let args = Args::new()
            .text("hash", hash)
            .list("id", file_ids)
            .text("priority", priority);
        self.unit(&catalog::SET_FILE_PRIORITY, args).await
    }

    // ── Limits ───────────────────────────────────────────────────────

    /// Per-torrent download limits, keyed by hash.
    pub async fn torrent_download_limit<S: AsRef<str>>(&self, hashes: &[S]) -> Result<Object, Error> {
        self.object(&catalog::GET_TORRENT_DOWNLOAD_LIMIT, hash_list(hashes))
            .await
    }

    pub async fn set_torrent_download_limit<S: AsRef<str>>(
        &self,
        hashes: &[S],
        limit: i64,
    ) -> Result<(), Error> {
        let args = hash_list(hashes).text("limit", limit);
        self.unit(&catalog::SET_TORRENT_DOWNLOAD_LIMIT, args).await
    }

    /// Per-torrent upload limits, keyed by hash.
    pub async fn torrent_upload_limit<S: AsRef<str>>(&self, hashes: &[S]) -> Result<Object, Error> {
        self.object(&catalog::GET_TORRENT_UPLOAD_LIMIT, hash_list(hashes))
            .await
    }

    pub async fn set_torrent_upload_limit<S: AsRef<str>>(
        &self,
        hashes: &[S],
        limit: i64,
    ) -> Result<(), Error> {
        let args = hash_list(hashes).text("limit", limit);
        self.unit(&catalog::SET_TORRENT_UPLOAD_LIMIT, args).await
    }

    /// Share limits: `-2` uses the global limit, `-1` means no limit.
    pub async fn set_share_limits<S: AsRef<str>>(
        &self,
        hashes: &[S],
        ratio_limit: f64,
        seeding_time_limit: i64,
        inactive_seeding_time_limit: Option<i64>,
    ) -> Result<(), Error> {
        let args = hash_list(hashes)
            .text("ratioLimit", ratio_limit)
            .text("seedingTimeLimit", seeding_time_limit)
            .opt_text("inactiveSeedingTimeLimit", inactive_seeding_time_limit);
        self.unit(&catalog::SET_TORRENT_SHARE_LIMIT, args).await
    }

    // ── Location and naming ──────────────────────────────────────────

    pub async fn set_location<S: AsRef<str>>(&self, hashes: &[S], location: &str) -> Result<(), Error> {
        let args = hash_list(hashes).text("location", location);
        self.unit(&catalog::SET_TORRENT_LOCATION, args).await
    }

    pub async fn rename_torrent(&self, hash: &str, name: &str) -> Result<(), Error> {
        let args = Args::new().text("hash", hash).text("name", name);
        self.unit(&catalog::SET_TORRENT_NAME, args).await
    }

    pub async fn rename_file(&self, hash: &str, old_path: &str, new_path: &str) -> Result<(), Error> {
        let args = Args::new()
            .text("hash", hash)
            .text("oldPath", old_path)
            .text("newPath", new_path);
        self.unit(&catalog::RENAME_FILE, args).await
    }

    pub async fn rename_folder(&self, hash: &str, old_path: &str, new_path: &str) -> Result<(), Error> {
        let args = Args::new()
            .text("hash", hash)
            .text("oldPath", old_path)
            .text("newPath", new_path);
        self.unit(&catalog::RENAME_FOLDER, args).await
    }

    // ── Categories ───────────────────────────────────────────────────

    /// Assign a category; an empty name clears it.
    pub async fn set_category<S: AsRef<str>>(&self, hashes: &[S], category: &str) -> Result<(), Error> {
        let args = hash_list(hashes).text("category", category);
        self.unit(&catalog::SET_TORRENT_CATEGORY, args).await
    }

    /// All categories, keyed by name.
    pub async fn categories(&self) -> Result<Object, Error> {
        self.object(&catalog::GET_ALL_CATEGORIES, Args::new()).await
    }

    pub async fn create_category(&self, category: &str, save_path: &str) -> Result<(), Error> {
        let args = Args::new()
            .text("category", category)
            .text("savePath", save_path);
        self.unit(&catalog::ADD_NEW_CATEGORY, args).await
    }

    pub async fn edit_category(&self, category: &str, save_path: &str) -> Result<(), Error> {
        let args = Args::new()
            .text("category", category)
            .text("savePath", save_path);
        self.unit(&catalog::EDIT_CATEGORY, args).await
    }

    pub async fn remove_categories<S: AsRef<str>>(&self, categories: &[S]) -> Result<(), Error> {
        let args = Args::new().list("categories", categories.iter().map(|c| c.as_ref()));
        self.unit(&catalog::REMOVE_CATEGORIES, args).await
    }

    // ── Tags ─────────────────────────────────────────────────────────

    pub async fn add_tags<S: AsRef<str>, T: AsRef<str>>(
        &self,
        hashes: &[S],
        tags: &[T],
    ) -> Result<(), Error> {
        let args = hash_list(hashes).list("tags", tags.iter().map(|t| t.as_ref()));
        self.unit(&catalog::ADD_TORRENT_TAGS, args).await
    }

    pub async fn remove_tags<S: AsRef<str>, T: AsRef<str>>(
        &self,
        hashes: &[S],
        tags: &[T],
    ) -> Result<(), Error> {
        let args = hash_list(hashes).list("tags", tags.iter().map(|t| t.as_ref()));
        self.unit(&catalog::REMOVE_TORRENT_TAGS, args).await
    }

    pub async fn tags(&self) -> Result<Vec<Value>, Error> {
        self.scalars(&catalog::GET_ALL_TAGS, Args::new()).await
    }

    pub async fn create_tags<S: AsRef<str>>(&self, tags: &[S]) -> Result<(), Error> {
        let args = Args::new().list("tags", tags.iter().map(|t| t.as_ref()));
        self.unit(&catalog::CREATE_TAGS, args).await
    }

    pub async fn delete_tags<S: AsRef<str>>(&self, tags: &[S]) -> Result<(), Error> {
        let args = Args::new().list("tags", tags.iter().map(|t| t.as_ref()));
        self.unit(&catalog::DELETE_TAGS, args).await
    }

    // ── Download behavior ────────────────────────────────────────────

    pub async fn set_auto_management<S: AsRef<str>>(&self, hashes: &[S], enable: bool) -> Result<(), Error> {
        let args = hash_list(hashes).text("enable", enable);
        self.unit(&catalog::SET_AUTOMATIC_TORRENT_MANAGEMENT, args)
            .await
    }

    pub async fn toggle_sequential_download<S: AsRef<str>>(&self, hashes: &[S]) -> Result<(), Error> {
        self.unit(&catalog::TOGGLE_SEQUENTIAL_DOWNLOAD, hash_list(hashes))
            .await
    }

    pub async fn toggle_first_last_piece_priority<S: AsRef<str>>(
        &self,
        hashes: &[S],
    ) -> Result<(), Error> {
        self.unit(&catalog::SET_FIRST_LAST_PIECE_PRIORITY, hash_list(hashes))
            .await
    }

    pub async fn set_force_start<S: AsRef<str>>(&self, hashes: &[S], value: bool) -> Result<(), Error> {
        let args = hash_list(hashes).text("value", value);
        self.unit(&catalog::SET_FORCE_START, args).await
    }

    pub async fn set_super_seeding<S: AsRef<str>>(&self, hashes: &[S], value: bool) -> Result<(), Error> {
        let args = hash_list(hashes).text("value", value);
        self.unit(&catalog::SET_SUPER_SEEDING, args).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::endpoint::ArgValue;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_owned(), value.to_owned())
    }

    #[test]
    fn add_options_only_send_set_fields() {
        let options = AddTorrentOptions {
            save_path: Some("/data".into()),
            tags: vec!["linux".into(), "iso".into()],
            paused: Some(true),
            download_limit: Some(1024),
            ..Default::default()
        };
        assert_eq!(
            options.to_pairs(),
            vec![
                pair("savepath", "/data"),
                pair("tags", "linux,iso"),
                pair("paused", "true"),
                pair("dlLimit", "1024"),
            ]
        );
        assert!(AddTorrentOptions::default().to_pairs().is_empty());
    }

    #[test]
    fn add_options_append_raw_extras() {
        let options = AddTorrentOptions {
            category: Some("movies".into()),
            extra: vec![pair("contentLayout", "Subfolder")],
            ..Default::default()
        };
        assert_eq!(
            options.to_pairs(),
            vec![pair("category", "movies"), pair("contentLayout", "Subfolder")]
        );
    }

    #[test]
    fn list_query_omits_unset_filters() {
        let args = TorrentListQuery {
            filter: Some("seeding".into()),
            reverse: Some(true),
            hashes: vec!["h1".into(), "h2".into()],
            ..Default::default()
        }
        .into_args();
        let resolved = catalog::GET_TORRENT_LIST.resolve(&args).unwrap();
        assert_eq!(
            resolved.pairs,
            vec![
                pair("filter", "seeding"),
                pair("reverse", "true"),
                pair("hashes", "h1|h2"),
            ]
        );
        assert!(TorrentListQuery::default().into_args().is_empty());
    }

    #[test]
    fn hash_helper_keeps_order() {
        assert_eq!(
            hash_list(&["b", "a"]).get("hashes"),
            Some(&ArgValue::List(vec!["b".into(), "a".into()]))
        );
    }
}
