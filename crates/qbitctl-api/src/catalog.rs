// Endpoint catalog
//
// One static descriptor per Web API operation. Paths, parameter names and
// list delimiters are the daemon's wire contract and must match it exactly.
// The typed methods on `Client` are thin adapters over these entries; the
// CLI's generic `call` command reaches every entry through `find`.

use crate::endpoint::{Delimiter, Endpoint, ParamSpec, Shape};

// ── Shared parameters ───────────────────────────────────────────────

const HASH: ParamSpec = ParamSpec::scalar("hash");
const HASHES: ParamSpec = ParamSpec::list("hashes", Delimiter::Pipe);
const RID: ParamSpec = ParamSpec::scalar("rid");
const LIMIT: ParamSpec = ParamSpec::scalar("limit");
const ENABLE: ParamSpec = ParamSpec::scalar("enable");
const VALUE: ParamSpec = ParamSpec::scalar("value");
const CATEGORY: ParamSpec = ParamSpec::scalar("category");
const SAVE_PATH: ParamSpec = ParamSpec::scalar("savePath");
const TAGS: ParamSpec = ParamSpec::list("tags", Delimiter::Comma);
const OLD_PATH: ParamSpec = ParamSpec::scalar("oldPath");
const NEW_PATH: ParamSpec = ParamSpec::scalar("newPath");
const PATH: ParamSpec = ParamSpec::scalar("path");
const ITEM_PATH: ParamSpec = ParamSpec::scalar("itemPath");
const RULE_NAME: ParamSpec = ParamSpec::scalar("ruleName");
const SEARCH_ID: ParamSpec = ParamSpec::scalar("id");
const PLUGIN_NAMES: ParamSpec = ParamSpec::list("names", Delimiter::Pipe);

// ── Authentication ──────────────────────────────────────────────────

pub static LOGIN: Endpoint = Endpoint::post("Login", "/auth/login").params(&[
    ParamSpec::scalar("username"),
    ParamSpec::scalar("password"),
]);
pub static LOGOUT: Endpoint = Endpoint::post("Logout", "/auth/logout");

// ── Application ─────────────────────────────────────────────────────

pub static GET_APPLICATION_VERSION: Endpoint =
    Endpoint::get("GetApplicationVersion", "/app/version", Shape::Text);
pub static GET_API_VERSION: Endpoint =
    Endpoint::get("GetAPIVersion", "/app/webapiVersion", Shape::Text);
pub static GET_BUILD_INFO: Endpoint =
    Endpoint::get("GetBuildInfo", "/app/buildInfo", Shape::Object);
pub static SHUTDOWN_APPLICATION: Endpoint = Endpoint::post("ShutdownApplication", "/app/shutdown");
pub static GET_APPLICATION_PREFERENCES: Endpoint =
    Endpoint::get("GetApplicationPreferences", "/app/preferences", Shape::Object);
pub static SET_APPLICATION_PREFERENCES: Endpoint =
    Endpoint::post("SetApplicationPreferences", "/app/setPreferences")
        .params(&[ParamSpec::body("json")])
        .json();
pub static GET_DEFAULT_SAVE_PATH: Endpoint =
    Endpoint::get("GetDefaultSavePath", "/app/defaultSavePath", Shape::Text);

// ── Log ─────────────────────────────────────────────────────────────

pub static GET_LOG: Endpoint = Endpoint::get("GetLog", "/log/main", Shape::ObjectArray);
pub static GET_PEER_LOG: Endpoint = Endpoint::get("GetPeerLog", "/log/peers", Shape::ObjectArray);

// ── Sync ────────────────────────────────────────────────────────────

pub static GET_MAIN_DATA: Endpoint =
    Endpoint::get("GetMainData", "/sync/maindata", Shape::Object).params(&[RID]);
pub static GET_TORRENT_PEERS_DATA: Endpoint =
    Endpoint::get("GetTorrentPeersData", "/sync/torrentPeers", Shape::Object).params(&[HASH, RID]);

// ── Transfer ────────────────────────────────────────────────────────

pub static GET_GLOBAL_TRANSFER_INFO: Endpoint =
    Endpoint::get("GetGlobalTransferInfo", "/transfer/info", Shape::Object);
pub static GET_ALTERNATIVE_SPEED_LIMITS_STATE: Endpoint = Endpoint::get(
    "GetAlternativeSpeedLimitsState",
    "/transfer/speedLimitsMode",
    Shape::Bool,
);
pub static TOGGLE_ALTERNATIVE_SPEED_LIMITS: Endpoint =
    Endpoint::post("ToggleAlternativeSpeedLimits", "/transfer/toggleSpeedLimitsMode");
pub static GET_GLOBAL_DOWNLOAD_LIMIT: Endpoint =
    Endpoint::get("GetGlobalDownloadLimit", "/transfer/downloadLimit", Shape::Int);
pub static SET_GLOBAL_DOWNLOAD_LIMIT: Endpoint =
    Endpoint::post("SetGlobalDownloadLimit", "/transfer/setDownloadLimit").params(&[LIMIT]);
pub static GET_GLOBAL_UPLOAD_LIMIT: Endpoint =
    Endpoint::get("GetGlobalUploadLimit", "/transfer/uploadLimit", Shape::Int);
pub static SET_GLOBAL_UPLOAD_LIMIT: Endpoint =
    Endpoint::post("SetGlobalUploadLimit", "/transfer/setUploadLimit").params(&[LIMIT]);
pub static BAN_PEERS: Endpoint = Endpoint::post("BanPeers", "/transfer/banPeers")
    .params(&[ParamSpec::list("peers", Delimiter::Pipe)]);

// ── Torrents ────────────────────────────────────────────────────────

pub static GET_TORRENT_LIST: Endpoint =
    Endpoint::get("GetTorrentList", "/torrents/info", Shape::ObjectArray).params(&[
        ParamSpec::scalar("filter").optional(),
        CATEGORY.optional(),
        ParamSpec::scalar("tag").optional(),
        ParamSpec::scalar("sort").optional(),
        ParamSpec::scalar("reverse").optional(),
        LIMIT.optional(),
        ParamSpec::scalar("offset").optional(),
        HASHES.optional(),
    ]);
pub static GET_TORRENT_GENERIC_PROPERTIES: Endpoint =
    Endpoint::get("GetTorrentGenericProperties", "/torrents/properties", Shape::Object)
        .params(&[HASH]);
pub static GET_TORRENT_TRACKERS: Endpoint =
    Endpoint::get("GetTorrentTrackers", "/torrents/trackers", Shape::ObjectArray).params(&[HASH]);
pub static GET_TORRENT_WEB_SEEDS: Endpoint =
    Endpoint::get("GetTorrentWebSeeds", "/torrents/webseeds", Shape::ObjectArray).params(&[HASH]);
pub static GET_TORRENT_CONTENTS: Endpoint =
    Endpoint::get("GetTorrentContents", "/torrents/files", Shape::ObjectArray).params(&[HASH]);
pub static GET_TORRENT_PIECES_STATES: Endpoint =
    Endpoint::get("GetTorrentPiecesStates", "/torrents/pieceStates", Shape::ScalarArray)
        .params(&[HASH]);
pub static GET_TORRENT_PIECES_HASHES: Endpoint =
    Endpoint::get("GetTorrentPiecesHashes", "/torrents/pieceHashes", Shape::ScalarArray)
        .params(&[HASH]);
pub static PAUSE_TORRENTS: Endpoint =
    Endpoint::post("PauseTorrents", "/torrents/pause").params(&[HASHES]);
pub static RESUME_TORRENTS: Endpoint =
    Endpoint::post("ResumeTorrents", "/torrents/resume").params(&[HASHES]);
pub static DELETE_TORRENTS: Endpoint = Endpoint::post("DeleteTorrents", "/torrents/delete")
    .params(&[HASHES, ParamSpec::scalar("deleteFiles")]);
pub static RECHECK_TORRENTS: Endpoint =
    Endpoint::post("RecheckTorrents", "/torrents/recheck").params(&[HASHES]);
pub static REANNOUNCE_TORRENTS: Endpoint =
    Endpoint::post("ReannounceTorrents", "/torrents/reannounce").params(&[HASHES]);
pub static EDIT_TRACKERS: Endpoint = Endpoint::post("EditTrackers", "/torrents/editTracker")
    .params(&[
        HASH,
        ParamSpec::scalar("originalUrl"),
        ParamSpec::scalar("newUrl"),
    ]);
pub static REMOVE_TRACKERS: Endpoint = Endpoint::post("RemoveTrackers", "/torrents/removeTrackers")
    .params(&[HASH, ParamSpec::list("urls", Delimiter::Pipe)]);
pub static ADD_PEERS: Endpoint = Endpoint::post("AddPeers", "/torrents/addPeers")
    .params(&[HASH, ParamSpec::list("peers", Delimiter::Pipe)]);
pub static ADD_NEW_TORRENT: Endpoint = Endpoint::post("AddNewTorrent", "/torrents/add").params(&[
    ParamSpec::list("urls", Delimiter::Newline),
    ParamSpec::extra("options"),
]);
pub static ADD_TRACKERS_TO_TORRENT: Endpoint =
    Endpoint::post("AddTrackersToTorrent", "/torrents/addTrackers")
        .params(&[HASH, ParamSpec::list("urls", Delimiter::Newline)]);
pub static INCREASE_TORRENT_PRIORITY: Endpoint =
    Endpoint::post("IncreaseTorrentPriority", "/torrents/increasePrio").params(&[HASHES]);
pub static DECREASE_TORRENT_PRIORITY: Endpoint =
    Endpoint::post("DecreaseTorrentPriority", "/torrents/decreasePrio").params(&[HASHES]);
pub static MAXIMAL_TORRENT_PRIORITY: Endpoint =
    Endpoint::post("MaximalTorrentPriority", "/torrents/topPrio").params(&[HASHES]);
pub static MINIMAL_TORRENT_PRIORITY: Endpoint =
    Endpoint::post("MinimalTorrentPriority", "/torrents/bottomPrio").params(&[HASHES]);
pub static SET_FILE_PRIORITY: Endpoint = Endpoint::post("SetFilePriority", "/torrents/filePrio")
    .params(&[
        HASH,
        ParamSpec::list("id", Delimiter::Pipe),
        ParamSpec::scalar("priority"),
    ]);
pub static GET_TORRENT_DOWNLOAD_LIMIT: Endpoint =
    Endpoint::get("GetTorrentDownloadLimit", "/torrents/downloadLimit", Shape::Object)
        .params(&[HASHES]);
pub static SET_TORRENT_DOWNLOAD_LIMIT: Endpoint =
    Endpoint::post("SetTorrentDownloadLimit", "/torrents/setDownloadLimit")
        .params(&[HASHES, LIMIT]);
pub static SET_TORRENT_SHARE_LIMIT: Endpoint =
    Endpoint::post("SetTorrentShareLimit", "/torrents/setShareLimits").params(&[
        HASHES,
        ParamSpec::scalar("ratioLimit"),
        ParamSpec::scalar("seedingTimeLimit"),
        ParamSpec::scalar("inactiveSeedingTimeLimit").optional(),
    ]);
pub static GET_TORRENT_UPLOAD_LIMIT: Endpoint =
    Endpoint::get("GetTorrentUploadLimit", "/torrents/uploadLimit", Shape::Object)
        .params(&[HASHES]);
pub static SET_TORRENT_UPLOAD_LIMIT: Endpoint =
    Endpoint::post("SetTorrentUploadLimit", "/torrents/setUploadLimit").params(&[HASHES, LIMIT]);
pub static SET_TORRENT_LOCATION: Endpoint = Endpoint::post("SetTorrentLocation", "/torrents/setLocation")
    .params(&[HASHES, ParamSpec::scalar("location")]);
pub static SET_TORRENT_NAME: Endpoint = Endpoint::post("SetTorrentName", "/torrents/rename")
    .params(&[HASH, ParamSpec::scalar("name")]);
pub static SET_TORRENT_CATEGORY: Endpoint =
    Endpoint::post("SetTorrentCategory", "/torrents/setCategory").params(&[HASHES, CATEGORY]);
pub static GET_ALL_CATEGORIES: Endpoint =
    Endpoint::get("GetAllCategories", "/torrents/categories", Shape::Object);
pub static ADD_NEW_CATEGORY: Endpoint =
    Endpoint::post("AddNewCategory", "/torrents/createCategory").params(&[CATEGORY, SAVE_PATH]);
pub static EDIT_CATEGORY: Endpoint =
    Endpoint::post("EditCategory", "/torrents/editCategory").params(&[CATEGORY, SAVE_PATH]);
pub static REMOVE_CATEGORIES: Endpoint = Endpoint::post("RemoveCategories", "/torrents/removeCategories")
    .params(&[ParamSpec::list("categories", Delimiter::Newline)]);
pub static ADD_TORRENT_TAGS: Endpoint =
    Endpoint::post("AddTorrentTags", "/torrents/addTags").params(&[HASHES, TAGS]);
pub static REMOVE_TORRENT_TAGS: Endpoint =
    Endpoint::post("RemoveTorrentTags", "/torrents/removeTags").params(&[HASHES, TAGS]);
pub static GET_ALL_TAGS: Endpoint =
    Endpoint::get("GetAllTags", "/torrents/tags", Shape::ScalarArray);
pub static CREATE_TAGS: Endpoint =
    Endpoint::post("CreateTags", "/torrents/createTags").params(&[TAGS]);
pub static DELETE_TAGS: Endpoint =
    Endpoint::post("DeleteTags", "/torrents/deleteTags").params(&[TAGS]);
pub static SET_AUTOMATIC_TORRENT_MANAGEMENT: Endpoint =
    Endpoint::post("SetAutomaticTorrentManagement", "/torrents/setAutoManagement")
        .params(&[HASHES, ENABLE]);
pub static TOGGLE_SEQUENTIAL_DOWNLOAD: Endpoint =
    Endpoint::post("ToggleSequentialDownload", "/torrents/toggleSequentialDownload")
        .params(&[HASHES]);
pub static SET_FIRST_LAST_PIECE_PRIORITY: Endpoint =
    Endpoint::post("SetFirstLastPiecePriority", "/torrents/toggleFirstLastPiecePrio")
        .params(&[HASHES]);
pub static SET_FORCE_START: Endpoint =
    Endpoint::post("SetForceStart", "/torrents/setForceStart").params(&[HASHES, VALUE]);
pub static SET_SUPER_SEEDING: Endpoint =
    Endpoint::post("SetSuperSeeding", "/torrents/setSuperSeeding").params(&[HASHES, VALUE]);
pub static RENAME_FILE: Endpoint =
    Endpoint::post("RenameFile", "/torrents/renameFile").params(&[HASH, OLD_PATH, NEW_PATH]);
pub static RENAME_FOLDER: Endpoint =
    Endpoint::post("RenameFolder", "/torrents/renameFolder").params(&[HASH, OLD_PATH, NEW_PATH]);

// ── RSS ─────────────────────────────────────────────────────────────

pub static ADD_FOLDER: Endpoint = Endpoint::post("AddFolder", "/rss/addFolder").params(&[PATH]);
pub static ADD_FEED: Endpoint =
    Endpoint::post("AddFeed", "/rss/addFeed").params(&[ParamSpec::scalar("url"), PATH]);
pub static REMOVE_ITEM: Endpoint = Endpoint::post("RemoveItem", "/rss/removeItem").params(&[PATH]);
pub static MOVE_ITEM: Endpoint = Endpoint::post("MoveItem", "/rss/moveItem")
    .params(&[ITEM_PATH, ParamSpec::scalar("destPath")]);
pub static GET_ALL_ITEMS: Endpoint = Endpoint::get("GetAllItems", "/rss/items", Shape::Object)
    .params(&[ParamSpec::scalar("withData").optional()]);
pub static MARK_AS_READ: Endpoint = Endpoint::post("MarkAsRead", "/rss/markAsRead")
    .params(&[ITEM_PATH, ParamSpec::scalar("articleId").optional()]);
pub static REFRESH_ITEM: Endpoint =
    Endpoint::post("RefreshItem", "/rss/refreshItem").params(&[ITEM_PATH]);
pub static SET_AUTO_DOWNLOADING_RULE: Endpoint = Endpoint::post("SetAutoDownloadingRule", "/rss/setRule")
    .params(&[RULE_NAME, ParamSpec::json_text("ruleDef")]);
pub static RENAME_AUTO_DOWNLOADING_RULE: Endpoint =
    Endpoint::post("RenameAutoDownloadingRule", "/rss/renameRule")
        .params(&[RULE_NAME, ParamSpec::scalar("newRuleName")]);
pub static REMOVE_AUTO_DOWNLOADING_RULE: Endpoint =
    Endpoint::post("RemoveAutoDownloadingRule", "/rss/removeRule").params(&[RULE_NAME]);
pub static GET_ALL_AUTO_DOWNLOADING_RULES: Endpoint =
    Endpoint::get("GetAllAutoDownloadingRules", "/rss/rules", Shape::Object);
pub static GET_ALL_ARTICLES_MATCHING_RULE: Endpoint =
    Endpoint::get("GetAllArticlesMatchingRule", "/rss/matchingArticles", Shape::Object)
        .params(&[RULE_NAME]);

// ── Search ──────────────────────────────────────────────────────────

pub static START_SEARCH: Endpoint = Endpoint::post("StartSearch", "/search/start")
    .params(&[
        ParamSpec::scalar("pattern"),
        ParamSpec::list("plugins", Delimiter::Pipe),
        CATEGORY,
    ])
    .returning(Shape::Object);
pub static STOP_SEARCH: Endpoint = Endpoint::post("StopSearch", "/search/stop").params(&[SEARCH_ID]);
pub static GET_SEARCH_STATUS: Endpoint =
    Endpoint::get("GetSearchStatus", "/search/status", Shape::ObjectArray)
        .params(&[SEARCH_ID.optional()]);
pub static GET_SEARCH_RESULTS: Endpoint =
    Endpoint::get("GetSearchResults", "/search/results", Shape::Object).params(&[
        SEARCH_ID,
        LIMIT.optional(),
        ParamSpec::scalar("offset").optional(),
    ]);
pub static DELETE_SEARCH: Endpoint =
    Endpoint::post("DeleteSearch", "/search/delete").params(&[SEARCH_ID]);
pub static GET_SEARCH_PLUGINS: Endpoint =
    Endpoint::get("GetSearchPlugins", "/search/plugins", Shape::ObjectArray);
pub static INSTALL_SEARCH_PLUGIN: Endpoint = Endpoint::post("InstallSearchPlugin", "/search/installPlugin")
    .params(&[ParamSpec::list("sources", Delimiter::Pipe)]);
pub static UNINSTALL_SEARCH_PLUGIN: Endpoint =
    Endpoint::post("UninstallSearchPlugin", "/search/uninstallPlugin").params(&[PLUGIN_NAMES]);
pub static ENABLE_SEARCH_PLUGIN: Endpoint =
    Endpoint::post("EnableSearchPlugin", "/search/enablePlugin").params(&[PLUGIN_NAMES, ENABLE]);
pub static UPDATE_SEARCH_PLUGINS: Endpoint =
    Endpoint::post("UpdateSearchPlugins", "/search/updatePlugins");

// ── Index ───────────────────────────────────────────────────────────

/// Every operation in the catalog, grouped by API area.
pub static ALL: &[&Endpoint] = &[
    &LOGIN,
    &LOGOUT,
    &GET_APPLICATION_VERSION,
    &GET_API_VERSION,
    &GET_BUILD_INFO,
    &SHUTDOWN_APPLICATION,
    &GET_APPLICATION_PREFERENCES,
    &SET_APPLICATION_PREFERENCES,
    &GET_DEFAULT_SAVE_PATH,
    &GET_LOG,
    &GET_PEER_LOG,
    &GET_MAIN_DATA,
    &GET_TORRENT_PEERS_DATA,
    &GET_GLOBAL_TRANSFER_INFO,
    &GET_ALTERNATIVE_SPEED_LIMITS_STATE,
    &TOGGLE_ALTERNATIVE_SPEED_LIMITS,
    &GET_GLOBAL_DOWNLOAD_LIMIT,
    &SET_GLOBAL_DOWNLOAD_LIMIT,
    &GET_GLOBAL_UPLOAD_LIMIT,
    &SET_GLOBAL_UPLOAD_LIMIT,
    &BAN_PEERS,
    &GET_TORRENT_LIST,
    &GET_TORRENT_GENERIC_PROPERTIES,
    &GET_TORRENT_TRACKERS,
    &GET_TORRENT_WEB_SEEDS,
    &GET_TORRENT_CONTENTS,
    &GET_TORRENT_PIECES_STATES,
    &GET_TORRENT_PIECES_HASHES,
    &PAUSE_TORRENTS,
    &RESUME_TORRENTS,
    &DELETE_TORRENTS,
    &RECHECK_TORRENTS,
    &REANNOUNCE_TORRENTS,
    &EDIT_TRACKERS,
    &REMOVE_TRACKERS,
    &ADD_PEERS,
    &ADD_NEW_TORRENT,
    &ADD_TRACKERS_TO_TORRENT,
    &INCREASE_TORRENT_PRIORITY,
    &DECREASE_TORRENT_PRIORITY,
    &MAXIMAL_TORRENT_PRIORITY,
    &MINIMAL_TORRENT_PRIORITY,
    &SET_FILE_PRIORITY,
    &GET_TORRENT_DOWNLOAD_LIMIT,
    &SET_TORRENT_DOWNLOAD_LIMIT,
    &SET_TORRENT_SHARE_LIMIT,
    &GET_TORRENT_UPLOAD_LIMIT,
    &SET_TORRENT_UPLOAD_LIMIT,
    &SET_TORRENT_LOCATION,
    &SET_TORRENT_NAME,
    &SET_TORRENT_CATEGORY,
    &GET_ALL_CATEGORIES,
    &ADD_NEW_CATEGORY,
    &EDIT_CATEGORY,
    &REMOVE_CATEGORIES,
    &ADD_TORRENT_TAGS,
    &REMOVE_TORRENT_TAGS,
    &GET_ALL_TAGS,
    &CREATE_TAGS,
    &DELETE_TAGS,
    &SET_AUTOMATIC_TORRENT_MANAGEMENT,
    &TOGGLE_SEQUENTIAL_DOWNLOAD,
    &SET_FIRST_LAST_PIECE_PRIORITY,
    &SET_FORCE_START,
    &SET_SUPER_SEEDING,
    &RENAME_FILE,
    &RENAME_FOLDER,
    &ADD_FOLDER,
    &ADD_FEED,
    &REMOVE_ITEM,
    &MOVE_ITEM,
    &GET_ALL_ITEMS,
    &MARK_AS_READ,
    &REFRESH_ITEM,
    &SET_AUTO_DOWNLOADING_RULE,
    &RENAME_AUTO_DOWNLOADING_RULE,
    &REMOVE_AUTO_DOWNLOADING_RULE,
    &GET_ALL_AUTO_DOWNLOADING_RULES,
    &GET_ALL_ARTICLES_MATCHING_RULE,
    &START_SEARCH,
    &STOP_SEARCH,
    &GET_SEARCH_STATUS,
    &GET_SEARCH_RESULTS,
    &DELETE_SEARCH,
    &GET_SEARCH_PLUGINS,
    &INSTALL_SEARCH_PLUGIN,
    &UNINSTALL_SEARCH_PLUGIN,
    &ENABLE_SEARCH_PLUGIN,
    &UPDATE_SEARCH_PLUGINS,
];

/// Look up an operation by name (case-insensitive).
pub fn find(name: &str) -> Option<&'static Endpoint> {
    ALL.iter()
        .copied()
        .find(|e| e.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::endpoint::{Encoding, Method, ParamKind};

    #[test]
    fn names_and_routes_are_unique() {
        let names: HashSet<_> = ALL.iter().map(|e| e.name).collect();
        let paths: HashSet<_> = ALL.iter().map(|e| e.path).collect();
        assert_eq!(names.len(), ALL.len());
        assert_eq!(paths.len(), ALL.len());
    }

    #[test]
    fn get_endpoints_use_the_query_string() {
        for endpoint in ALL {
            match endpoint.method {
                Method::Get => assert_eq!(endpoint.encoding, Encoding::Query, "{}", endpoint.name),
                Method::Post => assert_ne!(endpoint.encoding, Encoding::Query, "{}", endpoint.name),
            }
        }
    }

    #[test]
    fn only_preferences_use_a_json_body() {
        let json: Vec<_> = ALL
            .iter()
            .filter(|e| e.encoding == Encoding::Json)
            .map(|e| e.name)
            .collect();
        assert_eq!(json, vec!["SetApplicationPreferences"]);
    }

    #[test]
    fn list_delimiters_match_the_wire_contract() {
        let delimiter = |endpoint: &Endpoint, param: &str| {
            endpoint
                .params
                .iter()
                .find(|p| p.name == param)
                .map(|p| p.kind)
                .unwrap()
        };
        assert_eq!(delimiter(&PAUSE_TORRENTS, "hashes"), ParamKind::List(Delimiter::Pipe));
        assert_eq!(delimiter(&ADD_NEW_TORRENT, "urls"), ParamKind::List(Delimiter::Newline));
        assert_eq!(delimiter(&ADD_TRACKERS_TO_TORRENT, "urls"), ParamKind::List(Delimiter::Newline));
        assert_eq!(delimiter(&REMOVE_TRACKERS, "urls"), ParamKind::List(Delimiter::Pipe));
        assert_eq!(delimiter(&REMOVE_CATEGORIES, "categories"), ParamKind::List(Delimiter::Newline));
        assert_eq!(delimiter(&ADD_TORRENT_TAGS, "tags"), ParamKind::List(Delimiter::Comma));
        assert_eq!(delimiter(&CREATE_TAGS, "tags"), ParamKind::List(Delimiter::Comma));
        assert_eq!(delimiter(&START_SEARCH, "plugins"), ParamKind::List(Delimiter::Pipe));
        assert_eq!(delimiter(&INSTALL_SEARCH_PLUGIN, "sources"), ParamKind::List(Delimiter::Pipe));
    }

    #[test]
    fn catalog_covers_every_api_area() {
        for prefix in ["/auth/", "/app/", "/log/", "/sync/", "/transfer/", "/torrents/", "/rss/", "/search/"] {
            assert!(
                ALL.iter().any(|e| e.path.starts_with(prefix)),
                "no endpoint under {prefix}"
            );
        }
        assert_eq!(ALL.len(), 89);
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(find("pausetorrents").unwrap().path, "/torrents/pause");
        assert_eq!(find("GetAPIVersion").unwrap().path, "/app/webapiVersion");
        assert!(find("NoSuchOperation").is_none());
    }
}
