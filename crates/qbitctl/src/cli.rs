//! Clap derive structures for the `qbitctl` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// qbitctl -- drive a qBittorrent daemon through its Web API
#[derive(Debug, Parser)]
#[command(
    name = "qbitctl",
    version,
    about = "Manage qBittorrent from the command line",
    long_about = "A CLI for the qBittorrent Web API (v2).\n\n\
        Logs in with the WebUI credentials of the selected profile, runs one\n\
        command against the daemon, and logs out again.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Daemon profile to use
    #[arg(long, short = 'p', env = "QBITCTL_PROFILE", global = true)]
    pub profile: Option<String>,

    /// WebUI base URL (overrides profile)
    #[arg(long, short = 'u', env = "QBITCTL_URL", global = true)]
    pub url: Option<String>,

    /// WebUI username (overrides profile)
    #[arg(long, env = "QBITCTL_USERNAME", global = true)]
    pub username: Option<String>,

    /// WebUI password (overrides profile and keyring)
    #[arg(long, env = "QBITCTL_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "QBITCTL_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "QBITCTL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: from profile, else 30]
    #[arg(long, env = "QBITCTL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    /// The effective output format.
    pub fn format(&self) -> OutputFormat {
        self.output.clone().unwrap_or_default()
    }
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Daemon version, preferences, log and shutdown
    App(AppArgs),

    /// Global transfer state and speed limits
    #[command(alias = "tx")]
    Transfer(TransferArgs),

    /// List and manage torrents
    #[command(alias = "t")]
    Torrents(TorrentsArgs),

    /// Manage torrent categories
    #[command(alias = "cat")]
    Categories(CategoriesArgs),

    /// Manage torrent tags
    Tags(TagsArgs),

    /// RSS feeds and auto-downloading rules
    Rss(RssArgs),

    /// Run searches through the daemon's search plugins
    Search(SearchArgs),

    /// Invoke any Web API operation by name
    Call(CallArgs),

    /// List every Web API operation known to qbitctl
    Endpoints,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  APP
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AppArgs {
    #[command(subcommand)]
    pub command: AppCommand,
}

#[derive(Debug, Subcommand)]
pub enum AppCommand {
    /// Show the daemon version
    Version,

    /// Show the Web API version
    ApiVersion,

    /// Show library versions the daemon was built with
    BuildInfo,

    /// Show application preferences
    Preferences,

    /// Change application preferences
    SetPreferences {
        /// JSON object with the keys to change
        #[arg(conflicts_with = "from_file", required_unless_present = "from_file")]
        json: Option<String>,

        /// Read the JSON object from a file
        #[arg(long, short = 'F')]
        from_file: Option<PathBuf>,
    },

    /// Show the default save path
    SavePath,

    /// Show the main log (or the peer log)
    Log {
        /// Show the peer log instead
        #[arg(long)]
        peers: bool,
    },

    /// Shut the daemon down
    Shutdown,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TRANSFER
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TransferArgs {
    #[command(subcommand)]
    pub command: TransferCommand,
}

#[derive(Debug, Subcommand)]
pub enum TransferCommand {
    /// Show global transfer info
    Info,

    /// Show whether alternative speed limits are active
    AltSpeed,

    /// Toggle alternative speed limits
    ToggleAltSpeed,

    /// Show global download and upload limits
    Limits,

    /// Set the global download limit (bytes/s, 0 = unlimited)
    SetDownloadLimit { limit: i64 },

    /// Set the global upload limit (bytes/s, 0 = unlimited)
    SetUploadLimit { limit: i64 },

    /// Ban peers
    Ban {
        /// Peers as host:port
        #[arg(required = true)]
        peers: Vec<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TORRENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TorrentsArgs {
    #[command(subcommand)]
    pub command: TorrentsCommand,
}

#[derive(Debug, Args)]
pub struct HashesArg {
    /// Torrent hashes (or `all`)
    #[arg(required = true)]
    pub hashes: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum TorrentsCommand {
    /// List torrents
    #[command(alias = "ls")]
    List(TorrentListArgs),

    /// Show generic properties of a torrent
    Get { hash: String },

    /// Add torrents by URL or magnet link
    Add(TorrentAddArgs),

    /// Pause torrents
    Pause(HashesArg),

    /// Resume torrents
    Resume(HashesArg),

    /// Delete torrents
    Delete {
        #[command(flatten)]
        hashes: HashesArg,

        /// Also delete downloaded data
        #[arg(long)]
        delete_files: bool,
    },

    /// Recheck torrents
    Recheck(HashesArg),

    /// Reannounce torrents to their trackers
    Reannounce(HashesArg),

    /// Assign a category (empty string clears it)
    SetCategory {
        category: String,

        #[command(flatten)]
        hashes: HashesArg,
    },

    /// Add tags to torrents
    AddTags {
        /// Comma-separated tags
        tags: String,

        #[command(flatten)]
        hashes: HashesArg,
    },
}

#[derive(Debug, Args)]
pub struct TorrentListArgs {
    /// all, downloading, seeding, completed, paused, active, inactive, ...
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    #[arg(long, short = 'c')]
    pub category: Option<String>,

    #[arg(long, short = 't')]
    pub tag: Option<String>,

    /// Field to sort by (e.g. added_on, name, size)
    #[arg(long, short = 's')]
    pub sort: Option<String>,

    #[arg(long, short = 'r')]
    pub reverse: bool,

    #[arg(long, short = 'l')]
    pub limit: Option<i64>,

    #[arg(long)]
    pub offset: Option<i64>,

    /// Only these hashes
    #[arg(long, value_delimiter = ',')]
    pub hashes: Vec<String>,
}

#[derive(Debug, Args)]
pub struct TorrentAddArgs {
    /// URLs or magnet links
    #[arg(required = true)]
    pub urls: Vec<String>,

    #[arg(long)]
    pub save_path: Option<String>,

    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Comma-separated tags
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Add in paused state
    #[arg(long)]
    pub paused: bool,

    /// Skip hash checking
    #[arg(long)]
    pub skip_checking: bool,

    /// Rename the torrent
    #[arg(long)]
    pub rename: Option<String>,

    /// Upload limit in bytes/s
    #[arg(long)]
    pub up_limit: Option<i64>,

    /// Download limit in bytes/s
    #[arg(long)]
    pub dl_limit: Option<i64>,

    /// Download in sequential order
    #[arg(long)]
    pub sequential: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CATEGORIES & TAGS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand)]
pub enum CategoriesCommand {
    /// List categories
    #[command(alias = "ls")]
    List,

    /// Create a category
    Create {
        name: String,
        #[arg(long, default_value = "")]
        save_path: String,
    },

    /// Change the save path of a category
    Edit {
        name: String,
        #[arg(long)]
        save_path: String,
    },

    /// Remove categories
    Remove {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommand,
}

#[derive(Debug, Subcommand)]
pub enum TagsCommand {
    /// List tags
    #[command(alias = "ls")]
    List,

    /// Create tags
    Create {
        #[arg(required = true, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Delete tags
    Delete {
        #[arg(required = true, value_delimiter = ',')]
        tags: Vec<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RSS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RssArgs {
    #[command(subcommand)]
    pub command: RssCommand,
}

#[derive(Debug, Subcommand)]
pub enum RssCommand {
    /// Show the feed tree
    Items {
        /// Include articles
        #[arg(long)]
        with_data: bool,
    },

    /// Subscribe to a feed
    AddFeed {
        url: String,

        /// Folder path in the feed tree (`\` separated)
        #[arg(long, default_value = "")]
        path: String,
    },

    /// Remove a feed or folder
    Remove { path: String },

    /// List auto-downloading rules
    Rules,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SEARCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub command: SearchCommand,
}

#[derive(Debug, Subcommand)]
pub enum SearchCommand {
    /// Start a search job and print its id
    Start {
        pattern: String,

        /// Comma-separated plugin names, `all` or `enabled`
        #[arg(long, value_delimiter = ',', default_value = "enabled")]
        plugins: Vec<String>,

        #[arg(long, short = 'c', default_value = "all")]
        category: String,
    },

    /// Show search job status
    Status {
        /// Job id (all jobs when omitted)
        id: Option<i64>,
    },

    /// Show results of a search job
    Results {
        id: i64,

        #[arg(long, short = 'l')]
        limit: Option<i64>,

        #[arg(long)]
        offset: Option<i64>,
    },

    /// Stop a running search job
    Stop { id: i64 },

    /// Delete a search job
    Delete { id: i64 },

    /// List installed search plugins
    Plugins,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CALL
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CallArgs {
    /// Operation name, e.g. SetForceStart (see `qbitctl endpoints`)
    pub operation: String,

    /// Parameters as key=value; list values are comma-separated
    #[arg(value_name = "KEY=VALUE")]
    pub params: Vec<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG & COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// List configured profiles (default marked with *)
    Profiles,

    /// Store a password in the system keyring (for --profile or the default)
    SetPassword,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
