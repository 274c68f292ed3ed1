//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod app;
pub mod call;
pub mod categories;
pub mod config_cmd;
pub mod endpoints;
pub mod rss;
pub mod search;
pub mod tags;
pub mod torrents;
pub mod transfer;
pub mod util;

use qbitctl_api::Client;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a session-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::App(args) => app::handle(client, args, global).await,
        Command::Transfer(args) => transfer::handle(client, args, global).await,
        Command::Torrents(args) => torrents::handle(client, args, global).await,
        Command::Categories(args) => categories::handle(client, args, global).await,
        Command::Tags(args) => tags::handle(client, args, global).await,
        Command::Rss(args) => rss::handle(client, args, global).await,
        Command::Search(args) => search::handle(client, args, global).await,
        Command::Call(args) => call::handle(client, args, global).await,
        // Endpoints, Config and Completions are handled before dispatch
        Command::Endpoints | Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
