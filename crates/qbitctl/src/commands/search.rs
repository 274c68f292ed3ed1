//! Search command handlers.

use bytesize::ByteSize;
use serde_json::Value;
use tabled::Tabled;

use qbitctl_api::{Client, Object, Payload};

use crate::cli::{GlobalOpts, SearchArgs, SearchCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ResultRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Seeders")]
    seeders: String,
    #[tabled(rename = "Leechers")]
    leechers: String,
    #[tabled(rename = "Site")]
    site: String,
}

impl From<&Object> for ResultRow {
    fn from(r: &Object) -> Self {
        let text = |k: &str| r.get(k).map(output::cell).unwrap_or_default();
        Self {
            name: text("fileName"),
            // Unknown sizes are reported as -1.
            size: r
                .get("fileSize")
                .and_then(Value::as_u64)
                .map(|n| ByteSize::b(n).to_string())
                .unwrap_or_default(),
            seeders: text("nbSeeders"),
            leechers: text("nbLeechers"),
            site: text("siteUrl"),
        }
    }
}

#[derive(Tabled)]
struct PluginRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "URL")]
    url: String,
}

impl From<&Object> for PluginRow {
    fn from(p: &Object) -> Self {
        let text = |k: &str| p.get(k).map(output::cell).unwrap_or_default();
        Self {
            name: text("name"),
            version: text("version"),
            enabled: text("enabled"),
            url: text("url"),
        }
    }
}

fn results_of(reply: &Object) -> Vec<Object> {
    reply
        .get("results")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| v.as_object().cloned()).collect())
        .unwrap_or_default()
}

pub async fn handle(
    client: &Client,
    args: SearchArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.format();
    match args.command {
        SearchCommand::Start {
            pattern,
            plugins,
            category,
        } => {
            let id = client.start_search(&pattern, &plugins, &category).await?;
            let out = output::render_single(&format, &id, ToString::to_string, ToString::to_string);
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SearchCommand::Status { id } => {
            let jobs = client.search_status(id).await?;
            let out = output::render_payload(&format, &Payload::Objects(jobs));
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SearchCommand::Results { id, limit, offset } => {
            let reply = client.search_results(id, limit, offset).await?;
            let out = output::render_single(
                &format,
                &reply,
                |r| {
                    let rows: Vec<ResultRow> = results_of(r).iter().map(ResultRow::from).collect();
                    let status = r.get("status").map(output::cell).unwrap_or_default();
                    let total = r.get("total").map(output::cell).unwrap_or_default();
                    format!("{}\n{status}, {total} result(s)", output::render_table(&rows))
                },
                |r| {
                    results_of(r)
                        .iter()
                        .filter_map(|item| item.get("fileUrl").map(output::cell))
                        .collect::<Vec<_>>()
                        .join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SearchCommand::Stop { id } => {
            client.stop_search(id).await?;
            util::done(&format!("Search {id} stopped"), global.quiet);
            Ok(())
        }

        SearchCommand::Delete { id } => {
            client.delete_search(id).await?;
            util::done(&format!("Search {id} deleted"), global.quiet);
            Ok(())
        }

        SearchCommand::Plugins => {
            let plugins = client.search_plugins().await?;
            let out = output::render_list(&format, &plugins, |p| PluginRow::from(p), |p| {
                p.get("name").map(output::cell).unwrap_or_default()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
