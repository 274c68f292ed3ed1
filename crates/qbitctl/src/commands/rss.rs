//! RSS command handlers.

use serde_json::Value;
use tabled::Tabled;

use qbitctl_api::{Client, Object};

use crate::cli::{GlobalOpts, RssArgs, RssCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct FeedRow {
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "URL")]
    url: String,
    #[tabled(rename = "Articles")]
    articles: String,
}

/// Walk the feed tree. Folders are objects without a `url`; feeds have one.
/// Paths use `\` as separator, as the daemon does.
fn flatten_feeds(tree: &Object, prefix: &str, rows: &mut Vec<FeedRow>) {
    for (name, node) in tree {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}\\{name}")
        };
        let Some(node) = node.as_object() else {
            continue;
        };
        match node.get("url").and_then(Value::as_str) {
            Some(url) => rows.push(FeedRow {
                path,
                url: url.to_owned(),
                articles: node
                    .get("articles")
                    .and_then(Value::as_array)
                    .map(|a| a.len().to_string())
                    .unwrap_or_default(),
            }),
            None => flatten_feeds(node, &path, rows),
        }
    }
}

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Enabled")]
    enabled: String,
    #[tabled(rename = "Must Contain")]
    must_contain: String,
    #[tabled(rename = "Category")]
    category: String,
}

fn rule_rows(rules: &Object) -> Vec<RuleRow> {
    rules
        .iter()
        .map(|(name, def)| {
            let field = |k: &str| def.get(k).map(output::cell).unwrap_or_default();
            RuleRow {
                name: name.clone(),
                enabled: field("enabled"),
                must_contain: field("mustContain"),
                category: field("assignedCategory"),
            }
        })
        .collect()
}

pub async fn handle(client: &Client, args: RssArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();
    match args.command {
        RssCommand::Items { with_data } => {
            let tree = client.rss_items(with_data).await?;
            let out = output::render_single(
                &format,
                &tree,
                |t| {
                    let mut rows = Vec::new();
                    flatten_feeds(t, "", &mut rows);
                    output::render_table(&rows)
                },
                |t| {
                    let mut rows = Vec::new();
                    flatten_feeds(t, "", &mut rows);
                    rows.into_iter().map(|r| r.url).collect::<Vec<_>>().join("\n")
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RssCommand::AddFeed { url, path } => {
            client.rss_add_feed(&url, &path).await?;
            util::done(&format!("Subscribed to {url}"), global.quiet);
            Ok(())
        }

        RssCommand::Remove { path } => {
            if !util::confirm(&format!("Remove RSS item '{path}'?"), "rss remove", global.yes)? {
                return Ok(());
            }
            client.rss_remove_item(&path).await?;
            util::done(&format!("Removed '{path}'"), global.quiet);
            Ok(())
        }

        RssCommand::Rules => {
            let rules = client.rss_rules().await?;
            let out = output::render_single(
                &format,
                &rules,
                |r| output::render_table(&rule_rows(r)),
                |r| r.keys().cloned().collect::<Vec<_>>().join("\n"),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
