//! Torrent command handlers.

use bytesize::ByteSize;
use serde_json::Value;
use tabled::Tabled;

use qbitctl_api::{AddTorrentOptions, Client, Object, Payload, TorrentListQuery};

use crate::cli::{GlobalOpts, TorrentListArgs, TorrentsArgs, TorrentsCommand};
use crate::error::CliError;
use crate::output;

use super::transfer::rate;
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct TorrentRow {
    #[tabled(rename = "Hash")]
    hash: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Progress")]
    progress: String,
    #[tabled(rename = "State")]
    state: String,
    #[tabled(rename = "Down")]
    dlspeed: String,
    #[tabled(rename = "Up")]
    upspeed: String,
    #[tabled(rename = "Ratio")]
    ratio: String,
    #[tabled(rename = "Category")]
    category: String,
}

fn short_hash(hash: &str) -> String {
    hash.chars().take(12).collect()
}

impl From<&Object> for TorrentRow {
    fn from(t: &Object) -> Self {
        let text = |k: &str| t.get(k).map(output::cell).unwrap_or_default();
        let int = |k: &str| t.get(k).and_then(Value::as_i64).unwrap_or(0);
        let float = |k: &str| t.get(k).and_then(Value::as_f64).unwrap_or(0.0);
        Self {
            hash: short_hash(&text("hash")),
            name: text("name"),
            size: t
                .get("size")
                .and_then(Value::as_u64)
                .map(|n| ByteSize::b(n).to_string())
                .unwrap_or_default(),
            progress: format!("{:.1}%", float("progress") * 100.0),
            state: text("state"),
            dlspeed: rate(int("dlspeed"), ""),
            upspeed: rate(int("upspeed"), ""),
            ratio: format!("{:.2}", float("ratio")),
            category: text("category"),
        }
    }
}

impl From<TorrentListArgs> for TorrentListQuery {
    fn from(args: TorrentListArgs) -> Self {
        Self {
            filter: args.filter,
            category: args.category,
            tag: args.tag,
            sort: args.sort,
            reverse: args.reverse.then_some(true),
            limit: args.limit,
            offset: args.offset,
            hashes: args.hashes,
        }
    }
}

fn add_options(args: &crate::cli::TorrentAddArgs) -> AddTorrentOptions {
    AddTorrentOptions {
        save_path: args.save_path.clone(),
        category: args.category.clone(),
        tags: args.tags.clone(),
        paused: args.paused.then_some(true),
        skip_checking: args.skip_checking.then_some(true),
        rename: args.rename.clone(),
        upload_limit: args.up_limit,
        download_limit: args.dl_limit,
        sequential_download: args.sequential.then_some(true),
        ..AddTorrentOptions::default()
    }
}

fn count(hashes: &[String]) -> String {
    match hashes {
        [one] if one == "all" => "all torrents".into(),
        [_] => "1 torrent".into(),
        many => format!("{} torrents", many.len()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(
    client: &Client,
    args: TorrentsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.format();
    match args.command {
        TorrentsCommand::List(list) => {
            let torrents = client.torrent_list(list.into()).await?;
            let out = output::render_list(&format, &torrents, |t| TorrentRow::from(t), |t| {
                t.get("hash").map(output::cell).unwrap_or_default()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TorrentsCommand::Get { hash } => {
            let props = client.torrent_properties(&hash).await?;
            let out = output::render_payload(&format, &Payload::Object(props));
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TorrentsCommand::Add(add) => {
            client.add_torrents(&add.urls, &add_options(&add)).await?;
            util::done(&format!("Added {} torrent(s)", add.urls.len()), global.quiet);
            Ok(())
        }

        TorrentsCommand::Pause(h) => {
            client.pause_torrents(&h.hashes).await?;
            util::done(&format!("Paused {}", count(&h.hashes)), global.quiet);
            Ok(())
        }

        TorrentsCommand::Resume(h) => {
            client.resume_torrents(&h.hashes).await?;
            util::done(&format!("Resumed {}", count(&h.hashes)), global.quiet);
            Ok(())
        }

        TorrentsCommand::Delete {
            hashes: h,
            delete_files,
        } => {
            let what = if delete_files {
                format!("Delete {} and their data?", count(&h.hashes))
            } else {
                format!("Delete {}?", count(&h.hashes))
            };
            if !util::confirm(&what, "torrents delete", global.yes)? {
                return Ok(());
            }
            client.delete_torrents(&h.hashes, delete_files).await?;
            util::done(&format!("Deleted {}", count(&h.hashes)), global.quiet);
            Ok(())
        }

        TorrentsCommand::Recheck(h) => {
            client.recheck_torrents(&h.hashes).await?;
            util::done(&format!("Recheck started for {}", count(&h.hashes)), global.quiet);
            Ok(())
        }

        TorrentsCommand::Reannounce(h) => {
            client.reannounce_torrents(&h.hashes).await?;
            util::done(&format!("Reannounced {}", count(&h.hashes)), global.quiet);
            Ok(())
        }

        TorrentsCommand::SetCategory {
            category,
            hashes: h,
        } => {
            client.set_category(&h.hashes, &category).await?;
            util::done(
                &format!("Category of {} set to '{category}'", count(&h.hashes)),
                global.quiet,
            );
            Ok(())
        }

        TorrentsCommand::AddTags { tags, hashes: h } => {
            let tags: Vec<&str> = tags
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect();
            if tags.is_empty() {
                return Err(CliError::Validation {
                    field: "tags".into(),
                    reason: "at least one tag is required".into(),
                });
            }
            client.add_tags(&h.hashes, &tags).await?;
            util::done(
                &format!("Tagged {} with {}", count(&h.hashes), tags.join(", ")),
                global.quiet,
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn torrent_row_formats_progress_and_size() {
        let Value::Object(t) = json!({
            "hash": "8c212779b4abde7f2bc3ef5d1fa0e2b4c9a7f016",
            "name": "debian-12.iso",
            "size": 658_505_728_u64,
            "progress": 0.5,
            "state": "downloading",
            "dlspeed": 0,
            "upspeed": 1024,
            "ratio": 0.25,
            "category": "linux"
        }) else {
            unreachable!()
        };
        let row = TorrentRow::from(&t);
        assert_eq!(row.hash, "8c212779b4ab");
        assert_eq!(row.progress, "50.0%");
        assert_eq!(row.ratio, "0.25");
        assert_eq!(row.dlspeed, "");
        assert!(row.upspeed.ends_with("/s"));
        assert!(!row.size.is_empty());
    }

    #[test]
    fn count_describes_selection() {
        assert_eq!(count(&["all".into()]), "all torrents");
        assert_eq!(count(&["a".into()]), "1 torrent");
        assert_eq!(count(&["a".into(), "b".into()]), "2 torrents");
    }

    #[test]
    fn unset_add_flags_stay_unset() {
        let args = crate::cli::TorrentAddArgs {
            urls: vec!["magnet:?xt=urn:btih:abc".into()],
            save_path: None,
            category: None,
            tags: vec![],
            paused: false,
            skip_checking: false,
            rename: None,
            up_limit: None,
            dl_limit: None,
            sequential: false,
        };
        let options = add_options(&args);
        assert_eq!(options.paused, None);
        assert_eq!(options.sequential_download, None);
    }
}
