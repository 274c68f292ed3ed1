//! Application command handlers.

use serde_json::Value;
use tabled::Tabled;

use qbitctl_api::{Client, Object, Payload};

use crate::cli::{AppArgs, AppCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Main log `type` is a bit flag: 1 normal, 2 info, 4 warning, 8 critical.
fn log_level(kind: i64) -> &'static str {
    match kind {
        1 => "normal",
        2 => "info",
        4 => "warning",
        8 => "critical",
        _ => "",
    }
}

fn timestamp(secs: Option<i64>) -> String {
    secs.and_then(|s| u64::try_from(s).ok())
        .map(|s| {
            humantime::format_rfc3339_seconds(std::time::UNIX_EPOCH + std::time::Duration::from_secs(s))
                .to_string()
        })
        .unwrap_or_default()
}

impl From<&Object> for LogRow {
    fn from(entry: &Object) -> Self {
        let field = |k: &str| entry.get(k).map(output::cell).unwrap_or_default();
        // Peer log entries carry `ip` and `blocked` instead of `message` and `type`.
        let message = match entry.get("ip") {
            Some(ip) => {
                let blocked = entry.get("blocked").and_then(Value::as_bool).unwrap_or(false);
                let reason = field("reason");
                format!(
                    "{} {}{}",
                    output::cell(ip),
                    if blocked { "blocked" } else { "allowed" },
                    if reason.is_empty() { String::new() } else { format!(": {reason}") }
                )
            }
            None => field("message"),
        };
        Self {
            id: field("id"),
            time: timestamp(entry.get("timestamp").and_then(Value::as_i64)),
            kind: log_level(entry.get("type").and_then(Value::as_i64).unwrap_or(0)).into(),
            message,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(client: &Client, args: AppArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();
    match args.command {
        AppCommand::Version => {
            let version = client.application_version().await?;
            output::print_output(&version, global.quiet);
            Ok(())
        }

        AppCommand::ApiVersion => {
            let version = client.api_version().await?;
            output::print_output(&version, global.quiet);
            Ok(())
        }

        AppCommand::BuildInfo => {
            let info = client.build_info().await?;
            let out = output::render_payload(&format, &Payload::Object(info));
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AppCommand::Preferences => {
            let prefs = client.application_preferences().await?;
            let out = output::render_payload(&format, &Payload::Object(prefs));
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AppCommand::SetPreferences { json, from_file } => {
            let value = match (json, from_file) {
                (_, Some(path)) => util::read_json_file(&path)?,
                (Some(text), None) => serde_json::from_str(&text)?,
                (None, None) => {
                    return Err(CliError::Validation {
                        field: "json".into(),
                        reason: "pass a JSON object or --from-file".into(),
                    });
                }
            };
            let prefs = util::into_object(value, "json")?;
            let keys = prefs.len();
            client.set_application_preferences(prefs).await?;
            util::done(&format!("Updated {keys} preference(s)"), global.quiet);
            Ok(())
        }

        AppCommand::SavePath => {
            let path = client.default_save_path().await?;
            output::print_output(&path, global.quiet);
            Ok(())
        }

        AppCommand::Log { peers } => {
            let entries = if peers {
                client.peer_log().await?
            } else {
                client.log().await?
            };
            let out = output::render_list(&format, &entries, |e| LogRow::from(e), |e| {
                e.get("message")
                    .or_else(|| e.get("ip"))
                    .map(output::cell)
                    .unwrap_or_default()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AppCommand::Shutdown => {
            if !util::confirm("Shut down the qBittorrent daemon?", "shutdown", global.yes)? {
                return Ok(());
            }
            client.shutdown_application().await?;
            util::done("Shutdown requested", global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn main_log_row_maps_level() {
        let Value::Object(entry) = json!({
            "id": 3, "message": "Started", "timestamp": 0, "type": 4
        }) else {
            unreachable!()
        };
        let row = LogRow::from(&entry);
        assert_eq!(row.kind, "warning");
        assert_eq!(row.message, "Started");
        assert_eq!(row.time, "1970-01-01T00:00:00Z");
    }

    #[test]
    fn peer_log_row_describes_block() {
        let Value::Object(entry) = json!({
            "id": 1, "ip": "10.0.0.9", "blocked": true, "reason": "banned", "timestamp": 0
        }) else {
            unreachable!()
        };
        let row = LogRow::from(&entry);
        assert_eq!(row.message, "10.0.0.9 blocked: banned");
        assert_eq!(row.kind, "");
    }
}
