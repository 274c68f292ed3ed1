//! Transfer command handlers.

use bytesize::ByteSize;
use serde::Serialize;
use serde_json::Value;

use qbitctl_api::{Client, Object};

use crate::cli::{GlobalOpts, TransferArgs, TransferCommand};
use crate::error::CliError;
use crate::output;

use super::util;

/// Human-readable byte rate; `0` means unlimited for limits.
pub fn rate(bytes_per_sec: i64, zero: &str) -> String {
    match u64::try_from(bytes_per_sec) {
        Ok(0) | Err(_) => zero.into(),
        Ok(n) => format!("{}/s", ByteSize::b(n)),
    }
}

fn bytes(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_u64)
        .map(|n| ByteSize::b(n).to_string())
        .unwrap_or_default()
}

fn detail_transfer_info(info: &Object) -> String {
    let int = |k: &str| info.get(k).and_then(Value::as_i64).unwrap_or(0);
    let text = |k: &str| info.get(k).map(output::cell).unwrap_or_default();
    [
        format!("Connection:  {}", text("connection_status")),
        format!("DHT nodes:   {}", text("dht_nodes")),
        format!(
            "Download:    {} (session {}, limit {})",
            rate(int("dl_info_speed"), "0 B/s"),
            bytes(info.get("dl_info_data")),
            rate(int("dl_rate_limit"), "unlimited"),
        ),
        format!(
            "Upload:      {} (session {}, limit {})",
            rate(int("up_info_speed"), "0 B/s"),
            bytes(info.get("up_info_data")),
            rate(int("up_rate_limit"), "unlimited"),
        ),
    ]
    .join("\n")
}

#[derive(Serialize)]
struct Limits {
    download: i64,
    upload: i64,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Client,
    args: TransferArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.format();
    match args.command {
        TransferCommand::Info => {
            let info = client.global_transfer_info().await?;
            let out = output::render_single(&format, &info, detail_transfer_info, |i| {
                i.get("connection_status")
                    .map(output::cell)
                    .unwrap_or_default()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TransferCommand::AltSpeed => {
            let enabled = client.alternative_speed_limits_enabled().await?;
            let out = output::render_single(
                &format,
                &enabled,
                |e| if *e { "enabled".into() } else { "disabled".into() },
                ToString::to_string,
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TransferCommand::ToggleAltSpeed => {
            client.toggle_alternative_speed_limits().await?;
            let enabled = client.alternative_speed_limits_enabled().await?;
            util::done(
                if enabled {
                    "Alternative speed limits enabled"
                } else {
                    "Alternative speed limits disabled"
                },
                global.quiet,
            );
            Ok(())
        }

        TransferCommand::Limits => {
            let limits = Limits {
                download: client.global_download_limit().await?,
                upload: client.global_upload_limit().await?,
            };
            let out = output::render_single(
                &format,
                &limits,
                |l| {
                    format!(
                        "Download: {}\nUpload:   {}",
                        rate(l.download, "unlimited"),
                        rate(l.upload, "unlimited")
                    )
                },
                |l| format!("{}\n{}", l.download, l.upload),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TransferCommand::SetDownloadLimit { limit } => {
            client.set_global_download_limit(limit).await?;
            util::done(
                &format!("Download limit set to {}", rate(limit, "unlimited")),
                global.quiet,
            );
            Ok(())
        }

        TransferCommand::SetUploadLimit { limit } => {
            client.set_global_upload_limit(limit).await?;
            util::done(
                &format!("Upload limit set to {}", rate(limit, "unlimited")),
                global.quiet,
            );
            Ok(())
        }

        TransferCommand::Ban { peers } => {
            client.ban_peers(&peers).await?;
            util::done(&format!("Banned {} peer(s)", peers.len()), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_rate_uses_placeholder() {
        assert_eq!(rate(0, "unlimited"), "unlimited");
        assert_eq!(rate(-1, "unlimited"), "unlimited");
        assert!(rate(2048, "unlimited").ends_with("/s"));
    }
}
