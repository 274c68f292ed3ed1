//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::path::Path;

use serde_json::Value;

use qbitctl_api::Object;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal on stdin there is nobody to ask, so `--yes` is required.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Require a JSON object, naming `field` in the error otherwise.
pub fn into_object(value: Value, field: &str) -> Result<Object, CliError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CliError::Validation {
            field: field.into(),
            reason: format!("expected a JSON object, got {other}"),
        }),
    }
}

/// Print a success note to stderr unless `--quiet`.
pub fn done(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("✓ {message}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn into_object_rejects_arrays() {
        assert!(into_object(json!({"dl_limit": 0}), "json").is_ok());
        let err = into_object(json!([1]), "json").unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "json"));
    }

    #[test]
    fn read_json_file_parses_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"up_limit": 1024}"#).unwrap();
        let value = read_json_file(&path).unwrap();
        assert_eq!(value["up_limit"], 1024);
    }

    #[test]
    fn confirm_with_yes_skips_prompt() {
        assert!(confirm("Delete?", "delete", true).unwrap());
    }
}
