//! `call`: invoke any catalog operation by name with `key=value` parameters.

use serde_json::Value;

use qbitctl_api::{ArgValue, Args, Client, Delimiter, Endpoint, ParamKind, catalog};

use crate::cli::{CallArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Look up an operation by name, case-insensitively.
pub fn find_endpoint(name: &str) -> Result<&'static Endpoint, CliError> {
    catalog::find(name).ok_or_else(|| CliError::UnknownOperation { name: name.into() })
}

fn split_pair(raw: &str) -> Result<(&str, &str), CliError> {
    raw.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| CliError::Validation {
            field: raw.into(),
            reason: "parameters must be written as KEY=VALUE".into(),
        })
}

/// Split a list value into items.
///
/// Items are separated by the parameter's wire delimiter, and by commas
/// except in URL lists, where a comma belongs to the URL.
fn list_items(name: &str, value: &str, delimiter: Delimiter) -> Vec<String> {
    let url_valued = matches!(name, "urls" | "sources");
    let sep = delimiter.as_str();
    value
        .split(|c: char| sep.contains(c) || (!url_valued && c == ','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Build call arguments from `key=value` strings using the endpoint's
/// declared parameter kinds.
///
/// List values are comma-separated (URL lists use their wire delimiter)
/// and a repeated key appends to the list. JSON parameters take JSON text.
/// Undeclared keys go to the endpoint's free-form options when it has
/// them, and are otherwise left for the request builder to reject.
pub fn build_args(endpoint: &Endpoint, params: &[String]) -> Result<Args, CliError> {
    let extra = endpoint.params.iter().find(|p| p.kind == ParamKind::Extra);
    let mut args = Args::new();
    let mut extra_pairs: Vec<(String, String)> = Vec::new();

    for raw in params {
        let (key, value) = split_pair(raw)?;
        let Some(spec) = endpoint.params.iter().find(|p| p.name == key) else {
            if extra.is_some() {
                extra_pairs.push((key.to_owned(), value.to_owned()));
            } else {
                args = args.text(key, value);
            }
            continue;
        };

        args = match spec.kind {
            ParamKind::Scalar | ParamKind::Path => args.text(key, value),
            ParamKind::List(delimiter) => {
                let mut items = match args.get(key) {
                    Some(ArgValue::List(earlier)) => earlier.clone(),
                    _ => Vec::new(),
                };
                items.extend(list_items(key, value, delimiter));
                args.list(key, items)
            }
            ParamKind::Body => args.json(key, serde_json::from_str::<Value>(value)?),
            ParamKind::JsonText => match serde_json::from_str::<Value>(value) {
                Ok(doc) => args.json(key, doc),
                Err(_) => args.text(key, value),
            },
            ParamKind::Extra => {
                return Err(CliError::Validation {
                    field: key.into(),
                    reason: "free-form options are passed as their own KEY=VALUE pairs".into(),
                });
            }
        };
    }

    if let Some(spec) = extra {
        if !extra_pairs.is_empty() {
            args = args.set(spec.name, ArgValue::Pairs(extra_pairs));
        }
    }
    Ok(args)
}

pub async fn handle(client: &Client, args: CallArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let endpoint = find_endpoint(&args.operation)?;
    let call_args = build_args(endpoint, &args.params)?;
    tracing::debug!(operation = endpoint.name, path = endpoint.path, "calling");

    let payload = client.execute(endpoint, &call_args).await?;
    let out = output::render_payload(&global.format(), &payload);
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn list_values_split_on_commas() {
        let endpoint = find_endpoint("pausetorrents").unwrap();
        let args = build_args(endpoint, &strings(&["hashes=h1,h2"])).unwrap();
        let resolved = endpoint.resolve(&args).unwrap();
        assert_eq!(resolved.pairs, vec![("hashes".to_owned(), "h1|h2".to_owned())]);
    }

    #[test]
    fn url_lists_keep_commas() {
        let endpoint = find_endpoint("AddTrackersToTorrent").unwrap();
        let args = build_args(
            endpoint,
            &strings(&[
                "hash=abc",
                "urls=http://t.example/announce?a=1,2",
                "urls=udp://u.example:80",
            ]),
        )
        .unwrap();
        let resolved = endpoint.resolve(&args).unwrap();
        assert!(resolved.pairs.contains(&(
            "urls".to_owned(),
            "http://t.example/announce?a=1,2\nudp://u.example:80".to_owned()
        )));
    }

    #[test]
    fn repeated_list_key_appends() {
        let endpoint = find_endpoint("PauseTorrents").unwrap();
        let args = build_args(endpoint, &strings(&["hashes=h1", "hashes=h2|h3"])).unwrap();
        let resolved = endpoint.resolve(&args).unwrap();
        assert_eq!(resolved.pairs, vec![("hashes".to_owned(), "h1|h2|h3".to_owned())]);
    }

    #[test]
    fn undeclared_keys_become_add_options() {
        let endpoint = find_endpoint("AddNewTorrent").unwrap();
        let args = build_args(endpoint, &strings(&["urls=magnet:?xt=urn:btih:abc", "ratioLimit=2"])).unwrap();
        let resolved = endpoint.resolve(&args).unwrap();
        assert!(resolved.pairs.contains(&("ratioLimit".to_owned(), "2".to_owned())));
        assert!(resolved.pairs.contains(&("urls".to_owned(), "magnet:?xt=urn:btih:abc".to_owned())));
    }

    #[test]
    fn undeclared_key_without_options_is_rejected_by_resolve() {
        let endpoint = find_endpoint("PauseTorrents").unwrap();
        let args = build_args(endpoint, &strings(&["hashes=all", "bogus=1"])).unwrap();
        let err = endpoint.resolve(&args).unwrap_err();
        assert!(err.to_string().contains("unknown parameter 'bogus'"));
    }

    #[test]
    fn body_parameter_takes_json() {
        let endpoint = find_endpoint("SetApplicationPreferences").unwrap();
        let args = build_args(endpoint, &strings(&[r#"json={"dl_limit":0}"#])).unwrap();
        let resolved = endpoint.resolve(&args).unwrap();
        assert_eq!(resolved.body.unwrap()["dl_limit"], 0);

        let err = build_args(endpoint, &strings(&["json=not-json"])).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
    }

    #[test]
    fn malformed_pair_is_a_validation_error() {
        let endpoint = find_endpoint("PauseTorrents").unwrap();
        let err = build_args(endpoint, &strings(&["hashes"])).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn unknown_operation_is_reported() {
        assert!(matches!(
            find_endpoint("NoSuchThing"),
            Err(CliError::UnknownOperation { .. })
        ));
    }
}
