//! `endpoints`: list the operation catalog. Needs no daemon.

use serde::Serialize;
use tabled::Tabled;

use qbitctl_api::{API_PREFIX, Endpoint, ParamKind, ParamSpec, catalog};

use crate::cli::GlobalOpts;
use crate::output;

#[derive(Debug, Clone, Serialize, Tabled)]
struct EndpointRow {
    #[tabled(rename = "Operation")]
    name: String,
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Parameters")]
    params: String,
    #[tabled(rename = "Returns")]
    returns: String,
}

/// `name`, `name?` for optional, `name[|]` for lists, `{name}` for JSON.
fn describe_param(spec: &ParamSpec) -> String {
    let base = match spec.kind {
        ParamKind::Scalar | ParamKind::Path => spec.name.to_owned(),
        ParamKind::List(delimiter) => {
            let sep = match delimiter.as_str() {
                "\n" => "\\n",
                other => other,
            };
            format!("{}[{sep}]", spec.name)
        }
        ParamKind::JsonText | ParamKind::Body => format!("{{{}}}", spec.name),
        ParamKind::Extra => format!("{}...", spec.name),
    };
    if spec.required || spec.kind == ParamKind::Extra {
        base
    } else {
        format!("{base}?")
    }
}

impl From<&&Endpoint> for EndpointRow {
    fn from(e: &&Endpoint) -> Self {
        Self {
            name: e.name.to_owned(),
            method: e.method.to_string(),
            path: format!("{API_PREFIX}{}", e.path),
            params: e
                .params
                .iter()
                .map(describe_param)
                .collect::<Vec<_>>()
                .join(" "),
            returns: e.shape.to_string(),
        }
    }
}

pub fn handle(global: &GlobalOpts) {
    let rows: Vec<EndpointRow> = catalog::ALL.iter().map(EndpointRow::from).collect();
    let out = output::render_list(&global.format(), &rows, EndpointRow::clone, |r| {
        r.name.clone()
    });
    output::print_output(&out, global.quiet);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rows_carry_full_path() {
        let row = EndpointRow::from(&&catalog::PAUSE_TORRENTS);
        assert_eq!(row.path, "/api/v2/torrents/pause");
        assert_eq!(row.method, "POST");
        assert_eq!(row.params, "hashes[|]");
        assert_eq!(row.returns, "none");
    }

    #[test]
    fn optional_and_json_params_are_marked() {
        let list = catalog::find("GetTorrentList").unwrap();
        let row = EndpointRow::from(&list);
        assert!(row.params.contains("filter?"));
        assert!(row.params.contains("hashes[|]?"));

        let prefs = EndpointRow::from(&&catalog::SET_APPLICATION_PREFERENCES);
        assert_eq!(prefs.params, "{json}");
    }
}
