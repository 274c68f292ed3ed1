//! Category command handlers.

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use qbitctl_api::{Client, Object};

use crate::cli::{CategoriesArgs, CategoriesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Clone, Serialize, Tabled)]
struct CategoryRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Save Path")]
    #[serde(rename = "savePath")]
    save_path: String,
}

/// The daemon answers with `{name: {name, savePath}}`; flatten to sorted rows.
fn category_rows(categories: &Object) -> Vec<CategoryRow> {
    let mut rows: Vec<CategoryRow> = categories
        .iter()
        .map(|(name, entry)| CategoryRow {
            name: name.clone(),
            save_path: entry
                .get("savePath")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
        })
        .collect();
    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

pub async fn handle(
    client: &Client,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CategoriesCommand::List => {
            let rows = category_rows(&client.categories().await?);
            let out = output::render_list(
                &global.format(),
                &rows,
                CategoryRow::clone,
                |r| r.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Create { name, save_path } => {
            client.create_category(&name, &save_path).await?;
            util::done(&format!("Category '{name}' created"), global.quiet);
            Ok(())
        }

        CategoriesCommand::Edit { name, save_path } => {
            client.edit_category(&name, &save_path).await?;
            util::done(&format!("Category '{name}' updated"), global.quiet);
            Ok(())
        }

        CategoriesCommand::Remove { names } => {
            if !util::confirm(
                &format!("Remove {} category(ies)?", names.len()),
                "categories remove",
                global.yes,
            )? {
                return Ok(());
            }
            client.remove_categories(&names).await?;
            util::done(&format!("Removed {}", names.join(", ")), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn category_rows_are_sorted_by_name() {
        let Value::Object(map) = json!({
            "movies": {"name": "movies", "savePath": "/data/movies"},
            "linux": {"name": "linux", "savePath": ""}
        }) else {
            unreachable!()
        };
        let rows = category_rows(&map);
        assert_eq!(rows[0].name, "linux");
        assert_eq!(rows[1].save_path, "/data/movies");
    }
}
