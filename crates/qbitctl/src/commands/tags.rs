//! Tag command handlers.

use qbitctl_api::{Client, Payload};

use crate::cli::{GlobalOpts, TagsArgs, TagsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(client: &Client, args: TagsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        TagsCommand::List => {
            let tags = client.tags().await?;
            let out = output::render_payload(&global.format(), &Payload::Scalars(tags));
            output::print_output(&out, global.quiet);
            Ok(())
        }

        TagsCommand::Create { tags } => {
            client.create_tags(&tags).await?;
            util::done(&format!("Created {}", tags.join(", ")), global.quiet);
            Ok(())
        }

        TagsCommand::Delete { tags } => {
            if !util::confirm(
                &format!("Delete tag(s) {}?", tags.join(", ")),
                "tags delete",
                global.yes,
            )? {
                return Ok(());
            }
            client.delete_tags(&tags).await?;
            util::done(&format!("Deleted {}", tags.join(", ")), global.quiet);
            Ok(())
        }
    }
}
