//! Static content commands.

use clap::Subcommand;
use ridextra_admin::AdminError;
use ridextra_core::StaticContentKind;

use super::Context;
use crate::output;

#[derive(Debug, Subcommand)]
pub enum ContentAction {
    /// Print a page
    Show {
        /// Page: terms or policy
        kind: StaticContentKind,
    },
    /// Replace a page
    Set {
        /// Page: terms or policy
        kind: StaticContentKind,
        /// New content (HTML)
        content: String,
    },
}

pub async fn run(ctx: &Context, action: ContentAction) -> Result<(), AdminError> {
    let pages = ctx.client.content();

    match action {
        ContentAction::Show { kind } => {
            match pages.get(kind).await? {
                Some(content) => output::line(&content),
                None => output::line(&format!("No {kind} content yet")),
            }
            Ok(())
        }
        ContentAction::Set { kind, content } => {
            let envelope = pages.update(kind, &content).await?;
            output::done(&envelope, "Content updated");
            Ok(())
        }
    }
}
