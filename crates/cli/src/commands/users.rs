//! Rider account commands.

use clap::Subcommand;
use ridextra_admin::AdminError;
use ridextra_core::UserId;

use super::{Context, ListArgs};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List riders
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one rider
    Show {
        /// Rider ID
        id: String,
    },
    /// Show a rider's trip history
    Trips {
        /// Rider ID
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Block a rider
    Block {
        /// Rider ID
        id: String,
    },
    /// Unblock a rider
    Unblock {
        /// Rider ID
        id: String,
    },
    /// Delete a rider account
    Delete {
        /// Rider ID
        id: String,
    },
}

pub async fn run(ctx: &Context, action: UsersAction) -> Result<(), AdminError> {
    let users = ctx.client.users();

    match action {
        UsersAction::List { list } => {
            let page = users.list(&list.to_query()?).await?;
            output::page(ctx.json, &page, list.page)
        }
        UsersAction::Show { id } => output::json(&users.get(&UserId::new(id)).await?),
        UsersAction::Trips { id, list } => {
            let page = users.trips(&UserId::new(id), &list.to_query()?).await?;
            output::page(ctx.json, &page, list.page)
        }
        UsersAction::Block { id } => {
            let envelope = users.set_blocked(&UserId::new(id), true).await?;
            output::done(&envelope, "User blocked");
            Ok(())
        }
        UsersAction::Unblock { id } => {
            let envelope = users.set_blocked(&UserId::new(id), false).await?;
            output::done(&envelope, "User unblocked");
            Ok(())
        }
        UsersAction::Delete { id } => {
            let envelope = users.delete(&UserId::new(id)).await?;
            output::done(&envelope, "User deleted");
            Ok(())
        }
    }
}
