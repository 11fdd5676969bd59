//! Driver account commands.

use clap::{Subcommand, ValueEnum};
use ridextra_admin::AdminError;
use ridextra_core::{DriverId, VerificationSection};

use super::{Context, ListArgs};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum DriversAction {
    /// List drivers
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one driver
    Show {
        /// Driver ID
        id: String,
    },
    /// Show a driver's trip history
    Trips {
        /// Driver ID
        id: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Block a driver
    Block {
        /// Driver ID
        id: String,
    },
    /// Unblock a driver
    Unblock {
        /// Driver ID
        id: String,
    },
    /// Approve or reject a verification section
    Verify {
        /// Driver ID
        id: String,
        /// Section: bank, vehicle, license or profile
        section: VerificationSection,
        /// Approve or reject
        #[arg(value_enum)]
        decision: Decision,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Decision {
    Approve,
    Reject,
}

pub async fn run(ctx: &Context, action: DriversAction) -> Result<(), AdminError> {
    let drivers = ctx.client.drivers();

    match action {
        DriversAction::List { list } => {
            let page = drivers.list(&list.to_query()?).await?;
            output::page(ctx.json, &page, list.page)
        }
        DriversAction::Show { id } => output::json(&drivers.get(&DriverId::new(id)).await?),
        DriversAction::Trips { id, list } => {
            let page = drivers.trips(&DriverId::new(id), &list.to_query()?).await?;
            output::page(ctx.json, &page, list.page)
        }
        DriversAction::Block { id } => {
            let envelope = drivers.set_blocked(&DriverId::new(id), true).await?;
            output::done(&envelope, "Driver blocked");
            Ok(())
        }
        DriversAction::Unblock { id } => {
            let envelope = drivers.set_blocked(&DriverId::new(id), false).await?;
            output::done(&envelope, "Driver unblocked");
            Ok(())
        }
        DriversAction::Verify {
            id,
            section,
            decision,
        } => {
            let approved = decision == Decision::Approve;
            let envelope = drivers.verify(section, &DriverId::new(id), approved).await?;
            let fallback = if approved {
                format!("{section} approved")
            } else {
                format!("{section} rejected")
            };
            output::done(&envelope, &fallback);
            Ok(())
        }
    }
}
