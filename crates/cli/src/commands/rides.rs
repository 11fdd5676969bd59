//! Ride commands.

use clap::Subcommand;
use ridextra_admin::AdminError;
use ridextra_core::RideId;

use super::{Context, ListArgs};
use crate::output;

#[derive(Debug, Subcommand)]
pub enum RidesAction {
    /// List rides
    List {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show one ride
    Show {
        /// Ride ID
        id: String,
    },
    /// List bus rides
    BusList {
        #[command(flatten)]
        list: ListArgs,
    },
    /// Assign a bus to a bus ride
    AssignBus {
        /// Assignment as a JSON object, passed to the backend unchanged
        payload: String,
    },
}

pub async fn run(ctx: &Context, action: RidesAction) -> Result<(), AdminError> {
    let rides = ctx.client.rides();

    match action {
        RidesAction::List { list } => {
            let page = rides.list(&list.to_query()?).await?;
            output::page(ctx.json, &page, list.page)
        }
        RidesAction::Show { id } => output::json(&rides.get(&RideId::new(id)).await?),
        RidesAction::BusList { list } => {
            let page = rides.list_bus_rides(&list.to_query()?).await?;
            output::page(ctx.json, &page, list.page)
        }
        RidesAction::AssignBus { payload } => {
            let payload = serde_json::from_str(&payload)
                .map_err(|e| AdminError::Validation(format!("payload is not valid JSON: {e}")))?;
            let envelope = rides.assign_bus(payload).await?;
            output::done(&envelope, "Bus assigned");
            Ok(())
        }
    }
}
