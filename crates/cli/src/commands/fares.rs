//! Fare schedule commands.

use clap::{Args, Subcommand};
use ridextra_admin::AdminError;
use ridextra_core::{FareInput, VehicleTypeId};
use rust_decimal::Decimal;

use super::Context;
use crate::output;

#[derive(Debug, Subcommand)]
pub enum FaresAction {
    /// List fare schedules
    List,
    /// Add a vehicle type
    Add {
        #[command(flatten)]
        fare: FareArgs,
    },
    /// Replace the fares of a vehicle type
    Edit {
        /// Vehicle type ID
        id: String,
        #[command(flatten)]
        fare: FareArgs,
    },
    /// Remove a vehicle type
    Delete {
        /// Vehicle type ID
        id: String,
    },
    /// Make a vehicle type bookable
    Enable {
        /// Vehicle type ID
        id: String,
    },
    /// Stop offering a vehicle type
    Disable {
        /// Vehicle type ID
        id: String,
    },
}

/// Fare amounts for `add` and `edit`.
#[derive(Debug, Args)]
pub struct FareArgs {
    /// Vehicle type name (letters, spaces, hyphens)
    #[arg(long)]
    pub vehicle_type: String,
    /// Base fare
    #[arg(long)]
    pub base: Decimal,
    /// Price per minute
    #[arg(long)]
    pub per_minute: Decimal,
    /// Price per kilometre
    #[arg(long)]
    pub per_km: Decimal,
    /// Platform fee in percent
    #[arg(long)]
    pub platform_fee: Decimal,
    /// Cancellation charge
    #[arg(long)]
    pub cancel: Decimal,
}

impl From<FareArgs> for FareInput {
    fn from(args: FareArgs) -> Self {
        Self {
            vehicle_type: args.vehicle_type,
            base_price: args.base,
            time_price: args.per_minute,
            distance_price: args.per_km,
            platform_fee_percent: args.platform_fee,
            cancel_price: args.cancel,
        }
    }
}

pub async fn run(ctx: &Context, action: FaresAction) -> Result<(), AdminError> {
    let fares = ctx.client.fares();

    match action {
        FaresAction::List => {
            let schedules = fares.list().await?;
            if ctx.json {
                return output::json(&schedules);
            }
            output::table(&schedules);
            Ok(())
        }
        FaresAction::Add { fare } => {
            let envelope = fares.create(&fare.into()).await?;
            output::done(&envelope, "Vehicle type added");
            Ok(())
        }
        FaresAction::Edit { id, fare } => {
            let envelope = fares.update(&VehicleTypeId::new(id), &fare.into()).await?;
            output::done(&envelope, "Fares updated");
            Ok(())
        }
        FaresAction::Delete { id } => {
            let envelope = fares.delete(&VehicleTypeId::new(id)).await?;
            output::done(&envelope, "Vehicle type deleted");
            Ok(())
        }
        FaresAction::Enable { id } => {
            let envelope = fares.set_active(&VehicleTypeId::new(id), true).await?;
            output::done(&envelope, "Vehicle type enabled");
            Ok(())
        }
        FaresAction::Disable { id } => {
            let envelope = fares.set_active(&VehicleTypeId::new(id), false).await?;
            output::done(&envelope, "Vehicle type disabled");
            Ok(())
        }
    }
}
