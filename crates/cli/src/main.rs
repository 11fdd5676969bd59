//! RideXtra CLI - Staff console for the RideXtra admin backend.
//!
//! # Usage
//!
//! ```bash
//! # Log in (password from RIDEXTRA_ADMIN_PASSWORD or --password)
//! rx-admin login -e ops@ridextra.app
//!
//! # List riders, page 2
//! rx-admin users list --page 2 --limit 20
//!
//! # Find a rider by phone
//! rx-admin users list --filter phone=98765
//!
//! # Approve a driver's license
//! rx-admin drivers verify 65f1c0 license approve
//!
//! # Close a ticket
//! rx-admin tickets status 65f2aa completed
//! ```
//!
//! # Commands
//!
//! - `login`, `logout`, `whoami`, `profile` - Session management
//! - `users` - Rider accounts and trip history
//! - `drivers` - Driver accounts and document verification
//! - `rides` - Rides and bus rides
//! - `tickets` - Support tickets
//! - `fares` - Fare schedules per vehicle type
//! - `content` - Terms and privacy policy

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use ridextra_admin::{AdminConfig, AuthenticatedClient, SessionStore};
use secrecy::ExposeSecret;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::{
    ContentAction, Context, DriversAction, FaresAction, RidesAction, TicketsAction, UsersAction,
};

#[derive(Parser)]
#[command(name = "rx-admin")]
#[command(author, version, about = "RideXtra admin console")]
struct Cli {
    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session
    Login {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(
            short,
            long,
            env = "RIDEXTRA_ADMIN_PASSWORD",
            hide_env_values = true
        )]
        password: Option<String>,
    },
    /// End the session
    Logout,
    /// Show the stored session
    Whoami,
    /// Show the admin profile from the backend
    Profile,
    /// Manage rider accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Manage driver accounts
    Drivers {
        #[command(subcommand)]
        action: DriversAction,
    },
    /// Browse rides
    Rides {
        #[command(subcommand)]
        action: RidesAction,
    },
    /// Handle support tickets
    Tickets {
        #[command(subcommand)]
        action: TicketsAction,
    },
    /// Manage fare schedules
    Fares {
        #[command(subcommand)]
        action: FaresAction,
    },
    /// Edit static content pages
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.expose_secret(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            send_default_pii: false,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Sentry filter: errors and warnings become events, info/debug breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Install the tracing subscriber. Logs go to stderr; stdout carries output.
fn init_tracing(log_json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ridextra_admin=info,ridextra_cli=info".into());

    let json_layer = log_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env before clap reads RIDEXTRA_ADMIN_PASSWORD
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match AdminConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!("Configuration error: {e}");
            std::process::exit(2);
        }
    };

    let sentry_guard = init_sentry(&config);
    init_tracing(config.log_json);

    let code = match run(cli, &config).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            1
        }
    };

    drop(sentry_guard);
    std::process::exit(code);
}

async fn run(cli: Cli, config: &AdminConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(SessionStore::open(config.session_file.clone()).await);
    let client = AuthenticatedClient::new(config, store)?
        .with_unauthorized_hook(output::session_expired);

    let ctx = Context {
        client,
        json: cli.json,
    };

    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&ctx, &email, password).await?;
        }
        Commands::Logout => commands::session::logout(&ctx).await?,
        Commands::Whoami => commands::session::whoami(&ctx).await?,
        Commands::Profile => commands::session::profile(&ctx).await?,
        Commands::Users { action } => commands::users::run(&ctx, action).await?,
        Commands::Drivers { action } => commands::drivers::run(&ctx, action).await?,
        Commands::Rides { action } => commands::rides::run(&ctx, action).await?,
        Commands::Tickets { action } => commands::tickets::run(&ctx, action).await?,
        Commands::Fares { action } => commands::fares::run(&ctx, action).await?,
        Commands::Content { action } => commands::content::run(&ctx, action).await?,
    }
    Ok(())
}
