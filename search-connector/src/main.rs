//! Search Connector Main Entry Point
//!
//! Indexes one upstream source into Enterprise Search, or registers a website
//! with the engine crawler, depending on the subcommand.

use clap::Parser;
use dotenv::dotenv;
use search_connector::config::{Cli, Settings};
use search_connector::{Dependencies, IndexingError};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// `LOG_FORMAT=json` switches to structured JSON output; anything else uses
/// pretty console output. Both write to stderr so stdout only carries the
/// backend's responses.
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("search_connector=info,search_connector_repository=info")
    });

    let json = settings
        .optional("LOG_FORMAT")
        .is_some_and(|format| format.eq_ignore_ascii_case("json"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .pretty(),
            )
            .init();
    }

    info!(
        service_name = "search-connector",
        service_version = env!("CARGO_PKG_VERSION"),
        json,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::from_env();

    init_tracing(&settings);

    info!(command = ?cli.command, "Starting search connector");

    let deps = match Dependencies::new(cli.command.as_ref(), &settings) {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    match deps.run().await {
        Ok(()) => {
            info!("Search connector completed successfully");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Search connector failed");
            Err(e)
        }
    }
}
