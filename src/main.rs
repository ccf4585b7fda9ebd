// Main entry point - Dependency injection and pipeline setup
use std::sync::Arc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dsmr_influx::application::history_import::HistoryImport;
use dsmr_influx::application::live_pipeline::LivePipeline;
use dsmr_influx::infrastructure::config::{load_dsmr_config, load_influx_config};
use dsmr_influx::infrastructure::dsmr_reader_client::DsmrReaderClient;
use dsmr_influx::infrastructure::influx_sink::InfluxSink;
use dsmr_influx::infrastructure::p1_decoder::P1Decoder;
use dsmr_influx::infrastructure::serial_transport::SerialTransport;
use dsmr_influx::presentation::cli::{Cli, Commands};

// Fatal errors propagate out of main; restarts are left to the supervisor.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let influx_config = load_influx_config()?;
    let dsmr_config = load_dsmr_config()?;

    // Create sink (infrastructure layer)
    let sink = Arc::new(InfluxSink::new(
        &influx_config.url,
        &influx_config.org,
        &influx_config.token,
        dsmr_config.bucket.clone(),
    ));

    match cli.command {
        Commands::Live => {
            let decoder = Arc::new(P1Decoder::new(dsmr_config.telegram_specification));
            let mut transport =
                SerialTransport::open(&dsmr_config.device, dsmr_config.serial_settings)?;

            tracing::info!(
                "Reading {:?} telegrams from {}",
                dsmr_config.telegram_specification,
                dsmr_config.device
            );
            LivePipeline::new(decoder, sink).run(&mut transport).await?;
        }
        Commands::Import {
            api_url,
            api_key,
            batch_size,
        } => {
            tracing::info!("Starting import from {}", api_url);

            let import = HistoryImport::new(Arc::new(DsmrReaderClient::new(api_key)), sink);
            let progress = import
                .run(&HistoryImport::first_page_url(&api_url, batch_size))
                .await?;

            tracing::info!(
                "Finished import of {} readings in {} pages",
                progress.imported,
                progress.pages
            );
        }
    }

    Ok(())
}
