// Command line interface
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "dsmr-influx")]
#[command(about = "Store DSMR smart meter telegrams in InfluxDB")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read telegrams from the P1 port and write them continuously
    Live,
    /// Import stored readings from a DSMR-reader installation
    Import {
        /// URL of the DSMR-reader installation, e.g. http://localhost:8080
        #[arg(env = "DSMR_API_URL")]
        api_url: String,
        /// Auth key set in the DSMR-reader API configuration
        #[arg(env = "DSMR_API_KEY", hide_env_values = true)]
        api_key: String,
        /// Number of readings per API request
        #[arg(long, env = "DSMR_BATCH_SIZE", default_value_t = 1000)]
        batch_size: usize,
    },
}
