mod compare;

use clap::{Parser, Subcommand, ValueEnum};
use preisvergleich_core::{normalize_ean, EanError};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "preisvergleich")]
#[command(about = "Compare wholesale prices for one EAN across electrical suppliers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up one EAN at every configured supplier and compare prices.
    Compare {
        /// EAN/GTIN as scanned or typed; whitespace is ignored.
        #[arg(value_parser = parse_ean)]
        ean: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn parse_ean(raw: &str) -> Result<String, EanError> {
    normalize_ean(raw)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = preisvergleich_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compare { ean, format } => compare::run_compare(&config, &ean, format).await,
    }
}
