use anyhow::{Context, Result};
use career_advisor::core::ConfigManager;
use career_advisor::environment::load_dotenv;
use career_advisor::start_web_server;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "career_advisor=info,futureme=info";

#[derive(Parser)]
#[command(name = "futureme")]
#[command(about = "Career suggestion API backed by a hosted language model")]
struct Cli {
    /// YAML configuration file (defaults to ./config.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overrides configuration and ROCKET_PORT
    #[arg(short, long)]
    port: Option<u16>,

    /// Listen address, overrides configuration
    #[arg(short, long)]
    address: Option<String>,

    /// JSON log file
    #[arg(long, env = "FUTUREME_LOG_FILE", default_value = "/tmp/futureme.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_loaded = load_dotenv(Path::new(".env"))?;
    let cli = Cli::parse();

    // Initialize logging first
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&cli.log_file)
        .with_context(|| format!("Failed to open log file {}", cli.log_file.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().json().with_writer(file).with_span_list(false))
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    if dotenv_loaded {
        info!("Loaded .env");
    }

    let mut config = ConfigManager::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.environment.port = port;
    }
    if let Some(address) = cli.address {
        config.environment.address = address;
    }

    start_web_server(config).await
}
