mod demo;
mod handlers;
mod server;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use locker_core::config::{EngineConfig, InventorySpec};

#[derive(Parser)]
#[command(
    name = "locker",
    about = "Locker: package-locker allocation service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the locker HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3200")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// JSON engine config file
        #[arg(long, env = "LOCKER_CONFIG")]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: EngineOverrides,

        /// Seconds between background sweeps (0 disables)
        #[arg(long, default_value = "60", env = "LOCKER_SWEEP_INTERVAL_SECS")]
        sweep_interval_secs: u64,

        /// Maximum in-flight requests
        #[arg(long, default_value = "256")]
        max_concurrency: usize,
    },

    /// Run the scripted deposit / pickup / expiry walkthrough
    Demo,

    /// Print version information
    Version,
}

#[derive(clap::Args)]
struct EngineOverrides {
    /// SMALL lockers to seed
    #[arg(long, env = "LOCKER_SMALL")]
    small: Option<usize>,

    /// MEDIUM lockers to seed
    #[arg(long, env = "LOCKER_MEDIUM")]
    medium: Option<usize>,

    /// LARGE lockers to seed
    #[arg(long, env = "LOCKER_LARGE")]
    large: Option<usize>,

    /// Retention window in milliseconds
    #[arg(long, env = "LOCKER_RETENTION_MS")]
    retention_ms: Option<u64>,
}

fn load_config(path: Option<&PathBuf>, overrides: &EngineOverrides) -> Result<EngineConfig, String> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
            serde_json::from_str::<EngineConfig>(&raw)
                .map_err(|e| format!("Invalid config '{}': {}", path.display(), e))?
        }
        None => EngineConfig::default(),
    };

    if overrides.small.is_some() || overrides.medium.is_some() || overrides.large.is_some() {
        let (small, medium, large) = match &config.inventory {
            InventorySpec::Counts { small, medium, large } => (*small, *medium, *large),
            InventorySpec::Explicit(_) => {
                return Err("Per-class counts cannot override an explicit inventory".to_string());
            }
        };
        config.inventory = InventorySpec::Counts {
            small: overrides.small.unwrap_or(small),
            medium: overrides.medium.unwrap_or(medium),
            large: overrides.large.unwrap_or(large),
        };
    }
    if let Some(retention_ms) = overrides.retention_ms {
        config.retention_ms = retention_ms;
    }

    Ok(config)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            host,
            config,
            overrides,
            sweep_interval_secs,
            max_concurrency,
        } => {
            let config = match load_config(config.as_ref(), &overrides) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("{}", e);
                    std::process::exit(2);
                }
            };
            let opts = server::ServeOptions {
                host,
                port,
                sweep_interval_secs,
                max_concurrency,
            };
            if let Err(e) = server::run(config, opts).await {
                tracing::error!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::Demo => {
            if let Err(e) = demo::run() {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("locker {}", env!("CARGO_PKG_VERSION"));
            println!("Package-locker allocation engine");
        }
    }
}
