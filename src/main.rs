use anyhow::Result;
use clap::{Parser, Subcommand};

/// pwa-host - Progressive Web App resources for any site
#[derive(Parser)]
#[command(name = "pwa-host")]
#[command(about = "Serve a site with a web app manifest, service worker and offline page", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the generated service worker
    ServiceWorker,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = pwa_host::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    match cli.command {
        Commands::Serve { host, port } => {
            pwa_host::observability::init_observability(
                "pwa-host",
                env!("CARGO_PKG_VERSION"),
                &config.observability.log_level,
                config.server.environment,
            )?;

            pwa_host::cli::serve(config, host, port).await
        }
        // stdout carries the script, keep logs out of it
        Commands::ServiceWorker => pwa_host::cli::print_service_worker(config).await,
    }
}
