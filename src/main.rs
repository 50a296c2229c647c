use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrina::commands;
use vitrina::config::{loader, HostConfig};
use vitrina::paths::{self, PathKind};
use vitrina::AppServer;

#[derive(Parser)]
#[command(name = "vitrina")]
#[command(about = "Present a notebook-style document as a standalone app", long_about = None)]
struct Cli {
    /// Host configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the application server
    Serve {
        /// Bind address, e.g. 127.0.0.1:8866
        #[arg(long)]
        bind: Option<String>,
        /// App bundle directory
        #[arg(long)]
        app_dir: Option<String>,
        /// Pin the app to one document
        #[arg(long)]
        file: Option<String>,
        /// Disable file caching (front-end development)
        #[arg(long)]
        no_cache: bool,
    },
    /// Print the resolved directories and their sources
    Paths,
    /// List installed front-end extensions
    List,
    /// Enable a front-end extension
    Enable { name: String },
    /// Disable a front-end extension
    Disable { name: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrina=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut host = match &cli.config {
        Some(path) => loader::load_host_config(path)?,
        None => HostConfig::default(),
    };

    match cli.command {
        Commands::Serve {
            bind,
            app_dir,
            file,
            no_cache,
        } => {
            if let Some(bind) = bind {
                host.bind_address = bind;
            }
            if let Some(app_dir) = app_dir {
                host.app_dir = Some(app_dir);
            }
            if let Some(file) = file {
                host.file_to_run = Some(file);
            }
            if no_cache {
                host.cache_files = false;
            }

            let errors = loader::validate(&host);
            if !errors.is_empty() {
                for error in &errors {
                    tracing::error!(%error, "invalid host configuration");
                }
                return Err("invalid host configuration".into());
            }

            tracing::info!(
                bind_address = %host.bind_address,
                cache_files = host.cache_files,
                single_document = host.single_document_mode(),
                "configuration loaded"
            );

            let server = AppServer::new(&host);
            let listener = TcpListener::bind(&host.bind_address).await?;
            server.run(listener).await?;
            tracing::info!("shutdown complete");
        }
        Commands::Paths => {
            for resolved in commands::resolved_paths(&host) {
                println!(
                    "{:<14} {} ({})",
                    resolved.label,
                    resolved.path.display(),
                    resolved.source
                );
            }
        }
        Commands::List => {
            for extension in commands::list_extensions(&resolved_app_dir(&host))? {
                let state = if extension.enabled { "enabled" } else { "disabled" };
                println!(
                    "{:<32} {:<10} {}",
                    extension.manifest.name, extension.manifest.version, state
                );
            }
        }
        Commands::Enable { name } => {
            commands::set_extension_enabled(&resolved_app_dir(&host), &name, true)?;
            println!("Enabled {name}");
        }
        Commands::Disable { name } => {
            commands::set_extension_enabled(&resolved_app_dir(&host), &name, false)?;
            println!("Disabled {name}");
        }
    }

    Ok(())
}

fn resolved_app_dir(host: &HostConfig) -> PathBuf {
    paths::resolve(
        PathKind::AppBundle,
        host.app_dir.as_deref(),
        &paths::default_config_base(),
    )
}
