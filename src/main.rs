use anyhow::{Context, Result};
use base64::Engine;
use clap::{Parser, Subcommand};
use obs_controller::apps::{decode_signing_key, encode_signing_key, sign_body};
use obs_controller::{AppRegistry, AppState, Config, ControlServer, InMemoryFrontend, ObsController};
use std::sync::Arc;
use tracing::info;

/// OBS Controller companion tool: manage client apps and test the control API
#[derive(Parser)]
#[command(name = "obsc", version, about)]
struct Cli {
    /// Config file (same format the plugin reads)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register a client app and print its credentials
    Register {
        /// Human-readable app name
        name: String,
    },
    /// List registered apps
    Apps,
    /// Print the X-OBSC-Signature value for a request body
    Sign {
        /// Base64 secret key printed by `register`
        #[arg(long)]
        key: String,
        /// Request body (empty if omitted)
        #[arg(long, default_value = "")]
        body: String,
    },
    /// Serve the control API against an in-memory host (no OBS required)
    Serve,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(cli.config.as_deref())?;
    let registry = AppRegistry::new(&cfg.apps.registry_path);

    match cli.command {
        Command::Register { name } => {
            let app = registry
                .register(&name)
                .with_context(|| format!("Failed to register {}", name))?;

            println!("Registered {}", app.metadata.name);
            println!("X-OBSC-App: {}", app.metadata.id());
            println!("Secret key: {}", encode_signing_key(&app.signing_key));
            println!("Keep the secret key private; it is not stored anywhere.");
        }
        Command::Apps => {
            let apps = registry
                .list()
                .with_context(|| format!("Failed to read {}", registry.path().display()))?;

            if apps.is_empty() {
                println!("No apps registered in {}", registry.path().display());
            }
            for app in apps {
                println!("{}  {}", app.id(), app.name);
            }
        }
        Command::Sign { key, body } => {
            let key = decode_signing_key(&key)?;
            let signature = sign_body(&key, body.as_bytes());
            println!(
                "{}",
                base64::engine::general_purpose::STANDARD.encode(signature.to_bytes())
            );
        }
        Command::Serve => serve(cfg, registry)?,
    }

    Ok(())
}

fn serve(cfg: Config, registry: AppRegistry) -> Result<()> {
    let controller = ObsController::new(Arc::new(InMemoryFrontend::new()));
    let state = AppState::new(controller, registry, &cfg);
    let server = ControlServer::spawn(&cfg.server, state)?;

    info!("Serving against in-memory host at http://{} (Ctrl-C to stop)", server.local_addr());

    tokio::runtime::Runtime::new()?
        .block_on(tokio::signal::ctrl_c())
        .context("Failed to wait for Ctrl-C")?;

    server.shutdown();
    Ok(())
}
