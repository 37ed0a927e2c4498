use crate::libs::config::Config;
use crate::server;
use anyhow::Result;
use clap::Args;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Bind address (overrides the configuration file)
    #[arg(long)]
    host: Option<String>,
    /// TCP port (overrides the configuration file)
    #[arg(short, long)]
    port: Option<u16>,
}

/// Runs the HTTP + WebSocket server until interrupted.
pub async fn cmd(args: ServeArgs) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskdeck=info")))
        .init();

    let config = Config::read()?;
    let mut server_config = config.server.unwrap_or_default();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }

    server::run(&server_config).await
}
