use crate::libs::{config::Config, logging};
use crate::server;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to bind, overrides the configured host
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides the configured port
    #[arg(short, long)]
    port: Option<u16>,
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    logging::init();

    let mut config = Config::read()?;
    let mut server_config = config.server.take().unwrap_or_default();
    if let Some(host) = args.host {
        server_config.host = host;
    }
    if let Some(port) = args.port {
        server_config.port = port;
    }
    config.server = Some(server_config);

    server::serve(config).await
}
