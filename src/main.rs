use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use std::sync::Arc;
use sticker_search::{Cli, Config, SearchEngine, ServerSettings, StickerServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    sticker_search::tracing::init();

    let config_path = cli.config;

    tracing::info!(
        "Starting sticker-search MCP server with config {}",
        config_path.display()
    );

    let config = Config::load(&config_path)
        .inspect_err(|e| tracing::error!("Unable to read config: {:#}", e))?;
    let engine = SearchEngine::from_config(&config)
        .inspect_err(|e| tracing::error!("Unable to read sticker info: {:#}", e))?;

    let server = StickerServer::new(Arc::new(engine), ServerSettings::from_config(&config));
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
