//! warmline daemon entry point.

use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use warmline::api::WuzapiClient;
use warmline::content::FileContentSource;
use warmline::journal::MessageJournal;
use warmline::{Config, Engine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warmline=info")),
        )
        .init();

    let config = Config::parse();

    let journal = Arc::new(MessageJournal::new(&config.log_dir)?);
    info!(path = %journal.path().display(), "message journal ready");

    let api = Arc::new(WuzapiClient::new(&config.base_url, &config.admin_token)?);
    let content = Arc::new(FileContentSource::new(&config.media_dir));
    let engine = Arc::new(Engine::new(config, api, content, journal));

    let interrupt_engine = Arc::clone(&engine);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupt received, shutting down");
            interrupt_engine.shutdown();
        }
    });

    engine.run().await;
    Ok(())
}
