// POSTBOX_ADDR=127.0.0.1:5002 RUST_LOG=postbox=debug postbox

use postbox::{Config, PostStore, Server, api};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let store = if config.seed { PostStore::seeded() } else { PostStore::new() };
    info!(posts = store.len(), seeded = config.seed, "post store ready");

    Server::bind(config.addr).serve(api::router(store)).await?;
    Ok(())
}
