use std::net::SocketAddr;

use referee_scheduler::{AppConfig, http_api, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    logging::init_logging("info");

    let config = AppConfig::from_env()?;
    let addr: SocketAddr = config.http_addr.parse()?;
    let store = config.open_store()?;

    info!(%addr, backend = config.backend.as_str(), "referee scheduler HTTP API listening");
    http_api::serve(addr, store).await?;
    Ok(())
}
