use std::sync::Arc;

use anyhow::Context as _;

use storefront_api::app::{AppServices, build_app};
use storefront_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_observability::init();

    let config = ApiConfig::from_env()?;
    let services = Arc::new(AppServices::from_config(&config)?);
    let app = build_app(services).context("route wiring is invalid")?;

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(address = %listener.local_addr()?, secure_cookie = config.cookie_secure, "listening");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
