use anyhow::Context;
use classgrid::router::init_router;
use classgrid::state::init_app_state;
use classgrid_config::ServerConfig;
use classgrid_observability::{LoggingConfig, init_tracing};
use dotenvy::dotenv;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_tracing(&LoggingConfig::from_env());

    let state = init_app_state()
        .await
        .context("Failed to initialize the document store")?;
    tracing::info!(store = state.store.backend(), "Document store ready");

    let app = init_router(state);

    let server_config = ServerConfig::from_env();
    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Server running on http://{addr}");
    tracing::info!("Swagger UI available at http://{addr}/swagger-ui");
    tracing::info!("Scalar UI available at http://{addr}/scalar");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
