pub mod airtable;
pub mod api;
pub mod config;
pub mod metrics_defs;
pub mod resolver;
pub mod views;

use tokio::net::TcpListener;

/// Binds the configured listener and serves the API until the process is
/// stopped.
pub async fn run(config: config::Config) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.listener.host, config.listener.port);
    let state = api::AppState::new(config);
    let app = api::build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await
}
