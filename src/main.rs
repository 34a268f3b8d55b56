mod config;
mod proxy;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env().expect("invalid configuration");
    let port = config.port;
    tracing::info!(backend = %config.backend_url, timeout_secs = config.backend_timeout.as_secs(), "backend proxy configured");

    let state = state::AppState::new(config).expect("http client init failed");
    let app = routes::app(state).expect("leptos init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "campfire listening");
    axum::serve(listener, app).await.expect("server failed");
}
