use anyhow::Result;
use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;
use tracing::info;

use vagledare::{answer::generate_answer, app_state::AppState, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let state = AppState::new(&config);

    let app = Router::new()
        .route("/v1/answer", post(generate_answer))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %config.bind_addr(), "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
