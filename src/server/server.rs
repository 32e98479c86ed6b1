use axum::{Router, routing};
use std::net::SocketAddr;
use tracing::info;

pub fn health_router() -> Router {
    Router::new()
        .route("/health", routing::get(|| async { "up" }))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

pub async fn serve_health(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Health endpoint listening on {}", addr);
    axum::serve(listener, health_router().into_make_service()).await?;

    Ok(())
}
