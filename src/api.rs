use anyhow::{Error, Result};
use axum::{Router, http::StatusCode, response::IntoResponse, routing::any};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;

pub fn router() -> Router {
    Router::new()
        .route("/", any(hello))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_api_server(config: Config) -> Result<(), Error> {
    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Health check server started");

    axum::serve(listener, router()).await?;

    Ok(())
}

// Fixed acknowledgment, any method, no input validation.
async fn hello() -> impl IntoResponse {
    (StatusCode::OK, "Hello from the dispatch service!")
}
