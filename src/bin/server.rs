//! Routine HTTP Server Binary
//!
//! Main entry point for the routine REST API server. It selects the
//! collaborator backend, sets up the HTTP router, and starts serving.
//!
//! # Usage
//!
//! ```bash
//! # Run against the in-memory backend (default)
//! cargo run --bin routine-server --features "local-api,http-server"
//!
//! # Run against the remote scheduling service
//! ROUTINE_API_URL=http://scheduler.internal:8080 \
//!   cargo run --bin routine-server --features "remote-api,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `ROUTINE_API_URL`: Base URL of the scheduling service (remote-api feature)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use routine_rust::http::{create_router, AppState};
use routine_rust::remote::RoutineApi;
use routine_rust::services::lifecycle::RoutineWorkflow;

fn create_api() -> anyhow::Result<Arc<dyn RoutineApi>> {
    #[cfg(feature = "remote-api")]
    if let Ok(url) = env::var("ROUTINE_API_URL") {
        info!(url = %url, "using remote scheduling service");
        return Ok(Arc::new(routine_rust::remote::HttpRoutineApi::new(url)?));
    }

    #[cfg(feature = "local-api")]
    {
        info!("using in-memory collaborator backend");
        return Ok(Arc::new(routine_rust::remote::LocalRoutineApi::new()));
    }

    #[allow(unreachable_code)]
    anyhow::bail!("no collaborator backend: set ROUTINE_API_URL or enable the local-api feature")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting routine HTTP server");

    let api = create_api()?;
    let workflow = RoutineWorkflow::new(api);

    // Create application state and router
    let state = AppState::new(workflow);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
