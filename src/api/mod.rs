//! Inbound HTTP API.
//!
//! Exposes the connector's exchanges to local callers.
//!
//! # Endpoints
//!
//! | Method | Path | Query | Exchange |
//! |--------|------|-------|----------|
//! | `POST` | `/api/ids/description` | `recipient`, `elementId` (optional) | [`Connector::request_description`] |
//! | `POST` | `/api/ids/artifact` | `recipient`, `requestedArtifact` | [`Connector::request_artifact`] |
//!
//! Failures map to status codes as documented in [`error`].

// ============================================================================
// Submodules
// ============================================================================

/// HTTP mapping of exchange failures.
pub mod error;

/// Route handlers and query parameters.
pub mod routes;

// ============================================================================
// Imports
// ============================================================================

use axum::Router;
use axum::routing::post;
use tokio::net::TcpListener;
use tracing::info;

use crate::connector::Connector;
use crate::error::Result;

pub use routes::{ArtifactQuery, DescriptionQuery};

// ============================================================================
// ApiState
// ============================================================================

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct ApiState {
    /// The local connector.
    pub connector: Connector,
}

// ============================================================================
// Router
// ============================================================================

/// Builds the API router for `connector`.
#[must_use]
pub fn router(connector: Connector) -> Router {
    let ids = Router::new()
        .route("/description", post(routes::send_description_request))
        .route("/artifact", post(routes::send_artifact_request));

    Router::new()
        .nest("/api/ids", ids)
        .with_state(ApiState { connector })
}

/// Serves the API on `listener` until Ctrl+C.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the server fails.
pub async fn serve(listener: TcpListener, connector: Connector) -> Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, connector = %connector.id(), "Connector API listening");

    axum::serve(listener, router(connector))
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutdown signal received");
        })
        .await?;

    info!("Connector API stopped");
    Ok(())
}
