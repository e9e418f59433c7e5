//! Portal API Library
//!
//! HTTP surface of the HR portal: collaborator registration, login and
//! profile, guarded by bearer tokens from the auth service.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use auth_service_lib::repository::InMemoryCollaboratorStore;
use auth_service_lib::AuthComponents;

use crate::config::PortalConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server.
///
/// With `in_memory` set, collaborators live in process memory and no
/// database is contacted.
pub async fn run_server(
    config: PortalConfig,
    in_memory: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let components = if in_memory {
        warn!("Using in-memory collaborator store; registrations are lost on shutdown");
        AuthComponents::build(&config.auth, Arc::new(InMemoryCollaboratorStore::new()))?
    } else {
        AuthComponents::connect(&config.auth).await?
    };

    let state = AppState::from(components);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(service = %config.server.service_name, "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
