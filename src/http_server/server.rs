//! # HTTP Server
//!
//! Combines the entity, report and health routers into one axum service.

use std::sync::Arc;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::model::{Department, Employee, Location, Tier};

use super::config::HttpServerConfig;
use super::entity_routes::entity_routes;
use super::health_routes::health_routes;
use super::middleware::record_api_call;
use super::query_routes::query_routes;
use super::state::{ApiState, SharedState};

/// HTTP server for the organization API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `state` with the given configuration
    pub fn with_config(config: HttpServerConfig, state: ApiState) -> Self {
        let router = Self::build_router(&config, Arc::new(state));
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, state: SharedState) -> Router {
        // Only /api calls land in the call history.
        let api = Router::new()
            .merge(entity_routes::<Location>())
            .merge(entity_routes::<Department>())
            .merge(entity_routes::<Tier>())
            .merge(entity_routes::<Employee>())
            .merge(query_routes())
            .layer(middleware::from_fn_with_state(state.clone(), record_api_call))
            .with_state(state);

        Router::new()
            .merge(health_routes())
            .nest("/api", api)
            .layer(config.cors_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;

        info!(%addr, "HTTP server listening");
        info!("health check: http://{}/health", addr);

        axum::serve(listener, self.router).await
    }
}
