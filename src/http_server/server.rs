//! # HTTP Server
//!
//! Combines the document and health routers behind a request body limit.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;

use super::config::HttpServerConfig;
use super::document_routes::document_routes;
use super::observability_routes::health_routes;
use crate::app::AppState;
use crate::observability::{log_event_with_fields, Event};

/// HTTP server for the storyworld explorer
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server with custom configuration
    pub fn with_config(config: HttpServerConfig, state: Arc<AppState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Create a server on the default host and port
    pub fn new(state: Arc<AppState>) -> Self {
        Self::with_config(HttpServerConfig::default(), state)
    }

    /// Build the combined router with all endpoints
    pub fn build_router(config: &HttpServerConfig, state: Arc<AppState>) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(document_routes(state))
            .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        let url = format!("http://{}", listener.local_addr()?);
        log_event_with_fields(Event::ServerListening, &[("url", url.as_str())]);

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
