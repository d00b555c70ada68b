//! # Storyworld HTTP Server Module
//!
//! Serves the explorer pages over axum.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/{section}` - Section page (`characters`, `scenes`, `locations`)
//! - `/{section}/{file}` - Save (POST)
//! - `/{section}/{file}/download` - Export stored (GET) or edited (POST) text
//! - `/api/{section}` - Loader output as JSON

pub mod config;
pub mod document_routes;
pub mod observability_routes;
pub mod pages;
pub mod server;

pub use config::HttpServerConfig;
pub use server::HttpServer;
