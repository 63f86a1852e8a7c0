//! HTTP server for the API gateway.

mod config;
mod routes;
mod server;

pub use config::ServerConfig;
pub use routes::{graphql_routes, health_routes, HealthResponse};
pub use server::ApiServer;
