//! API server.
//!
//! Combines the GraphQL and health routers and runs them on a TCP
//! listener. The schema — and through it the registry handle — is
//! supplied at construction; the server owns no state of its own.

use std::io;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::graphql::ApiSchema;
use crate::observability::{Logger, Severity};

use super::config::ServerConfig;
use super::routes::{graphql_routes, health_routes};

/// HTTP server exposing the registry's GraphQL API.
pub struct ApiServer {
    config: ServerConfig,
    router: Router,
}

impl ApiServer {
    /// Server with default configuration.
    pub fn new(schema: ApiSchema) -> Self {
        Self::with_config(ServerConfig::default(), schema)
    }

    /// Server with custom configuration.
    pub fn with_config(config: ServerConfig, schema: ApiSchema) -> Self {
        let router = Self::build_router(schema);
        Self { config, router }
    }

    fn build_router(schema: ApiSchema) -> Router {
        // Permissive CORS: the gateway carries no auth surface
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes())
            .merge(graphql_routes(schema))
            .layer(cors)
    }

    /// The socket address string the server will bind.
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// The router (for tests).
    pub fn router(self) -> Router {
        self.router
    }

    /// Binds the listener and serves until the process exits.
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid listen address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        Logger::log(
            Severity::Info,
            "server_listening",
            &[
                ("addr", &addr.to_string()),
                ("graphql", "/graphql"),
                ("health", "/health"),
            ],
        );

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}
