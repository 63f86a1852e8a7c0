//! HTTP routes for the API gateway.
//!
//! One typed endpoint carries the whole API: `POST /graphql`. A GET on
//! the same path serves the interactive playground, and `/health` reports
//! liveness for probes.

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::graphql::ApiSchema;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Routes serving the GraphQL endpoint and its playground.
pub fn graphql_routes(schema: ApiSchema) -> Router {
    Router::new()
        .route("/graphql", get(playground_handler).post(graphql_handler))
        .with_state(schema)
}

/// Liveness route.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn graphql_handler(State(schema): State<ApiSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn playground_handler() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
