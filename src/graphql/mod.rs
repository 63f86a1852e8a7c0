//! GraphQL API for the registry.
//!
//! Declares the external schema and binds each field to a registry
//! operation. The registry handle is injected as schema context data at
//! construction; resolvers share it across requests.
//!
//! ## Example
//!
//! ```graphql
//! mutation {
//!   createZanpakuto(zanpakutoParameters: { name: "Zangetsu", bankai: "Tensa Zangetsu" }) { id }
//!   createWielder(wielderParameters: { name: "Ichigo", zanpakuto: "zangetsu" }) { id }
//! }
//!
//! { wielders(name: "ichigo") { name zanpakuto { name bankai } } }
//! ```

mod mutation;
mod query;
mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{Wielder, WielderParameters, Zanpakuto, ZanpakutoParameters};

use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use crate::registry::Registry;

/// The registry GraphQL schema type
pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the registry handle as context data.
pub fn build_schema(registry: Arc<Registry>) -> ApiSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(registry)
        .finish()
}
