//! Root query resolvers.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use crate::registry::Registry;

use super::types::{Wielder, Zanpakuto};

/// Root type for all queries.
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// With a name: a single-element list holding the first wielder whose
    /// name contains it (ignoring case), or holding null when nothing
    /// matches. Without a name: every wielder in insertion order.
    async fn wielders(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
    ) -> Result<Vec<Option<Wielder>>> {
        let registry = ctx.data_unchecked::<Arc<Registry>>();
        match name {
            Some(pattern) => Ok(vec![registry.find_wielder(&pattern).await?.map(Wielder::from)]),
            None => Ok(registry
                .list_wielders()
                .await?
                .into_iter()
                .map(|record| Some(Wielder::from(record)))
                .collect()),
        }
    }

    /// Same contract as `wielders`, over the zanpakuto collection.
    async fn zanpakutos(
        &self,
        ctx: &Context<'_>,
        name: Option<String>,
    ) -> Result<Vec<Option<Zanpakuto>>> {
        let registry = ctx.data_unchecked::<Arc<Registry>>();
        match name {
            Some(pattern) => Ok(vec![registry
                .find_zanpakuto(&pattern)
                .await?
                .map(Zanpakuto::from)]),
            None => Ok(registry
                .list_zanpakutos()
                .await?
                .into_iter()
                .map(|record| Some(Zanpakuto::from(record)))
                .collect()),
        }
    }
}
