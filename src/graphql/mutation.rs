//! Root mutation resolvers.
//!
//! Creates return only after the store has acknowledged the write, so a
//! returned record is durable; a failed write surfaces as a GraphQL error
//! rather than a phantom success. Updates and removes target the first
//! case-insensitive substring match on name and return null on a miss.

use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use crate::registry::Registry;

use super::types::{Wielder, WielderParameters, Zanpakuto, ZanpakutoParameters};

/// Root type for all mutations.
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_wielder(
        &self,
        ctx: &Context<'_>,
        wielder_parameters: WielderParameters,
    ) -> Result<Wielder> {
        let registry = ctx.data_unchecked::<Arc<Registry>>();
        Ok(registry
            .create_wielder(&wielder_parameters.name, &wielder_parameters.zanpakuto)
            .await?
            .into())
    }

    async fn update_wielder(
        &self,
        ctx: &Context<'_>,
        name: String,
        updated_name: String,
        updated_zanpakuto: String,
    ) -> Result<Option<Wielder>> {
        let registry = ctx.data_unchecked::<Arc<Registry>>();
        Ok(registry
            .update_wielder(&name, &updated_name, &updated_zanpakuto)
            .await?
            .map(Wielder::from))
    }

    async fn remove_wielder(&self, ctx: &Context<'_>, name: String) -> Result<Option<Wielder>> {
        let registry = ctx.data_unchecked::<Arc<Registry>>();
        Ok(registry.remove_wielder(&name).await?.map(Wielder::from))
    }

    async fn create_zanpakuto(
        &self,
        ctx: &Context<'_>,
        zanpakuto_parameters: ZanpakutoParameters,
    ) -> Result<Zanpakuto> {
        let registry = ctx.data_unchecked::<Arc<Registry>>();
        Ok(registry
            .create_zanpakuto(&zanpakuto_parameters.name, &zanpakuto_parameters.bankai)
            .await?
            .into())
    }

    async fn update_zanpakuto(
        &self,
        ctx: &Context<'_>,
        name: String,
        updated_name: String,
        updated_bankai: String,
    ) -> Result<Option<Zanpakuto>> {
        let registry = ctx.data_unchecked::<Arc<Registry>>();
        Ok(registry
            .update_zanpakuto(&name, &updated_name, &updated_bankai)
            .await?
            .map(Zanpakuto::from))
    }

    async fn remove_zanpakuto(&self, ctx: &Context<'_>, name: String) -> Result<Option<Zanpakuto>> {
        let registry = ctx.data_unchecked::<Arc<Registry>>();
        Ok(registry.remove_zanpakuto(&name).await?.map(Zanpakuto::from))
    }
}
