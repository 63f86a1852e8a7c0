//! GraphQL object and input types.
//!
//! Thin wrappers over registry records. `Wielder.zanpakuto` is the one
//! computed field: the stored reference string is resolved against the
//! zanpakuto collection at read time, per record queried.

use std::sync::Arc;

use async_graphql::{Context, InputObject, Object, Result, SimpleObject, ID};

use crate::registry::{Registry, Wielder as WielderRecord, Zanpakuto as ZanpakutoRecord};

/// A character and the blade they carry.
pub struct Wielder(WielderRecord);

impl From<WielderRecord> for Wielder {
    fn from(record: WielderRecord) -> Self {
        Self(record)
    }
}

#[Object]
impl Wielder {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    /// The referenced zanpakuto, found by case-insensitive substring
    /// search against stored names. Null when the reference dangles.
    async fn zanpakuto(&self, ctx: &Context<'_>) -> Result<Option<Zanpakuto>> {
        let registry = ctx.data_unchecked::<Arc<Registry>>();
        Ok(registry.zanpakuto_for(&self.0).await?.map(Zanpakuto::from))
    }
}

/// A named blade and its released form.
#[derive(SimpleObject)]
pub struct Zanpakuto {
    pub id: ID,
    pub name: String,
    pub bankai: String,
}

impl From<ZanpakutoRecord> for Zanpakuto {
    fn from(record: ZanpakutoRecord) -> Self {
        Self {
            id: ID(record.id.to_string()),
            name: record.name,
            bankai: record.bankai,
        }
    }
}

/// Fields required to create a wielder.
#[derive(InputObject)]
pub struct WielderParameters {
    pub name: String,
    /// Name of the zanpakuto this wielder carries. Not validated against
    /// the zanpakuto collection.
    pub zanpakuto: String,
}

/// Fields required to create a zanpakuto.
#[derive(InputObject)]
pub struct ZanpakutoParameters {
    pub name: String,
    pub bankai: String,
}
