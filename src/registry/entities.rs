//! Registry entities.
//!
//! Both kinds are flat documents with string fields. A wielder references
//! its zanpakuto by *name*, not by identifier: the link is a plain string
//! that nothing validates at write time. A dangling reference simply
//! resolves to nothing at read time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A character holding a named reference to a zanpakuto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wielder {
    /// Assigned at creation, immutable
    pub id: Uuid,
    pub name: String,
    /// Name of the associated zanpakuto record
    pub zanpakuto: String,
}

impl Wielder {
    /// Constructs a wielder with a fresh identifier.
    pub fn new(name: impl Into<String>, zanpakuto: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            zanpakuto: zanpakuto.into(),
        }
    }
}

/// A named blade with a free-form bankai attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zanpakuto {
    /// Assigned at creation, immutable
    pub id: Uuid,
    pub name: String,
    pub bankai: String,
}

impl Zanpakuto {
    /// Constructs a zanpakuto with a fresh identifier.
    pub fn new(name: impl Into<String>, bankai: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bankai: bankai.into(),
        }
    }
}
