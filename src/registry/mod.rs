//! Wielder/Zanpakuto registry.
//!
//! The typed layer between the document store and the API gateway: entity
//! definitions plus the query and mutation operations the schema binds to.

mod entities;
mod registry;

pub use entities::{Wielder, Zanpakuto};
pub use registry::{Registry, WIELDERS, ZANPAKUTOS};
