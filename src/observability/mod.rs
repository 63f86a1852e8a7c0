//! Observability for soulregistry.
//!
//! Structured logging only; the service exposes no metrics surface.

mod logger;

pub use logger::{Logger, Severity};
