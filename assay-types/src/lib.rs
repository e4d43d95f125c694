//! Core type definitions for Assay.
//!
//! This crate defines the fundamental, schema-agnostic types used throughout
//! the entity core:
//! - Entity identifiers (UUID v7)
//! - Wall-clock timestamps
//!
//! All domain-specific types (projects, evaluations, metrics, and so on)
//! belong in `assay-model`, not here.

mod ids;
mod timestamp;

pub use ids::EntityId;
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),
}
