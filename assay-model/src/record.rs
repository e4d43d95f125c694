//! The raw shared-supertype record, as handed over by the storage layer.

use assay_types::EntityId;
use serde::{Deserialize, Serialize};

/// A row from a shared storage partition, before polymorphic resolution.
///
/// `data` holds the union of all possible subkind fields as arbitrary JSON;
/// `type_spec` is the stored discriminator naming which concrete kind the
/// row represents. The discriminator may be missing, stale, or junk — the
/// resolver, not the record, decides what to make of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_spec: Option<String>,
    pub data: serde_json::Value,
}

impl RawRecord {
    /// Creates a record with the given discriminator and payload.
    #[must_use]
    pub fn new(id: EntityId, type_spec: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            id,
            type_spec: Some(type_spec.into()),
            data,
        }
    }

    /// Creates a record with no discriminator at all.
    #[must_use]
    pub fn untyped(id: EntityId, data: serde_json::Value) -> Self {
        Self {
            id,
            type_spec: None,
            data,
        }
    }

    /// Extract a string value from `data` using a JSON pointer (e.g., "/name").
    #[must_use]
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.data.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a numeric value from `data` using a JSON pointer.
    #[must_use]
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.data.pointer(pointer).and_then(|v| v.as_f64())
    }
}
