//! Polymorphic resolution of shared-supertype records.
//!
//! A stored row carries a `type_spec` discriminator plus the union of all
//! possible subkind fields. `resolve` maps it to a typed entity, degrading
//! to the unresolved sentinel instead of failing: one bad row must never
//! abort retrieval of the rest of a collection.

use assay_model::{Entity, EntityKind, RawRecord, UnresolvedEntity};
use tracing::warn;

/// Resolves one raw record against the requested abstract base (or, for a
/// standalone kind, the kind itself).
///
/// - A discriminator naming a concrete kind registered under `base`
///   decodes that kind's declared fields; sibling fields present in the
///   shared record are ignored.
/// - A missing, empty, or unrecognized discriminator — or a row whose
///   kind-specific fields fail to decode — yields [`Entity::Unresolved`]
///   (`type_spec = "NA"`) with only the base fields populated. Total:
///   this function never returns an error.
#[must_use]
pub fn resolve(record: &RawRecord, base: EntityKind) -> Entity {
    let claimed = record.type_spec.as_deref().unwrap_or("");
    let kind = match EntityKind::from_discriminator(claimed) {
        Some(kind) if kind.is_concrete() && kind.is_subkind_of(base) => kind,
        _ => {
            warn!(
                id = %record.id,
                type_spec = claimed,
                base = %base,
                "unresolvable discriminator, degrading to NA"
            );
            return unresolved(record);
        }
    };

    match decode(record, kind) {
        Ok(entity) => entity,
        Err(err) => {
            warn!(
                id = %record.id,
                type_spec = claimed,
                error = %err,
                "record does not decode as its claimed kind, degrading to NA"
            );
            unresolved(record)
        }
    }
}

fn decode(record: &RawRecord, kind: EntityKind) -> serde_json::Result<Entity> {
    let mut value = record.data.clone();
    if let Some(object) = value.as_object_mut() {
        object.insert(
            "id".to_string(),
            serde_json::Value::String(record.id.to_string()),
        );
        object.insert(
            "type_spec".to_string(),
            serde_json::Value::String(kind.discriminator().to_string()),
        );
    }
    serde_json::from_value(value)
}

/// The degraded result: base fields only, everything else discarded.
fn unresolved(record: &RawRecord) -> Entity {
    Entity::Unresolved(UnresolvedEntity {
        id: record.id,
        name: record.get_str("/name").unwrap_or_default().to_string(),
        description: record.get_str("/description").unwrap_or_default().to_string(),
    })
}
