//! Schema-driven payload validation.
//!
//! `validate` is a pure function of (kind, payload, schema): no storage
//! access, no side effects. Reference *existence* is the integrity
//! engine's concern; this layer only checks shape.

use crate::error::ValidationError;
use assay_model::{Cardinality, Entity, EntityKind, FieldDef, FieldType, SchemaRegistry};
use assay_types::EntityId;
use serde_json::Value;

/// Envelope keys tolerated in any payload and replaced by the server:
/// a client-suggested `id` is discarded, a stray `type_spec` is ignored.
const ENVELOPE_FIELDS: &[&str] = &["id", "type_spec"];

/// Checks `payload` against the canonical schema of `kind` and decodes it
/// into a typed entity carrying the given server-assigned id.
///
/// Inverse relation fields are engine state: a payload naming one is
/// rejected, and the decoded entity starts with them empty.
pub fn validate(
    registry: &SchemaRegistry,
    kind: EntityKind,
    payload: &Value,
    id: EntityId,
) -> Result<Entity, ValidationError> {
    if kind.is_abstract() {
        return Err(ValidationError::AbstractKind { kind });
    }
    let Some(object) = payload.as_object() else {
        return Err(ValidationError::NotAnObject { kind });
    };

    let schema = registry.describe(kind);

    // Unknown fields are rejected rather than silently dropped, so schema
    // drift surfaces at the first write.
    for key in object.keys() {
        if ENVELOPE_FIELDS.contains(&key.as_str()) {
            continue;
        }
        match schema.field(key) {
            None => {
                return Err(ValidationError::UnknownField {
                    kind,
                    field: key.clone(),
                })
            }
            Some(def) if def.is_inverse_relation() => {
                return Err(ValidationError::ReadOnlyField {
                    kind,
                    field: key.clone(),
                })
            }
            Some(_) => {}
        }
    }

    for def in &schema.fields {
        if def.is_inverse_relation() {
            continue;
        }
        let value = object.get(&def.name);
        match value {
            None | Some(Value::Null) => {
                if def.required {
                    return Err(ValidationError::MissingField {
                        kind,
                        field: def.name.clone(),
                    });
                }
            }
            Some(value) => check_field(kind, def, value)?,
        }
    }

    decode(kind, object, id)
}

fn check_field(kind: EntityKind, def: &FieldDef, value: &Value) -> Result<(), ValidationError> {
    let mismatch = |expected: &'static str| ValidationError::TypeMismatch {
        kind,
        field: def.name.clone(),
        expected,
    };

    match def.field_type {
        FieldType::Text => {
            if !value.is_string() {
                return Err(mismatch("a string"));
            }
        }
        FieldType::Number => {
            if !value.is_number() {
                return Err(mismatch("a number"));
            }
        }
        FieldType::Timestamp => {
            if !value.is_i64() && !value.is_u64() {
                return Err(mismatch("epoch milliseconds"));
            }
        }
        FieldType::Enum => {
            let Some(s) = value.as_str() else {
                return Err(mismatch("an enum string"));
            };
            let options = def.enum_options.as_deref().unwrap_or_default();
            if !options.iter().any(|o| o == s) {
                return Err(ValidationError::InvalidEnumValue {
                    kind,
                    field: def.name.clone(),
                    value: s.to_string(),
                });
            }
        }
        FieldType::Relation => {
            let cardinality = def
                .relation
                .as_ref()
                .map(|r| r.cardinality)
                .unwrap_or(Cardinality::Many);
            match cardinality {
                Cardinality::One | Cardinality::OptionalOne => {
                    let Some(s) = value.as_str() else {
                        return Err(mismatch("an entity id"));
                    };
                    if EntityId::parse(s).is_err() {
                        return Err(mismatch("an entity id"));
                    }
                }
                Cardinality::Many => {
                    let Some(items) = value.as_array() else {
                        return Err(mismatch("a list of entity ids"));
                    };
                    for item in items {
                        let ok = item.as_str().is_some_and(|s| EntityId::parse(s).is_ok());
                        if !ok {
                            return Err(mismatch("a list of entity ids"));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Decodes the checked payload into the typed union, replacing the
/// envelope with the server-assigned id and the kind's discriminator.
fn decode(
    kind: EntityKind,
    object: &serde_json::Map<String, Value>,
    id: EntityId,
) -> Result<Entity, ValidationError> {
    let mut sanitized = object.clone();
    sanitized.insert("id".to_string(), Value::String(id.to_string()));
    sanitized.insert(
        "type_spec".to_string(),
        Value::String(kind.discriminator().to_string()),
    );

    serde_json::from_value(Value::Object(sanitized)).map_err(|e| ValidationError::Decode {
        kind,
        message: e.to_string(),
    })
}
