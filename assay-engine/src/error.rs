//! Error taxonomy for the entity core.
//!
//! `ValidationError` and `IntegrityError` abort only the single requested
//! write and are surfaced verbatim to the transport layer. An unresolvable
//! polymorphic record is *not* an error — it is a degraded-but-successful
//! read result (`Entity::Unresolved`).

use assay_model::EntityKind;
use assay_store::StorageError;
use assay_types::EntityId;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Top-level error kind returned by the facade.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// The requested id does not exist (under the requested kind).
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: EntityId },

    /// Persistence collaborator failure; never retried here.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A malformed write payload. Always recoverable; carries the offending
/// field name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{kind}: payload must be a JSON object")]
    NotAnObject { kind: EntityKind },

    #[error("{kind} is abstract and cannot be instantiated")]
    AbstractKind { kind: EntityKind },

    #[error("{kind}: missing required field `{field}`")]
    MissingField { kind: EntityKind, field: String },

    #[error("{kind}: unknown field `{field}`")]
    UnknownField { kind: EntityKind, field: String },

    #[error("{kind}: field `{field}` is engine-maintained and read-only")]
    ReadOnlyField { kind: EntityKind, field: String },

    #[error("{kind}: field `{field}` expects {expected}")]
    TypeMismatch {
        kind: EntityKind,
        field: String,
        expected: &'static str,
    },

    #[error("{kind}: `{value}` is not a valid value for `{field}`")]
    InvalidEnumValue {
        kind: EntityKind,
        field: String,
        value: String,
    },

    #[error("{kind}: payload did not decode: {message}")]
    Decode { kind: EntityKind, message: String },
}

/// A relationship rule violation. The operation is aborted with no
/// partial state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("{kind}: field `{field}` references missing {target} {id}")]
    DanglingReference {
        kind: EntityKind,
        field: String,
        target: EntityKind,
        id: EntityId,
    },

    #[error("{kind}: field `{field}` references {id}, which is not a {target}")]
    KindMismatch {
        kind: EntityKind,
        field: String,
        target: EntityKind,
        id: EntityId,
    },

    #[error("metric derivation cycle: {id} would be reachable from itself")]
    DerivationCycle { id: EntityId },

    #[error("cannot delete {kind} {id}: {dependents} dependent(s) still reference it")]
    DeleteBlocked {
        kind: EntityKind,
        id: EntityId,
        dependents: usize,
    },
}
