//! Relationship integrity: reference existence, dual-written edges,
//! cascade deletion, and the metric-derivation cycle check.
//!
//! Every named relation is one logical edge set with two query directions.
//! The owning side lives in the writing entity's payload; this module
//! mirrors it into the target's inverse list, inside the same transaction,
//! so a single edge is never observable half-applied.

use crate::error::{CoreResult, IntegrityError};
use assay_model::{Cardinality, EntityKind, RawRecord};
use assay_store::RawStore;
use assay_types::EntityId;
use serde_json::Value;
use std::collections::HashSet;
use tracing::debug;

/// One logical edge set: the owning field, its target, and the inverse
/// field mirrored on the target. `owner` may be an abstract base when the
/// field is shared by all its concrete subkinds.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDef {
    pub owner: EntityKind,
    pub field: &'static str,
    pub target: EntityKind,
    pub inverse: &'static str,
    pub cardinality: Cardinality,
}

impl EdgeDef {
    const fn new(
        owner: EntityKind,
        field: &'static str,
        target: EntityKind,
        inverse: &'static str,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            owner,
            field,
            target,
            inverse,
            cardinality,
        }
    }

    /// A mandatory N:1 edge blocks (or cascades) deletion of its target.
    #[must_use]
    pub const fn is_mandatory(&self) -> bool {
        matches!(self.cardinality, Cardinality::One)
    }
}

/// Every edge set in the model. Single source of truth for the pairing of
/// owning and inverse field names.
pub static EDGES: &[EdgeDef] = &[
    EdgeDef::new(EntityKind::Element, "project", EntityKind::Project, "involves", Cardinality::OptionalOne),
    EdgeDef::new(EntityKind::LegalRequirement, "project", EntityKind::Project, "legal_requirements", Cardinality::One),
    EdgeDef::new(EntityKind::Evaluation, "project", EntityKind::Project, "evaluations", Cardinality::One),
    EdgeDef::new(EntityKind::Evaluation, "configuration", EntityKind::Configuration, "evaluations", Cardinality::One),
    EdgeDef::new(EntityKind::ConfParam, "configuration", EntityKind::Configuration, "params", Cardinality::One),
    EdgeDef::new(EntityKind::Evaluation, "refs", EntityKind::Element, "referenced_by", Cardinality::Many),
    EdgeDef::new(EntityKind::Evaluation, "evaluates", EntityKind::Element, "evaluated_by", Cardinality::Many),
    EdgeDef::new(EntityKind::Observation, "evaluation", EntityKind::Evaluation, "observations", Cardinality::One),
    EdgeDef::new(EntityKind::Observation, "tool", EntityKind::Tool, "observations", Cardinality::One),
    EdgeDef::new(EntityKind::Observation, "dataset", EntityKind::Dataset, "observations", Cardinality::One),
    EdgeDef::new(EntityKind::Model, "dataset", EntityKind::Dataset, "models", Cardinality::One),
    EdgeDef::new(EntityKind::Dataset, "datashape", EntityKind::Datashape, "datasets", Cardinality::One),
    EdgeDef::new(EntityKind::Feature, "date_shape", EntityKind::Datashape, "feature_dates", Cardinality::One),
    EdgeDef::new(EntityKind::Feature, "value_shape", EntityKind::Datashape, "features", Cardinality::One),
    EdgeDef::new(EntityKind::Measure, "observation", EntityKind::Observation, "measures", Cardinality::One),
    EdgeDef::new(EntityKind::Measure, "measurand", EntityKind::Element, "measures", Cardinality::One),
    EdgeDef::new(EntityKind::Measure, "metric", EntityKind::Metric, "measures", Cardinality::One),
    EdgeDef::new(EntityKind::Derived, "base_metric", EntityKind::Metric, "derived_by", Cardinality::Many),
    EdgeDef::new(EntityKind::MetricCategory, "metrics", EntityKind::Metric, "category", Cardinality::Many),
];

/// The edges whose owning field lives on `kind`.
pub fn owning_edges(kind: EntityKind) -> impl Iterator<Item = &'static EdgeDef> {
    EDGES.iter().filter(move |e| kind.is_subkind_of(e.owner))
}

/// The edges pointing *into* `kind`.
pub fn inbound_edges(kind: EntityKind) -> impl Iterator<Item = &'static EdgeDef> {
    EDGES.iter().filter(move |e| kind.is_subkind_of(e.target))
}

/// Reads the ids held by a relation field, whether it is a single id, a
/// list, or absent.
#[must_use]
pub fn ids_of(data: &Value, field: &str) -> Vec<EntityId> {
    match data.get(field) {
        Some(Value::String(s)) => EntityId::parse(s).into_iter().collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .filter_map(|s| EntityId::parse(s).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn push_id(data: &mut Value, field: &str, id: EntityId) {
    let entry = data
        .as_object_mut()
        .map(|o| o.entry(field.to_string()).or_insert_with(|| Value::Array(Vec::new())));
    if let Some(Value::Array(items)) = entry {
        let id = id.to_string();
        if !items.iter().any(|v| v.as_str() == Some(&id)) {
            items.push(Value::String(id));
        }
    }
}

fn remove_id(data: &mut Value, field: &str, id: EntityId) {
    if let Some(Value::Array(items)) = data.get_mut(field) {
        let id = id.to_string();
        items.retain(|v| v.as_str() != Some(&id));
    }
}

/// The concrete kind a stored record claims to be, if its discriminator
/// resolves at all.
fn claimed_kind(record: &RawRecord) -> Option<EntityKind> {
    record
        .type_spec
        .as_deref()
        .and_then(EntityKind::from_discriminator)
        .filter(|k| k.is_concrete())
}

/// Checks that every owning reference in `data` points at an existing
/// entity of a kind compatible with the edge's declared target
/// (subkinds included).
pub fn check_references<S: RawStore>(
    store: &S,
    kind: EntityKind,
    data: &Value,
) -> CoreResult<()> {
    for edge in owning_edges(kind) {
        for id in ids_of(data, edge.field) {
            let record = store.fetch_raw(edge.target, id)?;
            let Some(record) = record else {
                return Err(IntegrityError::DanglingReference {
                    kind,
                    field: edge.field.to_string(),
                    target: edge.target,
                    id,
                }
                .into());
            };
            let compatible =
                claimed_kind(&record).is_some_and(|k| k.is_subkind_of(edge.target));
            if !compatible {
                return Err(IntegrityError::KindMismatch {
                    kind,
                    field: edge.field.to_string(),
                    target: edge.target,
                    id,
                }
                .into());
            }
        }
    }
    Ok(())
}

/// Rejects a `base_metric` set that would make `id` (transitively) derive
/// from itself. Reachability search through stored `base_metric` edges,
/// with the candidate's own edges taken from `data` rather than the store.
pub fn check_acyclic<S: RawStore>(
    store: &S,
    kind: EntityKind,
    id: EntityId,
    data: &Value,
) -> CoreResult<()> {
    if kind != EntityKind::Derived {
        return Ok(());
    }

    let mut stack = ids_of(data, "base_metric");
    let mut visited: HashSet<EntityId> = HashSet::new();
    while let Some(node) = stack.pop() {
        if node == id {
            return Err(IntegrityError::DerivationCycle { id }.into());
        }
        if !visited.insert(node) {
            continue;
        }
        if let Some(record) = store.fetch_raw(EntityKind::Metric, node)? {
            stack.extend(ids_of(&record.data, "base_metric"));
        }
    }
    Ok(())
}

/// Mirrors one owning reference into the target's inverse list.
fn add_inverse<S: RawStore>(
    store: &S,
    edge: &EdgeDef,
    target_id: EntityId,
    owner_id: EntityId,
) -> CoreResult<()> {
    if let Some(mut record) = store.fetch_raw(edge.target, target_id)? {
        push_id(&mut record.data, edge.inverse, owner_id);
        store.put_raw(edge.target, &record)?;
    }
    Ok(())
}

/// Removes one owning reference from the target's inverse list. Tolerates
/// a target that is already gone (mid-cascade).
fn remove_inverse<S: RawStore>(
    store: &S,
    edge: &EdgeDef,
    target_id: EntityId,
    owner_id: EntityId,
) -> CoreResult<()> {
    if let Some(mut record) = store.fetch_raw(edge.target, target_id)? {
        remove_id(&mut record.data, edge.inverse, owner_id);
        store.put_raw(edge.target, &record)?;
    }
    Ok(())
}

/// Mirrors every owning reference of a freshly written entity into the
/// targets' inverse lists.
pub fn link_all<S: RawStore>(
    store: &S,
    kind: EntityKind,
    id: EntityId,
    data: &Value,
) -> CoreResult<()> {
    for edge in owning_edges(kind) {
        for target_id in ids_of(data, edge.field) {
            add_inverse(store, edge, target_id, id)?;
        }
    }
    Ok(())
}

/// Applies the edge diff between the stored and the candidate data:
/// dropped targets lose the inverse entry, new targets gain one.
pub fn relink<S: RawStore>(
    store: &S,
    kind: EntityKind,
    id: EntityId,
    old_data: &Value,
    new_data: &Value,
) -> CoreResult<()> {
    for edge in owning_edges(kind) {
        let old_ids: HashSet<EntityId> = ids_of(old_data, edge.field).into_iter().collect();
        let new_ids: HashSet<EntityId> = ids_of(new_data, edge.field).into_iter().collect();
        for target_id in old_ids.difference(&new_ids) {
            remove_inverse(store, edge, *target_id, id)?;
        }
        for target_id in new_ids.difference(&old_ids) {
            add_inverse(store, edge, *target_id, id)?;
        }
    }
    Ok(())
}

/// One member of a deletion closure.
struct Doomed {
    kind: EntityKind,
    record: RawRecord,
}

/// Deletes `record` (already fetched under `kind`'s family), applying the
/// restrict-or-cascade rule for inbound mandatory references.
///
/// Cascade collects the full dependent closure first, then detaches every
/// surviving edge and deletes all members; the caller's transaction makes
/// the whole operation all-or-nothing.
pub fn delete<S: RawStore>(
    store: &S,
    kind: EntityKind,
    record: RawRecord,
    cascade: bool,
) -> CoreResult<()> {
    // A corrupted row cannot name its concrete kind; fall back to the
    // family base so its stored inverse lists are still honored.
    let victim_kind = claimed_kind(&record).unwrap_or(kind.family_base());
    let victim_id = record.id;

    let dependents: usize = inbound_edges(victim_kind)
        .filter(|e| e.is_mandatory())
        .map(|e| ids_of(&record.data, e.inverse).len())
        .sum();
    if dependents > 0 && !cascade {
        return Err(IntegrityError::DeleteBlocked {
            kind: victim_kind,
            id: victim_id,
            dependents,
        }
        .into());
    }

    // Collect the transitive closure of mandatory dependents.
    let mut closure: Vec<Doomed> = Vec::new();
    let mut seen: HashSet<EntityId> = HashSet::new();
    let mut stack: Vec<Doomed> = vec![Doomed {
        kind: victim_kind,
        record,
    }];
    seen.insert(victim_id);
    while let Some(doomed) = stack.pop() {
        for edge in inbound_edges(doomed.kind).filter(|e| e.is_mandatory()) {
            for owner_id in ids_of(&doomed.record.data, edge.inverse) {
                if !seen.insert(owner_id) {
                    continue;
                }
                if let Some(dependent) = store.fetch_raw(edge.owner, owner_id)? {
                    let dependent_kind = claimed_kind(&dependent).unwrap_or(edge.owner);
                    stack.push(Doomed {
                        kind: dependent_kind,
                        record: dependent,
                    });
                }
            }
        }
        closure.push(doomed);
    }

    if closure.len() > 1 {
        debug!(
            victim = %victim_id,
            dependents = closure.len() - 1,
            "cascade delete"
        );
    }

    // Detach edges that cross the closure boundary, in both directions.
    for doomed in &closure {
        // Outgoing: this entity's owning references into survivors.
        for edge in owning_edges(doomed.kind) {
            for target_id in ids_of(&doomed.record.data, edge.field) {
                if !seen.contains(&target_id) {
                    remove_inverse(store, edge, target_id, doomed.record.id)?;
                }
            }
        }
        // Incoming non-mandatory: survivors pointing at this entity keep
        // their own records valid (optional refs cleared, N:M edges dropped).
        for edge in inbound_edges(doomed.kind).filter(|e| !e.is_mandatory()) {
            for owner_id in ids_of(&doomed.record.data, edge.inverse) {
                if seen.contains(&owner_id) {
                    continue;
                }
                if let Some(mut owner) = store.fetch_raw(edge.owner, owner_id)? {
                    match edge.cardinality {
                        Cardinality::OptionalOne => {
                            if let Some(object) = owner.data.as_object_mut() {
                                object.insert(edge.field.to_string(), Value::Null);
                            }
                        }
                        _ => remove_id(&mut owner.data, edge.field, doomed.record.id),
                    }
                    store.put_raw(edge.owner, &owner)?;
                }
            }
        }
    }

    for doomed in &closure {
        store.delete_raw(doomed.kind, doomed.record.id)?;
    }
    Ok(())
}
