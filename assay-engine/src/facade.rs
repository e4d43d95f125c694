//! The entity store facade: the single ingress/egress point for entities.
//!
//! Writes compose validate → integrity-check → persist inside one storage
//! transaction; reads compose fetch → resolve. Raw records never leak:
//! every output is a typed entity or the explicit unresolved marker.

use crate::error::{CoreError, CoreResult};
use crate::integrity;
use crate::resolve::resolve;
use crate::validate::validate;
use assay_model::{Entity, EntityKind, RawRecord, SchemaRegistry};
use assay_store::RawStore;
use assay_types::EntityId;
use serde_json::Value;
use std::collections::VecDeque;
use tracing::debug;

/// How `delete` treats inbound mandatory references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Reject the delete if anything still depends on the entity.
    Restrict,
    /// Delete the entity and, transitively, every mandatory dependent,
    /// as one atomic operation.
    Cascade,
}

/// Facade over validation, integrity, persistence, and resolution.
pub struct EntityStore<S: RawStore> {
    store: S,
    registry: SchemaRegistry,
}

/// Page size used by [`EntityStore::iter`].
const PAGE_SIZE: u64 = 256;

impl<S: RawStore> EntityStore<S> {
    /// Wraps a raw store with the full entity engine.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            registry: SchemaRegistry::new(),
        }
    }

    /// The schema registry backing this store.
    #[must_use]
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Validates and persists a new entity, returning it with its
    /// server-assigned id. Any client-supplied id is replaced.
    pub fn create(&self, kind: EntityKind, payload: &Value) -> CoreResult<Entity> {
        let id = EntityId::new();
        let entity = validate(&self.registry, kind, payload, id)?;
        let data = strip_envelope(serde_json::to_value(&entity).map_err(assay_store::StorageError::from)?);
        let record = RawRecord::new(id, kind.discriminator(), data);

        self.store.transaction::<_, CoreError>(|tx| {
            integrity::check_references(tx, kind, &record.data)?;
            integrity::check_acyclic(tx, kind, id, &record.data)?;
            tx.put_raw(kind, &record)?;
            integrity::link_all(tx, kind, id, &record.data)?;
            Ok(())
        })?;

        debug!(%kind, %id, "created entity");
        Ok(entity)
    }

    /// Fetches one entity by id. For an abstract kind the lookup fans out
    /// over the concrete subkinds' storage families; the result may be the
    /// unresolved marker. For a concrete kind a row of any other kind is
    /// `NotFound`.
    pub fn get(&self, kind: EntityKind, id: EntityId) -> CoreResult<Entity> {
        for rep in family_reps(kind) {
            let Some(record) = self.store.fetch_raw(rep, id)? else {
                continue;
            };
            let entity = resolve(&record, rep);
            if kind.is_concrete() && entity.kind() != Some(kind) {
                break;
            }
            return Ok(entity);
        }
        Err(CoreError::NotFound { kind, id })
    }

    /// Lists every entity of the kind, ordered by id. Abstract kinds merge
    /// all subkind partitions; rows with unrecognizable discriminators
    /// appear as the unresolved marker instead of aborting the listing.
    pub fn list(&self, kind: EntityKind) -> CoreResult<Vec<Entity>> {
        let mut entities = Vec::new();
        let reps = family_reps(kind);
        let multi_family = reps.len() > 1;
        for rep in reps {
            for record in self.store.fetch_all_raw(rep)? {
                let entity = resolve(&record, rep);
                if kind.is_concrete() && entity.kind() != Some(kind) {
                    continue;
                }
                entities.push(entity);
            }
        }
        if multi_family {
            entities.sort_by_key(Entity::id);
        }
        Ok(entities)
    }

    /// Lists entities matching a predicate.
    pub fn list_where(
        &self,
        kind: EntityKind,
        mut predicate: impl FnMut(&Entity) -> bool,
    ) -> CoreResult<Vec<Entity>> {
        let mut entities = self.list(kind)?;
        entities.retain(|e| predicate(e));
        Ok(entities)
    }

    /// Lazily iterates the kind's entities page by page. Dropping the
    /// iterator cancels the traversal; reads are side-effect-free. Within
    /// each storage family the order is stable by id.
    pub fn iter(&self, kind: EntityKind) -> EntityIter<'_, S> {
        EntityIter {
            store: &self.store,
            kind,
            reps: family_reps(kind),
            rep_index: 0,
            offset: 0,
            buffer: VecDeque::new(),
            done: false,
        }
    }

    /// Validates and persists a full replacement of an entity's
    /// owning-side fields. Inverse lists are preserved and edge diffs are
    /// mirrored onto the affected targets in the same transaction.
    pub fn update(&self, kind: EntityKind, id: EntityId, payload: &Value) -> CoreResult<Entity> {
        let entity = validate(&self.registry, kind, payload, id)?;
        let mut new_data = strip_envelope(serde_json::to_value(&entity).map_err(assay_store::StorageError::from)?);

        let updated = self.store.transaction::<_, CoreError>(|tx| {
            let old = tx
                .fetch_raw(kind, id)?
                .ok_or(CoreError::NotFound { kind, id })?;
            let claimed = old
                .type_spec
                .as_deref()
                .and_then(EntityKind::from_discriminator);
            if claimed != Some(kind) {
                return Err(CoreError::NotFound { kind, id });
            }

            copy_inverse_fields(&self.registry, kind, &old.data, &mut new_data);
            integrity::check_references(tx, kind, &new_data)?;
            integrity::check_acyclic(tx, kind, id, &new_data)?;
            integrity::relink(tx, kind, id, &old.data, &new_data)?;

            let record = RawRecord::new(id, kind.discriminator(), new_data.clone());
            tx.put_raw(kind, &record)?;
            Ok(resolve(&record, kind.family_base()))
        })?;

        debug!(%kind, %id, "updated entity");
        Ok(updated)
    }

    /// Deletes an entity. With [`DeleteMode::Restrict`] any inbound
    /// mandatory reference blocks the delete; with [`DeleteMode::Cascade`]
    /// the full dependent closure is removed atomically. A second delete
    /// of the same id reports `NotFound`.
    pub fn delete(&self, kind: EntityKind, id: EntityId, mode: DeleteMode) -> CoreResult<()> {
        self.store.transaction::<_, CoreError>(|tx| {
            for rep in family_reps(kind) {
                let Some(record) = tx.fetch_raw(rep, id)? else {
                    continue;
                };
                let claimed = record
                    .type_spec
                    .as_deref()
                    .and_then(EntityKind::from_discriminator);
                // A row claiming a different valid kind is not ours to
                // delete; an unresolvable row is deletable through its
                // family so corruption cannot make data immortal.
                if kind.is_concrete() {
                    if let Some(claimed) = claimed {
                        if claimed != kind {
                            break;
                        }
                    }
                }
                integrity::delete(tx, rep, record, mode == DeleteMode::Cascade)?;
                debug!(%kind, %id, cascade = (mode == DeleteMode::Cascade), "deleted entity");
                return Ok(());
            }
            Err(CoreError::NotFound { kind, id })
        })
    }
}

/// The storage-family representatives to consult for a kind: the kind
/// itself when concrete, otherwise one family base per concrete subkind
/// partition.
fn family_reps(kind: EntityKind) -> Vec<EntityKind> {
    if kind.is_concrete() {
        return vec![kind];
    }
    let mut reps = Vec::new();
    for sub in kind.concrete_subkinds() {
        let base = sub.family_base();
        if !reps.contains(&base) {
            reps.push(base);
        }
    }
    reps
}

/// Drops the serialization envelope (`id`, `type_spec`) from an entity
/// value before it becomes a stored record payload; both live in their own
/// columns.
fn strip_envelope(mut value: Value) -> Value {
    if let Some(object) = value.as_object_mut() {
        object.remove("id");
        object.remove("type_spec");
    }
    value
}

/// Carries the engine-maintained inverse lists of the stored row over to
/// a candidate replacement payload.
fn copy_inverse_fields(
    registry: &SchemaRegistry,
    kind: EntityKind,
    old_data: &Value,
    new_data: &mut Value,
) {
    let schema = registry.describe(kind);
    let Some(target) = new_data.as_object_mut() else {
        return;
    };
    for (field, _) in schema.inverse_relations() {
        if let Some(stored) = old_data.get(&field.name) {
            target.insert(field.name.clone(), stored.clone());
        }
    }
}

/// Lazy, restartable traversal over a kind's entities, one page at a time.
pub struct EntityIter<'a, S: RawStore> {
    store: &'a S,
    kind: EntityKind,
    reps: Vec<EntityKind>,
    rep_index: usize,
    offset: u64,
    buffer: VecDeque<RawRecord>,
    done: bool,
}

impl<S: RawStore> Iterator for EntityIter<'_, S> {
    type Item = CoreResult<Entity>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(record) = self.buffer.pop_front() {
                let rep = self.reps[self.rep_index];
                let entity = resolve(&record, rep);
                if self.kind.is_concrete() && entity.kind() != Some(self.kind) {
                    continue;
                }
                return Some(Ok(entity));
            }
            if self.done || self.rep_index >= self.reps.len() {
                self.done = true;
                return None;
            }

            let rep = self.reps[self.rep_index];
            match self.store.fetch_raw_page(rep, self.offset, PAGE_SIZE) {
                Ok(page) if page.is_empty() => {
                    self.rep_index += 1;
                    self.offset = 0;
                }
                Ok(page) => {
                    self.offset += page.len() as u64;
                    self.buffer.extend(page);
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err.into()));
                }
            }
        }
    }
}
