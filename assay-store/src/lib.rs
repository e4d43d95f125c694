//! SQLite storage layer for Assay.
//!
//! Stores raw shared-supertype records, partitioned by storage family
//! (`EntityKind::family()`): the three Element kinds share one partition,
//! the two Metric kinds share another, every other kind has its own. The
//! `type_spec` discriminator is a separate column from the JSON payload,
//! so a stale or corrupted discriminator is representable — interpreting
//! it is the resolver's job, not the store's.
//!
//! The [`RawStore`] trait is the narrow contract the engine consumes;
//! nothing above this crate sees SQL.

mod error;
mod sqlite;

pub use error::{StorageError, StorageResult};
pub use sqlite::SqliteStore;

use assay_model::{EntityKind, RawRecord};
use assay_types::EntityId;

/// The narrow persistence contract consumed by the entity core.
///
/// All fetch/put/delete calls address the *storage family* of the given
/// kind, so `fetch_all_raw(EntityKind::Dataset)` returns the whole shared
/// `element` partition; filtering by concrete kind happens after
/// resolution. Reads are side-effect-free.
pub trait RawStore: Send + Sync {
    /// Fetches one record by id from the kind's family, if present.
    fn fetch_raw(&self, kind: EntityKind, id: EntityId) -> StorageResult<Option<RawRecord>>;

    /// Fetches every record in the kind's family, ordered by id.
    fn fetch_all_raw(&self, kind: EntityKind) -> StorageResult<Vec<RawRecord>>;

    /// Fetches one page of the kind's family, ordered by id. The sequence
    /// is restartable: the same offset always resumes the same ordering.
    fn fetch_raw_page(
        &self,
        kind: EntityKind,
        offset: u64,
        limit: u64,
    ) -> StorageResult<Vec<RawRecord>>;

    /// Inserts or replaces a record in the kind's family.
    fn put_raw(&self, kind: EntityKind, record: &RawRecord) -> StorageResult<()>;

    /// Deletes a record by id. Returns false if no such record existed.
    fn delete_raw(&self, kind: EntityKind, id: EntityId) -> StorageResult<bool>;

    /// Runs `f` inside one atomic transaction: every write it performs is
    /// committed together, or rolled back together if it returns an error.
    /// Transactions do not nest.
    fn transaction<T, E>(&self, f: impl FnOnce(&Self) -> Result<T, E>) -> Result<T, E>
    where
        E: From<StorageError>,
        Self: Sized;
}
