//! Entity engine for Assay: validation, relationship integrity, and
//! polymorphic resolution behind one facade.
//!
//! Control flow:
//! - writes: [`EntityStore`] → [`validate`] → [`integrity`] → storage,
//!   inside one transaction;
//! - reads: storage → [`resolve`] → [`EntityStore`].
//!
//! The storage collaborator is anything implementing
//! [`assay_store::RawStore`]; the engine never sees SQL and the transport
//! layer never sees raw records.

mod error;
mod facade;
pub mod integrity;
mod resolve;
mod validate;

pub use error::{CoreError, CoreResult, IntegrityError, ValidationError};
pub use facade::{DeleteMode, EntityIter, EntityStore};
pub use resolve::resolve;
pub use validate::validate;
