//! Rate persistence for the crewrate system.
//!
//! Provides the [`RateRepository`] trait, a SQLite implementation
//! ([`SqliteStore`]) and an in-memory one ([`MemoryStore`]). Persistence is a
//! best-effort cache of the last computed rate per service and crew: the
//! [`recorder`] helpers never let a storage failure interrupt a calculation.

pub mod error;
pub mod keys;
pub mod memory;
pub mod recorder;
pub mod sqlite;
pub mod traits;

// Re-exports for convenience.
pub use error::StorageError;
pub use memory::MemoryStore;
pub use recorder::{
    RateSource, RecordFailure, RecordReport, ResolvedRate, load_profile_or_default, record_rate,
    resolve_rate,
};
pub use sqlite::SqliteStore;
pub use traits::{KvStore, RateRepository, StoredRate};
