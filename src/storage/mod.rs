pub mod json_backend;

use crate::{errors::Result, ledger::Record};

/// Abstraction over persistence backends that hold the full record sequence.
///
/// Callers load a fresh snapshot for every operation and write the whole sequence back
/// after a mutation; backends keep no state between calls.
pub trait StorageBackend: Send + Sync {
    /// Returns the stored records in insertion order. A missing document is an empty ledger.
    fn load(&self) -> Result<Vec<Record>>;

    /// Replaces the stored document with `records`.
    fn save(&self, records: &[Record]) -> Result<()>;
}

pub use json_backend::{JsonStorage, WriteMode, DEFAULT_LEDGER_FILE};
