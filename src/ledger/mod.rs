//! Ledger records and the aggregates derived from them.

pub mod record;
pub mod summary;

pub use record::{Amount, Record, TransactionKind};
pub use summary::{balance, expense_totals, CategoryTotals, KindPolicy};
