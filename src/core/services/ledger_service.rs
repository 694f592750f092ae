//! Ledger operations backed by a storage backend.

use chrono::{Local, NaiveDate};

use crate::errors::Result;
use crate::ledger::{self, Amount, CategoryTotals, KindPolicy, Record, TransactionKind};
use crate::storage::StorageBackend;

/// Runs each ledger operation against a freshly loaded snapshot.
///
/// Nothing is cached between calls; mutations write the full sequence back before returning.
pub struct LedgerService {
    storage: Box<dyn StorageBackend>,
    policy: KindPolicy,
}

impl LedgerService {
    pub fn new(storage: Box<dyn StorageBackend>, policy: KindPolicy) -> Self {
        Self { storage, policy }
    }

    /// Appends a record dated with the current local date and returns it.
    pub fn add_transaction(
        &self,
        kind: TransactionKind,
        category: &str,
        amount: Amount,
    ) -> Result<Record> {
        self.add_transaction_on(kind, category, amount, Local::now().date_naive())
    }

    /// Appends a record with an explicit date and returns it.
    pub fn add_transaction_on(
        &self,
        kind: TransactionKind,
        category: &str,
        amount: Amount,
        date: NaiveDate,
    ) -> Result<Record> {
        let mut records = self.storage.load()?;
        let record = Record::new(kind, category, amount, date);
        records.push(record.clone());
        self.storage.save(&records)?;
        tracing::info!(
            kind = %record.kind,
            category = %record.category,
            amount = %record.amount,
            total = records.len(),
            "recorded transaction"
        );
        Ok(record)
    }

    pub fn calculate_balance(&self) -> Result<f64> {
        let records = self.storage.load()?;
        ledger::balance(&records, self.policy)
    }

    pub fn analyze_expenses(&self) -> Result<CategoryTotals> {
        let records = self.storage.load()?;
        ledger::expense_totals(&records, self.policy)
    }

    /// Returns every record in stored order.
    pub fn list_transactions(&self) -> Result<Vec<Record>> {
        self.storage.load()
    }
}
