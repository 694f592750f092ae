//! Aggregates computed over a loaded ledger snapshot.

use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

use super::record::{Record, TransactionKind};

/// How aggregates treat records whose kind is neither income nor expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindPolicy {
    /// Skip the record and log a warning.
    #[default]
    Lenient,
    /// Fail the aggregate with [`LedgerError::UnrecognizedKind`].
    Strict,
}

impl KindPolicy {
    fn admit(self, record: &Record) -> Result<bool> {
        if record.kind.is_recognized() {
            return Ok(true);
        }
        match self {
            KindPolicy::Lenient => {
                tracing::warn!(
                    kind = %record.kind,
                    category = %record.category,
                    date = %record.date,
                    "excluding record with unrecognized type"
                );
                Ok(false)
            }
            KindPolicy::Strict => Err(LedgerError::UnrecognizedKind(
                record.kind.as_str().to_string(),
            )),
        }
    }
}

/// Expense totals keyed by category, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
}

impl CategoryTotals {
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, total)| (name.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Total income minus total expense. An empty ledger yields `0.0`; the result may be negative.
pub fn balance(records: &[Record], policy: KindPolicy) -> Result<f64> {
    let mut income = 0.0;
    let mut expense = 0.0;
    for record in records {
        if !policy.admit(record)? {
            continue;
        }
        match record.kind {
            TransactionKind::Income => income += record.amount.as_f64(),
            TransactionKind::Expense => expense += record.amount.as_f64(),
            TransactionKind::Other(_) => {}
        }
    }
    Ok(income - expense)
}

/// Sums expense amounts per category. Income never appears in the result.
pub fn expense_totals(records: &[Record], policy: KindPolicy) -> Result<CategoryTotals> {
    let mut totals = CategoryTotals::default();
    for record in records {
        if !policy.admit(record)? {
            continue;
        }
        if record.kind == TransactionKind::Expense {
            totals.add(&record.category, record.amount.as_f64());
        }
    }
    Ok(totals)
}
