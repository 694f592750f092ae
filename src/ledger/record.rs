use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::errors::{LedgerError, Result};

/// Classification stored under the `type` key of each record.
///
/// Values other than `income` and `expense` are kept verbatim in [`TransactionKind::Other`]
/// so a document written by another tool still loads; aggregation decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Income,
    Expense,
    Other(String),
}

impl TransactionKind {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, TransactionKind::Other(_))
    }

    /// First letter upper-cased, the rest lower-cased (`income` -> `Income`).
    pub fn label(&self) -> String {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }
}

impl From<String> for TransactionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "income" => TransactionKind::Income,
            "expense" => TransactionKind::Expense,
            _ => TransactionKind::Other(value),
        }
    }
}

impl From<&str> for TransactionKind {
    fn from(value: &str) -> Self {
        TransactionKind::from(value.to_string())
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Monetary quantity as it appears in the document.
///
/// Backed by a JSON number so an integer written as `1000` reloads as an integer and
/// `1000.0` reloads as a float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Number);

impl Amount {
    pub fn from_f64(value: f64) -> Result<Self> {
        Number::from_f64(value)
            .map(Amount)
            .ok_or_else(|| LedgerError::InvalidAmount(value.to_string()))
    }

    /// Parses user input the way the menu expects: a plain decimal number.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| LedgerError::InvalidAmount(trimmed.to_string()))?;
        Self::from_f64(value)
    }

    pub fn from_i64(value: i64) -> Self {
        Amount(Number::from(value))
    }

    pub fn as_f64(&self) -> f64 {
        // Always `Some` unless serde_json's arbitrary_precision feature is enabled.
        self.0.as_f64().unwrap_or_default()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_i64() || self.0.is_u64()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One income or expense event. Never edited once appended to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Amount,
    pub date: NaiveDate,
}

impl Record {
    pub fn new(
        kind: impl Into<TransactionKind>,
        category: impl Into<String>,
        amount: Amount,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind: kind.into(),
            category: category.into(),
            amount,
            date,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | Category: {} | Amount: ${} | Date: {}",
            self.kind.label(),
            self.category,
            self.amount,
            self.date.format("%Y-%m-%d")
        )
    }
}
