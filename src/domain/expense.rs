use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Amount;

pub type ExpenseId = u64;

/// A single ledger entry.
///
/// The serialized field names and types are the on-disk format, so they must
/// not change: `id` (integer), `date` (`YYYY-MM-DD`), `description`, `amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expense {
    pub id: ExpenseId,
    /// Day the expense was recorded. Never changes after creation.
    pub date: NaiveDate,
    pub description: String,
    pub amount: Amount,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        date: NaiveDate,
        description: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            id,
            date,
            description: description.into(),
            amount,
        }
    }

    /// Apply a partial edit. Fields left as `None` keep their current value.
    pub fn apply(&mut self, changes: ExpenseChanges) {
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(amount) = changes.amount {
            self.amount = amount;
        }
    }
}

/// Optional field updates for an existing expense.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseChanges {
    pub description: Option<String>,
    pub amount: Option<Amount>,
}

impl ExpenseChanges {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount.is_none()
    }
}
