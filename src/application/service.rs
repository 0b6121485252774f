use std::path::PathBuf;

use crate::domain::{
    build_integrity_report, find_index, next_id, total, total_for_month, Amount, Expense,
    ExpenseChanges, ExpenseId, IntegrityReport, MonthFilter,
};
use crate::storage::ExpenseStore;

use super::{AppError, Clock, Summary, SystemClock};

/// Application service providing the expense use cases.
/// Each call is one load -> compute -> (save) cycle against the store.
pub struct ExpenseService {
    store: ExpenseStore,
    clock: Box<dyn Clock>,
}

impl ExpenseService {
    /// Create a service over `store` that dates new expenses with the system clock.
    pub fn new(store: ExpenseStore) -> Self {
        Self {
            store,
            clock: Box::new(SystemClock),
        }
    }

    /// Open the expense file at the given path.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(ExpenseStore::new(path))
    }

    /// Replace the date source used for new expenses.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    /// Record a new expense dated today.
    pub fn add_expense(
        &self,
        description: impl Into<String>,
        amount: Amount,
    ) -> Result<Expense, AppError> {
        let mut expenses = self.store.load()?;

        let Some(id) = next_id(&expenses) else {
            return Err(AppError::IdSpaceExhausted(ExpenseId::MAX));
        };

        let expense = Expense::new(id, self.clock.today(), description, amount);
        tracing::debug!(id = expense.id, date = %expense.date, "assigned expense id");

        expenses.push(expense.clone());
        self.store.save(&expenses)?;
        Ok(expense)
    }

    /// Apply `changes` to an existing expense.
    ///
    /// The ledger is saved even when `changes` is empty. Nothing is written
    /// when the id does not exist.
    pub fn update_expense(
        &self,
        id: ExpenseId,
        changes: ExpenseChanges,
    ) -> Result<Expense, AppError> {
        let mut expenses = self.store.load()?;

        let Some(index) = find_index(id, &expenses) else {
            tracing::debug!(id, "update skipped, expense not found");
            return Err(AppError::ExpenseNotFound(id));
        };

        if changes.is_empty() {
            tracing::debug!(id, "update with no changes, rewriting record as is");
        }
        expenses[index].apply(changes);
        let updated = expenses[index].clone();

        self.store.save(&expenses)?;
        tracing::debug!(id, "expense updated");
        Ok(updated)
    }

    /// Remove an expense and return it. Nothing is written when the id does not exist.
    pub fn delete_expense(&self, id: ExpenseId) -> Result<Expense, AppError> {
        let mut expenses = self.store.load()?;

        let Some(index) = find_index(id, &expenses) else {
            tracing::debug!(id, "delete skipped, expense not found");
            return Err(AppError::ExpenseNotFound(id));
        };

        let removed = expenses.remove(index);
        self.store.save(&expenses)?;
        tracing::debug!(id, "expense deleted");
        Ok(removed)
    }

    /// All expenses in ledger order.
    pub fn list_expenses(&self) -> Result<Vec<Expense>, AppError> {
        Ok(self.store.load()?)
    }

    /// Total for the whole ledger, or for one month when `filter` is set.
    pub fn summary(&self, filter: Option<MonthFilter>) -> Result<Summary, AppError> {
        let expenses = self.store.load()?;

        let summary = match filter {
            Some(filter) => Summary {
                month: Some(filter.month),
                total: total_for_month(filter, &expenses),
            },
            None => Summary {
                month: None,
                total: total(&expenses),
            },
        };

        Ok(summary)
    }

    /// Verify ledger invariants on the stored data.
    pub fn check_integrity(&self) -> Result<IntegrityReport, AppError> {
        let expenses = self.store.load()?;
        Ok(build_integrity_report(&expenses))
    }
}
