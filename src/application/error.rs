use thiserror::Error;

use crate::domain::ExpenseId;
use crate::storage::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    #[error("No expense IDs left: the highest ID in use is {0}")]
    IdSpaceExhausted(ExpenseId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    /// Not-found is reported to the user but is not a failure of the command.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::ExpenseNotFound(_))
    }
}
