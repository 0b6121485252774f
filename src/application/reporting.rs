use crate::domain::Amount;

/// Total spending, either for the whole ledger or for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Month the total was restricted to, if any.
    pub month: Option<u32>,
    pub total: Amount,
}
