mod store;

pub use store::*;

/// File used when neither `--file` nor `SPENDLOG_FILE` is given.
pub const DEFAULT_STORE_FILE: &str = "expenses.json";
