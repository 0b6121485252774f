// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use spendlog::application::{ExpenseService, FixedClock};
use tempfile::TempDir;

/// Date every expense created through `test_service` is stamped with.
pub const TODAY: &str = "2024-05-15";

/// Helper to create a test service over a temporary expense file
pub fn test_service() -> Result<(ExpenseService, TempDir)> {
    test_service_on(parse_date(TODAY))
}

/// Helper to create a test service whose clock reports `today`
pub fn test_service_on(today: NaiveDate) -> Result<(ExpenseService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service =
        ExpenseService::open(temp_dir.path().join("expenses.json")).with_clock(FixedClock(today));
    Ok((service, temp_dir))
}

/// Helper to parse a date string into a NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: a service that shares the expense file of `service` but
/// stamps new expenses with a different date.
pub fn reopen_on(service: &ExpenseService, today: &str) -> ExpenseService {
    ExpenseService::open(service.store().path()).with_clock(FixedClock(parse_date(today)))
}
