use std::collections::BTreeSet;
use std::fmt;

use chrono::Datelike;

use super::{Amount, Expense, ExpenseId};

/// Id for the next expense: one past the highest id in use, or 1 for an empty ledger.
/// Returns `None` once the highest id is `ExpenseId::MAX`.
pub fn next_id(expenses: &[Expense]) -> Option<ExpenseId> {
    expenses.iter().map(|e| e.id).max().unwrap_or(0).checked_add(1)
}

/// Position of the expense with the given id, if present.
pub fn find_index(id: ExpenseId, expenses: &[Expense]) -> Option<usize> {
    expenses.iter().position(|e| e.id == id)
}

/// Sum of all amounts. An empty slice totals 0.
pub fn total(expenses: &[Expense]) -> Amount {
    sum_amounts(expenses.iter())
}

/// Filter that selects expenses by calendar month, optionally pinned to one year.
///
/// Without a year every January (or March, ...) matches regardless of which
/// year it falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFilter {
    pub month: u32,
    pub year: Option<i32>,
}

impl MonthFilter {
    pub fn new(month: u32) -> Self {
        Self { month, year: None }
    }

    pub fn in_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        expense.date.month() == self.month && self.year.is_none_or(|y| expense.date.year() == y)
    }
}

/// Sum of amounts for expenses selected by `filter`.
pub fn total_for_month(filter: MonthFilter, expenses: &[Expense]) -> Amount {
    sum_amounts(expenses.iter().filter(|e| filter.matches(e)))
}

fn sum_amounts<'a>(expenses: impl Iterator<Item = &'a Expense>) -> Amount {
    // Explicit fold: float `Sum` of an empty iterator may yield -0.0.
    expenses.fold(0.0, |acc, e| acc + e.amount)
}

/// Result of a ledger consistency check.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrityReport {
    pub expense_count: usize,
    pub total: Amount,
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_healthy(&self) -> bool {
        self.issues.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntegrityIssue {
    DuplicateId(ExpenseId),
    EmptyDescription(ExpenseId),
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::DuplicateId(id) => write!(f, "ID {} is used more than once", id),
            IntegrityIssue::EmptyDescription(id) => {
                write!(f, "Expense {} has an empty description", id)
            }
        }
    }
}

/// Inspect a loaded ledger for records that break its invariants.
pub fn build_integrity_report(expenses: &[Expense]) -> IntegrityReport {
    let mut issues = Vec::new();
    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();

    for expense in expenses {
        if !seen.insert(expense.id) && reported.insert(expense.id) {
            issues.push(IntegrityIssue::DuplicateId(expense.id));
        }
        if expense.description.trim().is_empty() {
            issues.push(IntegrityIssue::EmptyDescription(expense.id));
        }
    }

    IntegrityReport {
        expense_count: expenses.len(),
        total: total(expenses),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn make_expense(id: ExpenseId, date: &str, amount: Amount) -> Expense {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        Expense::new(id, date, format!("expense {}", id), amount)
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(&[]), Some(1));
    }

    #[test]
    fn test_next_id_uses_max_not_last() {
        let expenses = vec![
            make_expense(5, "2024-01-01", 1.0),
            make_expense(2, "2024-01-02", 1.0),
        ];
        assert_eq!(next_id(&expenses), Some(6));
    }

    #[test]
    fn test_next_id_exhausted() {
        let expenses = vec![make_expense(ExpenseId::MAX, "2024-01-01", 1.0)];
        assert_eq!(next_id(&expenses), None);

        let below = vec![make_expense(ExpenseId::MAX - 1, "2024-01-01", 1.0)];
        assert_eq!(next_id(&below), Some(ExpenseId::MAX));
    }

    #[test]
    fn test_find_index() {
        let expenses = vec![
            make_expense(1, "2024-01-01", 1.0),
            make_expense(3, "2024-01-02", 1.0),
        ];
        assert_eq!(find_index(3, &expenses), Some(1));
        assert_eq!(find_index(2, &expenses), None);
    }

    #[test]
    fn test_total_empty_is_positive_zero() {
        let t = total(&[]);
        assert_eq!(t, 0.0);
        assert!(t.is_sign_positive());
    }

    #[test]
    fn test_total_mixed_signs() {
        let expenses = vec![
            make_expense(1, "2024-01-01", 20.0),
            make_expense(2, "2024-01-02", -5.5),
            make_expense(3, "2024-01-03", 0.0),
        ];
        assert_eq!(total(&expenses), 14.5);
    }

    #[test]
    fn test_total_for_month_ignores_year() {
        let expenses = vec![
            make_expense(1, "2023-05-10", 10.0),
            make_expense(2, "2024-05-01", 5.0),
            make_expense(3, "2024-06-01", 100.0),
        ];
        assert_eq!(total_for_month(MonthFilter::new(5), &expenses), 15.0);
        assert_eq!(total_for_month(MonthFilter::new(6), &expenses), 100.0);
        assert_eq!(total_for_month(MonthFilter::new(7), &expenses), 0.0);
    }

    #[test]
    fn test_total_for_month_with_year() {
        let expenses = vec![
            make_expense(1, "2023-05-10", 10.0),
            make_expense(2, "2024-05-01", 5.0),
        ];
        let filter = MonthFilter::new(5).in_year(2024);
        assert_eq!(total_for_month(filter, &expenses), 5.0);
        assert_eq!(
            total_for_month(MonthFilter::new(5).in_year(2022), &expenses),
            0.0
        );
    }

    #[test]
    fn test_integrity_report_healthy() {
        let expenses = vec![
            make_expense(1, "2024-01-01", 20.0),
            make_expense(2, "2024-01-02", 5.0),
        ];
        let report = build_integrity_report(&expenses);

        assert!(report.is_healthy());
        assert_eq!(report.expense_count, 2);
        assert_eq!(report.total, 25.0);
    }

    #[test]
    fn test_integrity_report_flags_problems() {
        let mut blank = make_expense(2, "2024-01-02", 5.0);
        blank.description = "   ".into();
        let expenses = vec![
            make_expense(1, "2024-01-01", 20.0),
            blank,
            make_expense(1, "2024-01-03", 1.0),
            make_expense(1, "2024-01-04", 1.0),
        ];

        let report = build_integrity_report(&expenses);

        assert!(!report.is_healthy());
        assert_eq!(
            report.issues,
            vec![
                IntegrityIssue::EmptyDescription(2),
                IntegrityIssue::DuplicateId(1),
            ]
        );
    }
}
