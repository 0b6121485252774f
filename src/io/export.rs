use anyhow::Result;
use std::io::Write;
use std::str::FromStr;

use crate::application::ExpenseService;
use crate::domain::Expense;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{}'", other)),
        }
    }
}

/// Exporter for writing the expense ledger in other formats
pub struct Exporter<'a> {
    service: &'a ExpenseService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a ExpenseService) -> Self {
        Self { service }
    }

    /// Export in the requested format, returning the number of expenses written.
    pub fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<usize> {
        let expenses = self.service.list_expenses()?;
        match format {
            ExportFormat::Csv => write_csv(&expenses, writer),
            ExportFormat::Json => write_json(&expenses, writer),
        }
    }
}

/// Write expenses as CSV with an `id,date,description,amount` header.
pub fn write_csv<W: Write>(expenses: &[Expense], writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["id", "date", "description", "amount"])?;

    for expense in expenses {
        csv_writer.write_record([
            expense.id.to_string(),
            expense.date.format("%Y-%m-%d").to_string(),
            expense.description.clone(),
            expense.amount.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(expenses.len())
}

/// Write expenses as the same pretty-printed JSON array the store uses.
pub fn write_json<W: Write>(expenses: &[Expense], mut writer: W) -> Result<usize> {
    let json = serde_json::to_string_pretty(expenses)?;
    writer.write_all(json.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(expenses.len())
}
