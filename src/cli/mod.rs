use anyhow::{Context, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::application::{AppError, ExpenseService};
use crate::domain::{format_amount, parse_amount, Amount, ExpenseChanges, ExpenseId, MonthFilter};
use crate::storage::DEFAULT_STORE_FILE;

/// Spendlog - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "spendlog")]
#[command(about = "Record, edit and summarize personal expenses stored in a local JSON file")]
#[command(version)]
pub struct Cli {
    /// Expense file path
    #[arg(
        short,
        long,
        global = true,
        env = "SPENDLOG_FILE",
        default_value = DEFAULT_STORE_FILE
    )]
    pub file: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an expense
    Add {
        /// Expense description
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        description: String,

        /// Expense amount (e.g., "20" or "12.50")
        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        amount: Amount,
    },

    /// Update an expense
    Update {
        /// Expense ID
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        id: ExpenseId,

        /// New description
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        description: Option<String>,

        /// New amount
        #[arg(long, value_parser = parse_amount, allow_negative_numbers = true)]
        amount: Option<Amount>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        id: ExpenseId,
    },

    /// List all expenses
    List,

    /// Show summary of expenses
    Summary {
        /// Month (1-12); matches that month in every year unless --year is given
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Restrict --month to a single year
        #[arg(long, requires = "month")]
        year: Option<i32>,
    },

    /// Export expenses to CSV or JSON
    Export {
        /// Format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify expense file integrity
    Check,
}

impl Cli {
    /// Install the stderr tracing subscriber. `RUST_LOG` wins over `--verbose`.
    pub fn init_tracing(&self) {
        let default_directive = if self.verbose {
            "spendlog=debug"
        } else {
            "spendlog=warn"
        };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    pub fn run(self) -> Result<()> {
        tracing::debug!(file = %self.file.display(), "using expense file");
        let service = ExpenseService::open(&self.file);

        match self.command {
            Commands::Add {
                description,
                amount,
            } => {
                let expense = service.add_expense(description, amount)?;
                println!("Expenses successfully added (ID: {})", expense.id);
            }

            Commands::Update {
                id,
                description,
                amount,
            } => {
                let changes = ExpenseChanges {
                    description,
                    amount,
                };
                if let Some(expense) = not_found_as_none(service.update_expense(id, changes))? {
                    println!("Expenses successfully updated (ID: {})", expense.id);
                }
            }

            Commands::Delete { id } => {
                if not_found_as_none(service.delete_expense(id))?.is_some() {
                    println!("Expenses successfully deleted");
                }
            }

            Commands::List => run_list_command(&service)?,

            Commands::Summary { month, year } => {
                let filter = month.map(|m| {
                    let filter = MonthFilter::new(m);
                    match year {
                        Some(y) => filter.in_year(y),
                        None => filter,
                    }
                });
                run_summary_command(&service, filter)?;
            }

            Commands::Export { format, output } => {
                run_export_command(&service, &format, output.as_deref())?;
            }

            Commands::Check => run_check_command(&service)?,
        }

        Ok(())
    }
}

/// Turn the not-found outcome into a printed notice; every other error propagates.
fn not_found_as_none<T>(result: Result<T, AppError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => {
            println!("Expense not found");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn run_list_command(service: &ExpenseService) -> Result<()> {
    let expenses = service.list_expenses()?;

    if expenses.is_empty() {
        println!("No expenses to list");
        return Ok(());
    }

    println!("ID     Date        Description         Amount");
    for expense in &expenses {
        println!(
            "{}    {}        {}        {}",
            expense.id,
            expense.date.format("%Y-%m-%d"),
            expense.description,
            format_amount(expense.amount)
        );
    }

    Ok(())
}

fn run_summary_command(service: &ExpenseService, filter: Option<MonthFilter>) -> Result<()> {
    let summary = service.summary(filter)?;

    match summary.month {
        Some(month) => println!(
            "Total expenses for {}: {}",
            month,
            format_amount(summary.total)
        ),
        None => println!("Total expenses: {}", format_amount(summary.total)),
    }

    Ok(())
}

fn run_export_command(
    service: &ExpenseService,
    format: &str,
    output: Option<&std::path::Path>,
) -> Result<()> {
    use crate::io::{ExportFormat, Exporter};
    use std::fs::File;
    use std::io::{stdout, Write};

    let export_format: ExportFormat = format.parse().map_err(|e| {
        anyhow::anyhow!(
            "Invalid export format '{}'. Valid formats: csv, json. Error: {}",
            format,
            e
        )
    })?;

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    let count = Exporter::new(service).export(export_format, writer)?;
    if output.is_some() {
        eprintln!("Exported {} expenses", count);
    }

    Ok(())
}

fn run_check_command(service: &ExpenseService) -> Result<()> {
    println!("Checking expense file {}...\n", service.store().path().display());

    let report = service.check_integrity()?;

    println!("Expenses: {}", report.expense_count);
    println!("Total:    {}", format_amount(report.total));
    println!();

    if report.is_healthy() {
        println!("Ledger is consistent.");
    } else {
        println!("Issues found:");
        for issue in &report.issues {
            println!("  - {}", issue);
        }
        anyhow::bail!("Ledger integrity check failed");
    }

    Ok(())
}
