use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::config::{Config, DEFAULT_LEDGER_FILE};
use crate::errors::AppError;
use crate::format::DEFAULT_CURRENCY_SYMBOL;
use crate::ledger::Ledger;
use crate::models::transaction::Transaction;
use crate::operations::report::{
    render_category_spending, render_graph, render_load_report, render_summary, render_transactions,
    sorted_transactions, SortKey,
};
use crate::operations::shell::run_shell;
use crate::storage::{FileStore, LedgerStore};

#[derive(Debug, Parser)]
#[command(name = "ledger", version, about = "Record income and expenses and summarize them")]
pub struct Cli {
    /// Ledger file, one transaction per line
    #[arg(short, long, global = true, default_value = DEFAULT_LEDGER_FILE)]
    pub file: PathBuf,

    /// Symbol used when printing amounts
    #[arg(long, global = true, default_value = DEFAULT_CURRENCY_SYMBOL)]
    pub currency: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new transaction
    Add {
        /// Date as YYYY-MM-DD
        date: NaiveDate,
        description: String,
        amount: Decimal,
        /// Income or Expense
        kind: String,
        category: String,
    },
    /// Totals, net savings and the top spending category
    Summary,
    /// List transactions
    List {
        #[arg(long, value_enum, default_value_t = SortKey::Insertion)]
        sort: SortKey,
    },
    /// Expense totals per category
    Categories,
    /// Text bar graph of spending per category
    Graph,
    /// Transactions in a category, ignoring case
    Search { category: String },
    /// Expenses between two dates, inclusive
    Range { start: NaiveDate, end: NaiveDate },
    /// Interactive prompt
    Shell,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            ledger_path: self.file.clone(),
            currency_symbol: self.currency.clone(),
        }
    }
}

/// Loads the ledger and runs one command against it. New records are appended
/// to the file, so lines the load skipped stay where they were. Load notes go
/// to `notes`, results to `output`.
pub fn execute<W: Write, N: Write>(
    command: Command,
    config: &Config,
    mut output: W,
    mut notes: N,
) -> Result<(), AppError> {
    let store = FileStore::new(&config.ledger_path);
    let mut ledger = Ledger::new();
    let report = store.load(&mut ledger)?;
    if !matches!(command, Command::Add { .. }) || !report.source_missing {
        write!(notes, "{}", render_load_report(&report))?;
    }

    let symbol = config.currency_symbol.as_str();
    match command {
        Command::Add {
            date,
            description,
            amount,
            kind,
            category,
        } => {
            let transaction = Transaction::create(description, amount, &kind, category, date)?;
            writeln!(output, "Added: {}", transaction.display_with(symbol))?;
            store.append(std::slice::from_ref(&transaction))?;
            ledger.add(transaction);
        }
        Command::Summary => write!(output, "{}", render_summary(&ledger, symbol))?,
        Command::List { sort } => {
            let transactions = sorted_transactions(&ledger, sort);
            write!(output, "{}", render_transactions(&transactions, symbol))?;
        }
        Command::Categories => write!(output, "{}", render_category_spending(&ledger, symbol))?,
        Command::Graph => write!(output, "{}", render_graph(&ledger))?,
        Command::Search { category } => {
            let found = ledger.search_by_category(&category);
            write!(output, "{}", render_transactions(&found, symbol))?;
        }
        Command::Range { start, end } => {
            let found = ledger.expenses_between(start, end);
            write!(output, "{}", render_transactions(&found, symbol))?;
        }
        Command::Shell => {
            let stdin = io::stdin();
            run_shell(&mut ledger, &store, config, stdin.lock(), output)?;
        }
    }
    Ok(())
}
