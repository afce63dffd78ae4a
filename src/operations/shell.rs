use std::io::{BufRead, Write};

use crate::config::Config;
use crate::errors::AppError;
use crate::ledger::Ledger;
use crate::models::transaction::Transaction;
use crate::operations::add::{add_transaction, INPUT_FORMAT};
use crate::operations::report::{
    render_category_spending, render_graph, render_summary, render_transactions, sorted_transactions,
    SortKey,
};
use crate::storage::LedgerStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Add,
    Summary,
    List,
    Categories,
    Graph,
    Search,
    Save,
    Exit,
    Unknown,
}

pub fn check_for_command(input: &str) -> UserCommand {
    match input.to_lowercase().as_str() {
        "add" => UserCommand::Add,
        "summary" => UserCommand::Summary,
        "list" => UserCommand::List,
        "categories" => UserCommand::Categories,
        "graph" => UserCommand::Graph,
        "search" => UserCommand::Search,
        "save" => UserCommand::Save,
        "exit" | "quit" => UserCommand::Exit,
        _ => UserCommand::Unknown,
    }
}

fn parse_sort_key(input: Option<&str>) -> Option<SortKey> {
    match input.map(str::to_lowercase).as_deref() {
        None => Some(SortKey::Insertion),
        Some("date") => Some(SortKey::Date),
        Some("amount") => Some(SortKey::Amount),
        Some("category") => Some(SortKey::Category),
        Some(_) => None,
    }
}

/// Reads one trimmed line. `None` once the input is exhausted.
fn read_user_input<R: BufRead>(input: &mut R) -> Result<Option<String>, AppError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Appends what was added since the last save and returns how many records that was.
fn save_pending(store: &dyn LedgerStore, pending: &mut Vec<Transaction>) -> Result<usize, AppError> {
    store.append(pending)?;
    let saved = pending.len();
    pending.clear();
    Ok(saved)
}

/// Interactive loop over `input`. Transactions added during the session are
/// appended to the store on `save`, on `exit` and when the input runs out;
/// records already in the store are never rewritten.
pub fn run_shell<R: BufRead, W: Write>(
    ledger: &mut Ledger,
    store: &dyn LedgerStore,
    config: &Config,
    mut input: R,
    mut output: W,
) -> Result<(), AppError> {
    writeln!(output, "Welcome to the finance ledger!")?;
    let mut pending = Vec::new();

    loop {
        writeln!(
            output,
            "Please enter a command (add, summary, list [date|amount|category], categories, graph, search, save, exit):"
        )?;

        let Some(line) = read_user_input(&mut input)? else {
            save_pending(store, &mut pending)?;
            break;
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(first) = parts.first() else {
            continue;
        };

        match check_for_command(first) {
            UserCommand::Add => {
                writeln!(output, "Enter transaction details in the format:\n{}", INPUT_FORMAT)?;
                let Some(details) = read_user_input(&mut input)? else {
                    continue;
                };
                match add_transaction(ledger, &details) {
                    Ok(transaction) => {
                        pending.push(transaction);
                        writeln!(output, "Transaction added successfully!")?;
                    }
                    Err(e) => {
                        writeln!(output, "Error adding transaction: {}", e)?;
                        writeln!(output, "Please try again.")?;
                    }
                }
            }
            UserCommand::Summary => {
                write!(output, "{}", render_summary(ledger, &config.currency_symbol))?;
            }
            UserCommand::List => match parse_sort_key(parts.get(1).copied()) {
                Some(key) => {
                    let transactions = sorted_transactions(ledger, key);
                    write!(output, "{}", render_transactions(&transactions, &config.currency_symbol))?;
                }
                None => writeln!(output, "Unknown sort order. Use date, amount or category.")?,
            },
            UserCommand::Categories => {
                write!(output, "{}", render_category_spending(ledger, &config.currency_symbol))?;
            }
            UserCommand::Graph => {
                write!(output, "{}", render_graph(ledger))?;
            }
            UserCommand::Search => {
                writeln!(output, "Provide the category to search for:")?;
                let Some(category) = read_user_input(&mut input)? else {
                    continue;
                };
                let found = ledger.search_by_category(&category);
                if found.is_empty() {
                    writeln!(output, "No transactions found for category: {}", category)?;
                } else {
                    writeln!(output, "Transactions found for category '{}':", category)?;
                    write!(output, "{}", render_transactions(&found, &config.currency_symbol))?;
                }
            }
            UserCommand::Save => {
                let saved = save_pending(store, &mut pending)?;
                writeln!(output, "Saved {} new transactions.", saved)?;
            }
            UserCommand::Exit => {
                save_pending(store, &mut pending)?;
                writeln!(output, "Exiting the application.")?;
                break;
            }
            UserCommand::Unknown => {
                writeln!(output, "No valid command found: {}", first)?;
            }
        }
    }

    Ok(())
}
