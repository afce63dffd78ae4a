use std::fmt::Write;

use crate::format::{format_currency, render_bar};
use crate::ledger::{Ledger, BAR_UNIT};
use crate::models::transaction::Transaction;
use crate::storage::codec::LoadReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortKey {
    /// Order the records were added in
    #[default]
    Insertion,
    Date,
    Amount,
    Category,
}

pub fn sorted_transactions(ledger: &Ledger, key: SortKey) -> Vec<Transaction> {
    match key {
        SortKey::Insertion => ledger.transactions().to_vec(),
        SortKey::Date => ledger.sorted_by_date(),
        SortKey::Amount => ledger.sorted_by_amount(),
        SortKey::Category => ledger.sorted_by_category(),
    }
}

pub fn render_summary(ledger: &Ledger, currency_symbol: &str) -> String {
    let rows = [
        ("Total income", format_currency(ledger.total_income(), currency_symbol)),
        ("Total expenses", format_currency(ledger.total_expenses(), currency_symbol)),
        ("Net savings", format_currency(ledger.net_savings(), currency_symbol)),
        ("Most spent category", ledger.most_spent_category()),
    ];

    let mut out = String::new();
    for (label, value) in rows {
        let _ = writeln!(out, "{:<20} {}", format!("{}:", label), value);
    }
    out
}

pub fn render_transactions(transactions: &[Transaction], currency_symbol: &str) -> String {
    if transactions.is_empty() {
        return "No transactions.\n".to_string();
    }
    let mut out = String::new();
    for transaction in transactions {
        let _ = writeln!(out, "{}", transaction.display_with(currency_symbol));
    }
    out
}

pub fn render_category_spending(ledger: &Ledger, currency_symbol: &str) -> String {
    let spending = ledger.category_spending();
    if spending.is_empty() {
        return "No expenses recorded.\n".to_string();
    }
    let width = category_width(spending.keys());
    let mut out = String::new();
    for (category, amount) in &spending {
        let _ = writeln!(
            out,
            "{:width$}  {:>14}",
            category,
            format_currency(*amount, currency_symbol),
            width = width
        );
    }
    out
}

/// One `#` per [`BAR_UNIT`] spent in each category.
pub fn render_graph(ledger: &Ledger) -> String {
    let graph = ledger.text_graph();
    if graph.is_empty() {
        return "No expenses recorded.\n".to_string();
    }
    let width = category_width(graph.iter().map(|(category, _)| category));
    let mut out = String::new();
    for (category, length) in &graph {
        let _ = writeln!(out, "{:width$} | {}", category, render_bar(*length), width = width);
    }
    let _ = writeln!(out, "(each # = {} spent)", BAR_UNIT);
    out
}

/// Human-readable notes about a load, one per line. Empty for a clean load
/// of an existing source.
pub fn render_load_report(report: &LoadReport) -> String {
    let mut out = String::new();
    if report.source_missing {
        out.push_str("No ledger file found, starting with an empty ledger.\n");
        return out;
    }
    for skipped in &report.skipped {
        let _ = writeln!(
            out,
            "Skipped line {}: {} ({})",
            skipped.line, skipped.content, skipped.error
        );
    }
    if !report.is_clean() {
        let _ = writeln!(
            out,
            "Loaded {} transactions, skipped {} malformed lines.",
            report.loaded,
            report.skipped_count()
        );
    }
    out
}

fn category_width<'a>(categories: impl Iterator<Item = &'a String>) -> usize {
    categories.map(|c| c.chars().count()).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseError;
    use crate::storage::codec::SkippedLine;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn scenario_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        ledger.add(Transaction::create("Salary", Decimal::from(1000), "Income", "Job", day(1)).unwrap());
        ledger.add(Transaction::create("Rent", Decimal::from(300), "Expense", "Housing", day(2)).unwrap());
        ledger.add(Transaction::create("Food", Decimal::from(50), "Expense", "Food", day(3)).unwrap());
        ledger
    }

    #[test]
    fn test_render_summary() {
        let summary = render_summary(&scenario_ledger(), "$");
        assert!(summary.contains("Total income:        $1,000.00"));
        assert!(summary.contains("Total expenses:      $350.00"));
        assert!(summary.contains("Net savings:         $650.00"));
        assert!(summary.contains("Most spent category: Housing"));
    }

    #[test]
    fn test_render_summary_empty_ledger() {
        let summary = render_summary(&Ledger::new(), "$");
        assert!(summary.contains("Most spent category: N/A"));
        assert!(summary.contains("Net savings:         $0.00"));
    }

    #[test]
    fn test_render_graph() {
        let graph = render_graph(&scenario_ledger());
        let lines: Vec<&str> = graph.lines().collect();
        assert_eq!(lines[0], "Food    | #####");
        assert_eq!(lines[1], format!("Housing | {}", "#".repeat(30)));
        assert_eq!(lines[2], "(each # = 10 spent)");
    }

    #[test]
    fn test_render_graph_no_expenses() {
        assert_eq!(render_graph(&Ledger::new()), "No expenses recorded.\n");
    }

    #[test]
    fn test_render_category_spending() {
        let table = render_category_spending(&scenario_ledger(), "$");
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Food"));
        assert!(lines[0].ends_with("$50.00"));
        assert!(lines[1].starts_with("Housing"));
        assert!(lines[1].ends_with("$300.00"));
    }

    #[test]
    fn test_sorted_transactions_by_key() {
        let ledger = scenario_ledger();
        let by_amount = sorted_transactions(&ledger, SortKey::Amount);
        assert_eq!(by_amount[0].description(), "Salary");
        assert_eq!(by_amount[2].description(), "Food");

        let by_category = sorted_transactions(&ledger, SortKey::Category);
        assert_eq!(by_category[0].category(), "Food");

        let insertion = sorted_transactions(&ledger, SortKey::Insertion);
        assert_eq!(insertion, ledger.transactions().to_vec());
    }

    #[test]
    fn test_render_transactions() {
        let ledger = scenario_ledger();
        let listing = render_transactions(ledger.transactions(), "$");
        assert_eq!(listing.lines().count(), 3);
        assert!(listing.starts_with("2024-01-01 | Income | Job | Salary | $1,000.00"));
        assert_eq!(render_transactions(&[], "$"), "No transactions.\n");
    }

    #[test]
    fn test_render_load_report() {
        assert_eq!(render_load_report(&LoadReport::default()), "");
        assert!(render_load_report(&LoadReport::missing()).contains("No ledger file found"));

        let report = LoadReport {
            loaded: 1,
            skipped: vec![SkippedLine {
                line: 2,
                content: "a,b,c".to_string(),
                error: ParseError::FieldCount { expected: 5, found: 3 },
            }],
            source_missing: false,
        };
        let text = render_load_report(&report);
        assert!(text.contains("Skipped line 2: a,b,c (expected 5 fields separated by commas but got 3)"));
        assert!(text.contains("Loaded 1 transactions, skipped 1 malformed lines."));
    }
}
