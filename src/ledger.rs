use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::transaction::{Transaction, TransactionKind};

/// Label returned by [`Ledger::most_spent_category`] when nothing was spent.
pub const NO_CATEGORY: &str = "N/A";

/// Every this many currency units add one unit to a category bar.
pub const BAR_UNIT: Decimal = Decimal::TEN;

/// Longest bar [`Ledger::text_graph`] reports, whatever the amount.
pub const MAX_BAR_LENGTH: usize = 10_000;

/// Append-only, insertion-ordered list of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn total_income(&self) -> Decimal {
        self.total_of(TransactionKind::Income)
    }

    pub fn total_expenses(&self) -> Decimal {
        self.total_of(TransactionKind::Expense)
    }

    /// Income minus expenses; negative when spending exceeds earnings.
    pub fn net_savings(&self) -> Decimal {
        self.total_income() - self.total_expenses()
    }

    fn total_of(&self, kind: TransactionKind) -> Decimal {
        self.transactions
            .iter()
            .filter(|transaction| transaction.kind() == kind)
            .fold(Decimal::ZERO, |acc, transaction| saturating_add(acc, transaction.amount()))
    }

    /// Expense totals per category, keyed in lexicographic order. Income
    /// records never contribute and categories without expenses are absent.
    pub fn category_spending(&self) -> BTreeMap<String, Decimal> {
        let mut spending: BTreeMap<String, Decimal> = BTreeMap::new();
        for transaction in self.transactions.iter().filter(|t| t.is_expense()) {
            let entry = spending
                .entry(transaction.category().to_string())
                .or_insert(Decimal::ZERO);
            *entry = saturating_add(*entry, transaction.amount());
        }
        spending
    }

    /// Category with the largest expense total. Ties go to the
    /// lexicographically smallest category name.
    pub fn top_spending_category(&self) -> Option<(String, Decimal)> {
        let mut top: Option<(String, Decimal)> = None;
        for (category, amount) in self.category_spending() {
            match &top {
                Some((_, best)) if amount <= *best => {}
                _ => top = Some((category, amount)),
            }
        }
        top
    }

    pub fn most_spent_category(&self) -> String {
        self.top_spending_category()
            .map(|(category, _)| category)
            .unwrap_or_else(|| NO_CATEGORY.to_string())
    }

    pub fn sorted_by_date(&self) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by_key(|transaction| transaction.date());
        sorted
    }

    /// Largest amounts first.
    pub fn sorted_by_amount(&self) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by(|a, b| b.amount().cmp(&a.amount()));
        sorted
    }

    pub fn sorted_by_category(&self) -> Vec<Transaction> {
        let mut sorted = self.transactions.clone();
        sorted.sort_by(|a, b| a.category().cmp(b.category()));
        sorted
    }

    /// Bar length per spending category: one unit for every [`BAR_UNIT`]
    /// spent, rounded down and capped at [`MAX_BAR_LENGTH`].
    pub fn text_graph(&self) -> Vec<(String, usize)> {
        self.category_spending()
            .into_iter()
            .map(|(category, amount)| {
                let units = (amount / BAR_UNIT).floor().max(Decimal::ZERO);
                let length = units
                    .to_usize()
                    .map_or(MAX_BAR_LENGTH, |length| length.min(MAX_BAR_LENGTH));
                (category, length)
            })
            .collect()
    }

    /// Case-insensitive category match, in insertion order.
    pub fn search_by_category(&self, category: &str) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| transaction.category().eq_ignore_ascii_case(category))
            .cloned()
            .collect()
    }

    /// Expenses dated within `start..=end`, oldest first.
    pub fn expenses_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<Transaction> {
        if start > end {
            return Vec::new();
        }
        let mut expenses: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.is_expense() && t.date() >= start && t.date() <= end)
            .cloned()
            .collect();
        expenses.sort_by_key(|transaction| transaction.date());
        expenses
    }
}

/// Amounts are never negative, so the only way out of range is upwards.
fn saturating_add(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or(Decimal::MAX)
}

impl Extend<Transaction> for Ledger {
    fn extend<I: IntoIterator<Item = Transaction>>(&mut self, iter: I) {
        self.transactions.extend(iter);
    }
}
