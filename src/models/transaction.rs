use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::ValidationError;
use crate::format::{format_currency, DEFAULT_CURRENCY_SYMBOL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Income" => Ok(TransactionKind::Income),
            "Expense" => Ok(TransactionKind::Expense),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ledger entry. Fields are only reachable through accessors, so a
/// value that exists has already passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    description: String,
    amount: Decimal,
    kind: TransactionKind,
    category: String,
    date: NaiveDate,
}

impl Transaction {
    /// Builds a transaction from a textual kind, which must be exactly
    /// `Income` or `Expense`.
    pub fn create(
        description: impl Into<String>,
        amount: Decimal,
        kind: &str,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let kind = kind.parse::<TransactionKind>()?;
        Self::new(description, amount, kind, category, date)
    }

    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        kind: TransactionKind,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if amount < Decimal::ZERO {
            return Err(ValidationError::NegativeAmount(amount));
        }
        Ok(Self {
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            date,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Single-line rendering with a custom currency symbol.
    pub fn display_with(&self, currency_symbol: &str) -> String {
        format!(
            "{} | {} | {} | {} | {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.description,
            format_currency(self.amount, currency_symbol)
        )
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with(DEFAULT_CURRENCY_SYMBOL))
    }
}
