use rust_decimal::Decimal;
use thiserror::Error;

/// Raised when a transaction would be built from invalid fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("invalid transaction kind '{0}'. Use 'Income' or 'Expense'")]
    UnknownKind(String),
}

/// Why a single persisted line could not be turned back into a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} fields separated by commas but got {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("malformed line: {0}")]
    Malformed(String),
}

/// Fatal persistence failures. Per-line problems never end up here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Anything a single command of the binary can fail with.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
