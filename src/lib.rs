//! Personal finance ledger: validated income/expense records, aggregate
//! summaries over them and a flat comma-delimited file format.

pub mod cli;
pub mod config;
pub mod errors;
pub mod format;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod operations;
pub mod storage;

pub use errors::{AppError, ParseError, StoreError, ValidationError};
pub use ledger::Ledger;
pub use models::transaction::{Transaction, TransactionKind};
pub use storage::{load_all, save_all, FileStore, LedgerStore, LoadReport};
