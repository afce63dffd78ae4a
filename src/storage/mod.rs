//! Line-oriented persistence for the ledger.
//!
//! Each record is written as `description,amount,kind,category,date` with a
//! plain comma delimiter and no escaping, dates in `YYYY-MM-DD`.

pub mod codec;
pub mod repository;

pub use codec::{load_all, save_all, LoadReport, SkippedLine};
pub use repository::{FileStore, LedgerStore};
