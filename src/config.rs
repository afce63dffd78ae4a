use std::path::PathBuf;

use crate::format::DEFAULT_CURRENCY_SYMBOL;

pub const DEFAULT_LEDGER_FILE: &str = "ledger.txt";

/// Settings shared by every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ledger_path: PathBuf,
    pub currency_symbol: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from(DEFAULT_LEDGER_FILE),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}
