use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::errors::StoreError;
use crate::ledger::Ledger;
use crate::models::transaction::Transaction;
use crate::storage::codec::{self, LoadReport, LINE_BREAK};

/// Durable home for a ledger.
pub trait LedgerStore {
    /// Replaces whatever the store held with the ledger's current contents.
    fn save(&self, ledger: &Ledger) -> Result<(), StoreError>;

    /// Appends the stored records to `ledger`.
    fn load(&self, ledger: &mut Ledger) -> Result<LoadReport, StoreError>;

    /// Adds `transactions` after whatever the store already holds, leaving
    /// existing content untouched, including lines a load had to skip.
    fn append(&self, transactions: &[Transaction]) -> Result<(), StoreError>;
}

/// Flat text file, one transaction per line.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStore for FileStore {
    fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        codec::save_all(ledger, &mut writer)?;
        writer.flush()?;
        tracing::info!(path = %self.path.display(), records = ledger.len(), "ledger saved");
        Ok(())
    }

    fn load(&self, ledger: &mut Ledger) -> Result<LoadReport, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no ledger file, nothing to load");
                return Ok(LoadReport::missing());
            }
            Err(e) => return Err(e.into()),
        };
        codec::load_all(ledger, BufReader::new(file))
    }

    fn append(&self, transactions: &[Transaction]) -> Result<(), StoreError> {
        if transactions.is_empty() {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)?;
        let needs_line_break = ends_mid_line(&mut file)?;

        let mut writer = BufWriter::new(file);
        if needs_line_break {
            writer.write_all(LINE_BREAK)?;
        }
        codec::write_transactions(transactions, &mut writer)?;
        writer.flush()?;
        tracing::info!(path = %self.path.display(), records = transactions.len(), "transactions appended");
        Ok(())
    }
}

/// True when the file is non-empty and its last byte is not a line break.
fn ends_mid_line(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n' && last[0] != b'\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::Transaction;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn write_temp_ledger(contents: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("Failed to create temp file");
        write!(tmp, "{}", contents).expect("Failed to write test ledger");
        tmp
    }

    fn sample_transaction(description: &str, kind: &str) -> Transaction {
        Transaction::create(
            description,
            Decimal::new(1999, 2),
            kind,
            "Misc",
            NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_load_missing_file_is_not_an_error() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nonexistent.txt"));

        let mut ledger = Ledger::new();
        let report = store.load(&mut ledger).unwrap();
        assert!(report.source_missing);
        assert_eq!(report.loaded, 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_load_file_with_one_bad_line() {
        let tmp = write_temp_ledger(
            "\
Salary,1500.00,Income,Job,2025-11-10
Coffee,3.50,Expense
",
        );
        let store = FileStore::new(tmp.path());

        let mut ledger = Ledger::new();
        let report = store.load(&mut ledger).unwrap();
        assert!(!report.source_missing);
        assert_eq!(ledger.len(), 1);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.skipped[0].line, 2);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("ledger.txt"));

        let mut original = Ledger::new();
        original.add(sample_transaction("Paycheck", "Income"));
        original.add(sample_transaction("Lunch", "Expense"));
        store.save(&original).unwrap();

        let mut loaded = Ledger::new();
        let report = store.load(&mut loaded).unwrap();
        assert!(report.is_clean());
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_save_truncates_previous_contents() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("ledger.txt"));

        let mut first = Ledger::new();
        first.add(sample_transaction("One", "Income"));
        first.add(sample_transaction("Two", "Income"));
        store.save(&first).unwrap();

        let mut second = Ledger::new();
        second.add(sample_transaction("Three", "Expense"));
        store.save(&second).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("Three,19.99,Expense,Misc,2025-11-10"));
    }

    #[test]
    fn test_append_keeps_lines_a_load_skipped() {
        let tmp = write_temp_ledger("Dinner, drinks,40,Expense,Fun,2025-11-09\nSalary,1500.00,Income,Job,2025-11-10");
        let store = FileStore::new(tmp.path());

        store.append(&[sample_transaction("Lunch", "Expense")]).unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Dinner, drinks,40,Expense,Fun,2025-11-09",
                "Salary,1500.00,Income,Job,2025-11-10",
                "Lunch,19.99,Expense,Misc,2025-11-10",
            ]
        );

        let mut ledger = Ledger::new();
        let report = store.load(&mut ledger).unwrap();
        assert_eq!(ledger.len(), 2);
        assert_eq!(report.skipped_count(), 1);
    }

    #[test]
    fn test_append_creates_missing_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("ledger.txt"));
        store.append(&[sample_transaction("Paycheck", "Income")]).unwrap();

        let mut ledger = Ledger::new();
        store.load(&mut ledger).unwrap();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_append_nothing_leaves_no_file() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("ledger.txt"));
        store.append(&[]).unwrap();
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing").join("ledger.txt"));
        let result = store.save(&Ledger::new());
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
