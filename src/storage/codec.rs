use std::io::{Read, Write};
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{ParseError, StoreError};
use crate::ledger::Ledger;
use crate::models::transaction::Transaction;

pub const DELIMITER: u8 = b',';
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const FIELD_COUNT: usize = 5;

#[cfg(windows)]
const LINE_TERMINATOR: csv::Terminator = csv::Terminator::CRLF;
#[cfg(not(windows))]
const LINE_TERMINATOR: csv::Terminator = csv::Terminator::Any(b'\n');

#[cfg(windows)]
pub const LINE_BREAK: &[u8] = b"\r\n";
#[cfg(not(windows))]
pub const LINE_BREAK: &[u8] = b"\n";

/// A line that could not be turned into a transaction during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub line: u64,
    pub content: String,
    pub error: ParseError,
}

/// Outcome of a bulk load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedLine>,
    /// The source did not exist, so there was nothing to load.
    pub source_missing: bool,
}

impl LoadReport {
    pub fn missing() -> Self {
        Self {
            source_missing: true,
            ..Self::default()
        }
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Writes every transaction as `description,amount,kind,category,date`.
///
/// Fields are written verbatim. A description or category holding a comma or
/// a line break will not read back as the same record; such fields are
/// logged as warnings but still written.
pub fn save_all<W: Write>(ledger: &Ledger, writer: W) -> Result<(), StoreError> {
    write_transactions(ledger.transactions(), writer)?;
    tracing::debug!(records = ledger.len(), "ledger serialized");
    Ok(())
}

/// Writes `transactions` in the persisted line format, one per line.
pub fn write_transactions<W: Write>(transactions: &[Transaction], writer: W) -> Result<(), StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(LINE_TERMINATOR)
        .from_writer(writer);

    for (index, transaction) in transactions.iter().enumerate() {
        warn_on_unsafe_field(index, "description", transaction.description());
        warn_on_unsafe_field(index, "category", transaction.category());

        let amount = transaction.amount().to_string();
        let date = transaction.date().format(DATE_FORMAT).to_string();
        writer.write_record([
            transaction.description(),
            amount.as_str(),
            transaction.kind().as_str(),
            transaction.category(),
            date.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn warn_on_unsafe_field(index: usize, field: &str, value: &str) {
    if value.bytes().any(|b| b == DELIMITER || b == b'\n' || b == b'\r') {
        tracing::warn!(
            record = index + 1,
            field,
            value,
            "field contains a delimiter or line break and will not load back intact"
        );
    }
}

/// Reads transactions line by line and appends them to `ledger`.
///
/// Malformed lines are skipped and listed in the returned report. Only a
/// failure of the underlying reader aborts the load, in which case nothing
/// is appended.
pub fn load_all<R: Read>(ledger: &mut Ledger, reader: R) -> Result<LoadReport, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(DELIMITER)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let mut report = LoadReport::default();
    let mut parsed = Vec::new();

    for (index, result) in reader.byte_records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map(|position| position.line())
            .unwrap_or(index as u64 + 1);

        match parse_record(&record) {
            Ok(transaction) => parsed.push(transaction),
            Err(error) => {
                let content = record
                    .iter()
                    .map(String::from_utf8_lossy)
                    .collect::<Vec<_>>()
                    .join(",");
                tracing::debug!(line, %error, "skipping malformed ledger line");
                report.skipped.push(SkippedLine { line, content, error });
            }
        }
    }

    report.loaded = parsed.len();
    ledger.extend(parsed);

    tracing::info!(
        loaded = report.loaded,
        skipped = report.skipped_count(),
        "ledger loaded"
    );
    Ok(report)
}

fn parse_record(record: &csv::ByteRecord) -> Result<Transaction, ParseError> {
    if record.len() != FIELD_COUNT {
        return Err(ParseError::FieldCount {
            expected: FIELD_COUNT,
            found: record.len(),
        });
    }

    let mut fields = Vec::with_capacity(FIELD_COUNT);
    for field in record.iter() {
        let text = std::str::from_utf8(field)
            .map_err(|e| ParseError::Malformed(format!("invalid UTF-8: {}", e)))?;
        fields.push(text);
    }

    parse_fields(&fields)
}

/// Builds a transaction from the five persisted fields. Free-text fields are
/// kept verbatim; amount, kind and date tolerate surrounding whitespace.
pub fn parse_fields(fields: &[&str]) -> Result<Transaction, ParseError> {
    let [description, amount, kind, category, date] = fields else {
        return Err(ParseError::FieldCount {
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    };

    let amount = Decimal::from_str(amount.trim())
        .map_err(|_| ParseError::InvalidAmount(amount.to_string()))?;
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(date.to_string()))?;

    Ok(Transaction::create(
        *description,
        amount,
        kind.trim(),
        *category,
        date,
    )?)
}
