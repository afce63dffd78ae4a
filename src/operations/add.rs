use crate::errors::ParseError;
use crate::ledger::Ledger;
use crate::models::transaction::Transaction;
use crate::storage::codec::parse_fields;

/// Field order the shell prompts for.
pub const INPUT_FORMAT: &str = "date(YYYY-MM-DD), description, amount, kind(Income/Expense), category";

/// Parses `date, description, amount, kind, category` as typed at the prompt.
pub fn create_transaction(input: &str) -> Result<Transaction, ParseError> {
    let parts: Vec<&str> = input.trim().split(',').map(|s| s.trim()).collect();
    let [date, description, amount, kind, category] = parts.as_slice() else {
        return Err(ParseError::FieldCount {
            expected: 5,
            found: parts.len(),
        });
    };
    parse_fields(&[*description, *amount, *kind, *category, *date])
}

/// Parses `input` into the ledger and hands back a copy of the new record.
pub fn add_transaction(ledger: &mut Ledger, input: &str) -> Result<Transaction, ParseError> {
    let transaction = create_transaction(input)?;
    tracing::debug!(
        kind = %transaction.kind(),
        category = transaction.category(),
        "transaction added"
    );
    ledger.add(transaction.clone());
    Ok(transaction)
}
