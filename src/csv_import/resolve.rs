//! Resolves raw CSV rows into transaction-shaped records.

use csv::StringRecord;
use time::{PrimitiveDateTime, Time};

use crate::{
    csv_import::{ColumnMap, parse_amount, parse_date},
    transaction::{Transaction, TransactionBuilder},
};

/// Why a row was skipped.
///
/// Skip reasons are logged for diagnostics only; the import report conflates
/// them all into a single counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SkipReason {
    /// The date cell was missing or empty.
    MissingDate,
    /// The date cell could not be parsed as a calendar date.
    InvalidDate,
    /// Neither money column held a usable amount.
    MissingAmount,
}

/// The outcome of resolving a single raw row.
#[derive(Debug, PartialEq)]
pub(crate) enum RowOutcome {
    /// The row resolved to a transaction-shaped record, pending a duplicate
    /// check.
    Resolved(TransactionBuilder),
    /// The row was rejected.
    Skipped(SkipReason),
}

/// Derive a transaction-shaped record from a raw CSV row.
///
/// An amount can only be resolved when both money columns are mapped. A
/// strictly positive "money in" cell wins over "money out" so that rows
/// which populate both columns are not double counted. "Money out" values
/// are kept as-is: the source data already encodes outflows as negative
/// amounts, so no sign flip is applied.
pub(crate) fn resolve_row(record: &StringRecord, columns: &ColumnMap) -> RowOutcome {
    let date_cell = columns
        .date
        .and_then(|index| record.get(index))
        .unwrap_or_default();

    if date_cell.trim().is_empty() {
        return RowOutcome::Skipped(SkipReason::MissingDate);
    }

    let date = match parse_date(date_cell) {
        Some(date) => date,
        None => return RowOutcome::Skipped(SkipReason::InvalidDate),
    };

    let amount = match (columns.money_in, columns.money_out) {
        (Some(money_in_column), Some(money_out_column)) => {
            let money_in = record.get(money_in_column).and_then(parse_amount);
            let money_out = record.get(money_out_column).and_then(parse_amount);

            match (money_in, money_out) {
                (Some(money_in), _) if money_in > 0.0 => Some(money_in),
                (_, Some(money_out)) if money_out != 0.0 => Some(money_out),
                _ => None,
            }
        }
        _ => None,
    };

    let amount = match amount {
        Some(amount) => amount,
        None => return RowOutcome::Skipped(SkipReason::MissingAmount),
    };

    let description = columns
        .description
        .and_then(|index| record.get(index))
        .unwrap_or_default();
    let balance = columns
        .balance
        .and_then(|index| record.get(index))
        .and_then(parse_amount);
    let category = columns
        .category
        .and_then(|index| record.get(index))
        .map(str::to_owned);

    let builder = Transaction::build(
        amount,
        PrimitiveDateTime::new(date, Time::MIDNIGHT),
        description,
    )
    .balance(balance)
    .category(category);

    RowOutcome::Resolved(builder)
}
