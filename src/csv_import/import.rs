//! The dedup-and-commit engine and the import report.

use csv::ReaderBuilder;
use serde::Serialize;

use crate::{
    Error,
    csv_import::{ColumnMap, RowOutcome, detect_columns, resolve_row},
    stores::TransactionStore,
};

/// The counts accumulated over one import run.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub(crate) struct ImportReport {
    /// Rows committed to the store.
    pub(crate) imported: usize,
    /// Rows rejected as invalid or duplicate. The report does not separate
    /// the two; skip reasons are only visible in the logs.
    pub(crate) skipped: usize,
    /// Raw rows read from the CSV body, header excluded.
    pub(crate) total: usize,
}

/// Import transactions from CSV `text` into `store`.
///
/// The CSV is buffered into memory and rows are processed sequentially in
/// file order, so the duplicate check observes rows committed earlier in the
/// same import. A row that fails to resolve or commit is counted as skipped
/// and never aborts the batch; partial success is the expected outcome.
///
/// # Errors
/// Returns an error only for structural problems found before any row is
/// processed:
/// - [Error::InvalidCsv] if the header row cannot be read,
/// - [Error::MissingDateColumn] if no date header is recognized,
/// - [Error::MissingAmountColumns] if neither money column is present.
pub(crate) fn import_transactions<S: TransactionStore>(
    text: &str,
    store: &mut S,
) -> Result<ImportReport, Error> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|error| Error::InvalidCsv(error.to_string()))?
        .clone();
    let columns = detect_columns(&headers);
    validate_columns(&columns)?;

    let rows: Vec<_> = reader.records().collect();
    let mut report = ImportReport::default();

    for (index, record) in rows.into_iter().enumerate() {
        // Header is line 1, so the first data row is line 2.
        let line_number = index + 2;
        report.total += 1;

        let record = match record {
            Ok(record) => record,
            Err(error) => {
                tracing::debug!("Skipping unreadable row on line {line_number}: {error}");
                report.skipped += 1;
                continue;
            }
        };

        let builder = match resolve_row(&record, &columns) {
            RowOutcome::Resolved(builder) => builder,
            RowOutcome::Skipped(reason) => {
                tracing::debug!("Skipping row on line {line_number}: {reason:?}");
                report.skipped += 1;
                continue;
            }
        };

        match store.find_by_natural_key(builder.date, &builder.description, builder.amount) {
            Ok(Some(_)) => {
                tracing::debug!("Skipping duplicate row on line {line_number}");
                report.skipped += 1;
            }
            Ok(None) => match store.create(builder) {
                Ok(_) => report.imported += 1,
                Err(error) => {
                    tracing::error!(
                        "Store error creating transaction for line {line_number}, skipping: {error}"
                    );
                    report.skipped += 1;
                }
            },
            Err(error) => {
                tracing::error!(
                    "Store error checking for duplicate of line {line_number}, skipping: {error}"
                );
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

fn validate_columns(columns: &ColumnMap) -> Result<(), Error> {
    if columns.date.is_none() {
        return Err(Error::MissingDateColumn);
    }

    if columns.money_in.is_none() && columns.money_out.is_none() {
        return Err(Error::MissingAmountColumns);
    }

    Ok(())
}
