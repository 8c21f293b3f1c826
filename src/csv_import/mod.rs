//! The CSV bank-statement importer.
//!
//! The pipeline has four stages: classify the header row into semantic
//! columns, normalize raw cell text into dates and amounts, resolve each row
//! into a transaction-shaped record (or skip it), and commit records that do
//! not duplicate an existing transaction. The caller gets back a report of
//! how many rows were imported and skipped.

mod columns;
mod import;
mod normalize;
mod resolve;

pub(crate) use columns::{ColumnMap, detect_columns};
pub(crate) use import::import_transactions;
pub(crate) use normalize::{parse_amount, parse_date};
pub(crate) use resolve::{RowOutcome, resolve_row};
