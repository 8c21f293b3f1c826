//! Defines the transaction store trait and the query result types.

use serde::Serialize;
use time::PrimitiveDateTime;

use crate::{
    Error,
    transaction::{Transaction, TransactionBuilder},
};

/// Handles the persistence of transactions.
///
/// This is the narrow contract the importer sees: a natural-key lookup for
/// duplicate detection and a way to create new rows. Each call is
/// independently atomic; no transaction wrapping across calls is guaranteed.
pub(crate) trait TransactionStore {
    /// Find a transaction whose date, description and amount all match
    /// exactly, if one exists.
    fn find_by_natural_key(
        &self,
        date: PrimitiveDateTime,
        description: &str,
        amount: f64,
    ) -> Result<Option<Transaction>, Error>;

    /// Create a new transaction in the store.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;
}

/// A partial update to an existing transaction.
///
/// Fields left as `None` are not modified.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct TransactionUpdate {
    /// Replace the transaction date.
    pub(crate) date: Option<PrimitiveDateTime>,
    /// Replace the description.
    pub(crate) description: Option<String>,
    /// Replace the signed amount.
    pub(crate) amount: Option<f64>,
    /// Replace the running balance.
    pub(crate) balance: Option<f64>,
    /// Replace the category label.
    pub(crate) category: Option<String>,
}

/// Income and spending summed over all transactions.
///
/// Both fields are non-negative; spending is the absolute sum of the
/// negative amounts.
#[derive(Debug, PartialEq)]
pub(crate) struct OverallTotals {
    /// Sum of all positive amounts.
    pub(crate) income: f64,
    /// Absolute sum of all negative amounts.
    pub(crate) spending: f64,
}

/// Income and spending for a single calendar month.
#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct MonthTotals {
    /// The month in `YYYY-MM` form.
    pub(crate) month: String,
    /// Sum of the month's positive amounts.
    pub(crate) income: f64,
    /// Absolute sum of the month's negative amounts.
    pub(crate) spending: f64,
}

/// The total amount and transaction count for one category label.
#[derive(Debug, PartialEq, Serialize)]
pub(crate) struct CategoryTotals {
    /// The category label.
    pub(crate) category: String,
    /// Signed sum of the category's amounts.
    pub(crate) total: f64,
    /// Number of transactions with this category.
    pub(crate) count: i64,
}
