//! Defines the core transaction model.

use serde::{Deserialize, Serialize};
use time::PrimitiveDateTime;

/// The integer type used for store-assigned transaction IDs.
pub(crate) type TransactionId = i64;

time::serde::format_description!(
    serde_date_time,
    PrimitiveDateTime,
    "[year]-[month]-[day] [hour]:[minute]:[second]"
);

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Transaction {
    /// The ID of the transaction.
    pub(crate) id: TransactionId,
    /// When the transaction happened.
    #[serde(with = "serde_date_time")]
    pub(crate) date: PrimitiveDateTime,
    /// A text description of what the transaction was for, may be empty.
    pub(crate) description: String,
    /// The amount of money involved. Positive amounts are income, negative
    /// amounts are spending.
    pub(crate) amount: f64,
    /// The running account balance after this transaction, if the source
    /// statement provided one.
    pub(crate) balance: Option<f64>,
    /// A free-form category label, editable after import.
    pub(crate) category: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub(crate) fn build(
        amount: f64,
        date: PrimitiveDateTime,
        description: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            date,
            description: description.to_owned(),
            amount,
            balance: None,
            category: None,
        }
    }
}

/// The fields of a [Transaction] before the store has assigned it an ID.
#[derive(Debug, PartialEq, Clone)]
pub(crate) struct TransactionBuilder {
    /// When the transaction happened.
    pub(crate) date: PrimitiveDateTime,
    /// A text description of what the transaction was for, may be empty.
    pub(crate) description: String,
    /// The amount of money involved, signed.
    pub(crate) amount: f64,
    /// The running account balance, if known.
    pub(crate) balance: Option<f64>,
    /// A free-form category label.
    pub(crate) category: Option<String>,
}

impl TransactionBuilder {
    /// Set the running account balance for the transaction.
    pub(crate) fn balance(mut self, balance: Option<f64>) -> Self {
        self.balance = balance;
        self
    }

    /// Set the category label for the transaction.
    pub(crate) fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Create the final transaction with the store-assigned `id`.
    pub(crate) fn finalise(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            date: self.date,
            description: self.description,
            amount: self.amount,
            balance: self.balance,
            category: self.category,
        }
    }
}
