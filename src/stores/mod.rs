//! Transaction persistence: the store trait and its SQLite implementation.

mod sqlite;
mod transaction;

pub use sqlite::SqliteTransactionStore;
pub(crate) use sqlite::create_transaction_table;
pub(crate) use transaction::{
    CategoryTotals, MonthTotals, OverallTotals, TransactionStore, TransactionUpdate,
};
