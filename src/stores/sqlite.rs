//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, Row, params_from_iter, types::Value};
use time::{
    PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{
    Error,
    stores::transaction::{
        CategoryTotals, MonthTotals, OverallTotals, TransactionStore, TransactionUpdate,
    },
    transaction::{Transaction, TransactionBuilder, TransactionId},
};

/// The format used to store transaction date-times as TEXT.
///
/// Fixed-width so that lexicographic ordering matches chronological
/// ordering, and SQLite's date functions accept it.
const DATE_TIME_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub(crate) fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    /// Retrieve a transaction from the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub(crate) fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, date, description, amount, balance, category \
                 FROM \"transaction\" WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    /// Retrieve all transactions, newest first.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    pub(crate) fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, date, description, amount, balance, category \
                 FROM \"transaction\" ORDER BY date DESC, id DESC",
            )?
            .query_map([], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Apply a partial update to the transaction with `id` and return the
    /// updated row.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub(crate) fn update(
        &mut self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> Result<Transaction, Error> {
        let mut set_clauses = Vec::new();
        let mut params: Vec<Value> = Vec::new();

        if let Some(date) = update.date {
            params.push(Value::Text(encode_date_time(date)?));
            set_clauses.push(format!("date = ?{}", params.len()));
        }
        if let Some(description) = update.description {
            params.push(Value::Text(description));
            set_clauses.push(format!("description = ?{}", params.len()));
        }
        if let Some(amount) = update.amount {
            params.push(Value::Real(amount));
            set_clauses.push(format!("amount = ?{}", params.len()));
        }
        if let Some(balance) = update.balance {
            params.push(Value::Real(balance));
            set_clauses.push(format!("balance = ?{}", params.len()));
        }
        if let Some(category) = update.category {
            params.push(Value::Text(category));
            set_clauses.push(format!("category = ?{}", params.len()));
        }

        if set_clauses.is_empty() {
            return self.get(id);
        }

        params.push(Value::Integer(id));
        let query = format!(
            "UPDATE \"transaction\" SET {} WHERE id = ?{}",
            set_clauses.join(", "),
            params.len()
        );

        let rows_updated = self
            .connection
            .lock()
            .unwrap()
            .execute(&query, params_from_iter(params.iter()))?;

        if rows_updated == 0 {
            return Err(Error::NotFound);
        }

        self.get(id)
    }

    /// Delete the transaction with `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub(crate) fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        let rows_deleted = self
            .connection
            .lock()
            .unwrap()
            .execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Get the total number of transactions in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is some SQL error.
    pub(crate) fn count(&self) -> Result<u32, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
                row.get(0)
            })
            .map_err(|error| error.into())
    }

    /// Sum income and spending over all transactions.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is some SQL error.
    pub(crate) fn overall_totals(&self) -> Result<OverallTotals, Error> {
        self.connection
            .lock()
            .unwrap()
            .query_row(
                "SELECT COALESCE(SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END), 0.0),
                        COALESCE(SUM(CASE WHEN amount < 0 THEN -amount ELSE 0 END), 0.0)
                 FROM \"transaction\"",
                [],
                |row| {
                    Ok(OverallTotals {
                        income: row.get(0)?,
                        spending: row.get(1)?,
                    })
                },
            )
            .map_err(|error| error.into())
    }

    /// Sum income and spending per calendar month, newest month first.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is some SQL error.
    pub(crate) fn monthly_totals(&self) -> Result<Vec<MonthTotals>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT strftime('%Y-%m', date) AS month,
                        COALESCE(SUM(CASE WHEN amount > 0 THEN amount ELSE 0 END), 0.0),
                        COALESCE(SUM(CASE WHEN amount < 0 THEN -amount ELSE 0 END), 0.0)
                 FROM \"transaction\"
                 GROUP BY month
                 ORDER BY month DESC",
            )?
            .query_map([], |row| {
                Ok(MonthTotals {
                    month: row.get(0)?,
                    income: row.get(1)?,
                    spending: row.get(2)?,
                })
            })?
            .map(|maybe_month| maybe_month.map_err(Error::SqlError))
            .collect()
    }

    /// Sum amounts and count rows per category label.
    ///
    /// Uncategorized transactions are excluded.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is some SQL error.
    pub(crate) fn category_totals(&self) -> Result<Vec<CategoryTotals>, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT category, SUM(amount), COUNT(id)
                 FROM \"transaction\"
                 WHERE category IS NOT NULL
                 GROUP BY category
                 ORDER BY category ASC",
            )?
            .query_map([], |row| {
                Ok(CategoryTotals {
                    category: row.get(0)?,
                    total: row.get(1)?,
                    count: row.get(2)?,
                })
            })?
            .map(|maybe_category| maybe_category.map_err(Error::SqlError))
            .collect()
    }
}

impl TransactionStore for SqliteTransactionStore {
    /// Find a transaction that matches the natural key exactly.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is some SQL error.
    fn find_by_natural_key(
        &self,
        date: PrimitiveDateTime,
        description: &str,
        amount: f64,
    ) -> Result<Option<Transaction>, Error> {
        let transaction = self
            .connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, date, description, amount, balance, category \
                 FROM \"transaction\" \
                 WHERE date = ?1 AND description = ?2 AND amount = ?3 \
                 LIMIT 1",
            )?
            .query_row(
                (encode_date_time(date)?, description, amount),
                map_transaction_row,
            )
            .optional()?;

        Ok(transaction)
    }

    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is some SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO \"transaction\" (date, description, amount, balance, category)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                encode_date_time(builder.date)?,
                &builder.description,
                builder.amount,
                builder.balance,
                &builder.category,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(builder.finalise(id))
    }
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub(crate) fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                balance REAL,
                category TEXT
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transaction', 0)",
        (),
    )?;

    // Composite index used by the import-time duplicate check; its date
    // prefix also serves the date-ordered listing.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_natural_key \
         ON \"transaction\"(date, description, amount);",
        (),
    )?;

    Ok(())
}

fn encode_date_time(date: PrimitiveDateTime) -> Result<String, Error> {
    date.format(&DATE_TIME_FORMAT)
        .map_err(|error| Error::DateTimeFormat(error.to_string()))
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date_text: String = row.get(1)?;
    let date = PrimitiveDateTime::parse(&date_text, &DATE_TIME_FORMAT).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(error))
    })?;
    let description = row.get(2)?;
    let amount = row.get(3)?;
    let balance = row.get(4)?;
    let category = row.get(5)?;

    Ok(Transaction {
        id,
        date,
        description,
        amount,
        balance,
        category,
    })
}
