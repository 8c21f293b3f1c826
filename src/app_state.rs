//! Implements a struct that holds the state of the server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, stores::SqliteTransactionStore};

/// The state shared by the route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store for transactions, backed by the SQLite database.
    pub transaction_store: SqliteTransactionStore,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_connection: Connection) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            transaction_store: SqliteTransactionStore::new(connection),
        })
    }
}
