/*! Database initialization for the application's SQLite store. */

use rusqlite::Connection;

use crate::{Error, stores::create_transaction_table};

/// Create the application tables if they do not already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub(crate) fn initialize(connection: &Connection) -> Result<(), Error> {
    create_transaction_table(connection)?;

    Ok(())
}
