//! Moneywise is a web app for tracking personal finances.
//!
//! This library provides a JSON REST API and server-rendered HTML pages
//! backed by a SQLite store of transactions. Bank statements are imported
//! from CSV exports with heuristic column detection and duplicate filtering.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod api;
mod app_state;
mod budget_page;
mod csv_import;
mod db;
mod endpoints;
mod html;
mod import_page;
mod navigation;
mod not_found;
mod routing;
mod stores;
mod transaction;
mod transactions_page;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use routing::build_router;
pub use stores::SqliteTransactionStore;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The CSV headers did not contain a recognizable date column.
    ///
    /// This is a structural error: it aborts the whole import before any
    /// row is processed.
    #[error("Could not detect date column in CSV")]
    MissingDateColumn,

    /// The CSV headers contained neither a "money in" nor a "money out"
    /// column, so no amounts can be resolved.
    #[error("Could not detect amount columns in CSV")]
    MissingAmountColumns,

    /// The CSV data could not be read at all.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCsv(String),

    /// The multipart form did not contain a file.
    #[error("No file uploaded")]
    MissingFile,

    /// The uploaded file is not a CSV.
    #[error("Only CSV files are allowed")]
    NotCsv,

    /// The multipart form could not be read.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// A date-time could not be rendered into its storage format.
    #[error("could not format date-time: {0}")]
    DateTimeFormat(String),

    /// The requested resource could not be found.
    #[error("Transaction not found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::MissingDateColumn
            | Error::MissingAmountColumns
            | Error::InvalidCsv(_)
            | Error::MissingFile
            | Error::NotCsv
            | Error::MultipartError(_) => StatusCode::BAD_REQUEST,
            Error::DateTimeFormat(_) | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal details are not intended to be shown to the client.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {self}");
            return (
                status,
                Json(json!({ "success": false, "error": "Internal server error" })),
            )
                .into_response();
        }

        (
            status,
            Json(json!({ "success": false, "error": self.to_string() })),
        )
            .into_response()
    }
}
