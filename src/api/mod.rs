//! The JSON REST API: transaction CRUD, CSV upload, analytics and the
//! health check.

mod analytics;
mod health;
mod transactions;
mod upload;

pub(crate) use analytics::{get_category_analytics, get_summary_analytics};
pub(crate) use health::get_health;
pub(crate) use transactions::{
    create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
    list_transactions_endpoint, update_transaction_endpoint,
};
pub(crate) use upload::upload_csv;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Render an API error as the standard `{ success: false, error }` payload.
pub(crate) fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}
