//! The CSV upload entrypoint.
//!
//! Deliberately thin: it hands the uploaded bytes to the importer and
//! serializes the resulting report. The upload is buffered in memory, so
//! there is no temporary file to clean up.

use axum::{
    Json,
    extract::{Multipart, State, multipart::Field},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, Error, csv_import::import_transactions};

/// Route handler for uploading a CSV bank statement.
///
/// Accepts a single file per request. Structural failures (no file,
/// undetectable columns) abort before any row is processed and produce an
/// error payload; once row processing begins the response is always a
/// success, with per-row problems reduced to the skipped counter.
pub(crate) async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Response {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => return Error::MissingFile.into_response(),
        Err(error) => return Error::MultipartError(error.to_string()).into_response(),
    };

    let csv_data = match read_csv_field(field).await {
        Ok(data) => data,
        Err(error) => return error.into_response(),
    };

    let mut store = state.transaction_store;
    match import_transactions(&csv_data, &mut store) {
        Ok(report) => {
            let message = format!(
                "Imported {} transactions. Skipped {} duplicates or invalid rows.",
                report.imported, report.skipped
            );

            Json(json!({ "success": true, "message": message, "data": report })).into_response()
        }
        Err(error) => error.into_response(),
    }
}

async fn read_csv_field(field: Field<'_>) -> Result<String, Error> {
    let is_csv = field.content_type() == Some("text/csv")
        || field
            .file_name()
            .is_some_and(|name| name.to_lowercase().ends_with(".csv"));

    if !is_csv {
        return Err(Error::NotCsv);
    }

    let file_name = field.file_name().unwrap_or("upload.csv").to_owned();

    let data = field.text().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("Could not read data from multipart form field.".to_owned())
    })?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    Ok(data)
}
