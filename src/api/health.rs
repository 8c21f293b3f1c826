//! The health check endpoint.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde_json::json;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Route handler for the health check.
pub(crate) async fn get_health() -> Response {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(json!({
        "status": "ok",
        "message": "Moneywise API is running",
        "timestamp": timestamp,
    }))
    .into_response()
}

#[cfg(test)]
mod health_tests {
    use axum::http::StatusCode;

    use crate::test_utils::parse_json_body;

    use super::get_health;

    #[tokio::test]
    async fn reports_ok_with_timestamp() {
        let response = get_health().await;

        assert_eq!(response.status(), StatusCode::OK);

        let body = parse_json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    }
}
