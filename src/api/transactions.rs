//! JSON CRUD endpoints for transactions.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use time::{
    PrimitiveDateTime, Time, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{
    AppState,
    api::error_response,
    csv_import::parse_date,
    stores::{TransactionStore, TransactionUpdate},
    transaction::{Transaction, TransactionId},
};

/// The date-time formats accepted in request bodies. A bare calendar date is
/// also accepted and taken as midnight.
const DATE_TIME_INPUTS: &[&[BorrowedFormatItem]] = &[
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
];

/// The request body for creating or updating a transaction.
///
/// All fields are optional so the same shape serves partial updates; the
/// create endpoint enforces that date and amount are present.
#[derive(Debug, Deserialize)]
pub(crate) struct TransactionData {
    date: Option<String>,
    description: Option<String>,
    amount: Option<f64>,
    balance: Option<f64>,
    category: Option<String>,
}

fn parse_date_time(raw: &str) -> Option<PrimitiveDateTime> {
    let trimmed = raw.trim();

    DATE_TIME_INPUTS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(trimmed, format).ok())
        .or_else(|| parse_date(trimmed).map(|date| PrimitiveDateTime::new(date, Time::MIDNIGHT)))
}

/// Route handler for creating a transaction directly, without an import.
pub(crate) async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Json(data): Json<TransactionData>,
) -> Response {
    let (Some(raw_date), Some(amount)) = (data.date, data.amount) else {
        return error_response(StatusCode::BAD_REQUEST, "Date and amount are required");
    };

    let Some(date) = parse_date_time(&raw_date) else {
        return error_response(StatusCode::BAD_REQUEST, "Could not parse date");
    };

    let builder = Transaction::build(amount, date, &data.description.unwrap_or_default())
        .balance(data.balance)
        .category(data.category);

    let mut store = state.transaction_store;
    match store.create(builder) {
        Ok(transaction) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "data": transaction })),
        )
            .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Route handler for listing all transactions, newest first.
pub(crate) async fn list_transactions_endpoint(State(state): State<AppState>) -> Response {
    match state.transaction_store.get_all() {
        Ok(transactions) => Json(json!({
            "success": true,
            "count": transactions.len(),
            "data": transactions,
        }))
        .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Route handler for getting a single transaction by its ID.
pub(crate) async fn get_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    match state.transaction_store.get(transaction_id) {
        Ok(transaction) => {
            Json(json!({ "success": true, "data": transaction })).into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// Route handler for partially updating a transaction.
///
/// Only the fields present in the request body are changed. This is the
/// endpoint behind the category-edit workflow on the transactions page.
pub(crate) async fn update_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
    Json(data): Json<TransactionData>,
) -> Response {
    let date = match data.date {
        Some(raw_date) => match parse_date_time(&raw_date) {
            Some(date) => Some(date),
            None => return error_response(StatusCode::BAD_REQUEST, "Could not parse date"),
        },
        None => None,
    };

    let update = TransactionUpdate {
        date,
        description: data.description,
        amount: data.amount,
        balance: data.balance,
        category: data.category,
    };

    let mut store = state.transaction_store;
    match store.update(transaction_id, update) {
        Ok(transaction) => {
            Json(json!({ "success": true, "data": transaction })).into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// Route handler for deleting a transaction.
pub(crate) async fn delete_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let mut store = state.transaction_store;
    match store.delete(transaction_id) {
        Ok(()) => Json(json!({
            "success": true,
            "message": "Transaction deleted successfully",
        }))
        .into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod transaction_endpoint_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, build_router, endpoints, endpoints::format_endpoint};

    fn new_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(db_connection).expect("Could not initialize database.");

        TestServer::try_new(build_router(state, "static")).expect("Could not create test server.")
    }

    async fn create_transaction(server: &TestServer, body: Value) -> Value {
        let response = server.post(endpoints::TRANSACTIONS_API).json(&body).await;

        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()
    }

    #[tokio::test]
    async fn create_returns_created_transaction() {
        let server = new_test_server();

        let body = create_transaction(
            &server,
            json!({
                "date": "2025-01-15",
                "description": "SALARY ACME LTD",
                "amount": 1200.50,
                "category": "Income",
            }),
        )
        .await;

        assert_eq!(body["success"], json!(true));
        let data = &body["data"];
        assert_eq!(data["description"], "SALARY ACME LTD");
        assert_eq!(data["amount"], 1200.50);
        assert_eq!(data["date"], "2025-01-15 00:00:00");
        assert_eq!(data["category"], "Income");
        assert_eq!(data["balance"], Value::Null);
        assert!(data["id"].as_i64().is_some_and(|id| id > 0));
    }

    #[tokio::test]
    async fn create_requires_date_and_amount() {
        let server = new_test_server();

        let cases = [
            json!({ "description": "NO DATE", "amount": 1.0 }),
            json!({ "date": "2025-01-15", "description": "NO AMOUNT" }),
        ];

        for body in cases {
            let response = server.post(endpoints::TRANSACTIONS_API).json(&body).await;

            response.assert_status_bad_request();
            let body = response.json::<Value>();
            assert_eq!(body["success"], json!(false));
            assert_eq!(body["error"], "Date and amount are required");
        }
    }

    #[tokio::test]
    async fn create_rejects_unparseable_date() {
        let server = new_test_server();

        let response = server
            .post(endpoints::TRANSACTIONS_API)
            .json(&json!({ "date": "not-a-date", "amount": 1.0 }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn list_returns_transactions_newest_first() {
        let server = new_test_server();

        for (date, description) in [
            ("2025-01-15", "OLDEST"),
            ("2025-03-01", "NEWEST"),
            ("2025-02-10", "MIDDLE"),
        ] {
            create_transaction(
                &server,
                json!({ "date": date, "description": description, "amount": -1.0 }),
            )
            .await;
        }

        let response = server.get(endpoints::TRANSACTIONS_API).await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["count"], 3);

        let descriptions: Vec<&str> = body["data"]
            .as_array()
            .expect("data should be an array")
            .iter()
            .map(|transaction| transaction["description"].as_str().unwrap_or_default())
            .collect();
        assert_eq!(descriptions, vec!["NEWEST", "MIDDLE", "OLDEST"]);
    }

    #[tokio::test]
    async fn get_returns_single_transaction() {
        let server = new_test_server();
        let created = create_transaction(
            &server,
            json!({ "date": "2025-01-15 12:30:00", "description": "LUNCH", "amount": -12.0 }),
        )
        .await;
        let id = created["data"]["id"].as_i64().expect("id missing");

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"], created["data"]);
    }

    #[tokio::test]
    async fn get_missing_transaction_is_not_found() {
        let server = new_test_server();

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, 999))
            .await;

        response.assert_status_not_found();
        let body = response.json::<Value>();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], "Transaction not found");
    }

    #[tokio::test]
    async fn update_changes_only_provided_fields() {
        let server = new_test_server();
        let created = create_transaction(
            &server,
            json!({ "date": "2025-01-15", "description": "GROCER", "amount": -45.0 }),
        )
        .await;
        let id = created["data"]["id"].as_i64().expect("id missing");

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, id))
            .json(&json!({ "category": "Groceries" }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"]["category"], "Groceries");
        assert_eq!(body["data"]["description"], "GROCER");
        assert_eq!(body["data"]["amount"], -45.0);
    }

    #[tokio::test]
    async fn update_missing_transaction_is_not_found() {
        let server = new_test_server();

        let response = server
            .put(&format_endpoint(endpoints::TRANSACTION, 999))
            .json(&json!({ "category": "Groceries" }))
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_removes_transaction() {
        let server = new_test_server();
        let created = create_transaction(
            &server,
            json!({ "date": "2025-01-15", "description": "GROCER", "amount": -45.0 }),
        )
        .await;
        let id = created["data"]["id"].as_i64().expect("id missing");

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, id))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["message"], "Transaction deleted successfully");

        server
            .get(&format_endpoint(endpoints::TRANSACTION, id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let server = new_test_server();

        let response = server
            .delete(&format_endpoint(endpoints::TRANSACTION, 999))
            .await;

        response.assert_status_not_found();
    }
}
