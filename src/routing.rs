//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    api::{
        create_transaction_endpoint, delete_transaction_endpoint, get_category_analytics,
        get_health, get_summary_analytics, get_transaction_endpoint, list_transactions_endpoint,
        update_transaction_endpoint, upload_csv,
    },
    budget_page::get_budget_page,
    endpoints,
    import_page::get_import_page,
    not_found::get_404_not_found,
    transactions_page::get_transactions_page,
};

/// Return a router with all the app's routes.
///
/// `static_dir` is the directory that static assets (CSS, JavaScript) are
/// served from.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route(
            endpoints::ROOT,
            get(|| async { Redirect::to(endpoints::TRANSACTIONS_VIEW) }),
        )
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::IMPORT_VIEW, get(get_import_page))
        .route(endpoints::BUDGET_VIEW, get(get_budget_page))
        .route(endpoints::HEALTH, get(get_health))
        .route(
            endpoints::TRANSACTIONS_API,
            get(list_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route(endpoints::UPLOAD, post(upload_csv))
        .route(endpoints::ANALYTICS_SUMMARY, get(get_summary_analytics))
        .route(
            endpoints::ANALYTICS_CATEGORIES,
            get(get_category_analytics),
        )
        .nest_service(endpoints::STATIC, ServeDir::new(static_dir))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[cfg(test)]
mod build_router_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{AppState, endpoints};

    use super::build_router;

    fn new_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(db_connection).expect("Could not initialize database.");

        TestServer::try_new(build_router(state, "static")).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn root_redirects_to_transactions_page() {
        let server = new_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_see_other();
        assert_eq!(
            response.header("location"),
            endpoints::TRANSACTIONS_VIEW
        );
    }

    #[tokio::test]
    async fn health_check_is_routed() {
        let server = new_test_server();

        let response = server.get(endpoints::HEALTH).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }

    #[tokio::test]
    async fn unknown_routes_render_the_not_found_page() {
        let server = new_test_server();

        let response = server.get("/no/such/page").await;

        response.assert_status_not_found();
        assert!(response.text().contains("404"));
    }
}
