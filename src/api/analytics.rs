//! Simple aggregation endpoints: the overall summary and per-category
//! totals.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::AppState;

/// One month's entry in the summary breakdown.
#[derive(Debug, Serialize)]
struct MonthBreakdown {
    month: String,
    income: f64,
    spending: f64,
    net: f64,
}

/// Route handler for the overall financial summary.
///
/// Returns total income, total spending, net balance, and a per-month
/// breakdown, newest month first.
pub(crate) async fn get_summary_analytics(State(state): State<AppState>) -> Response {
    let store = state.transaction_store;

    let totals = match store.overall_totals() {
        Ok(totals) => totals,
        Err(error) => return error.into_response(),
    };

    let monthly = match store.monthly_totals() {
        Ok(monthly) => monthly,
        Err(error) => return error.into_response(),
    };

    let monthly: Vec<MonthBreakdown> = monthly
        .into_iter()
        .map(|month| MonthBreakdown {
            net: month.income - month.spending,
            month: month.month,
            income: month.income,
            spending: month.spending,
        })
        .collect();

    Json(json!({
        "success": true,
        "data": {
            "totalIncome": totals.income,
            "totalSpending": totals.spending,
            "net": totals.income - totals.spending,
            "monthly": monthly,
        }
    }))
    .into_response()
}

/// Route handler for the spending breakdown by category.
///
/// Uncategorized transactions are excluded.
pub(crate) async fn get_category_analytics(State(state): State<AppState>) -> Response {
    match state.transaction_store.category_totals() {
        Ok(categories) => {
            Json(json!({ "success": true, "data": categories })).into_response()
        }
        Err(error) => error.into_response(),
    }
}
