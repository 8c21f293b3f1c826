//! The budget overview page: overall totals, a monthly breakdown and
//! per-category totals.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    AppState, endpoints,
    html::{base, format_currency, render_error_page},
    navigation::NavBar,
    stores::{CategoryTotals, MonthTotals, OverallTotals},
};

fn totals_view(totals: &OverallTotals) -> Markup {
    let net = totals.income - totals.spending;

    html! {
        section class="summary-cards"
        {
            div class="card"
            {
                h2 { "Income" }
                p class="amount positive" { (format_currency(totals.income)) }
            }

            div class="card"
            {
                h2 { "Spending" }
                p class="amount negative" { (format_currency(totals.spending)) }
            }

            div class="card"
            {
                h2 { "Net" }
                p class=(if net < 0.0 { "amount negative" } else { "amount positive" })
                {
                    (format_currency(net))
                }
            }
        }
    }
}

fn monthly_view(monthly: &[MonthTotals]) -> Markup {
    html! {
        section
        {
            h2 { "By Month" }

            @if monthly.is_empty() {
                p class="empty-note" { "Nothing to show yet." }
            } @else {
                table class="monthly"
                {
                    thead
                    {
                        tr
                        {
                            th { "Month" }
                            th { "Income" }
                            th { "Spending" }
                            th { "Net" }
                        }
                    }

                    tbody
                    {
                        @for month in monthly {
                            tr
                            {
                                td { (month.month) }
                                td { (format_currency(month.income)) }
                                td { (format_currency(month.spending)) }
                                td { (format_currency(month.income - month.spending)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn categories_view(categories: &[CategoryTotals]) -> Markup {
    html! {
        section
        {
            h2 { "By Category" }

            @if categories.is_empty() {
                p class="empty-note"
                {
                    "No categorized transactions yet. Set categories on the "
                    a href=(endpoints::TRANSACTIONS_VIEW) { "transactions page" }
                    "."
                }
            } @else {
                table class="categories"
                {
                    thead
                    {
                        tr
                        {
                            th { "Category" }
                            th { "Total" }
                            th { "Transactions" }
                        }
                    }

                    tbody
                    {
                        @for category in categories {
                            tr
                            {
                                td { (category.category) }
                                td { (format_currency(category.total)) }
                                td { (category.count) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn budget_view(
    totals: &OverallTotals,
    monthly: &[MonthTotals],
    categories: &[CategoryTotals],
) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGET_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class="page"
        {
            h1 { "Budget" }

            (totals_view(totals))
            (monthly_view(monthly))
            (categories_view(categories))
        }
    };

    base("Budget", &content)
}

/// Route handler for the budget page.
pub(crate) async fn get_budget_page(State(state): State<AppState>) -> Response {
    let store = state.transaction_store;

    let totals = match store.overall_totals() {
        Ok(totals) => totals,
        Err(error) => return render_error_page(&error),
    };

    let monthly = match store.monthly_totals() {
        Ok(monthly) => monthly,
        Err(error) => return render_error_page(&error),
    };

    let categories = match store.category_totals() {
        Ok(categories) => categories,
        Err(error) => return render_error_page(&error),
    };

    budget_view(&totals, &monthly, &categories).into_response()
}

#[cfg(test)]
mod budget_page_tests {
    use axum::extract::State;
    use rusqlite::Connection;
    use scraper::Selector;
    use time::macros::datetime;

    use crate::{
        AppState,
        stores::TransactionStore,
        test_utils::{assert_valid_html, parse_html_document},
        transaction::Transaction,
    };

    use super::get_budget_page;

    fn get_test_state() -> AppState {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        AppState::new(db_connection).expect("Could not initialize database.")
    }

    #[tokio::test]
    async fn empty_store_renders_empty_notes() {
        let state = get_test_state();

        let response = get_budget_page(State(state)).await;

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let empty_notes = Selector::parse(".empty-note").unwrap();
        assert_eq!(html.select(&empty_notes).count(), 2);
    }

    #[tokio::test]
    async fn renders_totals_months_and_categories() {
        let state = get_test_state();
        let mut store = state.transaction_store.clone();

        store
            .create(
                Transaction::build(1000.0, datetime!(2025 - 01 - 15 0:00), "SALARY")
                    .category(Some("Income".to_owned())),
            )
            .unwrap();
        store
            .create(
                Transaction::build(-250.0, datetime!(2025 - 02 - 01 0:00), "GROCER")
                    .category(Some("Groceries".to_owned())),
            )
            .unwrap();

        let response = get_budget_page(State(state)).await;

        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let cards = Selector::parse(".summary-cards .card").unwrap();
        assert_eq!(html.select(&cards).count(), 3);

        let month_rows = Selector::parse("table.monthly tbody tr").unwrap();
        assert_eq!(html.select(&month_rows).count(), 2);

        let category_rows = Selector::parse("table.categories tbody tr").unwrap();
        assert_eq!(html.select(&category_rows).count(), 2);

        let body_text = html.root_element().text().collect::<String>();
        assert!(body_text.contains("$1,000.00"));
        assert!(body_text.contains("$750.00"));
    }
}
