//! The page for browsing and categorizing transactions.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, endpoints,
    html::{base, format_currency, render_error_page},
    navigation::NavBar,
    transaction::Transaction,
};

const DATE_DISPLAY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day] [month repr:short] [year]");

fn transaction_row(transaction: &Transaction) -> Markup {
    let amount_class = if transaction.amount < 0.0 {
        "amount negative"
    } else {
        "amount positive"
    };
    let update_url = endpoints::format_endpoint(endpoints::TRANSACTION, transaction.id);
    let date = transaction
        .date
        .date()
        .format(&DATE_DISPLAY_FORMAT)
        .unwrap_or_default();

    html! {
        tr
        {
            td { (date) }
            td { (transaction.description) }
            td class=(amount_class) { (format_currency(transaction.amount)) }
            td
            {
                @if let Some(balance) = transaction.balance {
                    (format_currency(balance))
                }
            }
            td
            {
                // Submitted to the update endpoint by static/app.js.
                form class="category-form" data-update-url=(update_url)
                {
                    input
                        type="text"
                        name="category"
                        value=[transaction.category.as_deref()]
                        placeholder="Uncategorized";

                    button type="submit" { "Save" }
                }
            }
        }
    }
}

fn transactions_view(transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class="page"
        {
            h1 { "Transactions" }

            @if transactions.is_empty() {
                p class="empty-note"
                {
                    "No transactions yet. "
                    a href=(endpoints::IMPORT_VIEW) { "Import a bank statement" }
                    " to get started."
                }
            } @else {
                table class="transactions"
                {
                    thead
                    {
                        tr
                        {
                            th { "Date" }
                            th { "Description" }
                            th { "Amount" }
                            th { "Balance" }
                            th { "Category" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            (transaction_row(transaction))
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &content)
}

/// Route handler for the transactions page.
pub(crate) async fn get_transactions_page(State(state): State<AppState>) -> Response {
    match state.transaction_store.get_all() {
        Ok(transactions) => transactions_view(&transactions).into_response(),
        Err(error) => render_error_page(&error),
    }
}
