//! Shared HTML building blocks for the server-rendered pages.

use std::sync::OnceLock;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{DOCTYPE, Markup, html};
use numfmt::{Formatter, Precision};

use crate::Error;

/// The base layout shared by all pages.
pub(crate) fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Moneywise" }
                link href="/static/main.css" rel="stylesheet";
                script src="/static/app.js" defer {}
            }

            body
            {
                (content)
            }
        }
    }
}

/// Render a page-level failure as a plain error page.
///
/// Store errors on page routes end up here; the details only go to the logs.
pub(crate) fn render_error_page(error: &Error) -> Response {
    tracing::error!("An unexpected error occurred: {error}");

    let content = html! {
        main class="page error-page"
        {
            h1 { "Something went wrong" }
            p { "An unexpected error occurred, check the server logs for more details." }
            a href="/" { "Back to the transactions page" }
        }
    };

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        base("Something Went Wrong", &content),
    )
        .into_response()
}

/// Format `number` as a currency string, e.g. -1234.5 becomes "-$1,234.50".
pub(crate) fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}
