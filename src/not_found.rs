//! The 404 page for unknown routes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;

use crate::{endpoints, html::base};

/// Route handler for unknown routes.
pub(crate) async fn get_404_not_found() -> Response {
    let content = html! {
        main class="page error-page"
        {
            h1 { "404" }
            p { "The page you are looking for does not exist." }
            a href=(endpoints::ROOT) { "Back to the transactions page" }
        }
    };

    (StatusCode::NOT_FOUND, base("Page Not Found", &content)).into_response()
}
