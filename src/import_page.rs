//! The CSV upload page.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{endpoints, html::base, navigation::NavBar};

fn import_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::IMPORT_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class="page"
        {
            h1 { "Import Transactions" }

            // Submitted to the upload endpoint by static/app.js.
            form id="upload-form" data-upload-url=(endpoints::UPLOAD)
            {
                label for="file" { "Choose a CSV bank statement to upload" }

                input
                    id="file"
                    type="file"
                    name="file"
                    accept="text/csv"
                    required;

                p class="hint"
                {
                    "Statements need a date column and \"Money In\"/\"Money Out\" columns. "
                    "Rows that are already in your transactions are skipped automatically."
                }

                button type="submit" { "Upload" }
            }

            div id="upload-result" class="alert hidden" {}
        }
    };

    base("Import Transactions", &content)
}

/// Route handler for the import CSV page.
pub(crate) async fn get_import_page() -> Response {
    import_view().into_response()
}
