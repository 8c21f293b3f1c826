//! This file defines the templates and a convenience function for creating
//! the navigation bar.

use maud::{Markup, html};

use crate::endpoints;

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to `true`. Only one link
/// should be set as active at any one time.
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

pub(crate) struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be marked as
    /// active and displayed differently in the HTML.
    pub(crate) fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::TRANSACTIONS_VIEW,
                title: "Transactions",
                is_current: active_endpoint == endpoints::TRANSACTIONS_VIEW,
            },
            Link {
                url: endpoints::IMPORT_VIEW,
                title: "Import",
                is_current: active_endpoint == endpoints::IMPORT_VIEW,
            },
            Link {
                url: endpoints::BUDGET_VIEW,
                title: "Budget",
                is_current: active_endpoint == endpoints::BUDGET_VIEW,
            },
        ];

        NavBar { links }
    }

    pub(crate) fn into_html(self) -> Markup {
        html!(
            nav class="nav-bar"
            {
                a href=(endpoints::ROOT) class="nav-brand" { "Moneywise" }

                ul class="nav-links"
                {
                    @for link in self.links {
                        li {
                            a
                                href=(link.url)
                                class=[link.is_current.then_some("current")]
                                aria-current=[link.is_current.then_some("page")]
                            {
                                (link.title)
                            }
                        }
                    }
                }
            }
        )
    }
}

#[cfg(test)]
mod nav_bar_tests {
    use std::collections::HashMap;

    use crate::{endpoints, navigation::NavBar};

    #[test]
    fn set_active_endpoint() {
        let mut cases = HashMap::new();
        cases.insert(endpoints::TRANSACTIONS_VIEW, true);
        cases.insert(endpoints::IMPORT_VIEW, true);
        cases.insert(endpoints::BUDGET_VIEW, true);

        cases.insert(endpoints::ROOT, false);
        cases.insert(endpoints::HEALTH, false);
        cases.insert(endpoints::TRANSACTIONS_API, false);
        cases.insert(endpoints::UPLOAD, false);

        for (endpoint, should_be_active) in cases {
            let nav_bar = NavBar::new(endpoint);

            assert_link_active(nav_bar, endpoint, should_be_active);
        }
    }

    #[track_caller]
    fn assert_link_active(nav_bar: NavBar<'_>, endpoint: &str, should_be_active: bool) {
        let get_active_string = |is_active: bool| -> &str {
            if is_active {
                "active (true)"
            } else {
                "inactive (false)"
            }
        };

        for link in nav_bar.links {
            if link.url == endpoint {
                assert_eq!(
                    link.is_current,
                    should_be_active,
                    "Link for current page should be {} but got {}",
                    get_active_string(should_be_active),
                    get_active_string(link.is_current),
                )
            } else {
                assert!(
                    !link.is_current,
                    "Link for inactive page should {} but got {}",
                    get_active_string(false),
                    get_active_string(link.is_current)
                )
            }
        }
    }
}
