//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::{
    endpoints,
    selectors::currency_selector,
    view_state::{ViewAction, ViewState},
};

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link<'a> {
    url: &'a str,
    title: &'a str,
    is_current: bool,
}

impl Link<'_> {
    fn into_html(self, view: &ViewState) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm md:bg-transparent
        md:text-blue-700 md:p-0 dark:text-white md:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        md:hover:bg-transparent md:border-0 md:hover:text-blue-700 md:p-0
        dark:text-white md:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white md:dark:hover:bg-transparent"
        };

        // Moving between pages keeps the month and currency but closes any open form.
        let url = view.dispatch(ViewAction::CloseForm).url(self.url);

        html!(
            a
                href=(url)
                class=(style)
                aria-current=[self.is_current.then_some("page")]
            {
                (self.title)
            }
        )
    }
}

pub struct NavBar<'a> {
    active_endpoint: &'a str,
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar.
    ///
    /// If a link matches `active_endpoint`, then that link will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(active_endpoint: &str) -> NavBar<'_> {
        let links = vec![
            Link {
                url: endpoints::DASHBOARD_VIEW,
                title: "Dashboard",
                is_current: active_endpoint == endpoints::DASHBOARD_VIEW,
            },
            Link {
                url: endpoints::BUDGETS_VIEW,
                title: "Budgets",
                is_current: active_endpoint == endpoints::BUDGETS_VIEW,
            },
        ];

        NavBar {
            active_endpoint,
            links,
        }
    }

    /// Render the navigation bar with links that keep the state in `view`.
    pub fn into_html(self, view: &ViewState) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 shadow-sm dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between gap-4 mx-auto p-4"
                {
                    a
                        href=(view.dispatch(ViewAction::CloseForm).url(endpoints::DASHBOARD_VIEW))
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        span
                            class="inline-flex items-center justify-center w-10 h-10
                            rounded-full bg-blue-600 text-white text-xl font-bold"
                            aria-hidden="true"
                        {
                            "$"
                        }

                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "BudgetTracker"
                        }
                    }

                    div class="flex items-center gap-6"
                    {
                        ul
                            class="font-medium flex flex-row space-x-6 rtl:space-x-reverse"
                        {
                            @for link in self.links {
                                li { (link.into_html(view)) }
                            }
                        }

                        (currency_selector(view, self.active_endpoint))
                    }
                }
            }
        )
    }
}
