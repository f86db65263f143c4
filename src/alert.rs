//! Alerts for telling the user that something went wrong.
//!
//! Form endpoints return alerts as HTML fragments which HTMX swaps into the
//! `#alert-container` element of the page. Pages render warnings inline.

use maud::{Markup, html};

/// An alert message with a short title and a longer explanation.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A request failed and the user needs to act on it.
    Error { message: String, details: String },
    /// The page was rendered, but with missing data.
    Warning { message: String, details: String },
}

impl Alert {
    pub fn into_html(self) -> Markup {
        let (message, details, style) = match self {
            Alert::Error { message, details } => (
                message,
                details,
                "text-red-800 border-red-300 bg-red-50 dark:bg-gray-800 \
                dark:text-red-400 dark:border-red-800",
            ),
            Alert::Warning { message, details } => (
                message,
                details,
                "text-yellow-800 border-yellow-300 bg-yellow-50 dark:bg-gray-800 \
                dark:text-yellow-300 dark:border-yellow-800",
            ),
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/#border-accent
        html!(
            div
                role="alert"
                class={ "flex items-start p-4 mb-4 border-t-4 rounded " (style) }
            {
                div class="ms-3 text-sm"
                {
                    p class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        p { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    onclick="this.parentElement.remove()"
                    class="ms-auto -mx-1.5 -my-1.5 rounded p-1.5 inline-flex
                        items-center justify-center h-8 w-8 hover:bg-black/10"
                {
                    "✕"
                }
            }
        )
    }
}
