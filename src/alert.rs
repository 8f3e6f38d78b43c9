//! Alert messages shown in the page's alert container.
//!
//! Handlers that respond to htmx requests with an error status return an
//! alert fragment, which the response-targets extension swaps into
//! `#alert-container`.

use axum::response::Html;
use maud::{Markup, html};

/// An alert to display to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An error message with extra details.
    Error { message: String, details: String },
    /// An error message on its own.
    ErrorSimple { message: String },
}

const ERROR_STYLE: &str = "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
    dark:bg-gray-800 dark:text-red-400 border border-red-300 dark:border-red-800";

impl Alert {
    fn into_markup(self) -> Markup {
        let (message, details) = match self {
            Alert::Error { message, details } => (message, Some(details)),
            Alert::ErrorSimple { message } => (message, None),
        };

        html! {
            div
                id="alert"
                role="alert"
                class=(ERROR_STYLE)
            {
                div class="flex items-start justify-between gap-4"
                {
                    div
                    {
                        p class="font-semibold" { (message) }

                        @if let Some(details) = details.filter(|details| !details.is_empty()) {
                            p class="mt-1" { (details) }
                        }
                    }

                    button
                        type="button"
                        aria-label="Dismiss"
                        onclick="this.closest('#alert').remove()"
                        class="font-bold"
                    {
                        "×"
                    }
                }
            }
        }
    }

    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}
