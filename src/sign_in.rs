//! The landing page shown when the app is opened.
//!
//! There are no accounts, the sign-in buttons take the user straight to the
//! register screen.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, base, logo},
};

const TAGLINE: &str = "Control your finances in a very simple way";
const SIGN_IN_PROMPT: &str = "Sign in with one of the accounts below";

fn sign_in_view() -> Markup {
    let content = html! {
        div class="flex flex-col min-h-screen"
        {
            header class="flex flex-col items-center justify-end gap-8 px-6 py-16 bg-blue-600 dark:bg-blue-800 text-white basis-2/3"
            {
                (logo("w-24 h-24"))

                h1 class="max-w-xs text-3xl font-medium text-center"
                {
                    (TAGLINE)
                }

                p class="text-base text-center"
                {
                    (SIGN_IN_PROMPT)
                }
            }

            footer class="flex flex-col items-center gap-4 px-6 py-8 basis-1/3"
            {
                div class="w-full max-w-md -mt-14 space-y-4"
                {
                    a
                        href=(endpoints::REGISTER_VIEW)
                        role="button"
                        class={ (BUTTON_PRIMARY_STYLE) " block text-center" }
                    {
                        "Sign in with Google"
                    }

                    a
                        href=(endpoints::REGISTER_VIEW)
                        role="button"
                        class={ (BUTTON_PRIMARY_STYLE) " block text-center" }
                    {
                        "Sign in with Apple"
                    }
                }
            }
        }
    };

    base("Sign in", &content)
}

/// Display the landing page.
pub async fn get_sign_in_page() -> Response {
    sign_in_view().into_response()
}
