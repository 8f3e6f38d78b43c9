//! Defines the page with the form for registering a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_ERROR_STYLE, FORM_LABEL_STYLE,
        FORM_RADIO_GROUP_STYLE, FORM_RADIO_INCOME_CHECKED_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_RADIO_OUTCOME_CHECKED_STYLE, FORM_TEXT_INPUT_STYLE, base,
        loading_spinner,
    },
    navigation::NavBar,
    transaction::{
        category::{
            CategoryChoice, SENTINEL_CATEGORY_KEY, SENTINEL_CATEGORY_NAME, available_categories,
        },
        domain::TransactionType,
        gateway::load_all,
        submission::RegisterScreen,
        validation::FieldError,
    },
};

/// The state needed for the register page.
#[derive(Debug, Clone)]
pub struct RegisterPageState {
    /// The database connection for reading the saved transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegisterPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page with an empty register form.
///
/// The saved transactions are read when the page is opened. A failed read is
/// logged and the form is shown anyway.
pub async fn get_register_page(State(state): State<RegisterPageState>) -> Response {
    match state.db_connection.lock() {
        Ok(connection) => match load_all(&*connection) {
            Ok(transactions) => {
                tracing::debug!("Found {} saved transactions", transactions.len());
            }
            Err(error) => {
                tracing::error!("Could not load saved transactions: {error}");
            }
        },
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
        }
    }

    register_view(&RegisterScreen::default()).into_response()
}

fn register_view(screen: &RegisterScreen) -> Markup {
    let nav_bar = NavBar::new(endpoints::REGISTER_VIEW).into_html();
    let form = register_form_view(screen);

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="self-start my-6 text-xl font-bold" { "Register" }

            (form)
        }
    };

    base("Register", &content)
}

fn field_error(error: Option<FieldError>) -> Markup {
    html! {
        @if let Some(error) = error {
            p class=(FORM_ERROR_STYLE) { (error.to_string()) }
        }
    }
}

fn type_radio(
    transaction_type: TransactionType,
    label: &str,
    checked_style: &str,
    selected: Option<TransactionType>,
) -> Markup {
    let id = format!("type-{}", transaction_type.as_str());

    html! {
        div
        {
            input
                type="radio"
                name="type_"
                id=(id)
                value=(transaction_type.as_str())
                checked[selected == Some(transaction_type)]
                class=(FORM_RADIO_INPUT_STYLE);

            label
                for=(id)
                class={ (FORM_RADIO_LABEL_STYLE) " " (checked_style) }
            {
                (label)
            }
        }
    }
}

/// The register form with the user's input and any field errors.
///
/// Field errors come back as a re-rendered form that swaps out the old one,
/// all other errors are shown in the alert container.
pub(super) fn register_form_view(screen: &RegisterScreen) -> Markup {
    let values = screen.form.values();
    let errors = screen.form.errors();
    let selected_type = screen.selection.transaction_type();
    let selected_category = screen.selection.category();

    html! {
        form
            id="register-form"
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            hx-indicator="#indicator"
            hx-disabled-elt="#submit-button"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Name"
                    required
                    autofocus
                    value=(values.name)
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(errors.name))
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    id="amount"
                    type="text"
                    name="amount"
                    inputmode="decimal"
                    placeholder="0.00"
                    required
                    value=(values.amount)
                    class=(FORM_TEXT_INPUT_STYLE);

                (field_error(errors.amount))
            }

            fieldset class=(FORM_RADIO_GROUP_STYLE)
            {
                legend class="sr-only" { "Transaction type" }

                (type_radio(
                    TransactionType::Positive,
                    "Income",
                    FORM_RADIO_INCOME_CHECKED_STYLE,
                    selected_type,
                ))
                (type_radio(
                    TransactionType::Negative,
                    "Outcome",
                    FORM_RADIO_OUTCOME_CHECKED_STYLE,
                    selected_type,
                ))
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select id="category" name="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option
                        value=(SENTINEL_CATEGORY_KEY)
                        selected[selected_category == CategoryChoice::Unselected]
                    {
                        (SENTINEL_CATEGORY_NAME)
                    }

                    @for category in available_categories() {
                        option
                            value=(category.key)
                            selected[selected_category == CategoryChoice::Chosen(*category)]
                        {
                            (category.name)
                        }
                    }
                }
            }

            button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
            {
                span class="inline htmx-indicator" id="indicator"
                {
                    (loading_spinner())
                }
                "Send"
            }
        }
    }
}
