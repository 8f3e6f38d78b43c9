//! Defines the endpoint that registers a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    transaction::{
        category::CategoryChoice,
        domain::TransactionType,
        form::TransactionForm,
        register_page::register_form_view,
        selection::Selection,
        submission::{RegisterScreen, SubmitOutcome},
        validation::FormValues,
    },
};

/// The state needed for registering a transaction.
#[derive(Debug, Clone)]
pub struct RegisterTransactionState {
    /// The database connection holding the transaction collection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegisterTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The fields posted by the register form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterTransactionForm {
    /// The raw name text.
    #[serde(default)]
    pub name: String,
    /// The raw amount text.
    #[serde(default)]
    pub amount: String,
    /// The picked transaction type, absent if neither radio was checked.
    #[serde(default)]
    pub type_: Option<TransactionType>,
    /// The key of the picked category, the sentinel if none was picked.
    #[serde(default)]
    pub category: String,
}

/// Handle a submission of the register form.
///
/// Invalid fields re-render the form with inline errors. Any other failure is
/// returned as an alert. On success the client is redirected to the listing
/// page.
pub async fn register_transaction_endpoint(
    State(state): State<RegisterTransactionState>,
    Form(form): Form<RegisterTransactionForm>,
) -> Response {
    let category = match CategoryChoice::from_key(&form.category) {
        Ok(category) => category,
        Err(error) => {
            tracing::warn!("Rejected transaction form: {error}");
            return error.into_alert_response();
        }
    };

    let mut selection = Selection::new().with_category(category);
    if let Some(transaction_type) = form.type_ {
        selection = selection.with_transaction_type(transaction_type);
    }

    let screen = RegisterScreen::new(
        TransactionForm::new(FormValues {
            name: form.name,
            amount: form.amount,
        }),
        selection,
    );

    // Held until the collection has been written back.
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let (screen, outcome) = screen.submit(&*connection, OffsetDateTime::now_utc());

    match outcome {
        SubmitOutcome::Invalid => {
            tracing::warn!("Rejected transaction form: {:?}", screen.form.errors());
            register_form_view(&screen).into_response()
        }
        SubmitOutcome::SelectionMissing(missing) => Error::from(missing).into_alert_response(),
        SubmitOutcome::Saved(_) => (
            HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        SubmitOutcome::Failed(error) => error.into_alert_response(),
    }
}
