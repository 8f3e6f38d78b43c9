//! GoFinances is a small web app for recording personal income and expenses.
//!
//! This library serves the HTML pages directly: a sign-in landing page, a
//! form for registering transactions, and a listing of the transactions that
//! have been saved so far. Transactions are kept as a single JSON collection
//! under a named storage slot in a SQLite database.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod db;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod sign_in;
mod storage;
#[cfg(test)]
mod test_utils;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use storage::KeyValueStore;
pub use timezone::get_local_offset;
pub use transaction::{
    Amount, Category, CategoryChoice, FieldError, FieldErrors, FormValues, MissingSelection,
    RegisterScreen, SENTINEL_CATEGORY_KEY, Selection, SubmitOutcome, TRANSACTIONS_STORAGE_KEY,
    Transaction, TransactionBuilder, TransactionForm, TransactionName, TransactionType, ValidForm,
    append_and_save, available_categories, find_category, load_all, validate,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
