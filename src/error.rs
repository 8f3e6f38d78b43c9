//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError, transaction::MissingSelection,
};

/// The message shown to the user whenever a transaction could not be persisted.
pub const COULD_NOT_SAVE_MSG: &str = "Could not save";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted the transaction form without choosing either a
    /// transaction type or a category.
    #[error("{0}")]
    SelectionMissing(MissingSelection),

    /// The category key submitted with the form is neither the sentinel nor a
    /// key from the category catalogue.
    #[error("\"{0}\" is not a known category")]
    InvalidCategory(String),

    /// Reading from or writing to the storage slot failed.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("an unexpected storage error occurred: {0}")]
    StorageError(rusqlite::Error),

    /// The transaction collection could not be serialized as JSON.
    #[error("could not serialize the transactions as JSON: {0}")]
    SerializationError(String),

    /// The value stored in the storage slot is not a well-formed transaction
    /// collection.
    #[error("could not deserialize the stored transactions: {0}")]
    DeserializationError(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The income or outcome sum of the stored transactions is too large to
    /// be represented.
    #[error("the transaction totals overflowed")]
    TotalsOverflow,

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::StorageError(value)
    }
}

impl From<MissingSelection> for Error {
    fn from(value: MissingSelection) -> Self {
        Error::SelectionMissing(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::DeserializationError(cause) => {
                tracing::error!("Stored transactions are malformed: {cause}");
                InternalServerError {
                    description: "Could not read your transactions",
                    fix: "The saved transactions are damaged. Check the server logs for details.",
                }
                .into_response()
            }
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::TotalsOverflow => InternalServerError {
                description: "Could not total your transactions",
                fix: "The saved amounts add up to more than can be shown. \
                    Check the server logs for details.",
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::SelectionMissing(missing) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::ErrorSimple {
                    message: missing.to_string(),
                },
            ),
            Error::InvalidCategory(key) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid category".to_owned(),
                    details: format!("Could not find a category with the key \"{key}\"."),
                },
            ),
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            // The cause of a failed save is logged by the caller, the user only
            // gets the generic message.
            Error::StorageError(_)
            | Error::SerializationError(_)
            | Error::DeserializationError(_)
            | Error::DatabaseLockError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::ErrorSimple {
                    message: COULD_NOT_SAVE_MSG.to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
