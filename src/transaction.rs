//! Transactions: the record itself, the registration form and its
//! validation, the persisted collection, and the pages that show them.

mod category;
mod domain;
mod form;
mod gateway;
mod listing_page;
mod register_endpoint;
mod register_page;
mod selection;
mod submission;
mod validation;

pub use category::{
    Category, CategoryChoice, SENTINEL_CATEGORY_KEY, available_categories, find_category,
};
pub use domain::{Transaction, TransactionBuilder, TransactionType};
pub use form::TransactionForm;
pub use gateway::{TRANSACTIONS_STORAGE_KEY, append_and_save, load_all};
pub use listing_page::get_transactions_page;
pub use register_endpoint::register_transaction_endpoint;
pub use register_page::get_register_page;
pub use selection::{MissingSelection, Selection};
pub use submission::{RegisterScreen, SubmitOutcome};
pub use validation::{
    Amount, FieldError, FieldErrors, FormValues, TransactionName, ValidForm, validate,
};
