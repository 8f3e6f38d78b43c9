//! The steps taken when the user submits the register screen.
//!
//! A submission validates the form, checks the transaction type and category
//! were picked, builds the transaction and saves it. Only a successful save
//! resets the screen.

use time::OffsetDateTime;

use crate::{
    Error,
    storage::KeyValueStore,
    transaction::{
        domain::Transaction,
        form::TransactionForm,
        gateway::append_and_save,
        selection::{MissingSelection, Selection},
    },
};

/// Everything the user has entered on the register screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterScreen {
    /// The name and amount fields.
    pub form: TransactionForm,
    /// The transaction type and category.
    pub selection: Selection,
}

/// The result of submitting the register screen.
#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// At least one field is invalid, the errors are on the returned form.
    Invalid,
    /// The form is valid but a choice is missing. Nothing was saved.
    SelectionMissing(MissingSelection),
    /// The transaction was saved.
    Saved(Transaction),
    /// The transaction could not be saved. The screen is left as it was so
    /// the user can try again.
    Failed(Error),
}

impl RegisterScreen {
    /// Create a screen from what the user entered.
    pub fn new(form: TransactionForm, selection: Selection) -> Self {
        Self { form, selection }
    }

    /// Validate, build and save a transaction dated `now`.
    ///
    /// Returns the screen to show next along with the outcome. After a
    /// successful save the returned screen is reset to its initial state,
    /// otherwise it keeps the user's input.
    pub fn submit(
        mut self,
        store: &impl KeyValueStore,
        now: OffsetDateTime,
    ) -> (Self, SubmitOutcome) {
        let selection = self.selection;
        let ready = self.form.handle_submit(|valid_form| {
            selection
                .confirm()
                .map(|(transaction_type, category)| {
                    Transaction::build(valid_form, transaction_type, category).date(now)
                })
        });

        let builder = match ready {
            None => return (self, SubmitOutcome::Invalid),
            Some(Err(missing)) => {
                tracing::debug!("Transaction not saved: {missing}");
                return (self, SubmitOutcome::SelectionMissing(missing));
            }
            Some(Ok(builder)) => builder,
        };

        let transaction = builder.finalise();

        match append_and_save(transaction.clone(), store) {
            Ok(()) => {
                tracing::info!("Saved transaction {}", transaction.id);
                self.form.reset();
                self.selection = self.selection.reset();
                (self, SubmitOutcome::Saved(transaction))
            }
            Err(error) => {
                tracing::error!("Could not save transaction {}: {error}", transaction.id);
                (self, SubmitOutcome::Failed(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::{Duration, OffsetDateTime};

    use crate::{
        Error,
        db::initialize,
        storage::KeyValueStore,
        transaction::{
            category::{CategoryChoice, find_category},
            domain::TransactionType,
            form::TransactionForm,
            gateway::{TRANSACTIONS_STORAGE_KEY, load_all},
            selection::{MissingSelection, Selection},
            validation::{FieldError, FormValues},
        },
    };

    use super::{RegisterScreen, SubmitOutcome};

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
    }

    fn form(name: &str, amount: &str) -> TransactionForm {
        TransactionForm::new(FormValues {
            name: name.to_owned(),
            amount: amount.to_owned(),
        })
    }

    fn food() -> CategoryChoice {
        CategoryChoice::Chosen(find_category("food").unwrap())
    }

    struct FullStore {
        items: RefCell<HashMap<String, String>>,
    }

    impl KeyValueStore for FullStore {
        fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
            Ok(self.items.borrow().get(key).cloned())
        }

        fn set_item(&self, _key: &str, _value: &str) -> Result<(), Error> {
            Err(Error::StorageError(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL),
                None,
            )))
        }
    }

    #[test]
    fn saves_transaction_and_resets_screen() {
        let connection = get_test_connection();
        let now = OffsetDateTime::now_utc();
        let screen = RegisterScreen::new(
            form("Lunch", "42.50"),
            Selection::new()
                .with_transaction_type(TransactionType::Negative)
                .with_category(food()),
        );

        let (screen, outcome) = screen.submit(&connection, now);

        let saved = match outcome {
            SubmitOutcome::Saved(saved) => saved,
            other => panic!("want saved outcome, got {other:?}"),
        };
        let transactions = load_all(&connection).unwrap();
        assert_eq!(transactions.len(), 1);
        let stored = &transactions[0];
        assert_eq!(stored, &saved);
        assert_eq!(stored.name.as_ref(), "Lunch");
        assert_eq!(stored.amount.value(), Decimal::new(4250, 2));
        assert_eq!(stored.type_, TransactionType::Negative);
        assert_eq!(stored.category, "food");
        assert!(!stored.id.is_nil());
        assert!((stored.date - OffsetDateTime::now_utc()).abs() < Duration::seconds(2));
        assert_eq!(screen, RegisterScreen::default());
    }

    #[test]
    fn invalid_form_saves_nothing() {
        let connection = get_test_connection();
        let screen = RegisterScreen::new(
            form("", "abc"),
            Selection::new()
                .with_transaction_type(TransactionType::Negative)
                .with_category(food()),
        );

        let (screen, outcome) = screen.submit(&connection, OffsetDateTime::now_utc());

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(screen.form.errors().name, Some(FieldError::NameRequired));
        assert_eq!(screen.form.errors().amount, Some(FieldError::AmountNotNumeric));
        assert_eq!(connection.get_item(TRANSACTIONS_STORAGE_KEY), Ok(None));
    }

    #[test]
    fn field_errors_are_reported_before_missing_selection() {
        let connection = get_test_connection();
        let screen = RegisterScreen::new(form("", "1"), Selection::new());

        let (_, outcome) = screen.submit(&connection, OffsetDateTime::now_utc());

        assert_eq!(outcome, SubmitOutcome::Invalid);
    }

    #[test]
    fn missing_type_saves_nothing() {
        let connection = get_test_connection();
        let selection = Selection::new().with_category(food());
        let screen = RegisterScreen::new(form("Lunch", "42.50"), selection);

        let (screen, outcome) = screen.submit(&connection, OffsetDateTime::now_utc());

        assert_eq!(
            outcome,
            SubmitOutcome::SelectionMissing(MissingSelection::TransactionType)
        );
        assert_eq!(screen.selection, selection);
        assert_eq!(screen.form.values().name, "Lunch");
        assert_eq!(connection.get_item(TRANSACTIONS_STORAGE_KEY), Ok(None));
    }

    #[test]
    fn missing_category_saves_nothing() {
        let connection = get_test_connection();
        let screen = RegisterScreen::new(
            form("Lunch", "42.50"),
            Selection::new().with_transaction_type(TransactionType::Positive),
        );

        let (_, outcome) = screen.submit(&connection, OffsetDateTime::now_utc());

        assert_eq!(
            outcome,
            SubmitOutcome::SelectionMissing(MissingSelection::Category)
        );
        assert_eq!(load_all(&connection), Ok(Vec::new()));
    }

    #[test]
    fn failed_save_keeps_screen_for_retry() {
        let store = FullStore {
            items: RefCell::new(HashMap::new()),
        };
        let before = RegisterScreen::new(
            form("Lunch", "42.50"),
            Selection::new()
                .with_transaction_type(TransactionType::Negative)
                .with_category(food()),
        );

        let (after, outcome) = before.clone().submit(&store, OffsetDateTime::now_utc());

        assert!(
            matches!(outcome, SubmitOutcome::Failed(Error::StorageError(_))),
            "want failed outcome, got {outcome:?}"
        );
        assert_eq!(after, before);
    }

    #[test]
    fn malformed_storage_fails_without_overwriting() {
        let connection = get_test_connection();
        connection.set_item(TRANSACTIONS_STORAGE_KEY, "[{").unwrap();
        let screen = RegisterScreen::new(
            form("Lunch", "42.50"),
            Selection::new()
                .with_transaction_type(TransactionType::Negative)
                .with_category(food()),
        );

        let (_, outcome) = screen.submit(&connection, OffsetDateTime::now_utc());

        assert!(matches!(
            outcome,
            SubmitOutcome::Failed(Error::DeserializationError(_))
        ));
        assert_eq!(
            connection.get_item(TRANSACTIONS_STORAGE_KEY),
            Ok(Some("[{".to_owned()))
        );
    }

    #[test]
    fn second_submission_appends() {
        let connection = get_test_connection();
        let selection = Selection::new()
            .with_transaction_type(TransactionType::Positive)
            .with_category(CategoryChoice::Chosen(find_category("salary").unwrap()));

        for name in ["January", "February"] {
            let (_, outcome) = RegisterScreen::new(form(name, "1500"), selection)
                .submit(&connection, OffsetDateTime::now_utc());
            assert!(matches!(outcome, SubmitOutcome::Saved(_)));
        }

        let names = load_all(&connection)
            .unwrap()
            .into_iter()
            .map(|transaction| transaction.name.to_string())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["January", "February"]);
    }

    #[test]
    fn amount_beyond_maximum_saves_nothing() {
        let connection = get_test_connection();
        let selection = Selection::new()
            .with_transaction_type(TransactionType::Positive)
            .with_category(CategoryChoice::Chosen(find_category("salary").unwrap()));

        for _ in 0..2 {
            let (screen, outcome) =
                RegisterScreen::new(form("Jackpot", "79228162514264337593543950335"), selection)
                    .submit(&connection, OffsetDateTime::now_utc());

            assert_eq!(outcome, SubmitOutcome::Invalid);
            assert_eq!(screen.form.errors().amount, Some(FieldError::AmountTooLarge));
        }

        assert_eq!(connection.get_item(TRANSACTIONS_STORAGE_KEY), Ok(None));
    }
}
