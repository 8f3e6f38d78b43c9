//! Keeps the state of the transaction form between user input and submission.

use crate::transaction::validation::{FieldErrors, FormValues, ValidForm, validate};

/// The values typed into the transaction form and the errors from the last
/// validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    values: FormValues,
    errors: FieldErrors,
}

impl TransactionForm {
    /// Create a form pre-filled with `values` and no errors.
    pub fn new(values: FormValues) -> Self {
        Self {
            values,
            errors: FieldErrors::default(),
        }
    }

    /// The current field values.
    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// The errors from the last submission attempt.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Replace the name field.
    pub fn set_name(&mut self, name: &str) {
        self.values.name = name.to_owned();
    }

    /// Replace the amount field.
    pub fn set_amount(&mut self, amount: &str) {
        self.values.amount = amount.to_owned();
    }

    /// Validate the form and call `on_valid` only if every field is valid.
    ///
    /// If validation fails the errors are stored on the form and `None` is
    /// returned without calling `on_valid`.
    pub fn handle_submit<T>(&mut self, on_valid: impl FnOnce(ValidForm) -> T) -> Option<T> {
        match validate(&self.values) {
            Ok(valid_form) => {
                self.errors = FieldErrors::default();
                Some(on_valid(valid_form))
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Clear the values and errors.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
