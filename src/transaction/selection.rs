//! The transaction type and category picked on the register screen.

use crate::transaction::{
    category::{Category, CategoryChoice},
    domain::TransactionType,
};

/// A choice the user has to make before a transaction can be saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MissingSelection {
    /// Neither income nor outcome was picked.
    #[error("Select a transaction type")]
    TransactionType,
    /// The category is still the placeholder.
    #[error("Select a category")]
    Category,
}

/// The transaction type and category picked on the register screen.
///
/// A `Selection` is never mutated, each transition returns a new value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    transaction_type: Option<TransactionType>,
    category: CategoryChoice,
}

impl Selection {
    /// The initial selection: no type and the placeholder category.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick the transaction type.
    #[must_use]
    pub fn with_transaction_type(self, transaction_type: TransactionType) -> Self {
        Self {
            transaction_type: Some(transaction_type),
            ..self
        }
    }

    /// Pick the category.
    #[must_use]
    pub fn with_category(self, category: CategoryChoice) -> Self {
        Self { category, ..self }
    }

    /// Go back to the initial selection.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }

    /// The picked transaction type, if any.
    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }

    /// The picked category, or the placeholder.
    pub fn category(&self) -> CategoryChoice {
        self.category
    }

    /// Get the type and category if both have been picked.
    ///
    /// # Errors
    /// Returns the first missing choice, checking the transaction type before
    /// the category.
    pub fn confirm(&self) -> Result<(TransactionType, Category), MissingSelection> {
        let transaction_type = self
            .transaction_type
            .ok_or(MissingSelection::TransactionType)?;

        match self.category {
            CategoryChoice::Chosen(category) => Ok((transaction_type, category)),
            CategoryChoice::Unselected => Err(MissingSelection::Category),
        }
    }
}
