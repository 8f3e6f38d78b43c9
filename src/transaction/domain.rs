//! Defines the transaction record that is saved to storage.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::transaction::{
    category::Category,
    validation::{Amount, TransactionName, ValidForm},
};

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Income.
    Positive,
    /// An expense.
    Negative,
}

impl TransactionType {
    /// The value used for this type in forms and in storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Positive => "positive",
            TransactionType::Negative => "negative",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An income or an expense the user registered.
///
/// Transactions are never changed once created. To create a new
/// `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The unique ID of the transaction.
    pub id: Uuid,
    /// What the transaction was for.
    pub name: TransactionName,
    /// How much money came in or went out. Always positive, the direction is
    /// given by `type_`.
    pub amount: Amount,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub type_: TransactionType,
    /// The key of the category the transaction is filed under.
    pub category: String,
    /// When the transaction was registered.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction from validated form values and the user's
    /// selections.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        form: ValidForm,
        transaction_type: TransactionType,
        category: Category,
    ) -> TransactionBuilder {
        TransactionBuilder {
            id: None,
            name: form.name,
            amount: form.amount,
            type_: transaction_type,
            category,
            date: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The ID and date are generated when [TransactionBuilder::finalise] is called
/// unless they were set explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionBuilder {
    id: Option<Uuid>,
    name: TransactionName,
    amount: Amount,
    type_: TransactionType,
    category: Category,
    date: Option<OffsetDateTime>,
}

impl TransactionBuilder {
    /// Use `id` instead of generating a new one.
    pub fn id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    /// Use `date` as the creation time instead of the current time.
    pub fn date(mut self, date: OffsetDateTime) -> Self {
        self.date = Some(date);
        self
    }

    /// Create the transaction.
    pub fn finalise(self) -> Transaction {
        Transaction {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            name: self.name,
            amount: self.amount,
            type_: self.type_,
            category: self.category.key.to_owned(),
            date: self.date.unwrap_or_else(OffsetDateTime::now_utc),
        }
    }
}
