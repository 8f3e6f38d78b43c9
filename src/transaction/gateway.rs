//! Reads and writes the saved transaction collection.
//!
//! All transactions live as one JSON array in a single storage slot. Adding a
//! transaction reads the whole array, appends to it and writes the whole array
//! back.

use crate::{Error, storage::KeyValueStore, transaction::domain::Transaction};

/// The storage slot holding the transaction collection.
pub const TRANSACTIONS_STORAGE_KEY: &str = "@gofinances:transactions";

/// Load every saved transaction in the order they were added.
///
/// An empty slot is an empty collection.
///
/// # Errors
/// - [Error::StorageError] if the slot could not be read,
/// - [Error::DeserializationError] if the stored value is not a well-formed
///   transaction collection.
pub fn load_all(store: &impl KeyValueStore) -> Result<Vec<Transaction>, Error> {
    match store.get_item(TRANSACTIONS_STORAGE_KEY)? {
        None => Ok(Vec::new()),
        Some(raw) => deserialize_transactions(&raw),
    }
}

/// Add `transaction` to the end of the saved collection.
///
/// The collection is rewritten in full. Callers that share a store between
/// threads must hold the store's lock for the whole call, otherwise two
/// concurrent calls can both read the old collection and the last write wins.
///
/// # Errors
/// - [Error::StorageError] if the slot could not be read or written,
/// - [Error::DeserializationError] if the stored value is malformed, in which
///   case nothing is written,
/// - [Error::SerializationError] if the collection could not be serialized.
pub fn append_and_save(transaction: Transaction, store: &impl KeyValueStore) -> Result<(), Error> {
    let mut transactions = load_all(store)?;
    transactions.push(transaction);

    let raw = serialize_transactions(&transactions)?;
    store.set_item(TRANSACTIONS_STORAGE_KEY, &raw)?;

    tracing::debug!(
        "Saved {} transactions to {TRANSACTIONS_STORAGE_KEY}",
        transactions.len()
    );

    Ok(())
}

fn serialize_transactions(transactions: &[Transaction]) -> Result<String, Error> {
    serde_json::to_string(transactions).map_err(|error| Error::SerializationError(error.to_string()))
}

fn deserialize_transactions(raw: &str) -> Result<Vec<Transaction>, Error> {
    serde_json::from_str(raw).map_err(|error| Error::DeserializationError(error.to_string()))
}
