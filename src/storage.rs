//! Named storage slots backed by SQLite.
//!
//! A slot is a single string value stored under a key. Writing to a slot
//! replaces its whole value, there are no partial updates.

use rusqlite::{Connection, OptionalExtension};

use crate::Error;

/// A store of string values addressed by key.
pub trait KeyValueStore {
    /// Get the value stored under `key`, or `None` if the slot is empty.
    ///
    /// # Errors
    /// Returns [Error::StorageError] if the underlying storage could not be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    /// Returns [Error::StorageError] if the underlying storage could not be written,
    /// e.g., the disk is full.
    fn set_item(&self, key: &str, value: &str) -> Result<(), Error>;
}

/// Create the table that holds the storage slots.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_storage_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS storage (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

impl KeyValueStore for Connection {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        self.query_row("SELECT value FROM storage WHERE key = ?1", (key,), |row| {
            row.get(0)
        })
        .optional()
        .map_err(Error::from)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), Error> {
        self.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;

        Ok(())
    }
}
