//! Database set up for the application's SQLite database.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, storage::create_storage_table};

/// Create the tables the application needs if they do not exist yet.
///
/// This is safe to call on a database that has already been initialized.
///
/// # Errors
/// Returns an error if the tables could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_storage_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::storage::KeyValueStore;

    use super::initialize;

    #[test]
    fn initialize_creates_storage_table() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        assert_eq!(connection.get_item("anything"), Ok(None));
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection.set_item("slot", "kept").unwrap();

        initialize(&connection).unwrap();

        assert_eq!(connection.get_item("slot"), Ok(Some("kept".to_owned())));
    }
}
