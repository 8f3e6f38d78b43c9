use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Duration, OffsetDateTime};

use gofinances::{
    Amount, Transaction, TransactionName, TransactionType, ValidForm, append_and_save,
    find_category, initialize_db,
};

/// A utility for creating a test database for the GoFinances web server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample transactions...");

    let samples = [
        ("Salary", 350000, TransactionType::Positive, "salary"),
        ("Groceries", 18990, TransactionType::Negative, "purchases"),
        ("Lunch", 4250, TransactionType::Negative, "food"),
        ("Fuel", 8000, TransactionType::Negative, "car"),
        ("Cinema", 3000, TransactionType::Negative, "leisure"),
        ("Rust course", 12900, TransactionType::Negative, "studies"),
    ];
    let now = OffsetDateTime::now_utc();
    let count = samples.len() as i64;

    // Oldest first so the saved order matches the dates.
    for (index, (name, cents, transaction_type, category_key)) in (0_i64..).zip(samples) {
        let days_ago = count - 1 - index;
        let category = find_category(category_key)
            .ok_or_else(|| format!("unknown category {category_key}"))?;

        let transaction = Transaction::build(
            ValidForm {
                name: TransactionName::new_unchecked(name),
                amount: Amount::new_unchecked(Decimal::new(cents, 2)),
            },
            transaction_type,
            category,
        )
        .date(now - Duration::days(days_ago))
        .finalise();

        append_and_save(transaction, &conn)?;
    }

    println!("Success!");

    Ok(())
}
