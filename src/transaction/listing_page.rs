//! Defines the listing page that shows the saved transactions.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use time::{UtcOffset, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error, endpoints,
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::{
        category::find_category,
        domain::{Transaction, TransactionType},
        gateway::load_all,
    },
};

/// The state needed for the listing page.
#[derive(Debug, Clone)]
pub struct TransactionsPageState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The database connection holding the transaction collection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The sums shown above the transaction table.
#[derive(Debug, Default, PartialEq, Eq)]
struct Highlights {
    income: Decimal,
    outcome: Decimal,
}

impl Highlights {
    /// Income minus outcome.
    ///
    /// Both sums are non-negative so the difference always fits in a [Decimal].
    fn total(&self) -> Decimal {
        self.income - self.outcome
    }
}

/// Sum the income and outcome of `transactions`.
///
/// # Errors
/// Returns [Error::TotalsOverflow] if either sum does not fit in a [Decimal].
/// Validated amounts cannot get there, but the stored collection may have been
/// edited outside of the app.
fn summarize(transactions: &[Transaction]) -> Result<Highlights, Error> {
    transactions
        .iter()
        .try_fold(Highlights::default(), |mut highlights, transaction| {
            let sum = match transaction.type_ {
                TransactionType::Positive => &mut highlights.income,
                TransactionType::Negative => &mut highlights.outcome,
            };
            *sum = sum
                .checked_add(transaction.amount.value())
                .ok_or(Error::TotalsOverflow)?;

            Ok(highlights)
        })
}

fn currency(amount: Decimal) -> String {
    format_currency(amount.to_f64().unwrap_or_default())
}

const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:zero]/[month repr:numerical padding:zero]/[year]");

fn format_date(transaction: &Transaction, local_offset: UtcOffset) -> String {
    let date = transaction.date.to_offset(local_offset).date();

    date.format(DATE_FORMAT).unwrap_or_else(|_| date.to_string())
}

/// Render the saved transactions in the order they were added.
///
/// # Errors
/// Returns an error page if the timezone is invalid, the database lock could
/// not be acquired or the stored transactions are malformed.
pub async fn get_transactions_page(
    State(state): State<TransactionsPageState>,
) -> Result<Response, Error> {
    let local_offset = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!(
            "could not get local time offset from timezone {}",
            &state.local_timezone
        );
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        load_all(&*connection)?
    };

    let highlights = summarize(&transactions)
        .inspect_err(|error| tracing::error!("could not total the saved transactions: {error}"))?;

    Ok(transactions_view(&transactions, &highlights, local_offset).into_response())
}

fn highlight_card(title: &str, amount: Decimal, style: &str) -> Markup {
    html! {
        div class={ "rounded-lg p-4 shadow " (style) }
        {
            p class="text-sm" { (title) }
            p class="text-2xl font-medium" { (currency(amount)) }
        }
    }
}

fn transactions_view(
    transactions: &[Transaction],
    highlights: &Highlights,
    local_offset: UtcOffset,
) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="self-start mb-6 text-xl font-bold" { "Listing" }

            section class="grid w-full grid-cols-1 gap-4 mb-6 sm:grid-cols-3"
            {
                (highlight_card("Income", highlights.income, "bg-white dark:bg-gray-800"))
                (highlight_card("Outcome", highlights.outcome, "bg-white dark:bg-gray-800"))
                (highlight_card("Total", highlights.total(), "bg-blue-600 text-white"))
            }

            @if transactions.is_empty() {
                p class="text-center text-gray-500 dark:text-gray-400"
                {
                    "No transactions yet. Register one "
                    a href=(endpoints::REGISTER_VIEW) class=(LINK_STYLE) { "here" }
                    "."
                }
            } @else {
                div class="w-full overflow-x-auto rounded shadow"
                {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row(transaction, local_offset))
                            }
                        }
                    }
                }
            }
        }
    };

    base("Listing", &content)
}

fn transaction_row(transaction: &Transaction, local_offset: UtcOffset) -> Markup {
    let (amount, amount_style) = match transaction.type_ {
        TransactionType::Positive => (
            currency(transaction.amount.value()),
            "text-green-600 dark:text-green-400",
        ),
        TransactionType::Negative => (
            currency(-transaction.amount.value()),
            "text-red-600 dark:text-red-400",
        ),
    };
    let category = find_category(&transaction.category)
        .map(|category| category.name)
        .unwrap_or(transaction.category.as_str());

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id.to_string())
        {
            th scope="row" class={ (TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white" }
            {
                (transaction.name.to_string())
            }
            td class={ (TABLE_CELL_STYLE) " " (amount_style) } { (amount) }
            td class=(TABLE_CELL_STYLE) { (category) }
            td class=(TABLE_CELL_STYLE) { (format_date(transaction, local_offset)) }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use scraper::Selector;
    use time::{UtcOffset, macros::datetime};

    use crate::{
        Error,
        db::initialize,
        storage::KeyValueStore,
        test_utils::{assert_valid_html, parse_html_document},
        transaction::{
            category::find_category,
            domain::{Transaction, TransactionType},
            gateway::{TRANSACTIONS_STORAGE_KEY, append_and_save},
            validation::{Amount, TransactionName, ValidForm},
        },
    };

    use super::{Highlights, TransactionsPageState, format_date, get_transactions_page, summarize};

    fn get_state(local_timezone: &str) -> TransactionsPageState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        TransactionsPageState {
            local_timezone: local_timezone.to_owned(),
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn transaction(name: &str, cents: i64, type_: TransactionType, category: &str) -> Transaction {
        Transaction::build(
            ValidForm {
                name: TransactionName::new_unchecked(name),
                amount: Amount::new_unchecked(Decimal::new(cents, 2)),
            },
            type_,
            find_category(category).unwrap(),
        )
        .date(datetime!(2024-03-01 23:30:00 UTC))
        .finalise()
    }

    #[test]
    fn summarize_splits_income_and_outcome() {
        let transactions = vec![
            transaction("Salary", 150000, TransactionType::Positive, "salary"),
            transaction("Lunch", 4250, TransactionType::Negative, "food"),
            transaction("Fuel", 8000, TransactionType::Negative, "car"),
        ];

        let highlights = summarize(&transactions).unwrap();

        assert_eq!(
            highlights,
            Highlights {
                income: Decimal::new(150000, 2),
                outcome: Decimal::new(12250, 2),
            }
        );
        assert_eq!(highlights.total(), Decimal::new(137750, 2));
    }

    #[test]
    fn dates_are_shown_in_local_time() {
        let lunch = transaction("Lunch", 4250, TransactionType::Negative, "food");
        let auckland = UtcOffset::from_hms(13, 0, 0).unwrap();

        assert_eq!(format_date(&lunch, UtcOffset::UTC), "01/03/2024");
        assert_eq!(format_date(&lunch, auckland), "02/03/2024");
    }

    #[tokio::test]
    async fn lists_transactions_in_insertion_order() {
        let state = get_state("Etc/UTC");
        {
            let connection = state.db_connection.lock().unwrap();
            for (name, type_, category) in [
                ("Salary", TransactionType::Positive, "salary"),
                ("Lunch", TransactionType::Negative, "food"),
                ("Books", TransactionType::Negative, "studies"),
            ] {
                append_and_save(transaction(name, 1000, type_, category), &*connection).unwrap();
            }
        }

        let response = get_transactions_page(State(state)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let names = html
            .select(&Selector::parse("tbody tr th").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Salary", "Lunch", "Books"]);

        let categories = html
            .select(&Selector::parse("tbody tr td:nth-child(3)").unwrap())
            .map(|cell| cell.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(categories, vec!["Salary", "Food", "Studies"]);
    }

    #[tokio::test]
    async fn empty_collection_shows_prompt() {
        let response = get_transactions_page(State(get_state("Etc/UTC")))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert!(html.select(&Selector::parse("table").unwrap()).next().is_none());
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No transactions yet"), "got {text:?}");
    }

    #[tokio::test]
    async fn malformed_storage_is_an_error() {
        let state = get_state("Etc/UTC");
        state
            .db_connection
            .lock()
            .unwrap()
            .set_item(TRANSACTIONS_STORAGE_KEY, "not json")
            .unwrap();

        let result = get_transactions_page(State(state)).await;

        assert!(matches!(result, Err(Error::DeserializationError(_))));
    }

    #[test]
    fn summarize_reports_overflow() {
        let huge = |type_| {
            let mut transaction = transaction("Jackpot", 1, type_, "salary");
            transaction.amount = Amount::new_unchecked(Decimal::MAX);
            transaction
        };

        for type_ in [TransactionType::Positive, TransactionType::Negative] {
            assert_eq!(
                summarize(&[huge(type_), huge(type_)]),
                Err(Error::TotalsOverflow)
            );
        }
    }

    #[tokio::test]
    async fn overflowing_totals_are_an_error() {
        let state = get_state("Etc/UTC");
        {
            let connection = state.db_connection.lock().unwrap();
            for _ in 0..2 {
                let mut jackpot = transaction("Jackpot", 1, TransactionType::Positive, "salary");
                jackpot.amount = Amount::new_unchecked(Decimal::MAX);
                append_and_save(jackpot, &*connection).unwrap();
            }
        }

        let result = get_transactions_page(State(state)).await;

        assert_eq!(result.map(|_| ()), Err(Error::TotalsOverflow));
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let result = get_transactions_page(State(get_state("Middle/Earth"))).await;

        assert_eq!(
            result.map(|_| ()),
            Err(Error::InvalidTimezoneError("Middle/Earth".to_owned()))
        );
    }
}
