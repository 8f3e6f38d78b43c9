//! Validation of the raw values typed into the transaction form.
//!
//! Each field has its own validator and each invalid field gets exactly one
//! message.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The raw text the user entered in the transaction form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormValues {
    /// What the transaction was for, e.g. "Lunch".
    #[serde(default)]
    pub name: String,
    /// The transaction value as typed, e.g. "42.50".
    #[serde(default)]
    pub amount: String,
}

/// Why a single form field was rejected.
///
/// The display text is the message shown next to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The name was left empty.
    #[error("Name is required")]
    NameRequired,
    /// The amount was left empty.
    #[error("Amount is required")]
    AmountRequired,
    /// The amount is not a number.
    #[error("Enter a numeric value")]
    AmountNotNumeric,
    /// The amount is zero or negative.
    #[error("The amount must be positive")]
    AmountNotPositive,
    /// The amount is greater than [MAX_AMOUNT].
    #[error("The amount must be at most 1,000,000,000,000")]
    AmountTooLarge,
}

/// The largest amount a single transaction may have.
///
/// Keeps the income and outcome sums far from the limits of [Decimal].
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// The per-field errors from a validation run.
///
/// A `None` field passed validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// The error for the name field, if any.
    pub name: Option<FieldError>,
    /// The error for the amount field, if any.
    pub amount: Option<FieldError>,
}

impl FieldErrors {
    /// Whether every field passed validation.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none()
    }
}

/// A non-empty transaction name with surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionName(String);

impl TransactionName {
    /// Create a transaction name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for TransactionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionName {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_name(s)
    }
}

/// A strictly positive decimal amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    /// Create an amount without validation.
    ///
    /// The caller should ensure that `value` is greater than zero.
    pub fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }

    /// The amount as a decimal number.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_amount(s)
    }
}

/// The form values after every field has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidForm {
    /// The validated name.
    pub name: TransactionName,
    /// The validated amount.
    pub amount: Amount,
}

/// Check that a name was entered.
///
/// # Errors
/// Returns [FieldError::NameRequired] if `raw` is empty or only whitespace.
pub fn validate_name(raw: &str) -> Result<TransactionName, FieldError> {
    let name = raw.trim();

    if name.is_empty() {
        Err(FieldError::NameRequired)
    } else {
        Ok(TransactionName(name.to_owned()))
    }
}

/// Whether `raw` is an optionally signed number in plain decimal notation
/// ("42.50") or scientific notation ("1.5e3").
fn is_number(raw: &str) -> bool {
    fn skip_digits(s: &str) -> (usize, &str) {
        let rest = s.trim_start_matches(|c: char| c.is_ascii_digit());
        (s.len() - rest.len(), rest)
    }

    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let (integer_digits, rest) = skip_digits(unsigned);
    if integer_digits == 0 {
        return false;
    }

    let rest = match rest.strip_prefix('.') {
        Some(fraction) => match skip_digits(fraction) {
            (0, _) => return false,
            (_, rest) => rest,
        },
        None => rest,
    };

    match rest.strip_prefix(['e', 'E']) {
        Some(exponent) => {
            let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
            matches!(skip_digits(exponent), (digits, "") if digits > 0)
        }
        None => rest.is_empty(),
    }
}

/// Check that `raw` is a number greater than zero and at most [MAX_AMOUNT].
///
/// Both plain decimal notation ("42.50") and scientific notation ("1e3") are
/// accepted.
///
/// # Errors
/// - [FieldError::AmountRequired] if `raw` is empty or only whitespace,
/// - [FieldError::AmountNotNumeric] if `raw` is not a number,
/// - [FieldError::AmountNotPositive] if the number is zero, negative or too
///   small to be represented,
/// - [FieldError::AmountTooLarge] if the number is greater than [MAX_AMOUNT].
pub fn validate_amount(raw: &str) -> Result<Amount, FieldError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(FieldError::AmountRequired);
    }

    if !is_number(raw) {
        return Err(FieldError::AmountNotNumeric);
    }

    // Range checks use a float so that numbers outside of what a Decimal can
    // hold are still classified correctly.
    let approximate = raw
        .parse::<f64>()
        .map_err(|_| FieldError::AmountNotNumeric)?;

    if approximate <= 0.0 {
        return Err(FieldError::AmountNotPositive);
    }

    if approximate > 1e12 {
        return Err(FieldError::AmountTooLarge);
    }

    let value = Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or(Decimal::ZERO);

    if value <= Decimal::ZERO {
        return Err(FieldError::AmountNotPositive);
    }

    if value > MAX_AMOUNT {
        return Err(FieldError::AmountTooLarge);
    }

    Ok(Amount(value))
}

/// Validate every field of the transaction form.
///
/// # Errors
/// Returns the per-field errors if any field is invalid.
pub fn validate(values: &FormValues) -> Result<ValidForm, FieldErrors> {
    match (validate_name(&values.name), validate_amount(&values.amount)) {
        (Ok(name), Ok(amount)) => Ok(ValidForm { name, amount }),
        (name, amount) => Err(FieldErrors {
            name: name.err(),
            amount: amount.err(),
        }),
    }
}
