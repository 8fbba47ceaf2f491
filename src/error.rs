//! Error types for the payment code codec and validators.

use rust_decimal::Decimal;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a field fails validation.
///
/// Returned by the validators in [`crate::validate`] and by [`crate::Amount`]
/// construction. `field` names the checked value (`"IBAN"`, `"QR reference"`, ...).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Value has the wrong number of characters after removing spaces
    #[error("{field} must be {expected} characters long, got {found}")]
    Length {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    /// Value is shorter or longer than its format allows
    #[error("{field} must be {min} to {max} characters long, got {found}")]
    LengthOutOfRange {
        field: &'static str,
        min: usize,
        max: usize,
        found: usize,
    },

    /// Character of the wrong class at the given position
    #[error("{field} has an invalid character '{found}' at position {position}")]
    Format {
        field: &'static str,
        position: usize,
        found: char,
    },

    /// Check digits do not match the computed value
    #[error("{field} checksum mismatch (is: {actual}, should: {expected})")]
    Checksum {
        field: &'static str,
        expected: String,
        actual: String,
    },

    /// A reference was supplied for the `NON` reference type
    #[error("reference '{0}' set for reference type NON")]
    UnexpectedReference(String),

    /// Reference type code is not one of NON, SCOR, QRR
    #[error("unknown reference type '{0}'")]
    UnknownReferenceType(String),

    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("malformed amount '{0}'")]
    MalformedAmount(String),
}

/// Errors produced while encoding, decoding or processing bill batches.
#[derive(Error, Debug)]
pub enum Error {
    /// A fixed literal (header or trailer) does not match
    #[error("line {line}: {field} should be '{expected}', got '{found}'")]
    Format {
        line: usize,
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    /// Payload does not have exactly the expected number of lines
    #[error("payment code must have {expected} lines, got {found}")]
    LineCount { expected: usize, found: usize },

    /// IBAN line rejected by the IBAN validator
    #[error("invalid IBAN: {0}")]
    Iban(#[source] ValidationError),

    /// A typed line (amount, currency, code) could not be parsed
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Record-level validation failure
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Failed to open or read an input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Unusable CSV record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Missing command or command argument
    #[error("Missing argument. Usage: swiss-qr-bill encode <issuer.csv> <bills.csv> | decode <payload.txt> | check-digit <reference>")]
    MissingArgument,

    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
}
