//! Swiss Payment Code (SPC) text codec.
//!
//! A payment code is exactly 31 newline separated lines, addressed purely by
//! position:
//!
//! ```text
//!  0     SPC                       header
//!  1     0200                      version
//!  2     1                         coding type (UTF-8)
//!  3     IBAN
//!  4-10  creditor                  type, name, address 1, address 2, zip, location, country
//! 11-17  final beneficiary         same seven lines, normally empty
//! 18     amount                    two decimals
//! 19     currency                  CHF or EUR
//! 20-26  debtor                    same seven lines
//! 27     reference type            NON, SCOR or QRR
//! 28     reference
//! 29     additional information
//! 30     EPD                       trailer
//! ```
//!
//! The format has no escaping: free text fields must not contain newlines,
//! and in a `\r\n` payload a trailing `\r` counts as part of the newline.
//! Encoding never validates. Decoding checks structure and the IBAN, but
//! leaves the reference check to the caller ([`SwissPaymentCode::validate`]).

use crate::amount::Amount;
use crate::billing::{BillingDetails, Currency, ReferenceType};
use crate::error::{Error, Result, ValidationError};
use crate::party::AddressParty;
use crate::validate::{strip_spaces, validate_iban};
use log::debug;
use std::fmt;
use std::str::FromStr;

/// QR type of a Swiss Payment Code.
pub const QR_TYPE: &str = "SPC";

/// Supported payload version (2.0).
pub const VERSION: &str = "0200";

/// Coding type 1, UTF-8 restricted to the Latin character set.
pub const CODING_TYPE: &str = "1";

/// End Payment Data.
pub const TRAILER: &str = "EPD";

/// Number of lines in a payload.
pub const LINE_COUNT: usize = 31;

const IBAN_LINE: usize = 3;
const ISSUER_LINE: usize = 4;
const FINAL_BENEFICIARY_LINE: usize = ISSUER_LINE + AddressParty::LINES;
const AMOUNT_LINE: usize = FINAL_BENEFICIARY_LINE + AddressParty::LINES;
const CURRENCY_LINE: usize = AMOUNT_LINE + 1;
const DEBTOR_LINE: usize = CURRENCY_LINE + 1;
const REFERENCE_TYPE_LINE: usize = DEBTOR_LINE + AddressParty::LINES;
const REFERENCE_LINE: usize = REFERENCE_TYPE_LINE + 1;
const ADDITIONAL_INFO_LINE: usize = REFERENCE_LINE + 1;
const TRAILER_LINE: usize = ADDITIONAL_INFO_LINE + 1;

/// A complete payment code: creditor, final beneficiary, debtor and billing details.
///
/// Built once per bill and not modified afterwards. The header and trailer
/// are constants and therefore not stored.
///
/// # Example
///
/// ```
/// use std::str::FromStr;
/// use swiss_qr_bill::{AddressParty, Amount, BillingDetails, Currency, ReferenceType, SwissPaymentCode};
///
/// let details = BillingDetails {
///     iban: "CH5409000000158505807".to_string(),
///     reference_type: ReferenceType::NoReference,
///     reference: String::new(),
///     additional_info: "Invoice 42".to_string(),
///     currency: Currency::Chf,
///     amount: Amount::from_str("12.5").unwrap(),
/// };
/// let code = SwissPaymentCode::new(AddressParty::default(), AddressParty::default(), details);
///
/// let payload = code.to_payload();
/// assert_eq!(payload.lines().count(), 31);
/// assert_eq!(SwissPaymentCode::from_str(&payload).unwrap(), code);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwissPaymentCode {
    issuer: AddressParty,
    final_beneficiary: AddressParty,
    debtor: AddressParty,
    details: BillingDetails,
}

impl SwissPaymentCode {
    /// Creates a payment code without a final beneficiary.
    pub fn new(issuer: AddressParty, debtor: AddressParty, details: BillingDetails) -> Self {
        SwissPaymentCode {
            issuer,
            final_beneficiary: AddressParty::default(),
            debtor,
            details,
        }
    }

    /// Returns the same payment code with the given final beneficiary.
    pub fn with_final_beneficiary(self, final_beneficiary: AddressParty) -> Self {
        SwissPaymentCode {
            final_beneficiary,
            ..self
        }
    }

    /// Creditor account
    pub fn iban(&self) -> &str {
        &self.details.iban
    }

    /// Creditor
    pub fn issuer(&self) -> &AddressParty {
        &self.issuer
    }

    pub fn final_beneficiary(&self) -> &AddressParty {
        &self.final_beneficiary
    }

    /// Debtor (payable by)
    pub fn debtor(&self) -> &AddressParty {
        &self.debtor
    }

    pub fn details(&self) -> &BillingDetails {
        &self.details
    }

    /// Consumes the code, returning issuer, final beneficiary, debtor and details.
    pub fn into_parts(self) -> (AddressParty, AddressParty, AddressParty, BillingDetails) {
        (self.issuer, self.final_beneficiary, self.debtor, self.details)
    }

    /// Runs the IBAN and reference validators on the billing details.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        self.details.validate()
    }

    /// Serializes into the 31-line payload text.
    pub fn to_payload(&self) -> String {
        encode(
            &self.issuer,
            &self.final_beneficiary,
            &self.debtor,
            &self.details,
        )
    }
}

impl fmt::Display for SwissPaymentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_payload())
    }
}

impl FromStr for SwissPaymentCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        decode(s)
    }
}

/// Builds the payload text for the given parties and billing details.
///
/// Spaces are removed from the IBAN and the reference. Lines are joined with
/// `\n`; there is no newline after the trailer. Nothing is validated here.
pub fn encode(
    issuer: &AddressParty,
    final_beneficiary: &AddressParty,
    debtor: &AddressParty,
    details: &BillingDetails,
) -> String {
    let iban = strip_spaces(&details.iban);
    let amount = details.amount.to_string();
    let reference = strip_spaces(&details.reference);

    let mut lines: Vec<&str> = Vec::with_capacity(LINE_COUNT);
    lines.extend([QR_TYPE, VERSION, CODING_TYPE, iban.as_str()]);
    issuer.push_lines(&mut lines);
    final_beneficiary.push_lines(&mut lines);
    lines.push(&amount);
    lines.push(details.currency.code());
    debtor.push_lines(&mut lines);
    lines.push(details.reference_type.code());
    lines.push(&reference);
    lines.push(&details.additional_info);
    lines.push(TRAILER);

    debug_assert_eq!(lines.len(), LINE_COUNT);
    lines.join("\n")
}

/// Parses payload text back into a [`SwissPaymentCode`].
///
/// Accepts `\n` or `\r\n` line endings and one trailing line terminator
/// after the trailer, as appended by most QR readers. The line ending is
/// taken from the header line: only a `\r\n` payload has `\r` stripped, so
/// a `\n` payload keeps a `\r` that ends a free text field.
pub fn decode(text: &str) -> Result<SwissPaymentCode> {
    let crlf = text
        .split('\n')
        .next()
        .map_or(false, |first| first.ends_with('\r'));
    let terminator = if crlf { "\r\n" } else { "\n" };
    let text = text.strip_suffix(terminator).unwrap_or(text);

    let lines: Vec<&str> = text.split(terminator).collect();
    let lines: [&str; LINE_COUNT] = lines.try_into().map_err(|lines: Vec<&str>| Error::LineCount {
        expected: LINE_COUNT,
        found: lines.len(),
    })?;

    expect_literal(&lines, 0, "QR type", QR_TYPE)?;
    expect_literal(&lines, 1, "version", VERSION)?;
    expect_literal(&lines, 2, "coding type", CODING_TYPE)?;
    expect_literal(&lines, TRAILER_LINE, "trailer", TRAILER)?;

    let iban = lines[IBAN_LINE];
    validate_iban(iban).map_err(Error::Iban)?;

    let issuer = party_at(&lines, ISSUER_LINE)?;
    let final_beneficiary = party_at(&lines, FINAL_BENEFICIARY_LINE)?;

    let amount = amount_at(&lines, AMOUNT_LINE)?;
    let currency = Currency::from_str(lines[CURRENCY_LINE]).map_err(|message| Error::Parse {
        line: CURRENCY_LINE,
        message,
    })?;

    let debtor = party_at(&lines, DEBTOR_LINE)?;

    let reference_type =
        ReferenceType::from_str(lines[REFERENCE_TYPE_LINE]).map_err(|e| Error::Parse {
            line: REFERENCE_TYPE_LINE,
            message: e.to_string(),
        })?;

    let details = BillingDetails {
        iban: iban.to_string(),
        reference_type,
        reference: lines[REFERENCE_LINE].to_string(),
        additional_info: lines[ADDITIONAL_INFO_LINE].to_string(),
        currency,
        amount,
    };

    debug!(
        "Decoded payment code for {} over {} {}",
        details.iban, details.amount, details.currency
    );

    Ok(SwissPaymentCode {
        issuer,
        final_beneficiary,
        debtor,
        details,
    })
}

fn expect_literal(
    lines: &[&str; LINE_COUNT],
    line: usize,
    field: &'static str,
    expected: &'static str,
) -> Result<()> {
    if lines[line] == expected {
        Ok(())
    } else {
        Err(Error::Format {
            line,
            field,
            expected,
            found: lines[line].to_string(),
        })
    }
}

/// Parses the amount line exactly as encode writes it: digits, optionally
/// followed by `.` and one or two digits.
fn amount_at(lines: &[&str; LINE_COUNT], line: usize) -> Result<Amount> {
    let text = lines[line];
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let well_formed = match text.split_once('.') {
        Some((units, cents)) => is_digits(units) && is_digits(cents) && cents.len() <= 2,
        None => is_digits(text),
    };
    if !well_formed {
        return Err(Error::Parse {
            line,
            message: format!("malformed amount '{}'", text),
        });
    }

    Amount::from_str(text).map_err(|e| Error::Parse {
        line,
        message: e.to_string(),
    })
}

fn party_at(lines: &[&str; LINE_COUNT], first_line: usize) -> Result<AddressParty> {
    AddressParty::from_lines(
        &lines[first_line..first_line + AddressParty::LINES],
        first_line,
    )
}
