//! Validators for the account and reference fields of a bill.
//!
//! All checks ignore spaces, which are only a display convenience for
//! IBANs and references.
//!
//! - IBAN: structural check only (length, alphabetic country code, digits).
//!   The ISO 7064 mod 97 checksum is not verified.
//! - QR reference: 26 digits plus a mod 10 recursive check digit.
//! - Creditor reference: ISO 11649 (`RF` + 2 check digits + up to 21
//!   alphanumerics), mod 97-10.

use crate::billing::ReferenceType;
use crate::error::ValidationError;
use std::str::FromStr;

const IBAN_LEN: usize = 21;
const COUNTRY_ID_LEN: usize = 2;

const QR_REFERENCE_LEN: usize = 27;
const QR_REFERENCE_BODY_LEN: usize = QR_REFERENCE_LEN - 1;

const CREDITOR_PREFIX: [char; 2] = ['R', 'F'];
const CREDITOR_HEADER_LEN: usize = 4;
const CREDITOR_PAYLOAD_MAX_LEN: usize = 21;

/// Transition table of the mod 10 recursive check digit.
///
/// Row is the running state, column the next digit.
static QR_MATRIX: [[u8; 10]; 10] = [
    [0, 9, 4, 6, 8, 2, 7, 1, 3, 5],
    [9, 4, 6, 8, 2, 7, 1, 3, 5, 0],
    [4, 6, 8, 2, 7, 1, 3, 5, 0, 9],
    [6, 8, 2, 7, 1, 3, 5, 0, 9, 4],
    [8, 2, 7, 1, 3, 5, 0, 9, 4, 6],
    [2, 7, 1, 3, 5, 0, 9, 4, 6, 8],
    [7, 1, 3, 5, 0, 9, 4, 6, 8, 2],
    [1, 3, 5, 0, 9, 4, 6, 8, 2, 7],
    [3, 5, 0, 9, 4, 6, 8, 2, 7, 1],
    [5, 0, 9, 4, 6, 8, 2, 7, 1, 3],
];

/// Removes every space character.
pub fn strip_spaces(value: &str) -> String {
    value.chars().filter(|c| *c != ' ').collect()
}

/// Checks the structure of a Swiss/Liechtenstein IBAN.
///
/// After removing spaces the IBAN must be 21 characters: two non-digit
/// country characters followed by 19 digits.
///
/// # Examples
///
/// ```
/// use swiss_qr_bill::validate::validate_iban;
///
/// assert!(validate_iban("CH10 2345 6744 2356 3555 2").is_ok());
/// assert!(validate_iban("CH00 1111 2222 3333 4444").is_err());
/// ```
pub fn validate_iban(iban: &str) -> Result<(), ValidationError> {
    let chars: Vec<char> = strip_spaces(iban).chars().collect();

    if chars.len() != IBAN_LEN {
        return Err(ValidationError::Length {
            field: "IBAN",
            expected: IBAN_LEN,
            found: chars.len(),
        });
    }

    for (position, &c) in chars.iter().enumerate() {
        let in_country_id = position < COUNTRY_ID_LEN;
        if c.is_ascii_digit() == in_country_id {
            return Err(ValidationError::Format {
                field: "IBAN",
                position,
                found: c,
            });
        }
    }

    Ok(())
}

/// Checks that `reference` is valid for the given reference type.
pub fn validate_reference(
    reference_type: ReferenceType,
    reference: &str,
) -> Result<(), ValidationError> {
    let reference = strip_spaces(reference);

    match reference_type {
        ReferenceType::NoReference => {
            if reference.is_empty() {
                Ok(())
            } else {
                Err(ValidationError::UnexpectedReference(reference))
            }
        }
        ReferenceType::QrReference => validate_qr_reference(&reference),
        ReferenceType::CreditorReference => validate_creditor_reference(&reference),
    }
}

/// Same as [`validate_reference`] with the reference type given by its
/// payload code (`NON`, `SCOR`, `QRR`).
pub fn validate_reference_code(code: &str, reference: &str) -> Result<(), ValidationError> {
    let reference_type = ReferenceType::from_str(code)?;
    validate_reference(reference_type, reference)
}

/// Checks length, digits and check digit of a 27-digit QR reference.
pub fn validate_qr_reference(reference: &str) -> Result<(), ValidationError> {
    let chars: Vec<char> = strip_spaces(reference).chars().collect();

    if chars.len() != QR_REFERENCE_LEN {
        return Err(ValidationError::Length {
            field: "QR reference",
            expected: QR_REFERENCE_LEN,
            found: chars.len(),
        });
    }

    let body: String = chars[..QR_REFERENCE_BODY_LEN].iter().collect();
    let expected = qr_reference_check_digit(&body)?;
    let actual = chars[QR_REFERENCE_BODY_LEN];

    if actual.to_digit(10) != Some(u32::from(expected)) {
        return Err(ValidationError::Checksum {
            field: "QR reference",
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    Ok(())
}

/// Computes the check digit for the first 26 digits of a QR reference.
///
/// # Examples
///
/// ```
/// use swiss_qr_bill::validate::qr_reference_check_digit;
///
/// assert_eq!(qr_reference_check_digit("21 00000 00003 13947 14300 0901").unwrap(), 7);
/// ```
pub fn qr_reference_check_digit(body: &str) -> Result<u8, ValidationError> {
    let chars: Vec<char> = strip_spaces(body).chars().collect();

    if chars.len() != QR_REFERENCE_BODY_LEN {
        return Err(ValidationError::Length {
            field: "QR reference body",
            expected: QR_REFERENCE_BODY_LEN,
            found: chars.len(),
        });
    }

    let mut z: u8 = 0;
    for (position, &c) in chars.iter().enumerate() {
        let digit = c.to_digit(10).ok_or_else(|| ValidationError::Format {
            field: "QR reference",
            position,
            found: c,
        })?;
        z = QR_MATRIX[usize::from(z)][digit as usize];
    }

    Ok((10 - z) % 10)
}

/// Checks an ISO 11649 creditor reference (`RF18 5390 0754 7034`).
///
/// Letters are accepted in either case.
pub fn validate_creditor_reference(reference: &str) -> Result<(), ValidationError> {
    let chars: Vec<char> = strip_spaces(reference)
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .collect();

    let min = CREDITOR_HEADER_LEN + 1;
    let max = CREDITOR_HEADER_LEN + CREDITOR_PAYLOAD_MAX_LEN;
    if chars.len() < min || chars.len() > max {
        return Err(ValidationError::LengthOutOfRange {
            field: "creditor reference",
            min,
            max,
            found: chars.len(),
        });
    }

    for (position, &c) in chars.iter().enumerate() {
        let valid = match position {
            0 | 1 => c == CREDITOR_PREFIX[position],
            2 | 3 => c.is_ascii_digit(),
            _ => c.is_ascii_alphanumeric(),
        };
        if !valid {
            return Err(ValidationError::Format {
                field: "creditor reference",
                position,
                found: c,
            });
        }
    }

    // header moves to the end before taking the remainder
    let rearranged = chars[CREDITOR_HEADER_LEN..]
        .iter()
        .chain(&chars[..CREDITOR_HEADER_LEN]);
    if mod97(rearranged) != 1 {
        let payload: String = chars[CREDITOR_HEADER_LEN..].iter().collect();
        let expected = creditor_reference_check_digits(&payload)?;
        return Err(ValidationError::Checksum {
            field: "creditor reference",
            expected: format!("{:02}", expected),
            actual: chars[2..CREDITOR_HEADER_LEN].iter().collect(),
        });
    }

    Ok(())
}

/// Computes the two ISO 11649 check digits for a reference payload.
///
/// The full reference is `RF`, the check digits (zero padded to two
/// places) and the payload.
///
/// # Examples
///
/// ```
/// use swiss_qr_bill::validate::creditor_reference_check_digits;
///
/// assert_eq!(creditor_reference_check_digits("539007547034").unwrap(), 18);
/// ```
pub fn creditor_reference_check_digits(payload: &str) -> Result<u8, ValidationError> {
    let chars: Vec<char> = strip_spaces(payload)
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if chars.is_empty() || chars.len() > CREDITOR_PAYLOAD_MAX_LEN {
        return Err(ValidationError::LengthOutOfRange {
            field: "creditor reference payload",
            min: 1,
            max: CREDITOR_PAYLOAD_MAX_LEN,
            found: chars.len(),
        });
    }

    if let Some((position, &c)) = chars
        .iter()
        .enumerate()
        .find(|(_, c)| !c.is_ascii_alphanumeric())
    {
        return Err(ValidationError::Format {
            field: "creditor reference payload",
            position,
            found: c,
        });
    }

    let placeholder = ['R', 'F', '0', '0'];
    let remainder = mod97(chars.iter().chain(placeholder.iter()));
    Ok(98 - remainder)
}

/// Remainder mod 97 of the number formed by replacing letters with 10..=35.
///
/// Callers guarantee ASCII alphanumeric input.
fn mod97<'a>(chars: impl Iterator<Item = &'a char>) -> u8 {
    let mut remainder: u32 = 0;
    for c in chars {
        let value = c.to_digit(36).unwrap_or(0);
        let shift = if value >= 10 { 100 } else { 10 };
        remainder = (remainder * shift + value) % 97;
    }
    remainder as u8
}
