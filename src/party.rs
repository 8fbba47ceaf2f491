//! Address participants of a payment code.
//!
//! Every party occupies exactly seven consecutive lines in the payload,
//! in the order of [`AddressParty::LINES`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the address lines of a party are to be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressType {
    /// Street and building in address line 1, postal code and town in their own fields.
    #[serde(rename = "S")]
    Structured,

    /// Two free address lines.
    #[serde(rename = "K")]
    Combined,
}

impl AddressType {
    /// The one-letter code written to the payload.
    pub fn code(&self) -> &'static str {
        match self {
            AddressType::Structured => "S",
            AddressType::Combined => "K",
        }
    }
}

impl fmt::Display for AddressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AddressType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "S" => Ok(AddressType::Structured),
            "K" => Ok(AddressType::Combined),
            other => Err(format!("unknown address type '{}'", other)),
        }
    }
}

/// Creditor, final beneficiary or debtor of a bill.
///
/// Empty fields are kept as empty strings and still take up their line in
/// the payload. A party without an address type is an absent party (the
/// final beneficiary is always absent in practice).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParty {
    /// `S` or `K`, empty for an absent party.
    pub address_type: Option<AddressType>,

    /// Last name and first name, or company name.
    pub name: String,

    pub address1: String,

    #[serde(default)]
    pub address2: String,

    /// Postal code
    pub zip: String,

    /// Town or city
    pub location: String,

    pub country: String,
}

impl AddressParty {
    /// Number of payload lines taken by one party.
    pub const LINES: usize = 7;

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.address_type.is_none()
            && self.name.is_empty()
            && self.address1.is_empty()
            && self.address2.is_empty()
            && self.zip.is_empty()
            && self.location.is_empty()
            && self.country.is_empty()
    }

    /// Appends the seven payload lines of this party.
    pub(crate) fn push_lines<'a>(&'a self, lines: &mut Vec<&'a str>) {
        lines.push(self.address_type.map(|t| t.code()).unwrap_or(""));
        lines.push(&self.name);
        lines.push(&self.address1);
        lines.push(&self.address2);
        lines.push(&self.zip);
        lines.push(&self.location);
        lines.push(&self.country);
    }

    /// Builds a party from its seven payload lines.
    ///
    /// `first_line` is the payload index of `lines[0]` and is only used for
    /// error reporting.
    pub(crate) fn from_lines(lines: &[&str], first_line: usize) -> Result<Self> {
        let [address_type, name, address1, address2, zip, location, country] = lines else {
            return Err(Error::Parse {
                line: first_line,
                message: format!(
                    "expected {} address lines, got {}",
                    Self::LINES,
                    lines.len()
                ),
            });
        };

        let address_type = match *address_type {
            "" => None,
            code => Some(AddressType::from_str(code).map_err(|message| Error::Parse {
                line: first_line,
                message,
            })?),
        };

        Ok(AddressParty {
            address_type,
            name: name.to_string(),
            address1: address1.to_string(),
            address2: address2.to_string(),
            zip: zip.to_string(),
            location: location.to_string(),
            country: country.to_string(),
        })
    }
}
