//! Billing models: currency, reference type and the per-bill details.

use crate::amount::Amount;
use crate::error::ValidationError;
use crate::party::{AddressParty, AddressType};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies a QR-bill can be issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "CHF")]
    Chf,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Chf => "CHF",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHF" => Ok(Currency::Chf),
            "EUR" => Ok(Currency::Eur),
            other => Err(format!("unsupported currency '{}'", other)),
        }
    }
}

/// Kind of payment reference carried by the bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceType {
    /// No reference, the reference line stays empty.
    #[serde(rename = "NON")]
    NoReference,

    /// ISO 11649 creditor reference (`RF...`).
    #[serde(rename = "SCOR")]
    CreditorReference,

    /// 27-digit QR reference with a mod 10 recursive check digit.
    #[serde(rename = "QRR")]
    QrReference,
}

impl ReferenceType {
    pub fn code(&self) -> &'static str {
        match self {
            ReferenceType::NoReference => "NON",
            ReferenceType::CreditorReference => "SCOR",
            ReferenceType::QrReference => "QRR",
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ReferenceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NON" => Ok(ReferenceType::NoReference),
            "SCOR" => Ok(ReferenceType::CreditorReference),
            "QRR" => Ok(ReferenceType::QrReference),
            other => Err(ValidationError::UnknownReferenceType(other.to_string())),
        }
    }
}

/// Account, amount and reference data of a single bill.
///
/// The IBAN and reference may contain spaces for readability; they are
/// stripped when the payment code is encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingDetails {
    /// Creditor account
    pub iban: String,

    pub reference_type: ReferenceType,

    #[serde(default)]
    pub reference: String,

    /// Unstructured message to the debtor.
    #[serde(default)]
    pub additional_info: String,

    pub currency: Currency,

    pub amount: Amount,
}

impl BillingDetails {
    /// Checks the IBAN and that the reference matches its declared type.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate_iban(&self.iban)?;
        validate::validate_reference(self.reference_type, &self.reference)
    }
}

/// One bill request as read from a batch CSV file.
///
/// The address columns describe the debtor; the creditor is the same for
/// the whole batch and is supplied separately.
#[derive(Debug, Deserialize)]
pub struct BillRecord {
    pub address_type: Option<AddressType>,
    pub name: String,
    pub address1: String,
    #[serde(default)]
    pub address2: String,
    pub zip: String,
    pub location: String,
    pub country: String,

    pub iban: String,
    pub currency: Currency,
    pub amount: Amount,
    pub reference_type: ReferenceType,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub additional_info: String,
}

impl BillRecord {
    /// Splits the record into the debtor and the billing details.
    pub fn into_parts(self) -> (AddressParty, BillingDetails) {
        let debtor = AddressParty {
            address_type: self.address_type,
            name: self.name,
            address1: self.address1,
            address2: self.address2,
            zip: self.zip,
            location: self.location,
            country: self.country,
        };
        let details = BillingDetails {
            iban: self.iban,
            reference_type: self.reference_type,
            reference: self.reference,
            additional_info: self.additional_info,
            currency: self.currency,
            amount: self.amount,
        };
        (debtor, details)
    }
}
