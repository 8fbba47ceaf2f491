//! # Swiss QR-bill
//!
//! Encoder, decoder and validators for the Swiss Payment Code (SPC), the
//! text payload inside the QR symbol of a Swiss QR-bill.
//!
//! ## Design Principles
//!
//! - **Positional format**: exactly 31 lines, parsed by index into typed fields
//! - **Fixed-point amounts**: 2 decimal places via `rust_decimal`, no float formatting
//! - **Encode never validates**: validation is an explicit step ([`validate`])
//! - **Pure functions**: no I/O or shared state in the codec and validators
//!
//! ## Example
//!
//! ```
//! use std::str::FromStr;
//! use swiss_qr_bill::{
//!     decode, encode, validate, AddressParty, AddressType, Amount, BillingDetails, Currency,
//!     ReferenceType,
//! };
//!
//! let issuer = AddressParty {
//!     address_type: Some(AddressType::Structured),
//!     name: "MyCompany".to_string(),
//!     address1: "Römerstrasse 45a".to_string(),
//!     address2: "Postfach".to_string(),
//!     zip: "5432".to_string(),
//!     location: "Luftighausen".to_string(),
//!     country: "CH".to_string(),
//! };
//! let details = BillingDetails {
//!     iban: "CH54 0900 0000 1585 0580 7".to_string(),
//!     reference_type: ReferenceType::QrReference,
//!     reference: "21 00000 00003 13947 14300 09017".to_string(),
//!     additional_info: "01-0032-12".to_string(),
//!     currency: Currency::Chf,
//!     amount: Amount::from_str("660.80").unwrap(),
//! };
//! details.validate().unwrap();
//!
//! let payload = encode(&issuer, &AddressParty::default(), &AddressParty::default(), &details);
//! let code = decode(&payload).unwrap();
//! assert_eq!(code.iban(), "CH5409000000158505807");
//! assert!(validate::validate_reference(code.details().reference_type, &code.details().reference).is_ok());
//! ```

pub mod amount;
pub mod billing;
pub mod codec;
pub mod error;
pub mod generator;
pub mod party;
pub mod validate;

pub use amount::Amount;
pub use billing::{BillRecord, BillingDetails, Currency, ReferenceType};
pub use codec::{decode, encode, SwissPaymentCode};
pub use error::{Error, Result, ValidationError};
pub use generator::BillGenerator;
pub use party::{AddressParty, AddressType};
