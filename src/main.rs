//! Swiss QR-bill CLI
//!
//! Generates Swiss Payment Code payloads from CSV bill requests and decodes
//! scanned payloads back into their fields.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- encode issuer.csv bills.csv > payloads.csv
//! cargo run -- decode payload.txt > fields.csv
//! cargo run -- check-digit "21 00000 00003 13947 14300 0901"
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use log::debug;
use std::env;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::process;
use swiss_qr_bill::validate::qr_reference_check_digit;
use swiss_qr_bill::{AddressParty, BillGenerator, Error, Result, SwissPaymentCode};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).ok_or(Error::MissingArgument)?;
    let arg = |index: usize| args.get(index).ok_or(Error::MissingArgument);

    match command.as_str() {
        "encode" => encode(arg(2)?, arg(3)?),
        "decode" => decode(arg(2)?),
        "check-digit" => check_digit(arg(2)?),
        other => Err(Error::UnknownCommand(other.to_string())),
    }
}

fn encode(issuer_path: &str, bills_path: &str) -> Result<()> {
    let issuer = BillGenerator::issuer_from_csv(BufReader::new(File::open(issuer_path)?))?;
    debug!("Loaded issuer {}", issuer.name);

    let reader = BufReader::new(File::open(bills_path)?);
    let mut generator = BillGenerator::new(issuer);
    generator.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    generator.write_output(handle)?;

    Ok(())
}

fn decode(payload_path: &str) -> Result<()> {
    let text = fs::read_to_string(payload_path)?;
    let code: SwissPaymentCode = text.parse()?;
    code.validate()?;

    let details = code.details();
    let mut rows: Vec<(String, String)> = vec![
        ("iban".to_string(), code.iban().to_string()),
        ("amount".to_string(), details.amount.to_string()),
        ("currency".to_string(), details.currency.to_string()),
        ("reference_type".to_string(), details.reference_type.to_string()),
        ("reference".to_string(), details.reference.clone()),
        ("additional_info".to_string(), details.additional_info.clone()),
    ];
    party_rows(&mut rows, "creditor", code.issuer());
    if !code.final_beneficiary().is_empty() {
        party_rows(&mut rows, "final_beneficiary", code.final_beneficiary());
    }
    party_rows(&mut rows, "debtor", code.debtor());

    let stdout = io::stdout();
    let mut csv_writer = csv::Writer::from_writer(stdout.lock());
    csv_writer.write_record(["field", "value"])?;
    for (field, value) in &rows {
        csv_writer.write_record([field, value])?;
    }
    csv_writer.flush()?;

    Ok(())
}

fn party_rows(rows: &mut Vec<(String, String)>, prefix: &str, party: &AddressParty) {
    let address_type = party.address_type.map(|t| t.to_string()).unwrap_or_default();
    let fields = [
        ("address_type", address_type.as_str()),
        ("name", party.name.as_str()),
        ("address1", party.address1.as_str()),
        ("address2", party.address2.as_str()),
        ("zip", party.zip.as_str()),
        ("location", party.location.as_str()),
        ("country", party.country.as_str()),
    ];
    for (name, value) in fields {
        rows.push((format!("{}.{}", prefix, name), value.to_string()));
    }
}

fn check_digit(body: &str) -> Result<()> {
    let digit = qr_reference_check_digit(body)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", digit)?;

    Ok(())
}
