//! Batch generation of payment codes.
//!
//! Reads bill requests for a single creditor from CSV, validates each one
//! and encodes it. Requests that cannot be parsed or fail validation are
//! logged and skipped, so one bad row never stops a batch.

use crate::billing::BillRecord;
use crate::codec::SwissPaymentCode;
use crate::error::{Error, Result};
use crate::party::AddressParty;
use csv::{ReaderBuilder, Trim};
use log::{debug, warn};
use std::io::{Read, Write};

/// Generates payment codes for one creditor.
///
/// # Output Ordering
///
/// Codes are kept in input order, each tagged with the CSV row it came from.
pub struct BillGenerator {
    /// Creditor of every bill in the batch.
    issuer: AddressParty,

    /// Generated codes with their 1-indexed CSV row.
    codes: Vec<(usize, SwissPaymentCode)>,
}

impl BillGenerator {
    /// Creates a generator for the given creditor.
    pub fn new(issuer: AddressParty) -> Self {
        BillGenerator {
            issuer,
            codes: Vec::new(),
        }
    }

    /// Loads the creditor from a CSV file with a header and a single party row.
    pub fn issuer_from_csv<R: Read>(reader: R) -> Result<AddressParty> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let mut parties = csv_reader.deserialize::<AddressParty>();

        let issuer = match parties.next() {
            Some(party) => party?,
            None => {
                return Err(Error::InvalidRecord {
                    row: 2,
                    message: "issuer file contains no party".to_string(),
                })
            }
        };
        if parties.next().is_some() {
            return Err(Error::InvalidRecord {
                row: 3,
                message: "issuer file contains more than one party".to_string(),
            });
        }

        Ok(issuer)
    }

    /// Processes bill requests from a CSV reader in streaming fashion.
    ///
    /// Invalid records are logged at warn level and skipped.
    pub fn process_csv<R: Read>(&mut self, reader: R) -> Result<()> {
        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        for (row_idx, result) in csv_reader.deserialize::<BillRecord>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row

            match result {
                Ok(record) => self.process_record(record, row_num),
                Err(e) => {
                    warn!("Row {}: CSV parse error: {}", row_num, e);
                }
            }
        }

        Ok(())
    }

    /// Validates a single request and stores its payment code.
    fn process_record(&mut self, record: BillRecord, row: usize) {
        let (debtor, details) = record.into_parts();

        if let Err(e) = details.validate() {
            warn!("Row {}: {}, skipping", row, e);
            return;
        }

        let code = SwissPaymentCode::new(self.issuer.clone(), debtor, details);
        debug!(
            "Row {}: Generated payment code over {} {} for {}",
            row,
            code.details().amount,
            code.details().currency,
            code.debtor().name
        );
        self.codes.push((row, code));
    }

    /// Generated codes with their source row, in input order.
    pub fn codes(&self) -> &[(usize, SwissPaymentCode)] {
        &self.codes
    }

    /// Writes the generated payloads to CSV.
    ///
    /// Columns are `row` and `payload`; the multi-line payload is quoted.
    pub fn write_output<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["row", "payload"])?;

        for (row, code) in &self.codes {
            csv_writer.write_record([row.to_string(), code.to_payload()])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
