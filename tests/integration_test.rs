//! Integration tests for the swiss-qr-bill CLI.
//!
//! These tests run the actual binary against the files in `tests/data`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

/// Expected payload of the first request in `bills.csv`
const EXPECTED_PAYLOAD: &str = "SPC
0200
1
CH0011112222333344446
S
Mr Testing Cowboy
Pinky Range 56
With Cows
3456
Behind the Mountains
Switzerland







674.45
EUR
S
Mr Dont Pay
Unknow Street 4

1998
BelowTheBridge
BeautyIland
NON

DONT USE
EPD";

/// Get path to test data file
fn test_data_path(filename: &str) -> String {
    format!("tests/data/{}", filename)
}

/// Run the binary with the given arguments and return stdout
fn run_ok(args: &[&str]) -> String {
    let mut cmd = Command::cargo_bin("swiss-qr-bill").unwrap();
    let assert = cmd.args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

/// Parse a two-column CSV output (`row,payload` or `field,value`)
fn read_pairs(output: &str) -> Vec<(String, String)> {
    let mut reader = csv::Reader::from_reader(output.as_bytes());
    reader
        .records()
        .map(|r| {
            let record = r.unwrap();
            (record[0].to_string(), record[1].to_string())
        })
        .collect()
}

fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(f, _)| f == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn test_encode_matches_expected_payload() {
    let output = run_ok(&[
        "encode",
        &test_data_path("issuer.csv"),
        &test_data_path("bills.csv"),
    ]);

    let payloads = read_pairs(&output);
    assert_eq!(payloads.len(), 2);
    assert_eq!(payloads[0].0, "2");
    assert_eq!(payloads[0].1, EXPECTED_PAYLOAD);
}

#[test]
fn test_encode_output_has_correct_header() {
    let output = run_ok(&[
        "encode",
        &test_data_path("issuer.csv"),
        &test_data_path("bills.csv"),
    ]);
    assert!(output.starts_with("row,payload"));
}

#[test]
fn test_encode_amount_has_two_decimals() {
    let output = run_ok(&[
        "encode",
        &test_data_path("issuer.csv"),
        &test_data_path("bills.csv"),
    ]);

    let payloads = read_pairs(&output);
    let lines: Vec<&str> = payloads[1].1.split('\n').collect();
    assert_eq!(lines.len(), 31);
    assert_eq!(lines[3], "CH5409000000158505807");
    assert_eq!(lines[18], "660.80");
    assert_eq!(lines[28], "210000000003139471430009017");
}

#[test]
fn test_encode_skips_invalid_rows() {
    let output = run_ok(&[
        "encode",
        &test_data_path("issuer.csv"),
        &test_data_path("bills_invalid.csv"),
    ]);

    let payloads = read_pairs(&output);
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].0, "5");
    assert!(payloads[0].1.contains("\nK\nValid Combined\nWeg 4\n3000 Bern\n"));
    assert!(payloads[0].1.contains("\nSCOR\nRF18539007547034\nLast one\nEPD"));
}

#[test]
fn test_decode_payload_file() {
    let output = run_ok(&["decode", &test_data_path("payload.txt")]);
    let fields = read_pairs(&output);

    assert_eq!(field(&fields, "iban"), Some("CH0011112222333344446"));
    assert_eq!(field(&fields, "amount"), Some("674.45"));
    assert_eq!(field(&fields, "currency"), Some("EUR"));
    assert_eq!(field(&fields, "reference_type"), Some("NON"));
    assert_eq!(field(&fields, "reference"), Some(""));
    assert_eq!(field(&fields, "creditor.name"), Some("Mr Testing Cowboy"));
    assert_eq!(field(&fields, "debtor.location"), Some("BelowTheBridge"));
    assert_eq!(field(&fields, "final_beneficiary.name"), None);
}

#[test]
fn test_encode_then_decode_round_trip() {
    let output = run_ok(&[
        "encode",
        &test_data_path("issuer.csv"),
        &test_data_path("bills.csv"),
    ]);
    let payloads = read_pairs(&output);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(payloads[1].1.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let fields = read_pairs(&run_ok(&["decode", &path]));
    assert_eq!(field(&fields, "iban"), Some("CH5409000000158505807"));
    assert_eq!(field(&fields, "amount"), Some("660.80"));
    assert_eq!(field(&fields, "reference_type"), Some("QRR"));
    assert_eq!(field(&fields, "reference"), Some("210000000003139471430009017"));
    assert_eq!(field(&fields, "debtor.name"), Some("Hans Mustermann"));
    assert_eq!(field(&fields, "debtor.address1"), Some("Trämilweg 45"));
    assert_eq!(field(&fields, "additional_info"), Some("01-0032-12"));
}

#[test]
fn test_decode_rejects_bad_reference() {
    let mut cmd = Command::cargo_bin("swiss-qr-bill").unwrap();
    cmd.args(["decode", test_data_path("payload_bad_reference.txt").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("checksum"));
}

#[test]
fn test_decode_rejects_bad_version() {
    let mut cmd = Command::cargo_bin("swiss-qr-bill").unwrap();
    cmd.args(["decode", test_data_path("payload_bad_version.txt").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("version should be '0200'"));
}

#[test]
fn test_decode_rejects_truncated_payload() {
    let text = fs::read_to_string(test_data_path("payload.txt")).unwrap();
    let truncated: Vec<&str> = text.lines().take(20).collect();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(truncated.join("\n").as_bytes()).unwrap();

    let mut cmd = Command::cargo_bin("swiss-qr-bill").unwrap();
    cmd.arg("decode")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("must have 31 lines, got 20"));
}

#[test]
fn test_check_digit_command() {
    let output = run_ok(&["check-digit", "21 00000 00003 13947 14300 0901"]);
    assert_eq!(output.trim(), "7");
}

#[test]
fn test_check_digit_rejects_letters() {
    let mut cmd = Command::cargo_bin("swiss-qr-bill").unwrap();
    cmd.args(["check-digit", "21 00000 00003 1394A 14300 0901"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid character 'A'"));
}

#[test]
fn test_missing_file_error() {
    let mut cmd = Command::cargo_bin("swiss-qr-bill").unwrap();
    cmd.args(["decode", "nonexistent.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error").or(predicate::str::contains("Error")));
}

#[test]
fn test_missing_argument_error() {
    let mut cmd = Command::cargo_bin("swiss-qr-bill").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing argument"));

    let mut cmd = Command::cargo_bin("swiss-qr-bill").unwrap();
    cmd.args(["encode", test_data_path("issuer.csv").as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing argument"));
}

#[test]
fn test_unknown_command_error() {
    let mut cmd = Command::cargo_bin("swiss-qr-bill").unwrap();
    cmd.arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command 'render'"));
}
