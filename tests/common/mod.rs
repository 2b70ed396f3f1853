//! Common test helpers shared across the integration test suite.

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use refmatch::{read_records, Format, Record, RefError};

/// Path of a fixture under `tests/data`.
pub fn data_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(relative)
}

/// Fixture contents as text.
pub fn read_fixture(relative: &str) -> String {
    fs::read_to_string(data_path(relative)).expect("Could not read fixture")
}

/// Read every record of a fixture, stopping at the first error.
pub fn read_fixture_records(relative: &str, format: Format) -> Result<Vec<Record>, RefError> {
    let file = File::open(data_path(relative)).expect("Could not open fixture");
    read_records(format, BufReader::new(file)).collect()
}

/// A single-record fixture parsed directly into a [`Record`].
pub fn fixture_record(relative: &str, format: Format) -> Record {
    Record::new(format, read_fixture(relative))
}

/// Wrap RIS field lines in a `TY`/`ER` pair.
pub fn ris_record(body: &str) -> Record {
    Record::new(Format::Ris, format!("TY  - JOUR\n{body}ER  - \n"))
}
