//! Record source: lottery result rows read from CSV.
//!
//! The reader validates the header row up front and then yields one
//! [`Record`] per data row, in file order. Rows with the wrong number of
//! columns are rejected by the underlying CSV reader.
use crate::error::{Error, MissingFieldError, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Student id column.
pub const ID: &str = "id";
/// `Offered` for admitted students, a waitlist position otherwise.
pub const LOTTERY_NUMBER: &str = "lottery_number";
/// Student first name column.
pub const FIRST_NAME: &str = "first_name";
/// Student last name column.
pub const LAST_NAME: &str = "last_name";
/// Sending elementary school column.
pub const ELEMENTARY: &str = "Elementary";

/// Columns the header row must contain.
pub const REQUIRED_COLUMNS: [&str; 5] = [ID, LOTTERY_NUMBER, FIRST_NAME, LAST_NAME, ELEMENTARY];

/// `lottery_number` value marking an admitted student.
pub const OFFERED: &str = "Offered";

/// One student row: field name to raw string value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    fields: HashMap<String, String>,
    line: Option<u64>,
}

impl Record {
    /// Build a record from field/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            line: None,
        }
    }

    /// Attach the 1-based input line this record was read from.
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// Input line, if the record came from a file.
    pub fn line(&self) -> Option<u64> {
        self.line
    }

    /// Look up a field, failing with [`MissingFieldError`] when absent.
    pub fn field(&self, name: &str) -> std::result::Result<&str, MissingFieldError> {
        self.fields
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| MissingFieldError::new(name, self.line))
    }

    /// Whether this row's lottery result is an offer of admission.
    pub fn is_offered(&self) -> std::result::Result<bool, MissingFieldError> {
        Ok(self.field(LOTTERY_NUMBER)? == OFFERED)
    }
}

/// Streaming reader over a lottery results CSV.
pub struct RecordReader<R> {
    reader: csv::Reader<R>,
    headers: csv::StringRecord,
    row: csv::StringRecord,
}

impl RecordReader<File> {
    /// Open a CSV file and validate its header row.
    ///
    /// A file that cannot be opened is reported as [`Error::Io`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }
}

impl<R: Read> RecordReader<R> {
    /// Wrap any byte source and validate its header row.
    pub fn from_reader(reader: R) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);
        Self::with_reader(reader)
    }

    fn with_reader(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns { missing });
        }

        tracing::debug!(columns = headers.len(), "validated CSV header row");

        Ok(Self {
            reader,
            headers,
            row: csv::StringRecord::new(),
        })
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        if !self.reader.read_record(&mut self.row)? {
            return Ok(None);
        }

        let mut record = Record::from_pairs(self.headers.iter().zip(self.row.iter()));
        if let Some(position) = self.row.position() {
            record = record.with_line(position.line());
        }
        Ok(Some(record))
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}
