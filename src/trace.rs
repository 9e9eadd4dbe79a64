//! CSV branch traces
//!
//! A trace is a CSV file with a header row naming at least the
//! `BranchAddress` and `Outcome` columns, in any order. Every following row
//! is one dynamic branch: an integer address and an outcome of
//! `1` (taken) or `0` (not taken). Blank lines are skipped.
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines, Write},
    path::Path,
};
use thiserror::Error;

pub const ADDRESS_COLUMN: &str = "BranchAddress";
pub const OUTCOME_COLUMN: &str = "Outcome";

/// One dynamic conditional branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchRecord {
    pub address: u64,
    pub taken: bool,
}

impl BranchRecord {
    pub fn new(address: u64, taken: bool) -> Self {
        Self { address, taken }
    }
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
    #[error("trace is empty, expected a header row")]
    MissingHeader,
    #[error("trace header has no {0:?} column")]
    MissingColumn(&'static str),
    #[error("line {line}: missing {column:?} field")]
    MissingField { line: usize, column: &'static str },
    #[error("line {line}: invalid branch address {value:?}")]
    InvalidAddress { line: usize, value: String },
    #[error("line {line}: invalid outcome {value:?}, expected 0 or 1")]
    InvalidOutcome { line: usize, value: String },
}

/// Streaming reader that validates records as they are read
pub struct TraceReader<R: BufRead> {
    lines: Lines<R>,
    line: usize,
    address_column: usize,
    outcome_column: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Result<Self, TraceError> {
        let mut lines = reader.lines();
        let mut line = 0;
        let header = loop {
            line += 1;
            match lines.next() {
                Some(text) => {
                    let text = text?;
                    if !text.trim().is_empty() {
                        break text;
                    }
                }
                None => return Err(TraceError::MissingHeader),
            }
        };

        let columns: Vec<&str> = header
            .trim_start_matches('\u{feff}')
            .split(',')
            .map(|column| column.trim())
            .collect();
        let find = |name: &'static str| {
            columns
                .iter()
                .position(|column| *column == name)
                .ok_or(TraceError::MissingColumn(name))
        };

        Ok(Self {
            address_column: find(ADDRESS_COLUMN)?,
            outcome_column: find(OUTCOME_COLUMN)?,
            lines,
            line,
        })
    }

    fn parse(&self, text: &str) -> Result<BranchRecord, TraceError> {
        let fields: Vec<&str> = text.split(',').map(|field| field.trim()).collect();
        let field = |index: usize, column: &'static str| {
            fields
                .get(index)
                .copied()
                .ok_or(TraceError::MissingField {
                    line: self.line,
                    column,
                })
        };

        let address = field(self.address_column, ADDRESS_COLUMN)?;
        // negative addresses keep their two's complement bits
        let address = address
            .parse::<u64>()
            .or_else(|_| address.parse::<i64>().map(|value| value as u64))
            .map_err(|_| TraceError::InvalidAddress {
                line: self.line,
                value: address.to_string(),
            })?;

        let taken = match field(self.outcome_column, OUTCOME_COLUMN)? {
            "1" => true,
            "0" => false,
            other => {
                return Err(TraceError::InvalidOutcome {
                    line: self.line,
                    value: other.to_string(),
                });
            }
        };

        Ok(BranchRecord { address, taken })
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<BranchRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line += 1;
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(err) => return Some(Err(err.into())),
            };
            if text.trim().is_empty() {
                continue;
            }
            return Some(self.parse(&text));
        }
    }
}

/// Read and validate a whole trace file
pub fn read_trace<P: AsRef<Path>>(path: P) -> Result<Vec<BranchRecord>, TraceError> {
    let file = File::open(path)?;
    TraceReader::new(BufReader::new(file))?.collect()
}

/// Write records in the format understood by [`TraceReader`]
pub fn write_trace<W: Write>(writer: &mut W, records: &[BranchRecord]) -> std::io::Result<()> {
    writeln!(writer, "{},{}", ADDRESS_COLUMN, OUTCOME_COLUMN)?;
    for record in records {
        writeln!(writer, "{},{}", record.address, record.taken as u8)?;
    }
    Ok(())
}
