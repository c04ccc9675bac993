// src/input.rs
//! Record reader: one record per line, fields split on whitespace.
//!
//! The whole input is decoded up front, so a bad line means zero tickets are
//! ever computed or printed (batch-or-fail).

use std::io::BufRead;
use std::str;

use crate::error::ShuffleError;
use crate::types::StudentRecord;

/// Splits one decoded line into a record. A blank line is a valid empty
/// record; downstream it still receives a ticket.
pub fn record_from_line(line: &str) -> StudentRecord {
    StudentRecord::new(line.split_whitespace().collect::<Vec<_>>())
}

/// Reads every record from `reader`. Lines are consumed as raw bytes and
/// validated as UTF-8 so an encoding failure carries its 1-based line number.
pub fn read_records<R: BufRead>(mut reader: R) -> Result<Vec<StudentRecord>, ShuffleError> {
    let mut records = Vec::new();
    let mut buf = Vec::new();
    let mut line = 0usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line += 1;
        while matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
            buf.pop();
        }
        let text = str::from_utf8(&buf).map_err(|_| ShuffleError::Encoding { line })?;
        records.push(record_from_line(text));
    }
    Ok(records)
}
