//! Tabular input
//!
//! One exercise per line, comma-separated, in the column order key, category, muscle group,
//! name, description. Fields may be enclosed in double quotes to contain commas. Any double
//! quote left in a field after splitting is removed, as is surrounding whitespace.

use std::io::BufRead;

use log::{debug, info};
use swoleth_domain::ExerciseRequest;

pub const COLUMNS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Line number in the input, starting at 1.
    pub number: usize,
    pub request: Result<ExerciseRequest, RowError>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("expected {COLUMNS} columns, found {0}")]
    MissingColumns(usize),
    #[error("unterminated quote")]
    UnterminatedQuote,
    #[error("invalid UTF-8")]
    InvalidUtf8,
}

/// Reads all rows of the input.
///
/// A line that is not valid UTF-8 becomes a failed row. Only I/O errors abort reading.
pub fn read_rows(mut reader: impl BufRead, has_header: bool) -> std::io::Result<Vec<Row>> {
    let mut rows = Vec::new();
    let mut header = has_header;
    let mut buffer = Vec::new();
    let mut number = 0;

    loop {
        buffer.clear();
        if reader.read_until(b'\n', &mut buffer)? == 0 {
            break;
        }
        number += 1;

        let line = std::str::from_utf8(strip_line_ending(&buffer));
        if line.is_ok_and(|line| line.trim().is_empty()) {
            continue;
        }
        if header {
            header = false;
            debug!("skipping header on line {number}");
            continue;
        }
        let request = match line {
            Ok(line) => {
                debug!("processing row {number}: {line}");
                parse_row(line)
            }
            Err(_) => Err(RowError::InvalidUtf8),
        };
        rows.push(Row { number, request });
    }

    info!("parsed {} rows", rows.len());

    Ok(rows)
}

fn strip_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

pub fn parse_row(line: &str) -> Result<ExerciseRequest, RowError> {
    let fields = split_fields(line)?;

    let [key, category, muscle_group, name, description, ..] = fields.as_slice() else {
        return Err(RowError::MissingColumns(fields.len()));
    };

    Ok(ExerciseRequest {
        key: clean(key),
        name: clean(name),
        description: clean(description),
        category: clean(category),
        muscle_group: clean(muscle_group),
    })
}

fn split_fields(line: &str) -> Result<Vec<&str>, RowError> {
    let mut fields = Vec::new();
    let mut quoted = false;
    let mut start = 0;

    for (i, c) in line.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => {
                fields.push(&line[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }

    if quoted {
        return Err(RowError::UnterminatedQuote);
    }

    fields.push(&line[start..]);

    Ok(fields)
}

fn clean(field: &str) -> String {
    field.replace('"', "").trim().to_string()
}
