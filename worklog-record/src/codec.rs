//! Flat-file serialization for the work log.
//!
//! The persisted format is a delimited table: a `Date,Title,Time,Notes`
//! header followed by one row per entry in that fixed column order.
//! Dates are `DD/MM/YYYY`, time is a decimal minute count, and the notes
//! column is empty when absent. A field containing the delimiter, a
//! quote or a newline is wrapped in double quotes with embedded quotes
//! doubled. Row order on disk is not significant (the store re-sorts on
//! load), but the writer always emits the current sorted order.

use crate::record::{RecordError, Task, TaskDraft, format_date};

/// Header row naming the four persisted columns.
pub const HEADER: &str = "Date,Title,Time,Notes";

const FIELD_COUNT: usize = 4;

/// Errors that can occur while decoding a persisted log.
///
/// Any of these is fatal for the whole load call: a log with a bad row
/// is rejected rather than partially loaded.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The first row is not the expected header.
    #[error("bad header {found:?}: expected {HEADER:?}")]
    Header {
        /// The header row that was found.
        found: String,
    },
    /// A row does not have exactly four fields.
    #[error("row {row}: expected {FIELD_COUNT} fields, found {found}")]
    FieldCount {
        /// 1-based row number, counting the header as row 1.
        row: usize,
        /// Number of fields found.
        found: usize,
    },
    /// A quoted field was still open at end of input.
    #[error("row {row}: unterminated quoted field")]
    UnterminatedQuote {
        /// 1-based row number where the field started.
        row: usize,
    },
    /// A row's fields failed record validation.
    #[error("row {row}: {source}")]
    Record {
        /// 1-based row number, counting the header as row 1.
        row: usize,
        /// The underlying field validation failure.
        #[source]
        source: RecordError,
    },
}

/// Encodes a full log (header plus one row per entry) as file contents.
#[must_use]
pub fn encode_log(tasks: &[Task]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + tasks.len() * 32);
    out.push_str(HEADER);
    out.push('\n');
    for task in tasks {
        encode_row(&mut out, task);
    }
    out
}

/// Decodes file contents into entries, re-validating every field.
///
/// Empty input is an empty log. Each loaded entry receives a fresh
/// runtime id.
///
/// # Errors
///
/// Returns [`CodecError::Header`] if the first row is not the expected
/// header, [`CodecError::FieldCount`] / [`CodecError::UnterminatedQuote`]
/// for a structurally malformed row, or [`CodecError::Record`] for a row
/// whose fields fail validation. The first bad row aborts the decode.
pub fn decode_log(input: &str) -> Result<Vec<Task>, CodecError> {
    let mut rows = split_rows(input)?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let (_, header) = rows.remove(0);
    if header != HEADER.split(',').collect::<Vec<_>>() {
        return Err(CodecError::Header {
            found: header.join(","),
        });
    }
    let mut tasks = Vec::with_capacity(rows.len());
    for (row, fields) in rows {
        if fields.len() != FIELD_COUNT {
            return Err(CodecError::FieldCount {
                row,
                found: fields.len(),
            });
        }
        let draft = TaskDraft::parse(&fields[0], &fields[1], &fields[2], &fields[3])
            .map_err(|source| CodecError::Record { row, source })?;
        tasks.push(Task::from_draft(draft));
    }
    Ok(tasks)
}

fn encode_row(out: &mut String, task: &Task) {
    push_field(out, &format_date(task.date()));
    out.push(',');
    push_field(out, task.title());
    out.push(',');
    push_field(out, &task.time().to_string());
    out.push(',');
    push_field(out, task.notes().unwrap_or(""));
    out.push('\n');
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\n', '\r']) {
        out.push('"');
        for c in field.chars() {
            if c == '"' {
                out.push('"');
            }
            out.push(c);
        }
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Splits raw file contents into rows of fields.
///
/// A small state machine rather than a line splitter: quoted fields may
/// contain the delimiter and newlines. `\r\n` row endings are accepted;
/// blank rows are skipped. Each returned row carries its 1-based number.
fn split_rows(input: &str) -> Result<Vec<(usize, Vec<String>)>, CodecError> {
    let mut rows = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // Set while the current field was opened with a quote; a quote may
    // only open a field at its very start.
    let mut quoted_field = false;
    let mut row = 1usize;
    let mut chars = input.chars().peekable();

    loop {
        match chars.next() {
            None => {
                if in_quotes {
                    return Err(CodecError::UnterminatedQuote { row });
                }
                if !field.is_empty() || !fields.is_empty() {
                    fields.push(field);
                    push_row(&mut rows, fields, row);
                }
                return Ok(rows);
            }
            Some('"') if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            Some('"') if field.is_empty() && !quoted_field => {
                in_quotes = true;
                quoted_field = true;
            }
            Some(',') if !in_quotes => {
                fields.push(std::mem::take(&mut field));
                quoted_field = false;
            }
            // A `\r` directly before `\n` outside quotes is part of the
            // row ending, not data; inside quotes it stays data.
            Some('\r') if !in_quotes && chars.peek() == Some(&'\n') => {}
            Some('\n') if !in_quotes => {
                fields.push(std::mem::take(&mut field));
                push_row(&mut rows, std::mem::take(&mut fields), row);
                quoted_field = false;
                row += 1;
            }
            Some(c) => field.push(c),
        }
    }
}

fn push_row(rows: &mut Vec<(usize, Vec<String>)>, fields: Vec<String>, row: usize) {
    // A lone empty field is a blank row, not data.
    if fields.len() == 1 && fields[0].is_empty() {
        return;
    }
    rows.push((row, fields));
}
