//! Validated field prompts.
//!
//! Every prompt loops until it reads a valid value, printing a short
//! apology and asking again on bad input — callers never receive an
//! invalid primitive. Prompts are generic over the reader and writer so
//! tests can drive them with scripted input. During an edit a prompt
//! carries the current value and a blank line keeps it.
//!
//! A prompt blocks until valid input arrives; end of input is an
//! [`io::ErrorKind::UnexpectedEof`] error, since no valid value can
//! ever be read.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use regex::Regex;

use worklog_record::record::{TaskDraft, parse_date};

/// Prompts for a `DD/MM/YYYY` date under the given heading.
///
/// A blank line keeps `initial` when one is given.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] when input ends.
pub fn date<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    label: &str,
    initial: Option<NaiveDate>,
) -> io::Result<NaiveDate> {
    loop {
        writeln!(out, "{label}")?;
        write!(out, "Please use DD/MM/YYYY: ")?;
        out.flush()?;
        let line = read_line(input)?;
        if line.is_empty() {
            if let Some(value) = initial {
                return Ok(value);
            }
        }
        match parse_date(&line) {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(out, "Sorry, you must enter a valid date.\n")?,
        }
    }
}

/// Prompts for a start and an end date, each independently validated.
///
/// No cross-validation: an inverted range is the caller's (empty) result.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] when input ends.
pub fn date_range<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<(NaiveDate, NaiveDate)> {
    let start = date(input, out, "Enter the start date", None)?;
    let end = date(input, out, "Enter the end date", None)?;
    Ok((start, end))
}

/// Prompts for a non-empty title.
///
/// A blank line keeps `initial` when one is given.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] when input ends.
pub fn title<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    initial: Option<&str>,
) -> io::Result<String> {
    loop {
        write!(out, "Title of the task: ")?;
        out.flush()?;
        let line = read_line(input)?;
        if !line.is_empty() {
            return Ok(line);
        }
        if let Some(current) = initial {
            return Ok(current.to_string());
        }
        writeln!(out, "Sorry, you must provide a task title.")?;
    }
}

/// Prompts for a positive minute count.
///
/// A blank line keeps `initial` when one is given.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] when input ends.
pub fn minutes<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    initial: Option<u32>,
) -> io::Result<u32> {
    loop {
        write!(out, "Time spent (rounded minutes): ")?;
        out.flush()?;
        let line = read_line(input)?;
        if line.is_empty() {
            if let Some(value) = initial {
                return Ok(value);
            }
        }
        match line.parse::<u32>() {
            Ok(value) if value > 0 => return Ok(value),
            _ => writeln!(out, "Sorry, you must enter a valid numeric time.")?,
        }
    }
}

/// Prompts for optional notes.
///
/// A blank line keeps `initial` (so an edit can't accidentally clear
/// notes); with no `initial`, blank means absent.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] when input ends.
pub fn notes<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    initial: Option<&str>,
) -> io::Result<Option<String>> {
    write!(out, "Notes (Optional, you can leave this empty): ")?;
    out.flush()?;
    let line = read_line(input)?;
    if line.is_empty() {
        return Ok(initial.map(String::from));
    }
    Ok(Some(line))
}

/// Prompts for a full entry draft: date, title, time, notes.
///
/// With `current` set (edit), every field prompt offers the existing
/// value and a blank line keeps it.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] when input ends.
pub fn draft<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    current: Option<&TaskDraft>,
) -> io::Result<TaskDraft> {
    let date = date(input, out, "Date of the task", current.map(|c| c.date))?;
    let title = title(input, out, current.map(|c| c.title.as_str()))?;
    let time = minutes(input, out, current.map(|c| c.time))?;
    let notes = notes(input, out, current.and_then(|c| c.notes.as_deref()))?;
    // The loops above already enforced the draft invariants.
    Ok(TaskDraft {
        date,
        title,
        time,
        notes,
    })
}

/// Prompts for a non-empty search string.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] when input ends.
pub fn text<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<String> {
    loop {
        write!(out, "Enter a string to search on Title/Notes: ")?;
        out.flush()?;
        let line = read_line(input)?;
        if !line.is_empty() {
            return Ok(line);
        }
        writeln!(out, "Sorry, you must enter some text to search.")?;
    }
}

/// Prompts for a regular expression, retrying until it compiles.
///
/// The search engine receives only the compiled pattern.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] when input ends.
pub fn pattern<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Regex> {
    loop {
        write!(out, "Enter a regular expression to search: ")?;
        out.flush()?;
        let line = read_line(input)?;
        match Regex::new(&line) {
            Ok(regex) => return Ok(regex),
            Err(_) => writeln!(out, "Sorry, you must enter a valid regular expression.\n")?,
        }
    }
}

/// Asks a yes/no question; only `y`/`Y` confirms.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] when input ends.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> io::Result<bool> {
    write!(out, "{question} [y/N]: ")?;
    out.flush()?;
    Ok(read_line(input)?.trim().eq_ignore_ascii_case("y"))
}

/// Shows a message and waits for enter. End of input counts as enter.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails.
pub fn pause<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> io::Result<()> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

/// Reads one trimmed menu choice.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] when input ends.
pub fn choice<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<String> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(read_line(input)?.trim().to_string())
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input ended while waiting for a value",
        ));
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}
