//! Terminal screen handling.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

/// Clears the screen and homes the cursor before a fresh render.
///
/// The control sequences go to whatever writer is supplied: a real
/// terminal clears, a test buffer just records them.
///
/// # Errors
///
/// Returns an I/O error if the writer rejects the sequences.
pub fn clear<W: Write>(out: &mut W) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}
