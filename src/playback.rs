//! Timed reveal of an already computed transcript.
//!
//! Turns resolve synchronously; pacing the narration for a human reader is
//! done here, after the fact, and never feeds back into the session.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

pub fn replay<W: Write>(lines: &[String], delay: Duration, out: &mut W) -> io::Result<()> {
    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }
        writeln!(out, "{line}")?;
        out.flush()?;
    }
    Ok(())
}
