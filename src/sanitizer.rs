//! Source sanitization.
//!
//! Turns raw source text into a [`Program`]: `//` comments are cut off at the
//! end of their line, line endings are dropped, and every byte outside
//! `><+-.,[]` is discarded. Lines are concatenated with no separator.
//!
//! ```
//! use brainfk::sanitizer::sanitize;
//!
//! let program = sanitize(b"++ // comment [ ] junk\n>.").unwrap();
//! assert_eq!(program.as_bytes(), b"++>.");
//! ```

use std::io::BufRead;
use std::path::Path;

use tracing::debug;

use crate::error::BrainfkError;
use crate::program::{is_command, Program};

/// Starting capacity of the instruction buffer.
pub const INITIAL_CAPACITY: usize = 4096;
/// Longest line the initial capacity is sized for. Longer lines still work.
pub const MAX_LINE_LEN: usize = 1024;

const COMMENT_MARKER: &[u8] = b"//";

/// Accumulates sanitized lines into a growing instruction buffer.
///
/// Capacity is tracked explicitly and doubles whenever the next line would
/// not fit. Reservations are fallible, so running out of memory surfaces as
/// [`BrainfkError::Allocation`] instead of aborting.
#[derive(Debug)]
pub struct Sanitizer {
    buffer: Vec<u8>,
    capacity: usize,
}

impl Sanitizer {
    pub fn new() -> Result<Self, BrainfkError> {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, BrainfkError> {
        let capacity = capacity.max(1);
        let mut buffer = Vec::new();
        buffer
            .try_reserve_exact(capacity)
            .map_err(|_| BrainfkError::Allocation {
                what: "instruction buffer",
                requested: capacity,
            })?;
        Ok(Self { buffer, capacity })
    }

    /// Sanitize one source line and append what is left.
    pub fn push_line(&mut self, line: &[u8]) -> Result<(), BrainfkError> {
        let line = trim_line_ending(strip_comment(line));
        let kept = line.iter().filter(|&&b| is_command(b)).count();
        if kept == 0 {
            return Ok(());
        }
        self.grow_for(kept)?;
        self.buffer
            .extend(line.iter().copied().filter(|&b| is_command(b)));
        Ok(())
    }

    fn grow_for(&mut self, additional: usize) -> Result<(), BrainfkError> {
        let needed = self.buffer.len() + additional;
        if needed <= self.capacity {
            return Ok(());
        }
        let mut capacity = self.capacity;
        while capacity < needed {
            capacity = capacity.saturating_mul(2);
        }
        self.buffer
            .try_reserve_exact(capacity - self.buffer.len())
            .map_err(|_| BrainfkError::Allocation {
                what: "instruction buffer",
                requested: capacity,
            })?;
        debug!(from = self.capacity, to = capacity, "grew instruction buffer");
        self.capacity = capacity;
        Ok(())
    }

    /// Current logical capacity of the buffer.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Freeze the buffer into an immutable [`Program`].
    pub fn finish(self) -> Program {
        Program::from_sanitized(self.buffer)
    }
}

/// Cut `line` at the first `//`, if any.
fn strip_comment(line: &[u8]) -> &[u8] {
    match line
        .windows(COMMENT_MARKER.len())
        .position(|w| w == COMMENT_MARKER)
    {
        Some(at) => &line[..at],
        None => line,
    }
}

fn trim_line_ending(mut line: &[u8]) -> &[u8] {
    while let [rest @ .., b'\n' | b'\r'] = line {
        line = rest;
    }
    line
}

/// Sanitize an in-memory source.
pub fn sanitize(source: &[u8]) -> Result<Program, BrainfkError> {
    let mut sanitizer = Sanitizer::new()?;
    for line in source.split_inclusive(|&b| b == b'\n') {
        sanitizer.push_line(line)?;
    }
    Ok(sanitizer.finish())
}

/// Sanitize a source read line by line from `reader`.
///
/// `origin` only labels I/O errors.
pub fn sanitize_reader<R: BufRead>(mut reader: R, origin: &Path) -> Result<Program, BrainfkError> {
    let mut sanitizer = Sanitizer::new()?;
    let mut line = Vec::with_capacity(MAX_LINE_LEN);
    let mut lines = 0usize;
    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|source| BrainfkError::Io {
                path: origin.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        lines += 1;
        sanitizer.push_line(&line)?;
    }
    debug!(lines, instructions = sanitizer.len(), "sanitized source");
    Ok(sanitizer.finish())
}
