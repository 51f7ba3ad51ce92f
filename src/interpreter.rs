//! The tape interpreter.
//!
//! Executes a sanitized [`Program`] against a [`Tape`], reading `,` input from
//! any [`Read`] and writing `.` output to any [`Write`].
//!
//! Behaviors:
//! - The cursor wraps around both ends of the tape; cells wrap modulo 256.
//! - `[` resolves its matching `]` before looking at the guard cell, so an
//!   unclosed loop is an error even when the loop would be skipped.
//! - Each loop iteration runs the loop body as a nested invocation; errors in
//!   a body abort every enclosing loop.
//! - A `]` reached by ordinary dispatch is an illegal expression.
//! - On end of input, `,` follows the configured [`EofPolicy`].
//!
//! ```
//! use brainfk::{sanitizer::sanitize, EofPolicy, Interpreter, Tape};
//!
//! // Read two bytes and print them in reverse; the second read hits EOF.
//! let program = sanitize(b",>,.<.").unwrap();
//! let mut out = Vec::new();
//! let mut bf = Interpreter::new(Tape::new(4).unwrap(), &b"x"[..], &mut out)
//!     .with_eof_policy(EofPolicy::Sentinel);
//! bf.run(&program).expect("program should run");
//! assert_eq!(out, [255, b'x']);
//! ```

use std::fmt;
use std::io::{self, Read, Write};

use tracing::trace;

use crate::config::Settings;
use crate::error::BrainfkError;
use crate::program::{self, Program};
use crate::tape::Tape;

/// What `,` stores when the input stream is exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EofPolicy {
    /// Store 0.
    #[default]
    Zero,
    /// Leave the current cell untouched.
    Unchanged,
    /// Store 255, the C `EOF` value truncated to a byte.
    Sentinel,
}

impl fmt::Display for EofPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EofPolicy::Zero => write!(f, "zero"),
            EofPolicy::Unchanged => write!(f, "unchanged"),
            EofPolicy::Sentinel => write!(f, "sentinel"),
        }
    }
}

/// Loop-span lookup, optionally memoized per `[` position.
///
/// Only successful resolutions are cached, so a memoized run reports
/// exactly the same errors as an unmemoized one.
struct Spans {
    cache: Option<Vec<Option<usize>>>,
}

impl Spans {
    fn new(program_len: usize, memoize: bool) -> Self {
        Self {
            cache: memoize.then(|| vec![None; program_len]),
        }
    }

    fn resolve(&mut self, code: &[u8], open: usize, end: usize) -> Result<usize, BrainfkError> {
        if let Some(close) = self.cache.as_ref().and_then(|c| c[open]) {
            return Ok(close);
        }
        let close = program::find_loop_end(code, open, end)
            .ok_or(BrainfkError::UnmatchedLoop { ip: open })?;
        trace!(open, close, "resolved loop span");
        if let Some(cache) = self.cache.as_mut() {
            cache[open] = Some(close);
        }
        Ok(close)
    }
}

/// A single interpreter session: one tape, one cursor, one pair of streams.
pub struct Interpreter<R, W> {
    tape: Tape,
    input: R,
    output: W,
    eof: EofPolicy,
    memoize_spans: bool,
}

impl<R: Read, W: Write> Interpreter<R, W> {
    /// Create an interpreter with the default EOF policy and span memoization on.
    pub fn new(tape: Tape, input: R, output: W) -> Self {
        Self {
            tape,
            input,
            output,
            eof: EofPolicy::default(),
            memoize_spans: true,
        }
    }

    /// Allocate a tape of `settings.tape_len` cells and apply the rest of `settings`.
    pub fn from_settings(settings: &Settings, input: R, output: W) -> Result<Self, BrainfkError> {
        let tape = Tape::new(settings.tape_len)?;
        Ok(Self::new(tape, input, output)
            .with_eof_policy(settings.eof)
            .with_memoized_spans(settings.memoize_spans))
    }

    pub fn with_eof_policy(mut self, eof: EofPolicy) -> Self {
        self.eof = eof;
        self
    }

    pub fn with_memoized_spans(mut self, memoize: bool) -> Self {
        self.memoize_spans = memoize;
        self
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn into_parts(self) -> (Tape, R, W) {
        (self.tape, self.input, self.output)
    }

    /// Execute `program` until it ends or fails.
    ///
    /// Buffered output is flushed in both cases. When the run itself failed,
    /// that error wins over a failure to flush.
    pub fn run(&mut self, program: &Program) -> Result<(), BrainfkError> {
        let code = program.as_bytes();
        let mut spans = Spans::new(code.len(), self.memoize_spans);
        let result = self.execute(code, &mut spans, 0, code.len());
        let flushed = self.output.flush().map_err(|source| BrainfkError::Stream {
            ip: code.len(),
            source,
        });
        result.and(flushed)
    }

    /// Run `code[start..end]` as one invocation.
    ///
    /// The top level covers the whole program; each loop iteration covers the
    /// body between a `[` and its matching `]`.
    fn execute(
        &mut self,
        code: &[u8],
        spans: &mut Spans,
        start: usize,
        end: usize,
    ) -> Result<(), BrainfkError> {
        let mut ip = start;

        while ip < end {
            match code[ip] {
                b'>' => self.tape.advance(),
                b'<' => self.tape.retreat(),
                b'+' => self.tape.increment(),
                b'-' => self.tape.decrement(),
                b'.' => self.write_cell(ip)?,
                b',' => self.read_cell(ip)?,
                b'[' => {
                    let close = spans.resolve(code, ip, end)?;
                    while self.tape.get() != 0 {
                        self.execute(code, spans, ip + 1, close)?;
                    }
                    ip = close;
                }
                byte => {
                    return Err(BrainfkError::IllegalExpression { ip, byte });
                }
            }
            ip += 1;
        }

        Ok(())
    }

    fn write_cell(&mut self, ip: usize) -> Result<(), BrainfkError> {
        self.output
            .write_all(&[self.tape.get()])
            .map_err(|source| BrainfkError::Stream { ip, source })
    }

    fn read_cell(&mut self, ip: usize) -> Result<(), BrainfkError> {
        // Whatever was printed so far should be visible before blocking on input.
        self.output
            .flush()
            .map_err(|source| BrainfkError::Stream { ip, source })?;

        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => {
                    match self.eof {
                        EofPolicy::Zero => self.tape.set(0),
                        EofPolicy::Unchanged => {}
                        EofPolicy::Sentinel => self.tape.set(u8::MAX),
                    }
                    return Ok(());
                }
                Ok(_) => {
                    self.tape.set(buf[0]);
                    return Ok(());
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(BrainfkError::Stream { ip, source }),
            }
        }
    }
}
