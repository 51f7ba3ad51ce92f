//! A minimal Brainfuck interpreter.
//!
//! A source file is sanitized into a flat instruction buffer, keeping only
//! the eight commands `><+-.,[]` and dropping `//` line comments, and then
//! executed on a fixed-size circular tape of byte cells (65,536 by default).
//!
//! Features and behaviors:
//! - Memory tape initialized to 0; the cursor wraps around both ends.
//! - Cell arithmetic wraps modulo 256.
//! - Input `,` reads a single byte; at end of input the configured
//!   [`EofPolicy`] decides what is stored (0 by default).
//! - Output `.` writes the raw byte at the current cell.
//! - Loops are matched when entered; an unclosed `[` or a stray `]` aborts
//!   the whole run.
//!
//! Quick start:
//!
//! ```
//! use brainfk::{sanitizer::sanitize, Interpreter, Tape};
//!
//! let program = sanitize(b"++++++++[>++++++++<-]>+. // prints 'A'").unwrap();
//! let mut out = Vec::new();
//! let mut bf = Interpreter::new(Tape::new(16).unwrap(), std::io::empty(), &mut out);
//! bf.run(&program).expect("program should run");
//! assert_eq!(out, b"A");
//! ```

pub mod cli_util;
pub mod commands;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod logging;
pub mod program;
pub mod sanitizer;
pub mod source;
pub mod tape;

pub use config::Settings;
pub use error::BrainfkError;
pub use interpreter::{EofPolicy, Interpreter};
pub use program::Program;
pub use tape::{Tape, DEFAULT_TAPE_LEN};
