use std::fmt;

/// The eight Brainfuck command bytes, in no particular order.
pub const COMMANDS: &[u8; 8] = b"><+-.,[]";

/// Whether `byte` is one of `><+-.,[]`.
#[inline]
pub fn is_command(byte: u8) -> bool {
    matches!(byte, b'>' | b'<' | b'+' | b'-' | b'.' | b',' | b'[' | b']')
}

/// A sanitized instruction buffer.
///
/// Only the sanitizer builds one, so every byte is a member of [`COMMANDS`].
/// The text is immutable once built; the interpreter only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    code: Box<[u8]>,
}

impl Program {
    pub(crate) fn from_sanitized(code: Vec<u8>) -> Self {
        debug_assert!(code.iter().all(|&b| is_command(b)));
        Self {
            code: code.into_boxed_slice(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }
}

/// Find the `]` matching the `[` at `open`, scanning no further than `end`.
///
/// Nesting starts at 1 just after `open`; the first index where it drops
/// to 0 is returned. `None` means the loop never closes inside `..end`.
pub(crate) fn find_loop_end(code: &[u8], open: usize, end: usize) -> Option<usize> {
    let end = end.min(code.len());
    let mut depth = 1usize;
    for (i, &byte) in code.iter().enumerate().take(end).skip(open + 1) {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Every byte is ASCII.
        for &byte in self.code.iter() {
            write!(f, "{}", char::from(byte))?;
        }
        Ok(())
    }
}
