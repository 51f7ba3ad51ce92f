use std::io::{self, Write};

use crate::error::BrainfkError;
use crate::program::Program;

/// Characters of program text shown on each side of the failing instruction.
const WINDOW: usize = 32;

/// Print `err` to stderr as `program: message.`, followed by a caret under the
/// failing instruction when the error points into `code`.
pub fn print_error(program: &str, code: Option<&Program>, err: &BrainfkError) {
    let mut stderr = io::stderr().lock();
    let _ = write_error(&mut stderr, program, code, err);
    let _ = stderr.flush();
}

pub fn write_error<W: Write>(
    out: &mut W,
    program: &str,
    code: Option<&Program>,
    err: &BrainfkError,
) -> io::Result<()> {
    writeln!(out, "{program}: {err}.")?;
    match (code, err.ip()) {
        (Some(code), Some(ip)) => write_context(out, code.as_bytes(), ip),
        _ => Ok(()),
    }
}

/// Show a short window of sanitized program text with a caret under `pos`.
fn write_context<W: Write>(out: &mut W, code: &[u8], pos: usize) -> io::Result<()> {
    if pos >= code.len() {
        return Ok(());
    }
    let start = pos.saturating_sub(WINDOW);
    let end = (pos + WINDOW + 1).min(code.len());

    out.write_all(b"  ")?;
    out.write_all(&code[start..end])?;
    writeln!(out)?;
    writeln!(out, "  {:>width$}", "^", width = pos - start + 1)
}

/// The executable's file name, without its directory.
pub fn program_name(argv0: &str) -> &str {
    argv0.rsplit(['/', '\\']).next().unwrap_or(argv0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitizer::sanitize;
    use std::path::PathBuf;

    fn render(code: Option<&Program>, err: &BrainfkError) -> String {
        let mut out = Vec::new();
        write_error(&mut out, "brainfk", code, err).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn caret_points_at_failing_instruction() {
        let code = sanitize(b"+++]").unwrap();
        let err = BrainfkError::IllegalExpression { ip: 3, byte: b']' };
        assert_eq!(
            render(Some(&code), &err),
            "brainfk: illegal expression ']' (instruction 3).\n  +++]\n     ^\n"
        );
    }

    #[test]
    fn context_window_is_clipped() {
        let text = format!("{}[{}", "+".repeat(40), "-".repeat(40));
        let code = sanitize(text.as_bytes()).unwrap();
        let err = BrainfkError::UnmatchedLoop { ip: 40 };
        let rendered = render(Some(&code), &err);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), 2 + WINDOW * 2 + 1);
        assert_eq!(lines[2].find('^'), Some(2 + WINDOW));
    }

    #[test]
    fn stream_error_points_at_instruction() {
        let code = sanitize(b"+.").unwrap();
        let err = BrainfkError::Stream {
            ip: 1,
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"),
        };
        assert_eq!(
            render(Some(&code), &err),
            "brainfk: I/O error at instruction 1: closed.\n  +.\n   ^\n"
        );
    }

    #[test]
    fn final_flush_error_has_no_caret() {
        // A failed flush after the last instruction points one past the end.
        let code = sanitize(b"+.").unwrap();
        let err = BrainfkError::Stream {
            ip: 2,
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"),
        };
        assert_eq!(render(Some(&code), &err), "brainfk: I/O error at instruction 2: closed.\n");
    }

    #[test]
    fn errors_without_position_are_one_line() {
        let err = BrainfkError::EmptyProgram {
            path: PathBuf::from("only-comments.bf"),
        };
        assert_eq!(
            render(None, &err),
            "brainfk: source 'only-comments.bf' contains no valid brainfuck code.\n"
        );
    }

    #[test]
    fn program_name_strips_directories() {
        assert_eq!(program_name("/usr/local/bin/brainfk"), "brainfk");
        assert_eq!(program_name("brainfk"), "brainfk");
    }
}
