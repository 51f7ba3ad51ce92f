use std::path::PathBuf;

/// Errors that can abort loading or running a Brainfuck program.
///
/// Every variant is fatal: the run stops at the first one and the binary
/// turns it into a single diagnostic line and exit status 1.
#[derive(Debug, thiserror::Error)]
pub enum BrainfkError {
    /// The source could not be opened or read.
    #[error("failed to open source '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source '{}' doesn't exist", path.display())]
    SourceMissing { path: PathBuf },

    #[error("source '{}' is not a regular file", path.display())]
    NotRegularFile { path: PathBuf },

    #[error("empty source '{}'", path.display())]
    EmptySource { path: PathBuf },

    /// Memory for the instruction buffer or the tape could not be obtained.
    #[error("failed to allocate {requested} bytes for the {what}")]
    Allocation { what: &'static str, requested: usize },

    /// Sanitization left nothing to execute.
    #[error("source '{}' contains no valid brainfuck code", path.display())]
    EmptyProgram { path: PathBuf },

    /// A `[` whose matching `]` is not inside the enclosing scope.
    #[error("loop doesn't close (instruction {ip})")]
    UnmatchedLoop { ip: usize },

    /// A `]` reached by direct dispatch, or a byte outside `><+-.,[]`.
    #[error("illegal expression '{}' (instruction {ip})", char::from(*byte))]
    IllegalExpression { ip: usize, byte: u8 },

    /// Reading stdin for `,` or writing stdout for `.` failed.
    #[error("I/O error at instruction {ip}: {source}")]
    Stream {
        ip: usize,
        #[source]
        source: std::io::Error,
    },
}

impl BrainfkError {
    /// Instruction index the error points at, when it has one.
    pub fn ip(&self) -> Option<usize> {
        match self {
            BrainfkError::UnmatchedLoop { ip }
            | BrainfkError::IllegalExpression { ip, .. }
            | BrainfkError::Stream { ip, .. } => Some(*ip),
            _ => None,
        }
    }
}
