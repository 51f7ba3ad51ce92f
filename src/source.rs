use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use tracing::debug;

use crate::error::BrainfkError;
use crate::program::Program;
use crate::sanitizer::sanitize_reader;

/// Check that `path` names an existing, non-empty regular file.
pub fn check_source(path: &Path) -> Result<(), BrainfkError> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(BrainfkError::SourceMissing {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(BrainfkError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if !meta.is_file() {
        return Err(BrainfkError::NotRegularFile {
            path: path.to_path_buf(),
        });
    }
    if meta.len() == 0 {
        return Err(BrainfkError::EmptySource {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Check, read and sanitize the source at `path`.
///
/// Fails with [`BrainfkError::EmptyProgram`] when nothing executable is left,
/// so callers never allocate a tape for an empty program.
pub fn load_program(path: &Path) -> Result<Program, BrainfkError> {
    check_source(path)?;
    let file = File::open(path).map_err(|source| BrainfkError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program = sanitize_reader(BufReader::new(file), path)?;
    if program.is_empty() {
        return Err(BrainfkError::EmptyProgram {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), instructions = program.len(), "loaded program");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn source_file(content: &[u8]) -> tempfile::NamedTempFile {
        let mut tf = tempfile::NamedTempFile::new().expect("tempfile");
        tf.write_all(content).unwrap();
        tf
    }

    #[test]
    fn loads_and_sanitizes() {
        let tf = source_file(b"// add two\n++ .\n");
        let program = load_program(tf.path()).unwrap();
        assert_eq!(program.as_bytes(), b"++.");
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_program(&dir.path().join("nope.bf"));
        assert!(matches!(result, Err(BrainfkError::SourceMissing { .. })));
    }

    #[test]
    fn directory_is_not_a_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_program(dir.path());
        assert!(matches!(result, Err(BrainfkError::NotRegularFile { .. })));
    }

    #[test]
    fn zero_byte_file() {
        let tf = source_file(b"");
        let result = load_program(tf.path());
        assert!(matches!(result, Err(BrainfkError::EmptySource { .. })));
    }

    #[test]
    fn only_comments_is_empty_program() {
        let tf = source_file(b"// just a comment\n   \nsome prose\n");
        let result = load_program(tf.path());
        assert!(matches!(result, Err(BrainfkError::EmptyProgram { .. })));
    }
}
