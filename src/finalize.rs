use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::dialect::Dialect;
use crate::error::ToolError;

/// Replace the file's contents in a single write.
pub fn write_back(path: &Path, text: &str) -> Result<(), ToolError> {
    std::fs::write(path, text).map_err(|e| ToolError::io_at(path, &e))
}

/// Run the dialect's formatter on `path`. Every failure, including a missing
/// formatter, is ignored; the return value only says whether it succeeded.
pub fn run_formatter(dialect: &Dialect, path: &Path) -> bool {
    let Some((program, args)) = dialect.formatter.split_first() else {
        return false;
    };
    match Command::new(program).args(args).arg(path).output() {
        Ok(output) if output.status.success() => {
            debug!("formatted {} with {program}", path.display());
            true
        }
        Ok(output) => {
            debug!("{program} exited with {}", output.status);
            false
        }
        Err(e) => {
            debug!("could not run {program}: {e}");
            false
        }
    }
}

/// Persist `text` and format it, if the run changed anything. Returns whether
/// the formatter ran successfully.
pub fn finalize(path: &Path, dialect: &Dialect, text: &str, modified: bool) -> Result<bool, ToolError> {
    if !modified {
        return Ok(false);
    }
    write_back(path, text)?;
    Ok(run_formatter(dialect, path))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::literal::LiteralGrammar;

    const fn test_dialect(formatter: &'static [&'static str]) -> Dialect {
        Dialect {
            name: "test",
            extension: "test",
            literal: LiteralGrammar { prefix: &[], suffix: ";", emit_prefix: "" },
            formatter,
        }
    }

    static NO_FORMATTER: Dialect = test_dialect(&["wat2wasm4tests-no-such-formatter", "-i"]);

    #[test]
    fn unmodified_file_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.rs");
        std::fs::write(&path, "original").unwrap();

        let formatted = finalize(&path, &NO_FORMATTER, "changed", false).unwrap();
        assert!(!formatted);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "original");
    }

    #[test]
    fn formatter_failure_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.rs");
        std::fs::write(&path, "original").unwrap();

        let formatted = finalize(&path, &NO_FORMATTER, "changed", true).unwrap();
        assert!(!formatted);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "changed");
    }

    #[cfg(unix)]
    #[test]
    fn successful_formatter_is_reported() {
        static TRUE_FORMATTER: Dialect = test_dialect(&["true"]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.rs");

        assert!(finalize(&path, &TRUE_FORMATTER, "changed", true).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "changed");
    }

    #[test]
    fn empty_formatter_command_is_not_run() {
        static NO_COMMAND: Dialect = test_dialect(&[]);
        let dir = tempfile::tempdir().unwrap();
        assert!(!run_formatter(&NO_COMMAND, &dir.path().join("a.rs")));
    }

    #[test]
    fn write_failure_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("a.rs");
        let err = finalize(&path, &NO_FORMATTER, "changed", true).unwrap_err();
        assert!(matches!(err, ToolError::Io { .. }));
    }
}
