use std::fmt;

use serde::Serialize;

/// Fatal errors for a run. Per-block compile failures are not errors; they are
/// reported through [`crate::compile::CompileOutcome::Failure`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "detail")]
pub enum ToolError {
    MissingArgument,
    UnsupportedDialect { extension: String },
    Io { message: String },
    CompilerLaunch { program: String, message: String },
    Config { message: String },
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolError::MissingArgument => write!(f, "Missing FILE argument"),
            ToolError::UnsupportedDialect { extension } => {
                if extension.is_empty() {
                    write!(f, "File extension not supported")
                } else {
                    write!(f, "File extension not supported: .{extension}")
                }
            }
            ToolError::Io { message } => write!(f, "I/O error: {message}"),
            ToolError::CompilerLaunch { program, message } => {
                write!(f, "Failed to run {program}: {message}")
            }
            ToolError::Config { message } => write!(f, "Invalid config: {message}"),
        }
    }
}

impl std::error::Error for ToolError {}

impl From<std::io::Error> for ToolError {
    fn from(e: std::io::Error) -> Self {
        ToolError::Io {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        ToolError::Config {
            message: e.to_string(),
        }
    }
}

impl ToolError {
    /// Attach the offending path to an I/O failure.
    pub fn io_at(path: &std::path::Path, e: &std::io::Error) -> Self {
        ToolError::Io {
            message: format!("{}: {e}", path.display()),
        }
    }
}
