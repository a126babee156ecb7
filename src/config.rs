use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::paths;

pub const DEFAULT_COMPILER: &str = "wat2wasm";

/// Options passed to the compiler before any per-block options, so a block can
/// re-enable a feature by naming the opposite flag.
pub const DEFAULT_COMPILER_OPTIONS: [&str; 3] = [
    "--disable-saturating-float-to-int",
    "--disable-sign-extension",
    "--disable-multi-value",
];

// ── Tool configuration ───────────────────────────────────────────

/// Everything the pipeline needs besides the source file. Every field may be
/// omitted from a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Compiler executable, looked up on `PATH` unless it contains a separator.
    pub compiler: String,
    pub default_options: Vec<String>,
    /// Directory holding the scratch unit and its binary output.
    ///
    /// The binary is read from `<scratch_dir>/<scratch_stem>.wasm`. `wat2wasm`
    /// writes its default output into the working directory, so with any value
    /// other than `.` the configured compiler must write beside the unit.
    pub scratch_dir: PathBuf,
    pub scratch_stem: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            default_options: DEFAULT_COMPILER_OPTIONS.iter().map(ToString::to_string).collect(),
            scratch_dir: PathBuf::from("."),
            scratch_stem: paths::DEFAULT_SCRATCH_STEM.to_string(),
        }
    }
}

impl ToolConfig {
    /// Full compiler argument list for one block: defaults first, then the block's own.
    pub fn compiler_options(&self, block_options: &[String]) -> Vec<String> {
        self.default_options
            .iter()
            .chain(block_options)
            .cloned()
            .collect()
    }
}

/// Load a config file. Missing fields fall back to their defaults.
pub fn load_config(path: &Path) -> Result<ToolConfig, ToolError> {
    let text = std::fs::read_to_string(path).map_err(|e| ToolError::Config {
        message: format!("{}: {e}", path.display()),
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Resolve the config for a run: an explicit path wins, then the environment
/// variable, then the built-in defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<ToolConfig, ToolError> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match std::env::var_os(paths::CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => load_config(Path::new(&path)),
        _ => Ok(ToolConfig::default()),
    }
}
