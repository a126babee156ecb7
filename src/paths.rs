//! Centralized path definitions for scratch files and configuration.
//!
//! No other module should hard-code these names.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

// ── Leaf names ───────────────────────────────────────────────────

pub const DEFAULT_SCRATCH_STEM: &str = "wat2wasm4tests";
pub const UNIT_EXTENSION: &str = "wat";
pub const BINARY_EXTENSION: &str = "wasm";

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "WAT2WASM4TESTS_CONFIG";

// ── Scratch paths ────────────────────────────────────────────────

/// The scratch compile unit, `<dir>/<stem>.wat`.
pub fn scratch_unit_path(scratch_dir: &Path, stem: &str) -> PathBuf {
    scratch_dir.join(format!("{stem}.{UNIT_EXTENSION}"))
}

/// Where `wat2wasm` writes its output for the scratch unit when no `-o` is given.
pub fn scratch_binary_path(scratch_dir: &Path, stem: &str) -> PathBuf {
    scratch_dir.join(format!("{stem}.{BINARY_EXTENSION}"))
}

/// The pair of scratch files for one run. Both are removed when the guard drops,
/// whichever way the run ends.
#[derive(Debug)]
pub struct ScratchFiles {
    pub unit: PathBuf,
    pub binary: PathBuf,
}

impl ScratchFiles {
    pub fn new(scratch_dir: &Path, stem: &str) -> Self {
        Self {
            unit: scratch_unit_path(scratch_dir, stem),
            binary: scratch_binary_path(scratch_dir, stem),
        }
    }

    /// The unit path as the compiler sees it, and therefore as it appears in diagnostics.
    pub fn unit_name(&self) -> String {
        self.unit.to_string_lossy().into_owned()
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        for path in [&self.unit, &self.binary] {
            if path.exists() {
                if let Err(e) = fs::remove_file(path) {
                    debug!("could not remove {}: {e}", path.display());
                }
            }
        }
    }
}
