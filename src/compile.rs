use std::fs;
use std::process::Command;

use tracing::debug;

use crate::config::ToolConfig;
use crate::error::ToolError;
use crate::paths::ScratchFiles;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileOutcome {
    Success(Vec<u8>),
    /// The compiler's stderr, still in scratch-unit coordinates.
    Failure(String),
}

/// Turns one block body into a binary module.
pub trait BlockCompiler {
    /// The unit name as it appears in this compiler's diagnostics.
    fn unit_name(&self) -> String;

    /// `Err` only when the compiler could not be run at all; a rejected block is
    /// `Ok(CompileOutcome::Failure)`.
    fn compile(&mut self, body: &str, options: &[String]) -> Result<CompileOutcome, ToolError>;
}

/// `wat2wasm` run as a subprocess over the shared scratch files.
pub struct Wat2Wasm<'a> {
    config: &'a ToolConfig,
    scratch: &'a ScratchFiles,
}

impl<'a> Wat2Wasm<'a> {
    pub fn new(config: &'a ToolConfig, scratch: &'a ScratchFiles) -> Self {
        Self { config, scratch }
    }
}

impl BlockCompiler for Wat2Wasm<'_> {
    fn unit_name(&self) -> String {
        self.scratch.unit_name()
    }

    fn compile(&mut self, body: &str, options: &[String]) -> Result<CompileOutcome, ToolError> {
        let unit = &self.scratch.unit;
        let binary = &self.scratch.binary;

        fs::write(unit, body).map_err(|e| ToolError::io_at(unit, &e))?;
        // A stale module from the previous block must never be mistaken for this one's.
        if binary.exists() {
            fs::remove_file(binary).map_err(|e| ToolError::io_at(binary, &e))?;
        }

        let args = self.config.compiler_options(options);
        debug!("running {} {} {}", self.config.compiler, unit.display(), args.join(" "));
        let output = Command::new(&self.config.compiler)
            .arg(unit)
            .args(&args)
            .output()
            .map_err(|e| ToolError::CompilerLaunch {
                program: self.config.compiler.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            debug!("{} exited with {}", self.config.compiler, output.status);
            return Ok(CompileOutcome::Failure(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        let bytes = fs::read(binary).map_err(|e| ToolError::io_at(binary, &e))?;
        Ok(CompileOutcome::Success(bytes))
    }
}
