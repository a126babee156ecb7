//! The block loop: scan, compile, report or splice, repeat. Then finalize.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::compile::{BlockCompiler, CompileOutcome, Wat2Wasm};
use crate::config::ToolConfig;
use crate::dialect::{self, Dialect};
use crate::error::ToolError;
use crate::finalize;
use crate::literal::to_hex;
use crate::paths::ScratchFiles;
use crate::remap::{line_of_offset, remap_diagnostics};
use crate::scanner::find_block;
use crate::splice::{LiteralChange, SourceBuffer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BlockStatus {
    Unchanged,
    Updated,
    Inserted,
    /// Diagnostics already remapped to the source file.
    Failed { diagnostics: String },
}

impl From<LiteralChange> for BlockStatus {
    fn from(change: LiteralChange) -> Self {
        match change {
            LiteralChange::Unchanged => BlockStatus::Unchanged,
            LiteralChange::Updated => BlockStatus::Updated,
            LiteralChange::Inserted => BlockStatus::Inserted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockReport {
    /// One-based line of the opening `/* wat2wasm`, counted in the text as it
    /// stood when the block was reached (earlier splices included).
    pub line: usize,
    pub options: Vec<String>,
    #[serde(flatten)]
    pub status: BlockStatus,
}

/// Result of running every block of one file through the compiler.
#[derive(Debug, Clone)]
pub struct Processed {
    pub text: String,
    pub modified: bool,
    pub blocks: Vec<BlockReport>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BlockCounts {
    pub inserted: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl BlockCounts {
    pub fn tally(blocks: &[BlockReport]) -> Self {
        let mut counts = Self::default();
        for block in blocks {
            match block.status {
                BlockStatus::Inserted => counts.inserted += 1,
                BlockStatus::Updated => counts.updated += 1,
                BlockStatus::Unchanged => counts.unchanged += 1,
                BlockStatus::Failed { .. } => counts.failed += 1,
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub path: String,
    pub dialect: &'static str,
    pub modified: bool,
    /// Whether the formatter ran and exited successfully after the write-back.
    pub formatted: bool,
    pub counts: BlockCounts,
    pub blocks: Vec<BlockReport>,
}

/// Compile every block in `source` and sync the literal after each one.
///
/// Diagnostics of failed blocks are printed to stderr as they occur and kept in
/// the block's report. Only compiler launch and scratch IO failures abort.
pub fn process_source(
    source: String,
    source_path: &str,
    dialect: &Dialect,
    compiler: &mut dyn BlockCompiler,
) -> Result<Processed, ToolError> {
    let unit_name = compiler.unit_name();
    let mut buffer = SourceBuffer::new(source);
    let mut blocks = Vec::new();
    let mut cursor = 0;

    while let Some(block) = find_block(buffer.text(), cursor) {
        cursor = block.end;
        let line = line_of_offset(buffer.text(), block.start) + 1;
        debug!("wat2wasm block at line {line}: {:?}\n{}", block.options, block.body);

        let status = match compiler.compile(&block.body, &block.options)? {
            CompileOutcome::Failure(diagnostics) => {
                let remapped = remap_diagnostics(
                    &diagnostics,
                    buffer.text(),
                    source_path,
                    &unit_name,
                    block.body_span.start,
                );
                eprintln!("{}", remapped.trim_end_matches('\n'));
                BlockStatus::Failed { diagnostics: remapped }
            }
            CompileOutcome::Success(bytes) => {
                let hex = to_hex(&bytes);
                let splice = buffer.sync_literal(block.end, &dialect.literal, &hex);
                cursor = splice.resume;
                splice.change.into()
            }
        };

        blocks.push(BlockReport {
            line,
            options: block.options,
            status,
        });
    }

    let modified = buffer.is_modified();
    Ok(Processed {
        text: buffer.into_text(),
        modified,
        blocks,
    })
}

/// Process one file with an explicit compiler: read, process, write back and format.
pub fn run_with(
    source_path: &Path,
    dialect: &'static Dialect,
    compiler: &mut dyn BlockCompiler,
) -> Result<RunSummary, ToolError> {
    let source = std::fs::read_to_string(source_path)
        .map_err(|e| ToolError::io_at(source_path, &e))?;
    let path = source_path.to_string_lossy().into_owned();

    let processed = process_source(source, &path, dialect, compiler)?;
    let formatted = finalize::finalize(source_path, dialect, &processed.text, processed.modified)?;
    let counts = BlockCounts::tally(&processed.blocks);
    if processed.modified {
        info!(
            "updated {path}: {} inserted, {} updated, {} failed",
            counts.inserted, counts.updated, counts.failed
        );
    }

    Ok(RunSummary {
        path,
        dialect: dialect.name,
        modified: processed.modified,
        formatted,
        counts,
        blocks: processed.blocks,
    })
}

/// The whole tool: resolve the dialect, run `wat2wasm` over every block, and
/// remove the scratch files however the run ends.
pub fn run(source_path: Option<&Path>, config: &ToolConfig) -> Result<RunSummary, ToolError> {
    let scratch = ScratchFiles::new(&config.scratch_dir, &config.scratch_stem);
    let source_path = source_path.ok_or(ToolError::MissingArgument)?;
    let dialect = dialect::resolve(source_path)?;
    let mut compiler = Wat2Wasm::new(config, &scratch);
    run_with(source_path, dialect, &mut compiler)
}
