use serde::Serialize;

use crate::literal::{normalize_payload, LiteralGrammar};

/// What happened to the literal statement following a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LiteralChange {
    Unchanged,
    Updated,
    Inserted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splice {
    pub change: LiteralChange,
    /// Where scanning continues: just past the literal statement as it now stands.
    pub resume: usize,
}

/// The whole source text plus whether it differs from what was read.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffer {
    text: String,
    modified: bool,
}

impl SourceBuffer {
    pub fn new(text: String) -> Self {
        Self { text, modified: false }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Bring the literal statement at `at` in line with `hex`, inserting one if
    /// none is there. `at` must be a char boundary, normally the end of a block.
    pub fn sync_literal(&mut self, at: usize, grammar: &LiteralGrammar, hex: &str) -> Splice {
        let Some(stmt) = grammar.match_at(&self.text, at) else {
            let statement = grammar.emit(hex);
            self.text.insert_str(at, &statement);
            self.modified = true;
            return Splice {
                change: LiteralChange::Inserted,
                resume: at + statement.len(),
            };
        };

        if normalize_payload(stmt.payload(&self.text)) == hex {
            return Splice {
                change: LiteralChange::Unchanged,
                resume: stmt.end,
            };
        }

        let old_len = stmt.payload_span.len();
        self.text.replace_range(stmt.payload_span, hex);
        self.modified = true;
        Splice {
            change: LiteralChange::Updated,
            resume: stmt.end - old_len + hex.len(),
        }
    }
}
