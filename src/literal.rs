//! Literal statements that carry a compiled module as a hex string, e.g.
//!
//! ```text
//! const auto wasm = from_hex("0061736d01000000");
//! let wasm = hex::decode("0061736d01000000").unwrap();
//! ```
//!
//! The payload may be split over several lines as adjacent string pieces; it ends
//! at the last quote before the first `;`.

use std::ops::Range;

use crate::cursor::Cursor;

/// One element of a statement prefix, matched left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Zero or more whitespace characters.
    Whitespace,
    Lit(&'static str),
    Optional(&'static str),
    /// An identifier of at least one character.
    Word,
}

/// How a dialect spells a hex literal statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralGrammar {
    /// Everything up to and including the opening quote of the payload.
    pub prefix: &'static [Step],
    /// Text between the payload and the end of the statement; must end in `;`.
    pub suffix: &'static str,
    /// Leading text of a newly emitted statement, up to the opening quote.
    pub emit_prefix: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralStatement {
    pub payload_span: Range<usize>,
    /// Offset just past the terminating `;`.
    pub end: usize,
}

impl LiteralGrammar {
    /// Match a statement anchored at `at`. Leading whitespace is part of the statement.
    pub fn match_at(&self, source: &str, at: usize) -> Option<LiteralStatement> {
        let mut cursor = Cursor::new(source, at);
        for step in self.prefix {
            match *step {
                Step::Whitespace => cursor.skip_whitespace(),
                Step::Lit(lit) => {
                    if !cursor.eat(lit) {
                        return None;
                    }
                }
                Step::Optional(lit) => {
                    cursor.eat(lit);
                }
                Step::Word => {
                    if !cursor.eat_word() {
                        return None;
                    }
                }
            }
        }

        let payload_start = cursor.pos;
        let semicolon = cursor.find_byte(b';')?;
        let end = semicolon + 1;
        let payload_end = end.checked_sub(self.suffix.len())?;
        if payload_end < payload_start || source.get(payload_end..end)? != self.suffix {
            return None;
        }

        Some(LiteralStatement {
            payload_span: payload_start..payload_end,
            end,
        })
    }

    /// A fresh single-line statement for `hex`.
    pub fn emit(&self, hex: &str) -> String {
        format!("{}{hex}{}", self.emit_prefix, self.suffix)
    }
}

impl LiteralStatement {
    pub fn payload<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.payload_span.clone()).unwrap_or_default()
    }
}

/// Strip the characters that may separate payload pieces: spaces, line breaks and quotes.
pub fn normalize_payload(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '\r' | '\n' | '"'))
        .collect()
}

/// Lowercase hex, two digits per byte, no separators.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::dialect::{CPP, RUST};

    #[test]
    fn hex_is_lowercase_pairs() {
        let hex = to_hex(&[0x00, 0x61, 0x73, 0x6d]);
        assert_eq!(hex, "0061736d");
        assert_eq!(to_hex(&[0xAB, 0xFF]), "abff");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn cpp_statement_forms() {
        for src in [
            "\nconst auto wasm = from_hex(\"0061\");",
            "\n  auto bin =\n    fizzy::test::from_hex(\"0061\");",
            "auto w = from_hex(  \"0061\");",
        ] {
            let stmt = CPP.literal.match_at(src, 0).unwrap();
            assert_eq!(stmt.payload(src), "0061", "{src}");
            assert_eq!(stmt.end, src.len());
        }
    }

    #[test]
    fn cpp_rejects_other_statements() {
        for src in [
            "\nint x = 1;",
            "\nconst int wasm = from_hex(\"00\");",
            "\nauto wasm = to_hex(\"00\");",
            "\nauto wasm = from_hex(\"00\")",
            "\nauto  wasm = from_hex(\"00\");",
        ] {
            assert_eq!(CPP.literal.match_at(src, 0), None, "{src}");
        }
    }

    #[test]
    fn rust_statement_forms() {
        let src = "\n    let wasm = hex::decode(\"0061\").unwrap();\nmore";
        let stmt = RUST.literal.match_at(src, 0).unwrap();
        assert_eq!(stmt.payload(src), "0061");
        assert_eq!(&src[stmt.end..], "\nmore");
    }

    #[test]
    fn rust_rejects_missing_unwrap() {
        let src = "\nlet wasm = hex::decode(\"0061\")?;";
        assert_eq!(RUST.literal.match_at(src, 0), None);
    }

    #[test]
    fn multi_line_payload() {
        let src = "\nlet wasm = hex::decode(\n    \"0061736d\"\n    \"01000000\"\n).unwrap();";
        // `)` is separated from the final quote, so this is not the emitted shape.
        assert_eq!(RUST.literal.match_at(src, 0), None);

        let src = "\nlet wasm = hex::decode(\n    \"0061736d\"\n    \"01000000\").unwrap();";
        let stmt = RUST.literal.match_at(src, 0).unwrap();
        assert_eq!(normalize_payload(stmt.payload(src)), "0061736d01000000");
    }

    #[test]
    fn match_is_anchored() {
        let src = "x\nlet wasm = hex::decode(\"00\").unwrap();";
        assert_eq!(RUST.literal.match_at(src, 0), None);
        assert!(RUST.literal.match_at(src, 1).is_some());
    }

    #[test]
    fn payload_stops_at_first_semicolon() {
        let src = "\nconst auto wasm = from_hex(\"00\"); int y = f(\"1\");";
        let stmt = CPP.literal.match_at(src, 0).unwrap();
        assert_eq!(stmt.payload(src), "00");
    }

    #[test]
    fn empty_payload() {
        let src = "let wasm = hex::decode(\"\").unwrap();";
        let stmt = RUST.literal.match_at(src, 0).unwrap();
        assert_eq!(stmt.payload_span.len(), 0);
    }

    #[test]
    fn emit_round_trips_through_match() {
        for dialect in [&CPP, &RUST] {
            let stmt_text = dialect.literal.emit("0061736d");
            let stmt = dialect.literal.match_at(&stmt_text, 0).unwrap();
            assert_eq!(stmt.payload(&stmt_text), "0061736d");
        }
        assert_eq!(CPP.literal.emit("00"), "const auto wasm = from_hex(\"00\");");
        assert_eq!(RUST.literal.emit("00"), "let wasm = hex::decode(\"00\").unwrap();");
    }

    #[test]
    fn normalize_keeps_tabs() {
        assert_eq!(normalize_payload("\"00 61\"\r\n  \"73\""), "006173");
        assert_eq!(normalize_payload("00\t61"), "00\t61");
    }
}
