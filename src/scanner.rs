//! Locates embedded WAT blocks:
//!
//! ```text
//! /* wat2wasm [options...]
//! (module ...)
//! */
//! ```
//!
//! The body runs up to the first `*`, which must start the closing `*/`.
//! Nested comments are not recognised.

use std::ops::Range;

use crate::cursor::Cursor;

pub const BLOCK_OPEN: &str = "/* wat2wasm";
pub const BLOCK_CLOSE: &str = "*/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedBlock {
    /// Offset of the opening `/*`.
    pub start: usize,
    pub options: Vec<String>,
    pub body: String,
    pub body_span: Range<usize>,
    /// Offset just past the closing `*/`.
    pub end: usize,
}

/// Find the first well-formed block starting at or after `from`.
pub fn find_block(source: &str, from: usize) -> Option<EmbeddedBlock> {
    let mut search = from;
    loop {
        let start = Cursor::new(source, search).find(BLOCK_OPEN)?;
        if let Some(block) = block_at(source, start) {
            return Some(block);
        }
        search = start + 1;
    }
}

fn block_at(source: &str, start: usize) -> Option<EmbeddedBlock> {
    let mut cursor = Cursor::new(source, start + BLOCK_OPEN.len());
    let options_start = cursor.pos;
    let newline = cursor.find_byte(b'\n')?;
    let options = source
        .get(options_start..newline)?
        .split_whitespace()
        .map(str::to_string)
        .collect();

    cursor.pos = newline + 1;
    let body_start = cursor.pos;
    let star = cursor.find_byte(b'*')?;
    cursor.pos = star;
    if !cursor.eat(BLOCK_CLOSE) {
        return None;
    }

    Some(EmbeddedBlock {
        start,
        options,
        body: source.get(body_start..star)?.to_string(),
        body_span: body_start..star,
        end: cursor.pos,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn no_blocks() {
        assert_eq!(find_block("fn main() {}\n/* plain comment */\n", 0), None);
        assert_eq!(find_block("", 0), None);
    }

    #[test]
    fn block_without_options() {
        let src = "x\n/* wat2wasm\n(module)\n*/\ny";
        let block = find_block(src, 0).unwrap();
        assert_eq!(block.start, 2);
        assert!(block.options.is_empty());
        assert_eq!(block.body, "(module)\n");
        assert_eq!(&src[block.body_span.clone()], "(module)\n");
        assert_eq!(&src[block.end..], "\ny");
    }

    #[test]
    fn options_are_split_on_whitespace() {
        let src = "/* wat2wasm --no-check  --enable-threads\r\n(module)\n*/";
        let block = find_block(src, 0).unwrap();
        assert_eq!(block.options, vec!["--no-check", "--enable-threads"]);
        assert_eq!(block.end, src.len());
    }

    #[test]
    fn marker_line_needs_newline() {
        assert_eq!(find_block("/* wat2wasm (module) */", 0), None);
    }

    #[test]
    fn stray_star_rejects_candidate_and_scan_moves_on() {
        let src = "/* wat2wasm\n(module (; * ;))\n*/\n/* wat2wasm\n(module)\n*/";
        let block = find_block(src, 0).unwrap();
        assert_eq!(block.body, "(module)\n");
        assert_eq!(block.end, src.len());
    }

    #[test]
    fn scanning_resumes_from_offset() {
        let src = "/* wat2wasm\n(module $a)\n*/\nmid\n/* wat2wasm --x\n(module $b)\n*/\n";
        let first = find_block(src, 0).unwrap();
        let second = find_block(src, first.end).unwrap();
        assert_eq!(first.body, "(module $a)\n");
        assert_eq!(second.body, "(module $b)\n");
        assert_eq!(second.options, vec!["--x"]);
        assert_eq!(find_block(src, second.end), None);
    }

    #[test]
    fn offset_past_end_is_no_match() {
        assert_eq!(find_block("/* wat2wasm\n*/", 100), None);
    }

    #[test]
    fn empty_body() {
        let block = find_block("/* wat2wasm\n*/", 0).unwrap();
        assert_eq!(block.body, "");
        assert_eq!(block.body_span, 12..12);
    }
}
