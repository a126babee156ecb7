/// A forward-only position over source text. Every offset it hands out is a byte
/// offset into the original `&str` and lies on a char boundary.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pub pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str, pos: usize) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos,
        }
    }

    pub fn rest(&self) -> &'a str {
        self.source.get(self.pos..).unwrap_or_default()
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume `lit` if the text at the cursor starts with it.
    pub fn eat(&mut self, lit: &str) -> bool {
        if self.rest().starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// Consume one or more identifier characters (alphanumerics and `_`).
    pub fn eat_word(&mut self) -> bool {
        let start = self.pos;
        while let Some(ch) = self.peek_char() {
            if !(ch.is_alphanumeric() || ch == '_') {
                break;
            }
            self.pos += ch.len_utf8();
        }
        self.pos > start
    }

    /// Absolute offset of the next `needle` at or after the cursor.
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.rest().find(needle).map(|i| self.pos + i)
    }

    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        self.bytes
            .get(self.pos..)?
            .iter()
            .position(|&b| b == byte)
            .map(|i| self.pos + i)
    }
}
