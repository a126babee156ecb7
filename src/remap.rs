//! Translate compiler diagnostics from scratch-unit coordinates back to the
//! source file the block came from.

/// Zero-based line of `offset` in `source`.
pub fn line_of_offset(source: &str, offset: usize) -> usize {
    source
        .as_bytes()
        .iter()
        .take(offset)
        .filter(|&&b| b == b'\n')
        .count()
}

/// Rewrite every `<unit_name>:<line>:` so the line is relative to `source`
/// (the block body starts at `body_start`), then replace the unit name with
/// `source_path` everywhere.
pub fn remap_diagnostics(
    diagnostics: &str,
    source: &str,
    source_path: &str,
    unit_name: &str,
    body_start: usize,
) -> String {
    if unit_name.is_empty() {
        return diagnostics.to_string();
    }
    let shift = line_of_offset(source, body_start);

    let mut text = diagnostics.to_string();
    let mut pos = 0;
    while let Some(found) = text.get(pos..).and_then(|rest| rest.find(unit_name)) {
        let name_start = pos + found;
        let colon = name_start + unit_name.len();
        pos = next_char_boundary(&text, name_start);

        let Some(digits) = line_number_at(&text, colon) else {
            continue;
        };
        let Some(line) = text
            .get(digits.clone())
            .and_then(|d| d.parse::<usize>().ok())
            .and_then(|n| n.checked_add(shift))
        else {
            // Too large to shift; leave the match as written.
            pos = digits.end + 1;
            continue;
        };

        let replacement = line.to_string();
        pos = digits.start + replacement.len() + 1;
        text.replace_range(digits, &replacement);
    }

    text.replace(unit_name, source_path)
}

/// The digit span of `:<digits>:` starting at `colon`, if that is what follows.
fn line_number_at(text: &str, colon: usize) -> Option<std::ops::Range<usize>> {
    let rest = text.get(colon..)?.strip_prefix(':')?;
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 || rest.as_bytes().get(len) != Some(&b':') {
        return None;
    }
    Some(colon + 1..colon + 1 + len)
}

fn next_char_boundary(text: &str, at: usize) -> usize {
    at + text
        .get(at..)
        .and_then(|rest| rest.chars().next())
        .map_or(1, char::len_utf8)
}
