use std::ffi::OsStr;
use std::path::Path;

use crate::error::ToolError;
use crate::literal::{LiteralGrammar, Step};

/// A host language the tool can splice literals into.
#[derive(Debug, PartialEq, Eq)]
pub struct Dialect {
    pub name: &'static str,
    /// Extension without the leading dot; matched exactly.
    pub extension: &'static str,
    pub literal: LiteralGrammar,
    /// Formatter program and arguments; the source path is appended.
    pub formatter: &'static [&'static str],
}

pub static CPP: Dialect = Dialect {
    name: "cpp",
    extension: "cpp",
    literal: LiteralGrammar {
        prefix: &[
            Step::Whitespace,
            Step::Optional("const "),
            Step::Lit("auto "),
            Step::Word,
            Step::Lit(" ="),
            Step::Whitespace,
            Step::Optional("fizzy::test::"),
            Step::Lit("from_hex("),
            Step::Whitespace,
            Step::Lit("\""),
        ],
        suffix: "\");",
        emit_prefix: "const auto wasm = from_hex(\"",
    },
    formatter: &["clang-format", "-i"],
};

pub static RUST: Dialect = Dialect {
    name: "rust",
    extension: "rs",
    literal: LiteralGrammar {
        prefix: &[
            Step::Whitespace,
            Step::Lit("let "),
            Step::Word,
            Step::Lit(" ="),
            Step::Whitespace,
            Step::Lit("hex::decode("),
            Step::Whitespace,
            Step::Lit("\""),
        ],
        suffix: "\").unwrap();",
        emit_prefix: "let wasm = hex::decode(\"",
    },
    formatter: &["rustfmt"],
};

pub static DIALECTS: [&Dialect; 2] = [&CPP, &RUST];

/// Pick the dialect for `path` by its extension.
pub fn resolve(path: &Path) -> Result<&'static Dialect, ToolError> {
    let extension = path.extension().and_then(OsStr::to_str).unwrap_or_default();
    DIALECTS
        .iter()
        .copied()
        .find(|d| d.extension == extension)
        .ok_or_else(|| ToolError::UnsupportedDialect {
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_extension() {
        assert_eq!(resolve(Path::new("test/unittests/api_test.cpp")).unwrap(), &CPP);
        assert_eq!(resolve(Path::new("bindings/rust/src/lib.rs")).unwrap(), &RUST);
    }

    #[test]
    fn extension_match_is_exact() {
        for path in ["a.CPP", "a.cc", "a.hpp", "a.rs.bak", "Makefile", ".rs"] {
            assert!(
                matches!(resolve(Path::new(path)), Err(ToolError::UnsupportedDialect { .. })),
                "{path}"
            );
        }
    }

    #[test]
    fn unsupported_reports_extension() {
        let err = resolve(Path::new("script.py")).unwrap_err();
        assert_eq!(err, ToolError::UnsupportedDialect { extension: "py".into() });
    }
}
