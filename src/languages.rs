//! Language detection for the comment heuristic
//!
//! Maps file extensions to languages and records the comment markers the
//! `comments` feature needs. Detection is purely extension based; nothing
//! here parses source code.

use std::path::Path;

/// Block comment markers for a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockComment {
    /// Characters that open a multi-line comment
    pub start: &'static str,
    /// Characters that extend a comment over several lines
    pub continuation: &'static str,
    /// Characters that close a multi-line comment
    pub end: &'static str,
}

/// A supported programming language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Human-readable language name
    pub name: &'static str,
    /// File extensions used by the language (without the dot)
    pub extensions: &'static [&'static str],
    /// Characters that open a single-line comment
    pub line_comment: &'static str,
    /// Block comment markers, for languages that have them
    pub block_comment: Option<BlockComment>,
}

const C_STYLE_BLOCK: BlockComment = BlockComment {
    start: "/*",
    continuation: "*",
    end: "*/",
};

/// Languages the comment heuristic understands.
pub const LANGUAGES: &[Language] = &[
    Language {
        name: "C#",
        extensions: &["cs", "csx"],
        line_comment: "//",
        block_comment: Some(C_STYLE_BLOCK),
    },
    Language {
        name: "Go",
        extensions: &["go"],
        line_comment: "//",
        block_comment: Some(C_STYLE_BLOCK),
    },
    Language {
        name: "Java",
        extensions: &["java"],
        line_comment: "//",
        block_comment: Some(C_STYLE_BLOCK),
    },
    Language {
        name: "JavaScript",
        extensions: &["js", "jsx"],
        line_comment: "//",
        block_comment: Some(C_STYLE_BLOCK),
    },
    Language {
        name: "Python",
        extensions: &["py"],
        line_comment: "#",
        block_comment: None,
    },
    Language {
        name: "Ruby",
        extensions: &["rb"],
        line_comment: "#",
        block_comment: None,
    },
    Language {
        name: "Rust",
        extensions: &["rs"],
        line_comment: "//",
        block_comment: Some(C_STYLE_BLOCK),
    },
    Language {
        name: "Swift",
        extensions: &["swift"],
        line_comment: "//",
        block_comment: Some(C_STYLE_BLOCK),
    },
    Language {
        name: "TypeScript",
        extensions: &["ts", "tsx"],
        line_comment: "//",
        block_comment: Some(C_STYLE_BLOCK),
    },
];

/// Match a filename to a supported language by its extension.
pub fn detect(filename: &str) -> Option<&'static Language> {
    let extension = Path::new(filename).extension()?.to_str()?;
    LANGUAGES
        .iter()
        .find(|language| language.extensions.contains(&extension))
}
