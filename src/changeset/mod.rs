//! Changeset model
//!
//! A changeset is the parsed representation of a unified diff: the set of
//! changed files, each with per-line added/removed/context classification.
//! Files matching the ignored patterns are dropped at construction; files
//! matching the test patterns are flagged so features can treat them
//! separately.

mod diff;

use crate::languages::{self, Language};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use thiserror::Error;
use tracing::debug;

/// Errors raised while constructing a changeset.
#[derive(Error, Debug)]
pub enum ChangesetError {
    #[error("invalid file pattern \"{pattern}\": {source}")]
    Pattern {
        pattern: String,
        source: globset::Error,
    },
}

/// Classification of a single diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Added,
    Removed,
    Context,
}

/// One line of a hunk, without its `+`/`-`/space marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub content: String,
}

/// A contiguous run of changes within one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hunk {
    pub lines: Vec<Line>,
}

/// Changes to a single file.
#[derive(Debug, Clone)]
pub struct FileDiff {
    /// Path of the file after the change (or before it, for deletions)
    pub filename: String,
    /// Language detected from the file extension, if supported
    pub language: Option<&'static Language>,
    /// Whether the file matched one of the configured test patterns
    pub is_test_file: bool,
    pub hunks: Vec<Hunk>,
}

impl FileDiff {
    /// Lines added by this file's hunks.
    pub fn added_lines(&self) -> impl Iterator<Item = &Line> {
        self.hunks
            .iter()
            .flat_map(|hunk| &hunk.lines)
            .filter(|line| line.kind == LineKind::Added)
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.added_lines().count()
    }

    /// Number of removed lines.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|hunk| &hunk.lines)
            .filter(|line| line.kind == LineKind::Removed)
            .count()
    }
}

/// The parsed representation of a diff.
#[derive(Debug, Clone, Default)]
pub struct Changeset {
    files: Vec<FileDiff>,
}

impl Changeset {
    /// Parse a unified diff with no file filtering.
    pub fn parse(diff: &str) -> Self {
        let mut files = diff::parse(diff);
        for file in &mut files {
            file.language = languages::detect(&file.filename);
        }
        Self { files }
    }

    /// Parse a unified diff, dropping files that match `ignored_patterns`
    /// and flagging files that match `test_patterns`.
    pub fn parse_with(
        diff: &str,
        ignored_patterns: &[String],
        test_patterns: &[String],
    ) -> Result<Self, ChangesetError> {
        let ignored = build_glob_set(ignored_patterns)?;
        let tests = build_glob_set(test_patterns)?;

        let mut files = Vec::new();
        for mut file in diff::parse(diff) {
            if ignored.is_match(&file.filename) {
                debug!(filename = %file.filename, "ignoring file");
                continue;
            }
            file.language = languages::detect(&file.filename);
            file.is_test_file = tests.is_match(&file.filename);
            files.push(file);
        }

        Ok(Self { files })
    }

    pub fn files(&self) -> &[FileDiff] {
        &self.files
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, ChangesetError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        // `*` must not cross directory boundaries, so "*.rbi" only matches
        // top-level files while "test/*.yml" matches inside test/.
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|source| ChangesetError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ChangesetError::Pattern {
        pattern: patterns.join(", "),
        source,
    })
}
