//! Hand-rolled unified diff parser
//!
//! Parses the `diff --git` / `---` / `+++` / `@@` structure of a unified
//! diff into per-file hunks. The parser is deliberately lenient: metadata
//! lines it does not recognize (index, mode, rename headers) are skipped,
//! and binary files produce a file entry with no hunks.

use super::{FileDiff, Hunk, Line, LineKind};

/// Tracks the file section currently being assembled.
#[derive(Default)]
struct FileBuilder {
    from: Option<String>,
    to: Option<String>,
    fallback: Option<String>,
    hunks: Vec<Hunk>,
}

impl FileBuilder {
    fn started(&self) -> bool {
        self.from.is_some() || self.to.is_some() || self.fallback.is_some()
    }

    /// The path of the file after the change, or before it for deletions.
    fn filename(&self) -> Option<String> {
        self.to
            .clone()
            .or_else(|| self.from.clone())
            .or_else(|| self.fallback.clone())
    }

    fn finish(&mut self) -> Option<FileDiff> {
        let filename = self.filename()?;
        let hunks = std::mem::take(&mut self.hunks);
        *self = Self::default();
        Some(FileDiff {
            filename,
            language: None,
            is_test_file: false,
            hunks,
        })
    }
}

/// Parse a unified diff into its changed files.
pub(super) fn parse(diff: &str) -> Vec<FileDiff> {
    let mut files = Vec::new();
    let mut current = FileBuilder::default();
    // Lines left in the hunk being consumed, per the @@ header counts.
    let mut old_remaining = 0usize;
    let mut new_remaining = 0usize;

    for raw in diff.lines() {
        if old_remaining > 0 || new_remaining > 0 {
            match classify_hunk_line(raw) {
                Some(consumed) => {
                    if let Some((kind, content)) = consumed {
                        let (old, new) = match kind {
                            LineKind::Added => (0, 1),
                            LineKind::Removed => (1, 0),
                            LineKind::Context => (1, 1),
                        };
                        old_remaining = old_remaining.saturating_sub(old);
                        new_remaining = new_remaining.saturating_sub(new);
                        if let Some(hunk) = current.hunks.last_mut() {
                            hunk.lines.push(line(kind, content));
                        }
                    }
                    continue;
                }
                None => {
                    // Malformed hunk body. Abandon the remaining counts and
                    // reparse this line as a header.
                    old_remaining = 0;
                    new_remaining = 0;
                }
            }
        }

        if let Some(rest) = raw.strip_prefix("diff --git ") {
            if let Some(file) = current.finish() {
                files.push(file);
            }
            current.fallback = git_header_path(rest);
        } else if let Some(rest) = raw.strip_prefix("--- ") {
            // A bare `---` header can also open a new file section when no
            // `diff --git` line precedes it.
            if current.from.is_some() || current.to.is_some() {
                if let Some(file) = current.finish() {
                    files.push(file);
                }
            }
            current.from = strip_side(rest);
        } else if let Some(rest) = raw.strip_prefix("+++ ") {
            current.to = strip_side(rest);
        } else if let Some(counts) = hunk_header(raw) {
            if current.started() {
                (old_remaining, new_remaining) = counts;
                current.hunks.push(Hunk::default());
            }
        }
        // Everything else (index, mode, rename, binary markers) is metadata.
    }

    if let Some(file) = current.finish() {
        files.push(file);
    }
    files
}

/// Classify one line of a hunk body. `None` means the line does not belong
/// to a hunk at all; `Some(None)` means it was consumed without producing a
/// line record (the no-newline marker).
#[allow(clippy::type_complexity)]
fn classify_hunk_line(raw: &str) -> Option<Option<(LineKind, &str)>> {
    match raw.as_bytes().first() {
        Some(b'+') => Some(Some((LineKind::Added, &raw[1..]))),
        Some(b'-') => Some(Some((LineKind::Removed, &raw[1..]))),
        Some(b' ') => Some(Some((LineKind::Context, &raw[1..]))),
        Some(b'\\') => Some(None), // "\ No newline at end of file"
        // Some diff generators strip the marker from whitespace-only
        // context lines.
        None => Some(Some((LineKind::Context, ""))),
        _ => None,
    }
}

fn line(kind: LineKind, content: &str) -> Line {
    Line {
        kind,
        content: content.to_string(),
    }
}

/// Strip the `a/` or `b/` prefix from a `---`/`+++` path; `/dev/null`
/// means the file did not exist on that side.
fn strip_side(path: &str) -> Option<String> {
    let path = path.split('\t').next().unwrap_or(path).trim();
    if path == "/dev/null" {
        return None;
    }
    let path = path
        .strip_prefix("a/")
        .or_else(|| path.strip_prefix("b/"))
        .unwrap_or(path);
    Some(path.to_string())
}

/// Last-resort filename from a `diff --git a/X b/Y` header.
fn git_header_path(rest: &str) -> Option<String> {
    let target = rest.split_whitespace().last()?;
    Some(
        target
            .strip_prefix("b/")
            .or_else(|| target.strip_prefix("a/"))
            .unwrap_or(target)
            .to_string(),
    )
}

/// Parse `@@ -l,c +l,c @@` into (old, new) line counts.
fn hunk_header(raw: &str) -> Option<(usize, usize)> {
    let rest = raw.strip_prefix("@@ -")?;
    let (ranges, _) = rest.split_once(" @@")?;
    let (old_range, new_range) = ranges.split_once(" +")?;
    Some((range_count(old_range)?, range_count(new_range)?))
}

/// The count half of a `start,count` range; a bare `start` means one line.
fn range_count(range: &str) -> Option<usize> {
    match range.split_once(',') {
        Some((_, count)) => count.trim().parse().ok(),
        None => {
            range.trim().parse::<usize>().ok()?;
            Some(1)
        }
    }
}
