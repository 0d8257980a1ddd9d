//! Added lines that are comments
//!
//! A line-oriented heuristic driven by the language table; this does not
//! parse source code. Only added lines count, and files whose language is
//! unknown contribute nothing.

use super::Feature;
use crate::changeset::{Changeset, FileDiff, LineKind};
use std::sync::Arc;

#[derive(Debug)]
pub struct Comments {
    changeset: Arc<Changeset>,
}

impl Comments {
    pub const NAME: &'static str = "comments";

    pub fn new(changeset: Arc<Changeset>) -> Self {
        Self { changeset }
    }

    fn count_comment_lines(file: &FileDiff) -> usize {
        let Some(language) = file.language else {
            return 0;
        };

        let mut total = 0;
        for hunk in &file.hunks {
            // Length of the unclosed block comment run in this hunk.
            let mut block_run = 0;

            for line in &hunk.lines {
                if line.kind != LineKind::Added {
                    continue;
                }
                let text = line.content.trim_start();

                if text.starts_with(language.line_comment) {
                    total += 1;
                    block_run = 0;
                    continue;
                }

                let Some(block) = language.block_comment else {
                    block_run = 0;
                    continue;
                };

                if text.starts_with(block.start) && text.ends_with(block.end) {
                    total += 1;
                    block_run = 0;
                } else if text.starts_with(block.start) {
                    block_run += 1;
                } else if block_run > 0 && text.starts_with(block.end) {
                    // Test the end marker before the continuation marker:
                    // the continuation is a prefix of the end in C-style
                    // languages ("*" vs "*/").
                    block_run += 1;
                    total += block_run;
                    block_run = 0;
                } else if block_run > 0 && text.starts_with(block.continuation) {
                    block_run += 1;
                } else {
                    block_run = 0;
                }
            }
        }
        total
    }
}

impl Feature for Comments {
    fn evaluate(&self) -> f64 {
        self.changeset
            .files()
            .iter()
            .map(|file| Self::count_comment_lines(file))
            .sum::<usize>() as f64
    }
}
