//! Added lines that are entirely whitespace

use super::Feature;
use crate::changeset::Changeset;
use std::sync::Arc;

#[derive(Debug)]
pub struct Whitespace {
    changeset: Arc<Changeset>,
}

impl Whitespace {
    pub const NAME: &'static str = "whitespace";

    pub fn new(changeset: Arc<Changeset>) -> Self {
        Self { changeset }
    }
}

impl Feature for Whitespace {
    fn evaluate(&self) -> f64 {
        self.changeset
            .files()
            .iter()
            .flat_map(|file| file.added_lines())
            .filter(|line| line.content.trim().is_empty())
            .count() as f64
    }
}
