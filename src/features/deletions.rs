//! Total removed lines across the changeset

use super::Feature;
use crate::changeset::Changeset;
use std::sync::Arc;

#[derive(Debug)]
pub struct Deletions {
    changeset: Arc<Changeset>,
}

impl Deletions {
    pub const NAME: &'static str = "deletions";

    pub fn new(changeset: Arc<Changeset>) -> Self {
        Self { changeset }
    }
}

impl Feature for Deletions {
    fn evaluate(&self) -> f64 {
        self.changeset
            .files()
            .iter()
            .map(|file| file.deletions())
            .sum::<usize>() as f64
    }
}
