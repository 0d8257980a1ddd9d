//! Feature catalog
//!
//! A feature is a named, pure measurement of a changeset: it is constructed
//! against one changeset and exposes a single `evaluate` method returning a
//! number. The name a feature registers under is the literal token used to
//! reference it in scoring formulas.

mod additions;
mod comments;
mod deletions;
mod single_words;
mod test_lines;
mod whitespace;

pub use additions::Additions;
pub use comments::Comments;
pub use deletions::Deletions;
pub use single_words::SingleWords;
pub use test_lines::Tests;
pub use whitespace::Whitespace;

use crate::changeset::Changeset;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A measurable characteristic of a changeset.
pub trait Feature: fmt::Debug {
    /// Compute the feature's value for the changeset it was built against.
    fn evaluate(&self) -> f64;
}

/// Builds a feature bound to a changeset. The registered name is the
/// formula token that references the feature.
pub type FeatureConstructor = fn(Arc<Changeset>) -> Box<dyn Feature>;

/// The immutable collection of features available to scoring formulas.
///
/// Built once and passed by reference into the parser and evaluation
/// context. Tests can assemble a restricted catalog with [`FeatureCatalog::new`].
pub struct FeatureCatalog {
    by_name: HashMap<&'static str, FeatureConstructor>,
}

impl FeatureCatalog {
    /// A catalog with no features, for callers assembling a restricted set.
    pub fn empty() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    /// The full built-in feature set.
    pub fn standard() -> Self {
        let mut catalog = Self::empty();
        catalog.register(Additions::NAME, |c| Box::new(Additions::new(c)));
        catalog.register(Comments::NAME, |c| Box::new(Comments::new(c)));
        catalog.register(Deletions::NAME, |c| Box::new(Deletions::new(c)));
        catalog.register(SingleWords::NAME, |c| Box::new(SingleWords::new(c)));
        catalog.register(Tests::NAME, |c| Box::new(Tests::new(c)));
        catalog.register(Whitespace::NAME, |c| Box::new(Whitespace::new(c)));
        catalog
    }

    /// Register a feature constructor under its formula token.
    pub fn register(&mut self, name: &'static str, constructor: FeatureConstructor) {
        self.by_name.insert(name, constructor);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Instantiate the named feature against a changeset.
    pub fn instantiate(
        &self,
        name: &str,
        changeset: Arc<Changeset>,
    ) -> Option<Box<dyn Feature>> {
        self.by_name.get(name).map(|constructor| constructor(changeset))
    }

    /// Registered feature names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_name.keys().copied()
    }
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FeatureCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.by_name.keys().collect();
        names.sort();
        f.debug_struct("FeatureCatalog")
            .field("features", &names)
            .finish()
    }
}
