//! Evaluation context
//!
//! A context bundles everything one top-level evaluation needs: the
//! changeset under review, the alias table, the category configuration, the
//! feature and operator catalogs, and the memoization cache. Contexts are
//! created fresh per evaluation and must never be shared across changesets;
//! cached feature values are changeset-specific.

use super::operators::OperatorCatalog;
use crate::categories::CategoryConfiguration;
use crate::changeset::Changeset;
use crate::features::FeatureCatalog;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// The context in which a particular expression is evaluated.
#[derive(Debug)]
pub struct Context<'a> {
    changeset: Option<Arc<Changeset>>,
    aliases: BTreeMap<String, String>,
    categories: Option<&'a CategoryConfiguration>,
    features: &'a FeatureCatalog,
    operators: &'a OperatorCatalog,
    /// Values substituted for named tokens so far. Each key is written at
    /// most once per context lifetime and only read afterwards.
    cache: BTreeMap<String, f64>,
    /// Aliases whose expansions are currently being evaluated, for cycle
    /// detection.
    expanding: HashSet<String>,
}

impl<'a> Context<'a> {
    pub fn new(features: &'a FeatureCatalog, operators: &'a OperatorCatalog) -> Self {
        Self {
            changeset: None,
            aliases: BTreeMap::new(),
            categories: None,
            features,
            operators,
            cache: BTreeMap::new(),
            expanding: HashSet::new(),
        }
    }

    /// Set the changeset that features will be evaluated against.
    pub fn with_changeset(mut self, changeset: Changeset) -> Self {
        self.changeset = Some(Arc::new(changeset));
        self
    }

    /// Set the alias table (name to expansion expression).
    pub fn with_aliases(mut self, aliases: BTreeMap<String, String>) -> Self {
        self.aliases = aliases;
        self
    }

    /// Set the category configuration used to classify the final score.
    pub fn with_categories(mut self, categories: &'a CategoryConfiguration) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn changeset(&self) -> Option<&Arc<Changeset>> {
        self.changeset.as_ref()
    }

    pub fn categories(&self) -> Option<&'a CategoryConfiguration> {
        self.categories
    }

    pub fn features(&self) -> &'a FeatureCatalog {
        self.features
    }

    pub fn operators(&self) -> &'a OperatorCatalog {
        self.operators
    }

    /// The expansion for an alias name, if one is configured.
    pub fn alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    /// The cached value for a named token, if it was already computed.
    pub(crate) fn cached(&self, token: &str) -> Option<f64> {
        self.cache.get(token).copied()
    }

    /// Record the value substituted for a named token. The first write wins;
    /// the cache is a memoization table, not general shared state.
    pub(crate) fn record(&mut self, token: &str, value: f64) {
        self.cache.entry(token.to_string()).or_insert(value);
    }

    /// Mark an alias expansion as in progress. Returns false if it already
    /// is, which means the alias graph is cyclic.
    pub(crate) fn begin_expansion(&mut self, name: &str) -> bool {
        self.expanding.insert(name.to_string())
    }

    pub(crate) fn finish_expansion(&mut self, name: &str) {
        self.expanding.remove(name);
    }

    /// Every named value (feature or alias) substituted during evaluation.
    pub fn substitutions(&self) -> &BTreeMap<String, f64> {
        &self.cache
    }
}
