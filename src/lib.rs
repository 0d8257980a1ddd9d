//! Diffsize - diff review-difficulty estimator
//!
//! Estimates how difficult a code change is to review: a unified diff is
//! parsed into a [`changeset::Changeset`], numeric [`features`] of the
//! changeset feed a user-configurable prefix-notation [`formula::Formula`],
//! and the resulting score is bucketed by a
//! [`categories::CategoryConfiguration`].
//!
//! # Example
//!
//! ```no_run
//! use diffsize::config::Configuration;
//!
//! let diff = std::fs::read_to_string("change.diff").unwrap();
//! let score = diffsize::evaluate_diff(&diff, Configuration::default()).unwrap();
//! println!("{:?} {:?}", score.result, score.category);
//! ```

pub mod categories;
pub mod changeset;
pub mod cli;
pub mod config;
pub mod features;
pub mod formula;
pub mod git;
pub mod languages;

use categories::{CategoryConfiguration, CategoryError};
use changeset::{Changeset, ChangesetError};
use config::Configuration;
use features::FeatureCatalog;
use formula::{Context, Formula, OperatorCatalog, Score};
use thiserror::Error;

/// Errors raised while setting up an evaluation. Formula failures are not
/// errors at this level; they are captured inside the returned [`Score`].
#[derive(Error, Debug)]
pub enum EvaluateDiffError {
    #[error(transparent)]
    Changeset(#[from] ChangesetError),

    #[error(transparent)]
    Categories(#[from] CategoryError),
}

/// Evaluate a diff for reviewability.
///
/// Sections missing from `configuration` fall back to the built-in
/// defaults. The diff itself must be in the unified `.diff` format.
pub fn evaluate_diff(
    diff: &str,
    configuration: Configuration,
) -> Result<Score, EvaluateDiffError> {
    let resolved = configuration.resolve();

    let changeset = Changeset::parse_with(
        diff,
        &resolved.ignored_file_patterns,
        &resolved.test_file_patterns,
    )?;
    let categories = CategoryConfiguration::new(resolved.categories)?;

    let features = FeatureCatalog::standard();
    let operators = OperatorCatalog::standard();
    let mut context = Context::new(&features, &operators)
        .with_changeset(changeset)
        .with_aliases(resolved.aliases)
        .with_categories(&categories);

    Ok(Formula::new(resolved.formula).evaluate(&mut context))
}
