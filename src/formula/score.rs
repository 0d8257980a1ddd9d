//! Score assembly
//!
//! A score packages the outcome of one formula evaluation: the rounded
//! numeric result, the category and threshold assigned by the classifier
//! (when one is configured), or the error that stopped evaluation, plus the
//! substitution trace recorded in the context cache.

use super::context::Context;
use super::error::{EvaluateError, ParseError};
use serde::Serialize;
use std::collections::BTreeMap;

/// The category a score was assigned to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignedCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
}

/// A parse or evaluation failure, with the 1-based position of the token
/// where it was detected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreError {
    pub message: String,
    pub token_position: usize,
}

/// The result of evaluating a changeset for reviewability.
#[derive(Debug, Clone, Serialize)]
pub struct Score {
    /// The expression used to compute this score.
    pub formula: String,
    /// The numeric result, rounded to two decimal places. Absent when
    /// evaluation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    /// The category assigned by the classifier, when one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AssignedCategory>,
    /// The score boundary above which a reviewer should be warned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// The failure that stopped evaluation, mutually exclusive with
    /// `result`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ScoreError>,
    /// Every named value (feature or alias) substituted during evaluation.
    pub substitutions: BTreeMap<String, f64>,
}

impl Score {
    /// Package a successful evaluation.
    pub(super) fn evaluated(formula: &str, value: f64, context: &Context) -> Self {
        let result = round_to_hundredths(value);
        let category = context.categories().map(|categories| {
            let category = categories.categorize(result);
            AssignedCategory {
                name: category.name.clone(),
                lte: category.lte,
            }
        });
        let threshold = context.categories().and_then(|categories| categories.threshold());
        Self {
            formula: formula.to_string(),
            result: Some(result),
            category,
            threshold,
            error: None,
            substitutions: context.substitutions().clone(),
        }
    }

    /// Package a formula that was refused at parse time.
    pub(super) fn parse_failure(formula: &str, error: &ParseError, context: &Context) -> Self {
        Self::failure(formula, error.to_string(), error.position(), context)
    }

    /// Package an evaluation that failed mid-walk.
    pub(super) fn evaluation_failure(
        formula: &str,
        error: &EvaluateError,
        context: &Context,
    ) -> Self {
        Self::failure(formula, error.to_string(), error.position(), context)
    }

    fn failure(formula: &str, message: String, token_position: usize, context: &Context) -> Self {
        Self {
            formula: formula.to_string(),
            result: None,
            category: None,
            threshold: None,
            error: Some(ScoreError {
                message,
                token_position,
            }),
            substitutions: context.substitutions().clone(),
        }
    }
}

/// Round to two decimal places, half away from zero after nudging past the
/// representation error of values like 2.675.
fn round_to_hundredths(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}
