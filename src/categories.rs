//! Category classifier
//!
//! Scores are bucketed into an ordered set of named categories, each with an
//! upper bound except for one catch-all. One category carries the threshold
//! flag: the boundary above which a reviewer should be warned. All
//! invariants are enforced at construction; classification itself never
//! fails.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// A visual label that can represent a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    /// Name of the label, e.g. "xs"
    pub name: String,
    /// Meaning of the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Preferred CSS hex color for the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// A category assigned to a changeset based on its computed score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Friendly name of the category
    pub name: String,
    /// A visual label that should represent this category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Label>,
    /// Upper bound on the score for this category to apply. Omitted for the
    /// catch-all (largest) category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
    /// Whether this category marks the boundary above which a reviewer
    /// should be warned.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub threshold: bool,
}

/// Errors raised while validating a category configuration. These are
/// configuration mistakes and are not recoverable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CategoryError {
    #[error("at least one category must be provided")]
    Empty,

    #[error("each `lte` value must be non-negative, but \"{name}\" has an `lte` value of {lte}")]
    NegativeBound { name: String, lte: f64 },

    #[error("one category must omit its `lte` value to act as the largest category")]
    MissingCatchAll,

    #[error("only one category may omit its `lte` value, but found at least two: {names}")]
    MultipleCatchAll { names: String },

    #[error("one category must set `threshold` to act as the warning threshold")]
    MissingThreshold,

    #[error("only one category may set `threshold`, but found at least two: {names}")]
    MultipleThreshold { names: String },
}

/// A validated group of categories, sorted ascending by `lte` with the
/// catch-all last. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryConfiguration {
    categories: Vec<Category>,
}

impl CategoryConfiguration {
    pub fn new(mut categories: Vec<Category>) -> Result<Self, CategoryError> {
        if categories.is_empty() {
            return Err(CategoryError::Empty);
        }

        for category in &categories {
            if let Some(lte) = category.lte {
                if lte < 0.0 {
                    return Err(CategoryError::NegativeBound {
                        name: category.name.clone(),
                        lte,
                    });
                }
            }
        }

        let catch_alls: Vec<&str> = categories
            .iter()
            .filter(|category| category.lte.is_none())
            .map(|category| category.name.as_str())
            .collect();
        if catch_alls.is_empty() {
            return Err(CategoryError::MissingCatchAll);
        }
        if catch_alls.len() > 1 {
            return Err(CategoryError::MultipleCatchAll {
                names: catch_alls.join(", "),
            });
        }

        let thresholds: Vec<&str> = categories
            .iter()
            .filter(|category| category.threshold)
            .map(|category| category.name.as_str())
            .collect();
        if thresholds.is_empty() {
            return Err(CategoryError::MissingThreshold);
        }
        if thresholds.len() > 1 {
            return Err(CategoryError::MultipleThreshold {
                names: thresholds.join(", "),
            });
        }

        categories.sort_by(|a, b| match (a.lte, b.lte) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        Ok(Self { categories })
    }

    /// The category for a score: the first whose `lte` strictly exceeds it,
    /// or the catch-all.
    pub fn categorize(&self, score: f64) -> &Category {
        self.categories
            .iter()
            .find(|category| category.lte.is_some_and(|lte| score < lte))
            .unwrap_or_else(|| &self.categories[self.categories.len() - 1])
    }

    /// The score boundary of the threshold category. Absent when the
    /// catch-all carries the flag, since it has no upper bound.
    pub fn threshold(&self) -> Option<f64> {
        self.categories
            .iter()
            .find(|category| category.threshold)
            .and_then(|category| category.lte)
    }

    /// The categories, sorted ascending by `lte` with the catch-all last.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_category(name: &str, lte: Option<f64>, threshold: bool) -> Category {
        Category {
            name: name.to_string(),
            label: None,
            lte,
            threshold,
        }
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert_eq!(
            CategoryConfiguration::new(vec![]).unwrap_err(),
            CategoryError::Empty
        );
    }

    #[test]
    fn test_negative_bound_is_rejected() {
        let error = CategoryConfiguration::new(vec![make_category("smol", Some(-2.0), true)])
            .unwrap_err();
        assert_eq!(
            error,
            CategoryError::NegativeBound {
                name: "smol".to_string(),
                lte: -2.0,
            }
        );
        assert_eq!(
            error.to_string(),
            "each `lte` value must be non-negative, but \"smol\" has an `lte` value of -2"
        );
    }

    #[test]
    fn test_missing_catch_all_is_rejected() {
        let error = CategoryConfiguration::new(vec![make_category("smol", Some(10.0), true)])
            .unwrap_err();
        assert_eq!(error, CategoryError::MissingCatchAll);
    }

    #[test]
    fn test_multiple_catch_alls_are_rejected() {
        let error = CategoryConfiguration::new(vec![
            make_category("smol", Some(10.0), true),
            make_category("large", None, false),
            make_category("xxl", None, false),
        ])
        .unwrap_err();
        assert_eq!(
            error,
            CategoryError::MultipleCatchAll {
                names: "large, xxl".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_threshold_is_rejected() {
        let error =
            CategoryConfiguration::new(vec![make_category("smol", None, false)]).unwrap_err();
        assert_eq!(error, CategoryError::MissingThreshold);
    }

    #[test]
    fn test_multiple_thresholds_are_rejected() {
        let error = CategoryConfiguration::new(vec![
            make_category("smol", Some(10.0), true),
            make_category("large", None, true),
        ])
        .unwrap_err();
        assert_eq!(
            error,
            CategoryError::MultipleThreshold {
                names: "smol, large".to_string(),
            }
        );
    }

    #[test]
    fn test_categories_are_sorted_with_catch_all_last() {
        let configuration = CategoryConfiguration::new(vec![
            make_category("xl", None, false),
            make_category("m", Some(100.0), true),
            make_category("xs", Some(10.0), false),
        ])
        .unwrap();
        let names: Vec<&str> = configuration
            .categories()
            .iter()
            .map(|category| category.name.as_str())
            .collect();
        assert_eq!(names, vec!["xs", "m", "xl"]);
    }

    #[test]
    fn test_boundaries_are_strictly_less_on_lte() {
        let configuration = CategoryConfiguration::new(vec![
            make_category("xs", Some(10.0), true),
            make_category("xl", None, false),
        ])
        .unwrap();
        assert_eq!(configuration.categorize(9.0).name, "xs");
        assert_eq!(configuration.categorize(10.0).name, "xl");
        assert_eq!(configuration.categorize(10_000.0).name, "xl");
    }

    #[test]
    fn test_zero_bound_is_allowed() {
        let configuration = CategoryConfiguration::new(vec![
            make_category("empty", Some(0.0), false),
            make_category("rest", None, true),
        ])
        .unwrap();
        assert_eq!(configuration.categorize(0.0).name, "rest");
        assert_eq!(configuration.categorize(-1.0).name, "empty");
    }

    #[test]
    fn test_threshold_exposes_the_flagged_bound() {
        let configuration = CategoryConfiguration::new(vec![
            make_category("xs", Some(10.0), false),
            make_category("l", Some(500.0), true),
            make_category("xl", None, false),
        ])
        .unwrap();
        assert_eq!(configuration.threshold(), Some(500.0));
    }

    #[test]
    fn test_threshold_on_the_catch_all_has_no_bound() {
        let configuration = CategoryConfiguration::new(vec![
            make_category("xs", Some(10.0), false),
            make_category("xl", None, true),
        ])
        .unwrap();
        assert_eq!(configuration.threshold(), None);
    }
}
