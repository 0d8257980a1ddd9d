//! Integration tests for the diffsize library
//!
//! These exercise the full pipeline: configuration resolution, diff
//! parsing, feature evaluation, formula evaluation, and categorization.

use diffsize::categories::Category;
use diffsize::config::{Configuration, Scoring};
use std::collections::BTreeMap;

// Two files: eleven added lines (six comments, one blank), three removed.
const FIXTURE_DIFF: &str = "\
diff --git a/lorem.rb b/lorem.rb
index 70714bc..f0253cf 100644
--- a/lorem.rb
+++ b/lorem.rb
@@ -1,5 +1,9 @@
 Sed laoreet rhoncus ligula a finibus.
-Lorem ipsum dolor sit amet.
-In eu mi in mi semper tincidunt.
+# Lorem ipsum dolor sit amet.
+# In eu mi in mi semper tincidunt.
+# Aliquam quis est sit amet urna.
+# Etiam sit amet sollicitudin odio.
+
+finibus
 Pellentesque nec viverra leo.
 Nam et dignissim ex.
diff --git a/lorem.ts b/lorem.ts
index 47d94f5..68f175a 100644
--- a/lorem.ts
+++ b/lorem.ts
@@ -1,3 +1,7 @@
 \"Sed laoreet rhoncus ligula a finibus.\"
-\"Lorem ipsum dolor sit amet.\"
+// \"Lorem ipsum dolor sit amet.\"
+/* Suspendisse vitae blandit libero. */
+\"Orci varius natoque penatibus.\"
+\"Proin vulputate semper tellus.\"
+\"Nam et dignissim ex.\"
 \"Nulla leo libero, volutpat fringilla.\"
";

#[test]
fn test_default_configuration_scores_the_fixture() {
    let score = diffsize::evaluate_diff(FIXTURE_DIFF, Configuration::default()).unwrap();

    assert_eq!(score.error, None);
    assert_eq!(score.result, Some(7.0));
    assert_eq!(
        score.category.as_ref().map(|c| c.name.as_str()),
        Some("extra small")
    );
    assert_eq!(score.threshold, Some(500.0));
}

#[test]
fn test_custom_formula_with_aliases() {
    let configuration = Configuration {
        scoring: Some(Scoring {
            formula: "+ churn tests".to_string(),
            aliases: Some(BTreeMap::from([(
                "churn".to_string(),
                "+ additions deletions".to_string(),
            )])),
        }),
        ..Default::default()
    };
    let score = diffsize::evaluate_diff(FIXTURE_DIFF, configuration).unwrap();

    assert_eq!(score.error, None);
    assert_eq!(score.result, Some(14.0));
    assert_eq!(score.substitutions.get("churn"), Some(&14.0));
    assert_eq!(score.substitutions.get("tests"), Some(&0.0));
}

#[test]
fn test_ignored_patterns_shrink_the_score() {
    let configuration = Configuration {
        ignored_file_patterns: Some(vec!["*.ts".to_string()]),
        scoring: Some(Scoring {
            formula: "additions".to_string(),
            aliases: None,
        }),
        ..Default::default()
    };
    let score = diffsize::evaluate_diff(FIXTURE_DIFF, configuration).unwrap();
    // Only the Ruby file's six added lines remain.
    assert_eq!(score.result, Some(6.0));
}

#[test]
fn test_test_patterns_feed_the_tests_feature() {
    let configuration = Configuration {
        test_file_patterns: Some(vec!["*.ts".to_string()]),
        scoring: Some(Scoring {
            formula: "tests".to_string(),
            aliases: None,
        }),
        ..Default::default()
    };
    let score = diffsize::evaluate_diff(FIXTURE_DIFF, configuration).unwrap();
    // Added plus removed lines of the TypeScript file.
    assert_eq!(score.result, Some(6.0));
}

#[test]
fn test_formula_errors_are_carried_in_the_score() {
    let configuration = Configuration {
        scoring: Some(Scoring {
            formula: "+ additions".to_string(),
            aliases: None,
        }),
        ..Default::default()
    };
    let score = diffsize::evaluate_diff(FIXTURE_DIFF, configuration).unwrap();

    assert_eq!(score.result, None);
    assert_eq!(score.category, None);
    let error = score.error.unwrap();
    assert_eq!(error.message, "not enough operands for operator + at position 1");
    assert_eq!(error.token_position, 1);
}

#[test]
fn test_malformed_categories_fail_fast() {
    let configuration = Configuration {
        categories: Some(vec![Category {
            name: "only".to_string(),
            label: None,
            lte: Some(10.0),
            threshold: true,
        }]),
        ..Default::default()
    };
    let result = diffsize::evaluate_diff(FIXTURE_DIFF, configuration);
    assert!(matches!(
        result,
        Err(diffsize::EvaluateDiffError::Categories(_))
    ));
}

#[test]
fn test_score_serializes_to_the_documented_shape() {
    let score = diffsize::evaluate_diff(FIXTURE_DIFF, Configuration::default()).unwrap();
    let json = serde_json::to_value(&score).unwrap();

    assert_eq!(json["formula"], "- - + additions deletions comments whitespace");
    assert_eq!(json["result"], 7.0);
    assert_eq!(json["category"]["name"], "extra small");
    assert_eq!(json["category"]["lte"], 10.0);
    assert_eq!(json["threshold"], 500.0);
    assert_eq!(json["substitutions"]["additions"], 11.0);
    assert!(json.get("error").is_none());
}

#[test]
fn test_empty_diff_scores_zero() {
    let score = diffsize::evaluate_diff("", Configuration::default()).unwrap();
    assert_eq!(score.result, Some(0.0));
    assert_eq!(
        score.category.as_ref().map(|c| c.name.as_str()),
        Some("extra small")
    );
}
