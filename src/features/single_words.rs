//! Added lines consisting of a single word
//!
//! Lines like a lone `end`, a keyword argument, or one quoted string are
//! cheap to review; formulas can discount them. A trailing punctuation
//! character (a comma or semicolon) is allowed.

use super::Feature;
use crate::changeset::Changeset;
use regex::Regex;
use std::sync::Arc;
use std::sync::OnceLock;

static SINGLE_WORD: OnceLock<Regex> = OnceLock::new();

fn single_word_pattern() -> &'static Regex {
    SINGLE_WORD.get_or_init(|| {
        Regex::new(r#"^\s*(?:"\b[\w-]+\b"|'\b[\w-]+\b'|`\b[\w-]+\b`|\b[\w-]+\b)\S?$"#)
            .expect("single-word pattern is valid")
    })
}

#[derive(Debug)]
pub struct SingleWords {
    changeset: Arc<Changeset>,
}

impl SingleWords {
    pub const NAME: &'static str = "single-words";

    pub fn new(changeset: Arc<Changeset>) -> Self {
        Self { changeset }
    }
}

impl Feature for SingleWords {
    fn evaluate(&self) -> f64 {
        self.changeset
            .files()
            .iter()
            .flat_map(|file| file.added_lines())
            .filter(|line| single_word_pattern().is_match(&line.content))
            .count() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_single_word_lines() {
        let diff = "\
--- a/lorem.rb
+++ b/lorem.rb
@@ -1,1 +1,8 @@
 kept
+end
+  end
+'symbol',
+\"quoted\"
+two words
+kebab-case-word
+x = 1
";
        let feature = SingleWords::new(Arc::new(Changeset::parse(diff)));
        // end, indented end, quoted symbol with comma, quoted word, kebab word
        assert_eq!(feature.evaluate(), 5.0);
    }

    #[test]
    fn test_bare_punctuation_is_not_a_word() {
        let diff = "\
--- a/lorem.rb
+++ b/lorem.rb
@@ -1,1 +1,3 @@
 kept
+--
+{
";
        let feature = SingleWords::new(Arc::new(Changeset::parse(diff)));
        assert_eq!(feature.evaluate(), 0.0);
    }
}
