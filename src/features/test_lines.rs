//! Changed lines in test files
//!
//! Counts added plus removed lines in files flagged by the configured
//! test-file patterns.

use super::Feature;
use crate::changeset::Changeset;
use std::sync::Arc;

#[derive(Debug)]
pub struct Tests {
    changeset: Arc<Changeset>,
}

impl Tests {
    pub const NAME: &'static str = "tests";

    pub fn new(changeset: Arc<Changeset>) -> Self {
        Self { changeset }
    }
}

impl Feature for Tests {
    fn evaluate(&self) -> f64 {
        self.changeset
            .files()
            .iter()
            .filter(|file| file.is_test_file)
            .map(|file| file.additions() + file.deletions())
            .sum::<usize>() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "\
--- a/lib/lorem.rb
+++ b/lib/lorem.rb
@@ -1,1 +1,2 @@
 kept
+added
--- a/test/lorem_test.rb
+++ b/test/lorem_test.rb
@@ -1,3 +1,4 @@
 def test_lorem
-  assert false
+  assert true
+  assert_equal 1, 1
 end
";

    #[test]
    fn test_counts_changed_lines_in_test_files_only() {
        let changeset =
            Changeset::parse_with(DIFF, &[], &["test/*.rb".to_string()]).unwrap();
        let feature = Tests::new(Arc::new(changeset));
        assert_eq!(feature.evaluate(), 3.0);
    }

    #[test]
    fn test_without_patterns_nothing_is_a_test() {
        let feature = Tests::new(Arc::new(Changeset::parse(DIFF)));
        assert_eq!(feature.evaluate(), 0.0);
    }
}
