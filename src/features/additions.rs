//! Total added lines across the changeset

use super::Feature;
use crate::changeset::Changeset;
use std::sync::Arc;

#[derive(Debug)]
pub struct Additions {
    changeset: Arc<Changeset>,
}

impl Additions {
    pub const NAME: &'static str = "additions";

    pub fn new(changeset: Arc<Changeset>) -> Self {
        Self { changeset }
    }
}

impl Feature for Additions {
    fn evaluate(&self) -> f64 {
        self.changeset
            .files()
            .iter()
            .map(|file| file.additions())
            .sum::<usize>() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "\
--- a/one.txt
+++ b/one.txt
@@ -1,2 +1,3 @@
 kept
-dropped
+first
+second
--- a/two.txt
+++ b/two.txt
@@ -1,1 +1,2 @@
 kept
+third
";

    #[test]
    fn test_sums_added_lines_across_files() {
        let feature = Additions::new(Arc::new(Changeset::parse(DIFF)));
        assert_eq!(feature.evaluate(), 3.0);
    }

    #[test]
    fn test_empty_changeset_is_zero() {
        let feature = Additions::new(Arc::new(Changeset::parse("")));
        assert_eq!(feature.evaluate(), 0.0);
    }
}
