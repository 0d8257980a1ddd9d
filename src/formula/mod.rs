//! Formula engine
//!
//! The engine parses a prefix-notation expression into an abstract syntax
//! tree once, evaluates it lazily against a context, and assembles a
//! [`Score`]. Parse errors are refused before evaluation begins; evaluation
//! errors (division by zero, alias cycles) surface only when the offending
//! subtree is actually reached.

mod context;
mod error;
mod node;
mod operators;
mod score;

pub use context::Context;
pub use error::{EvaluateError, ParseError};
pub use node::Node;
pub use operators::{Operator, OperatorCatalog};
pub use score::{AssignedCategory, Score, ScoreError};

use tracing::debug;

/// A scoring expression that can be evaluated against a changeset.
#[derive(Debug, Clone)]
pub struct Formula {
    expression: String,
}

impl Formula {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Evaluate this formula in the given context. Failures are captured in
    /// the returned [`Score`] rather than bubbling out, so callers always
    /// get the substitution trace that was accumulated.
    pub fn evaluate(&self, context: &mut Context) -> Score {
        let root = match Node::build(&self.expression, context) {
            Ok(root) => root,
            Err(error) => {
                debug!(formula = %self.expression, %error, "formula refused at parse time");
                return Score::parse_failure(&self.expression, &error, context);
            }
        };

        match root.evaluate(context) {
            Ok(value) => Score::evaluated(&self.expression, value, context),
            Err(error) => {
                debug!(formula = %self.expression, %error, "formula evaluation failed");
                Score::evaluation_failure(&self.expression, &error, context)
            }
        }
    }
}
