//! Operator catalog
//!
//! Operators receive their child nodes unevaluated and decide which of them
//! to evaluate, in what order. That keeps the conditional operator able to
//! skip the branch it does not select and lets division report the divisor's
//! source token when it evaluates to zero.

use super::context::Context;
use super::error::EvaluateError;
use super::node::Node;
use std::collections::HashMap;
use std::fmt;

type Apply = fn(&mut Context, &[Node]) -> Result<f64, EvaluateError>;

/// An operator usable in a scoring expression.
#[derive(Clone, Copy)]
pub struct Operator {
    symbol: &'static str,
    arity: usize,
    apply: Apply,
}

impl Operator {
    /// The token that denotes this operator in a formula.
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// The number of operands the operator takes.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Apply the operator to its (unevaluated) operand nodes. The parser
    /// guarantees `operands.len() == self.arity()`.
    pub fn apply(&self, context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
        debug_assert_eq!(operands.len(), self.arity);
        (self.apply)(context, operands)
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operator")
            .field("symbol", &self.symbol)
            .field("arity", &self.arity)
            .finish()
    }
}

fn add(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(operands[0].evaluate(context)? + operands[1].evaluate(context)?)
}

fn subtract(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(operands[0].evaluate(context)? - operands[1].evaluate(context)?)
}

fn multiply(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(operands[0].evaluate(context)? * operands[1].evaluate(context)?)
}

fn divide(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    let divisor = operands[1].evaluate(context)?;
    if divisor == 0.0 {
        return Err(EvaluateError::ZeroDivisor {
            token: operands[1].token().to_string(),
            position: operands[1].position(),
        });
    }
    Ok(operands[0].evaluate(context)? / divisor)
}

fn exponent(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(operands[0]
        .evaluate(context)?
        .powf(operands[1].evaluate(context)?))
}

fn greater_than(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(truth(operands[0].evaluate(context)? > operands[1].evaluate(context)?))
}

fn greater_than_or_equal(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(truth(operands[0].evaluate(context)? >= operands[1].evaluate(context)?))
}

fn less_than(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(truth(operands[0].evaluate(context)? < operands[1].evaluate(context)?))
}

fn less_than_or_equal(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(truth(operands[0].evaluate(context)? <= operands[1].evaluate(context)?))
}

fn equals(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(truth(operands[0].evaluate(context)? == operands[1].evaluate(context)?))
}

fn not_equals(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(truth(operands[0].evaluate(context)? != operands[1].evaluate(context)?))
}

fn and(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(truth(
        operands[0].evaluate(context)? > 0.0 && operands[1].evaluate(context)? > 0.0,
    ))
}

fn or(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    Ok(truth(
        operands[0].evaluate(context)? > 0.0 || operands[1].evaluate(context)? > 0.0,
    ))
}

fn not(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    let value = operands[0].evaluate(context)?;
    Ok(if value > 0.0 { 0.0 } else { 1.0 })
}

fn if_else(context: &mut Context, operands: &[Node]) -> Result<f64, EvaluateError> {
    // Only the selected branch is evaluated; the other subtree may divide
    // by zero or reference an expensive feature without consequence.
    if operands[0].evaluate(context)? > 0.0 {
        operands[1].evaluate(context)
    } else {
        operands[2].evaluate(context)
    }
}

fn truth(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

const STANDARD_OPERATORS: &[Operator] = &[
    Operator { symbol: "+", arity: 2, apply: add },
    Operator { symbol: "-", arity: 2, apply: subtract },
    Operator { symbol: "*", arity: 2, apply: multiply },
    Operator { symbol: "/", arity: 2, apply: divide },
    Operator { symbol: "^", arity: 2, apply: exponent },
    Operator { symbol: ">", arity: 2, apply: greater_than },
    Operator { symbol: ">=", arity: 2, apply: greater_than_or_equal },
    Operator { symbol: "<", arity: 2, apply: less_than },
    Operator { symbol: "<=", arity: 2, apply: less_than_or_equal },
    Operator { symbol: "==", arity: 2, apply: equals },
    Operator { symbol: "!=", arity: 2, apply: not_equals },
    Operator { symbol: "&", arity: 2, apply: and },
    Operator { symbol: "|", arity: 2, apply: or },
    Operator { symbol: "!", arity: 1, apply: not },
    Operator { symbol: "?", arity: 3, apply: if_else },
];

/// The immutable collection of operators available to scoring formulas.
///
/// Built once and passed by reference into the parser and evaluation
/// context. Tests can assemble a restricted catalog with
/// [`OperatorCatalog::with_operators`].
#[derive(Debug)]
pub struct OperatorCatalog {
    by_symbol: HashMap<&'static str, Operator>,
}

impl OperatorCatalog {
    /// The full built-in operator set.
    pub fn standard() -> Self {
        Self::with_operators(STANDARD_OPERATORS.iter().copied())
    }

    /// A catalog restricted to the given operators.
    pub fn with_operators(operators: impl IntoIterator<Item = Operator>) -> Self {
        let mut by_symbol = HashMap::new();
        for operator in operators {
            let replaced = by_symbol.insert(operator.symbol, operator);
            debug_assert!(replaced.is_none(), "duplicate operator {}", operator.symbol);
        }
        Self { by_symbol }
    }

    pub fn get(&self, symbol: &str) -> Option<Operator> {
        self.by_symbol.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }
}

impl Default for OperatorCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
