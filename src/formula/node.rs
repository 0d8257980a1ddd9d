//! Abstract syntax tree for scoring formulas
//!
//! Formulas are whitespace-separated prefix-notation expressions. The parser
//! is a recursive descent over the token stream: operators consume exactly
//! `arity` child subtrees, everything else is a leaf. Token classification
//! checks aliases first, then numeric constants, then features, then
//! operators, so the three namespaces stay disjoint and an alias can never
//! silently shadow a feature.

use super::context::Context;
use super::error::{EvaluateError, ParseError};
use super::operators::Operator;
use crate::features::Feature;
use regex::Regex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::debug;

static NUMERIC_CONSTANT: OnceLock<Regex> = OnceLock::new();
static ALIAS_NAME: OnceLock<Regex> = OnceLock::new();

fn numeric_constant_pattern() -> &'static Regex {
    NUMERIC_CONSTANT
        .get_or_init(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("numeric pattern is valid"))
}

fn alias_name_pattern() -> &'static Regex {
    ALIAS_NAME.get_or_init(|| Regex::new(r"^[\w][\w-]*$").expect("alias pattern is valid"))
}

/// A node in the abstract syntax tree of a formula. The tree as a whole is
/// identified by its root node.
#[derive(Debug)]
pub struct Node {
    token: String,
    position: usize,
    kind: NodeKind,
}

#[derive(Debug)]
enum NodeKind {
    /// A numeric literal; evaluates to itself.
    Constant(f64),
    /// A feature instantiated against the active changeset.
    Feature(Box<dyn Feature>),
    /// An alias; its expansion is parsed and evaluated lazily.
    Alias { expansion: String },
    /// An operator with exactly `operator.arity()` children.
    Operator {
        operator: Operator,
        children: Vec<Node>,
    },
}

impl Node {
    /// Construct an abstract syntax tree from an expression, for example
    /// `"+ additions deletions"`.
    pub fn build(expression: &str, context: &Context) -> Result<Self, ParseError> {
        let mut tokens: VecDeque<(usize, &str)> = expression
            .split_whitespace()
            .enumerate()
            .map(|(index, token)| (index + 1, token))
            .collect();

        let root = Self::parse(&mut tokens, context)?;

        if let Some(&(position, _)) = tokens.front() {
            let suffix = tokens
                .iter()
                .map(|&(_, token)| token)
                .collect::<Vec<_>>()
                .join(" ");
            return Err(ParseError::UnreachableSuffix { suffix, position });
        }
        Ok(root)
    }

    fn parse(
        tokens: &mut VecDeque<(usize, &str)>,
        context: &Context,
    ) -> Result<Self, ParseError> {
        let (position, token) = tokens.pop_front().ok_or(ParseError::EmptyExpression)?;
        let mut node = Self::classify(token, position, context)?;

        if let NodeKind::Operator { operator, children } = &mut node.kind {
            if tokens.len() < operator.arity() {
                return Err(ParseError::InsufficientOperands {
                    symbol: token.to_string(),
                    position,
                });
            }
            for _ in 0..operator.arity() {
                children.push(Self::parse(tokens, context)?);
            }
        }
        Ok(node)
    }

    fn classify(token: &str, position: usize, context: &Context) -> Result<Self, ParseError> {
        if let Some(expansion) = context.alias(token) {
            if context.features().contains(token) {
                return Err(ParseError::AliasFeatureCollision {
                    name: token.to_string(),
                    position,
                });
            }
            if !alias_name_pattern().is_match(token) {
                return Err(ParseError::InvalidAliasName {
                    name: token.to_string(),
                    position,
                });
            }
            let expansion = expansion.to_string();
            return Ok(Self::leaf(token, position, NodeKind::Alias { expansion }));
        }

        if numeric_constant_pattern().is_match(token) {
            let value = token.parse::<f64>().map_err(|_| ParseError::InvalidToken {
                token: token.to_string(),
                position,
            })?;
            return Ok(Self::leaf(token, position, NodeKind::Constant(value)));
        }

        if context.features().contains(token) {
            let Some(changeset) = context.changeset() else {
                return Err(ParseError::MissingChangeset {
                    name: token.to_string(),
                    position,
                });
            };
            let feature = context
                .features()
                .instantiate(token, Arc::clone(changeset))
                .ok_or_else(|| ParseError::InvalidToken {
                    token: token.to_string(),
                    position,
                })?;
            return Ok(Self::leaf(token, position, NodeKind::Feature(feature)));
        }

        if let Some(operator) = context.operators().get(token) {
            return Ok(Self::leaf(
                token,
                position,
                NodeKind::Operator {
                    operator,
                    children: Vec::new(),
                },
            ));
        }

        Err(ParseError::InvalidToken {
            token: token.to_string(),
            position,
        })
    }

    fn leaf(token: &str, position: usize, kind: NodeKind) -> Self {
        Self {
            token: token.to_string(),
            position,
            kind,
        }
    }

    /// The literal source text that produced this node.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The 1-based index of the token in the expression.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Compute the value of the (sub-)expression rooted at this node.
    ///
    /// Operator nodes hand their children to the operator unevaluated;
    /// feature and alias nodes memoize their value in the context cache so
    /// each named value is computed at most once per evaluation.
    pub fn evaluate(&self, context: &mut Context) -> Result<f64, EvaluateError> {
        match &self.kind {
            NodeKind::Constant(value) => Ok(*value),

            NodeKind::Feature(feature) => {
                if let Some(value) = context.cached(&self.token) {
                    return Ok(value);
                }
                let value = feature.evaluate();
                debug!(feature = %self.token, value, "substituted feature");
                context.record(&self.token, value);
                Ok(value)
            }

            NodeKind::Alias { expansion } => {
                if let Some(value) = context.cached(&self.token) {
                    return Ok(value);
                }
                if !context.begin_expansion(&self.token) {
                    return Err(EvaluateError::CyclicAlias {
                        name: self.token.clone(),
                        position: self.position,
                    });
                }
                let outcome = Self::build(expansion, context)
                    .map_err(|source| EvaluateError::Alias {
                        name: self.token.clone(),
                        source: Box::new(source),
                    })
                    .and_then(|root| root.evaluate(context));
                context.finish_expansion(&self.token);

                let value = outcome?;
                debug!(alias = %self.token, value, "substituted alias");
                context.record(&self.token, value);
                Ok(value)
            }

            NodeKind::Operator { operator, children } => operator.apply(context, children),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token)?;
        if let NodeKind::Operator { children, .. } = &self.kind {
            for child in children {
                write!(f, " {child}")?;
            }
        }
        Ok(())
    }
}
