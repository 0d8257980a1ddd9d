//! Formula error types
//!
//! Parse errors are structural and refuse the formula before any evaluation
//! begins. Evaluation errors surface lazily, only when the offending subtree
//! is actually reached. Both carry the 1-based position of the token in the
//! expression that was being parsed.

use thiserror::Error;

/// Errors raised while building an abstract syntax tree from an expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error(
        "the scoring formula is empty; formulas and aliases must each be a \
         prefix-notation expression"
    )]
    EmptyExpression,

    #[error("invalid token at position {position}: {token}")]
    InvalidToken { token: String, position: usize },

    #[error("not enough operands for operator {symbol} at position {position}")]
    InsufficientOperands { symbol: String, position: usize },

    #[error("expression contains an unreachable suffix: \"{suffix}\"")]
    UnreachableSuffix { suffix: String, position: usize },

    #[error("alias must not share a name with a feature: {name}")]
    AliasFeatureCollision { name: String, position: usize },

    #[error("alias is not a valid identifier (word characters and hyphens, not starting with a hyphen): {name}")]
    InvalidAliasName { name: String, position: usize },

    #[error("a changeset is required to evaluate the feature {name}")]
    MissingChangeset { name: String, position: usize },
}

impl ParseError {
    /// The 1-based token position the error points at.
    pub fn position(&self) -> usize {
        match self {
            Self::EmptyExpression => 1,
            Self::InvalidToken { position, .. }
            | Self::InsufficientOperands { position, .. }
            | Self::UnreachableSuffix { position, .. }
            | Self::AliasFeatureCollision { position, .. }
            | Self::InvalidAliasName { position, .. }
            | Self::MissingChangeset { position, .. } => *position,
        }
    }
}

/// Errors raised while evaluating an abstract syntax tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluateError {
    #[error("\"{token}\" evaluated to zero, so it cannot be used as a divisor")]
    ZeroDivisor { token: String, position: usize },

    #[error("alias expansion cycle detected at {name}")]
    CyclicAlias { name: String, position: usize },

    /// An alias expansion failed to parse. Expansions are parsed lazily, so
    /// this surfaces at evaluation time; the inner position refers to the
    /// expansion string.
    #[error("in the expansion of alias {name}: {source}")]
    Alias {
        name: String,
        #[source]
        source: Box<ParseError>,
    },
}

impl EvaluateError {
    /// The 1-based token position the error points at.
    pub fn position(&self) -> usize {
        match self {
            Self::ZeroDivisor { position, .. } | Self::CyclicAlias { position, .. } => *position,
            Self::Alias { source, .. } => source.position(),
        }
    }
}
