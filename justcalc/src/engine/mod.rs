//! Restricted arithmetic engine
//!
//! Numeric literals, `+ - * / // % ^ **`, parentheses and a single `sqrt`
//! function. Nothing else is reachable from an expression.

pub mod evaluator;
pub mod parser;

pub use evaluator::evaluate;
pub use parser::{AstNode, Operator, Parser, Token, Tokenizer};

use thiserror::Error;

/// Result type for engine operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Everything that can go wrong while evaluating an expression.
///
/// The `Display` text is what the calculator shows; `Syntax` and
/// `UnknownName` keep their detail for logs only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Division by zero is impossible")]
    DivisionByZero,
    #[error("Math domain error: unreal number")]
    Domain,
    #[error("Invalid mathematical expression")]
    Syntax(String),
    #[error("Invalid mathematical expression")]
    Empty,
    #[error("Invalid expression")]
    NotCallable,
    #[error("Invalid expression")]
    UnknownName(String),
    #[error("Invalid expression")]
    Overflow,
}

/// Coarse classification of [`CalcError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    DivisionByZero,
    Domain,
    Syntax,
    Generic,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::Domain => ErrorKind::Domain,
            Self::Syntax(_) | Self::Empty => ErrorKind::Syntax,
            Self::NotCallable | Self::UnknownName(_) | Self::Overflow => ErrorKind::Generic,
        }
    }

    pub(crate) fn syntax(detail: impl Into<String>) -> Self {
        Self::Syntax(detail.into())
    }
}

/// Parse and evaluate `input` in one step.
pub fn evaluate_str(input: &str) -> CalcResult<f64> {
    let ast = Parser::parse_str(input)?;
    evaluate(&ast)
}
