//! ## Errors
//! This module contains the error types of the crate:
//! - [InferenceError] for everything that can go wrong while unifying, addressing sub-terms or
//!   applying an inference rule.
//! - [ParseError] for problems reading TPTP input.

use std::io;

use thiserror::Error;

use crate::term_bank::Proposition;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// No substitution makes the two propositions syntactically equal, either because of a
    /// symbol/arity clash or because the occurs-check failed.
    #[error("{0} and {1} are not unifiable")]
    NonUnifiable(Box<Proposition>, Box<Proposition>),

    /// Replacing the sub-term at this position would not change the proposition.
    #[error("sub-term at position {0} would be replaced by itself")]
    DegenerateReplacement(usize),

    /// An inference rule was called with arguments it is not defined for.
    #[error("{0}")]
    InvalidRuleApplication(String),

    #[error("sub-term index {index} is out of range for a proposition of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// The position addresses something that is not a term, i.e. the root of an atom.
    #[error("position {0} of an atom does not address a term")]
    InvalidPosition(usize),
}

impl InferenceError {
    /// Whether the error only means that one particular combination of premises has no
    /// conclusion. Enumerations skip these, every other kind is a caller bug and propagates.
    pub fn is_unproductive(&self) -> bool {
        matches!(
            self,
            InferenceError::NonUnifiable(..) | InferenceError::DegenerateReplacement(_)
        )
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("syntax error at byte {0}")]
    Syntax(usize),

    #[error("unsupported input: {0}")]
    Unsupported(String),

    #[error("include with a formula selection is not supported: {0}")]
    IncludeSelection(String),
}

pub type Result<T> = std::result::Result<T, InferenceError>;
