// Copyright (c) 2016-2021 Fabian Schuiki

//! Errors raised while constructing a grammar.

use std::fmt;

/// A grammar result type. Either carries the result `T` in the Ok variant, or
/// the reason the grammar was rejected in the Err variant.
pub type GrammarResult<T> = Result<T, GrammarError>;

/// A malformed grammar.
///
/// All of these are detected before any conversion pass runs. An empty
/// language is not an error and has no variant here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrammarError {
    /// A right-hand side refers to a name that was never declared.
    UndeclaredSymbol { lhs: String, symbol: String },
    /// A production is attached to a name that is not a nonterminal.
    UndeclaredNonterm(String),
    /// The start symbol is not among the nonterminals.
    UndeclaredStart(String),
    /// A name is declared both as terminal and as nonterminal.
    AmbiguousSymbol(String),
    /// A symbol with an empty name.
    EmptyName,
    /// A right-hand side has too many nullable positions to expand.
    ExpansionLimit {
        lhs: String,
        positions: usize,
        limit: usize,
    },
    /// The textual grammar description could not be read.
    Syntax { line: usize, message: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrammarError::UndeclaredSymbol { lhs, symbol } => write!(
                f,
                "production of `{}` uses undeclared symbol `{}`",
                lhs, symbol
            ),
            GrammarError::UndeclaredNonterm(name) => {
                write!(f, "productions given for undeclared nonterminal `{}`", name)
            }
            GrammarError::UndeclaredStart(name) => {
                write!(f, "start symbol `{}` is not a nonterminal", name)
            }
            GrammarError::AmbiguousSymbol(name) => write!(
                f,
                "`{}` is declared both as terminal and as nonterminal",
                name
            ),
            GrammarError::EmptyName => write!(f, "symbol names must not be empty"),
            GrammarError::ExpansionLimit {
                lhs,
                positions,
                limit,
            } => write!(
                f,
                "production of `{}` has {} nullable positions (limit is {})",
                lhs, positions, limit
            ),
            GrammarError::Syntax { line, message } => write!(f, "line {}: {}", line, message),
        }
    }
}

impl std::error::Error for GrammarError {}
