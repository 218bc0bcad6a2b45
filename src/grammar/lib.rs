// Copyright (c) 2016-2021 Fabian Schuiki

//! Conversion of context-free grammars into Chomsky Normal Form.
//!
//! A grammar is built once from a description (see `populate::build`) and
//! then taken through five passes, each of which produces a new grammar:
//!
//! 1. `epsilon`: eliminate ε-productions,
//! 2. `unit`: eliminate unit productions,
//! 3. `useful`: drop non-generating and unreachable symbols,
//! 4. `isolate`: move terminals of long productions into nonterminals,
//! 5. `binarize`: split long productions into pairs.
//!
//! `pipeline::convert` runs them in this order.

#[macro_use]
extern crate log;

pub mod ast;
pub mod binarize;
pub mod context;
pub mod epsilon;
pub mod errors;
pub mod fresh;
pub mod isolate;
pub mod parser;
pub mod pipeline;
pub mod populate;
pub mod unit;
pub mod useful;

pub use crate::context::{Grammar, GrammarArena, Nonterm, Production, Symbol, Term};
pub use crate::errors::{GrammarError, GrammarResult};
pub use crate::pipeline::{convert, to_cnf, Conversion, Options, Stage};
