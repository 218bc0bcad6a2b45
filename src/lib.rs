// Copyright (c) 2016-2021 Fabian Schuiki

//! Conversion of context-free grammars into Chomsky Normal Form.

// Re-export everything from the grammar crate.
pub extern crate chomsky_grammar as grammar;
pub use crate::grammar::*;
