// Copyright (c) 2016-2021 Fabian Schuiki

//! An unvalidated description of a grammar, as handed in by a caller.

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct GrammarSpec {
    pub nonterms: Vec<String>,
    pub terms: Vec<String>,
    pub start: String,
    pub rules: Vec<Rule>,
}

/// The alternatives of one nonterminal. An empty choice is ε.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub choices: Vec<Vec<String>>,
}

/// One line of the textual grammar format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Nonterms(Vec<String>),
    Terms(Vec<String>),
    Start(Vec<String>),
    Rule(String, Vec<Vec<Symbol>>),
}

/// A symbol on the right-hand side of a rule line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    Epsilon,
    Name(String),
}
