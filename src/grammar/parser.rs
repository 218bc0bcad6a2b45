// Copyright (c) 2016-2021 Fabian Schuiki

//! A line-oriented textual format for grammar descriptions.
//!
//! ```text
//! # comment
//! nonterminals: S A B
//! terminals: a b
//! start: S
//! S -> a B | A
//! A -> ε | b A
//! ```
//!
//! Symbols are separated by whitespace. An alternative that is empty or
//! consists of `ε` alone denotes the empty right-hand side. A nonterminal may
//! appear on the left of several rule lines. Each line is parsed by the
//! generated `syntax::LineParser`; see `syntax.lalrpop`.

use crate::{
    ast::{GrammarSpec, Line, Rule, Symbol},
    errors::{GrammarError, GrammarResult},
};
use lalrpop_util::{lalrpop_mod, ParseError};
use std::fmt::Display;

lalrpop_mod!(syntax);

/// Parse a grammar description.
pub fn parse_grammar(input: &str) -> GrammarResult<GrammarSpec> {
    let parser = syntax::LineParser::new();
    let mut spec = GrammarSpec::default();
    let mut seen_nonterms = false;
    let mut seen_terms = false;
    let mut seen_start = false;
    let mut num_lines = 0;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        num_lines = line_no;
        let err = |message: String| GrammarError::Syntax {
            line: line_no,
            message,
        };
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        match parser.parse(line).map_err(|e| err(describe(e)))? {
            Line::Rule(lhs, alts) => {
                let mut choices = vec![];
                for syms in alts {
                    if syms.len() > 1 && syms.contains(&Symbol::Epsilon) {
                        return Err(err("`ε` must stand alone".into()));
                    }
                    choices.push(
                        syms.into_iter()
                            .filter_map(|sym| match sym {
                                Symbol::Epsilon => None,
                                Symbol::Name(name) => Some(name),
                            })
                            .collect(),
                    );
                }
                match spec.rules.iter_mut().find(|r| r.name == lhs) {
                    Some(rule) => rule.choices.extend(choices),
                    None => spec.rules.push(Rule { name: lhs, choices }),
                }
            }
            Line::Nonterms(names) if !seen_nonterms => {
                seen_nonterms = true;
                spec.nonterms.extend(names);
            }
            Line::Terms(names) if !seen_terms => {
                seen_terms = true;
                spec.terms.extend(names);
            }
            Line::Start(names) if !seen_start => {
                seen_start = true;
                if names.len() != 1 {
                    return Err(err("expected exactly one start symbol".into()));
                }
                spec.start = names.into_iter().next().unwrap_or_default();
            }
            Line::Nonterms(_) => return Err(err("duplicate `nonterminals` declaration".into())),
            Line::Terms(_) => return Err(err("duplicate `terminals` declaration".into())),
            Line::Start(_) => return Err(err("duplicate `start` declaration".into())),
        }
    }

    if !seen_start {
        return Err(GrammarError::Syntax {
            line: num_lines,
            message: "missing `start` declaration".into(),
        });
    }
    Ok(spec)
}

/// Describe a parse error without the byte offsets, which only make sense
/// within a single line.
fn describe<T: Display>(err: ParseError<usize, T, &'static str>) -> String {
    match err {
        ParseError::InvalidToken { .. } => "invalid token".into(),
        ParseError::UnrecognizedEOF { .. } => "unexpected end of line".into(),
        ParseError::UnrecognizedToken { token, .. } | ParseError::ExtraToken { token } => {
            format!("unexpected `{}`", token.1)
        }
        ParseError::User { error } => error.into(),
    }
}
