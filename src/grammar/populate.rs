// Copyright (c) 2016-2021 Fabian Schuiki

//! Construction of a validated grammar from a description.

use crate::{
    ast,
    context::{Grammar, GrammarArena, Symbol},
    errors::{GrammarError, GrammarResult},
};
use std::collections::HashMap;

/// Build a grammar from a description.
///
/// Fails if the start symbol or any symbol used in a rule is undeclared, or if
/// a name is declared as both terminal and nonterminal.
pub fn build<'a>(
    arena: &'a GrammarArena,
    spec: &ast::GrammarSpec,
) -> GrammarResult<Grammar<'a>> {
    info!(
        "Building grammar with {} nonterminals, {} terminals",
        spec.nonterms.len(),
        spec.terms.len()
    );

    // Register the symbol names.
    let mut lookup = HashMap::<&str, Symbol<'a>>::new();
    for name in &spec.terms {
        if name.is_empty() {
            return Err(GrammarError::EmptyName);
        }
        lookup.insert(name, arena.term(name).into());
    }
    for name in &spec.nonterms {
        if name.is_empty() {
            return Err(GrammarError::EmptyName);
        }
        if let Some(Symbol::Term(_)) = lookup.get(name.as_str()) {
            return Err(GrammarError::AmbiguousSymbol(name.clone()));
        }
        lookup.insert(name, arena.nonterm(name).into());
    }

    let start = match lookup.get(spec.start.as_str()) {
        Some(Symbol::Nonterm(nt)) => *nt,
        _ => return Err(GrammarError::UndeclaredStart(spec.start.clone())),
    };
    let mut grammar = Grammar::new(start);
    for sym in lookup.values() {
        match *sym {
            Symbol::Term(t) => grammar.add_term(t),
            Symbol::Nonterm(nt) => grammar.add_nonterm(nt),
        }
    }

    // Populate the productions.
    for rule in &spec.rules {
        let nt = match lookup.get(rule.name.as_str()) {
            Some(Symbol::Nonterm(nt)) => *nt,
            _ => return Err(GrammarError::UndeclaredNonterm(rule.name.clone())),
        };
        for choice in &rule.choices {
            let syms = choice
                .iter()
                .map(|name| {
                    lookup
                        .get(name.as_str())
                        .cloned()
                        .ok_or_else(|| GrammarError::UndeclaredSymbol {
                            lhs: rule.name.clone(),
                            symbol: name.clone(),
                        })
                })
                .collect::<GrammarResult<Vec<_>>>()?;
            if !grammar.add_production(nt, syms) {
                trace!("Ignoring duplicate alternative of {}", nt);
            }
        }
    }

    grammar.check()?;
    debug!("Built grammar with {} productions", grammar.num_productions());
    Ok(grammar)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{GrammarSpec, Rule};

    fn rule(name: &str, choices: Vec<Vec<&str>>) -> Rule {
        Rule {
            name: name.into(),
            choices: choices
                .into_iter()
                .map(|c| c.into_iter().map(String::from).collect())
                .collect(),
        }
    }

    fn spec(start: &str, rules: Vec<Rule>) -> GrammarSpec {
        GrammarSpec {
            nonterms: vec!["S".into(), "A".into()],
            terms: vec!["a".into()],
            start: start.into(),
            rules,
        }
    }

    #[test]
    fn builds_valid_grammar() {
        let arena = GrammarArena::default();
        let rules = vec![
            rule("S", vec![vec!["A", "a"], vec![], vec!["A", "a"]]),
            rule("A", vec![vec!["a"]]),
        ];
        let g = build(&arena, &spec("S", rules)).unwrap();
        assert_eq!(g.start().name(), "S");
        assert_eq!(g.num_productions(), 3);
    }

    #[test]
    fn rejects_undeclared_start() {
        let arena = GrammarArena::default();
        assert_eq!(
            build(&arena, &spec("a", vec![])).unwrap_err(),
            GrammarError::UndeclaredStart("a".into())
        );
    }

    #[test]
    fn rejects_undeclared_symbol() {
        let arena = GrammarArena::default();
        let rules = vec![rule("S", vec![vec!["b"]])];
        assert_eq!(
            build(&arena, &spec("S", rules)).unwrap_err(),
            GrammarError::UndeclaredSymbol {
                lhs: "S".into(),
                symbol: "b".into()
            }
        );
    }

    #[test]
    fn rejects_rules_for_terminals() {
        let arena = GrammarArena::default();
        let rules = vec![rule("a", vec![vec!["A"]])];
        assert_eq!(
            build(&arena, &spec("S", rules)).unwrap_err(),
            GrammarError::UndeclaredNonterm("a".into())
        );
    }

    #[test]
    fn rejects_ambiguous_names() {
        let arena = GrammarArena::default();
        let mut s = spec("S", vec![]);
        s.terms.push("A".into());
        assert_eq!(
            build(&arena, &s).unwrap_err(),
            GrammarError::AmbiguousSymbol("A".into())
        );
    }
}
