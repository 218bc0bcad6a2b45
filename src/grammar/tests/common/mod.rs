// Copyright (c) 2016-2021 Fabian Schuiki
#![allow(dead_code)]

//! Utilities for grammar conversion tests.

pub use chomsky_grammar::*;
use chomsky_grammar::context::format_symbols;
use std::collections::{BTreeMap, BTreeSet};

/// Parse and build a grammar, panicking on malformed input.
pub fn grammar<'a>(arena: &'a GrammarArena, input: &str) -> Grammar<'a> {
    let spec = parser::parse_grammar(input).unwrap_or_else(|e| panic!("{}", e));
    populate::build(arena, &spec).unwrap_or_else(|e| panic!("{}", e))
}

/// The right-hand sides of a nonterminal, rendered as strings.
pub fn alternatives(grammar: &Grammar, name: &str) -> Vec<String> {
    grammar
        .productions()
        .filter(|p| p.nt.name() == name)
        .map(|p| format_symbols(&p.syms).to_string())
        .collect()
}

/// All words of at most `max_len` terminals in the language of a grammar.
///
/// Computed as a fixpoint over the words each nonterminal derives, which
/// terminates for any grammar since the set of candidate words is finite.
pub fn words_up_to<'a>(grammar: &Grammar<'a>, max_len: usize) -> BTreeSet<Vec<&'a str>> {
    let mut lang = BTreeMap::<Nonterm<'a>, BTreeSet<Vec<&'a str>>>::new();
    loop {
        let mut modified = false;
        for p in grammar.productions() {
            let mut partial = BTreeSet::<Vec<&'a str>>::new();
            partial.insert(vec![]);
            for &sym in &p.syms {
                let mut next = BTreeSet::new();
                match sym {
                    Symbol::Term(t) => {
                        for w in &partial {
                            if w.len() < max_len {
                                let mut w: Vec<&'a str> = w.clone();
                                w.push(t.name());
                                next.insert(w);
                            }
                        }
                    }
                    Symbol::Nonterm(nt) => {
                        for v in lang.get(&nt).into_iter().flatten() {
                            for w in &partial {
                                if w.len() + v.len() <= max_len {
                                    let mut w: Vec<&'a str> = w.clone();
                                    w.extend(v.iter().cloned());
                                    next.insert(w);
                                }
                            }
                        }
                    }
                }
                partial = next;
                if partial.is_empty() {
                    break;
                }
            }
            let into = lang.entry(p.nt).or_default();
            for w in partial {
                modified |= into.insert(w);
            }
        }
        if !modified {
            break;
        }
    }
    lang.remove(&grammar.start()).unwrap_or_default()
}

/// Convert a grammar and check that the result is in CNF and derives the same
/// words up to the given length.
pub fn assert_preserved<'a>(
    arena: &'a GrammarArena,
    g: &Grammar<'a>,
    max_len: usize,
) -> Grammar<'a> {
    let cnf = to_cnf(arena, g).unwrap_or_else(|e| panic!("{}", e));
    if let Err(p) = pipeline::check_cnf(&cnf) {
        panic!("not in CNF: {}\n{}", p, cnf);
    }
    assert_eq!(
        words_up_to(g, max_len),
        words_up_to(&cnf, max_len),
        "language changed:\n{}\n{}",
        g,
        cnf
    );
    cnf
}
