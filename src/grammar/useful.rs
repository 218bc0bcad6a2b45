// Copyright (c) 2016-2021 Fabian Schuiki

//! Removal of useless symbols.
//!
//! A symbol is useful if it is generating, i.e. derives some string of
//! terminals, and reachable from the start symbol. The two properties must be
//! established in that order: pruning non-generating symbols may leave others
//! unreachable, whereas the converse cannot happen.

use crate::context::{Grammar, Nonterm, Symbol, Term};
use itertools::Itertools;
use std::collections::BTreeSet;

/// Compute the nonterminals that derive some string of terminals.
pub fn generating_set<'a>(grammar: &Grammar<'a>) -> BTreeSet<Nonterm<'a>> {
    let mut generating = BTreeSet::<Nonterm<'a>>::new();
    for i in 1.. {
        trace!("Generating set iteration {}", i);
        let mut modified = false;
        for p in grammar.productions() {
            if generating.contains(&p.nt) {
                continue;
            }
            let all = p.syms.iter().all(|&sym| match sym {
                Symbol::Term(_) => true,
                Symbol::Nonterm(nt) => generating.contains(&nt),
            });
            if all {
                generating.insert(p.nt);
                modified = true;
            }
        }
        if !modified {
            break;
        }
    }
    generating
}

/// Compute the symbols reachable from the start symbol.
pub fn reachable_set<'a>(
    grammar: &Grammar<'a>,
) -> (BTreeSet<Nonterm<'a>>, BTreeSet<Term<'a>>) {
    let mut nonterms = BTreeSet::new();
    let mut terms = BTreeSet::new();
    nonterms.insert(grammar.start());
    for i in 1.. {
        trace!("Reachable set iteration {}", i);
        let mut into = nonterms.clone();
        for &nt in &nonterms {
            for p in grammar.productions_of(nt) {
                for &sym in &p.syms {
                    match sym {
                        Symbol::Term(t) => {
                            terms.insert(t);
                        }
                        Symbol::Nonterm(nt) => {
                            into.insert(nt);
                        }
                    }
                }
            }
        }
        if into == nonterms {
            break;
        }
        nonterms = into;
    }
    (nonterms, terms)
}

/// Drop every nonterminal that generates nothing, and every production that
/// mentions one.
pub fn remove_non_generating<'a>(grammar: &Grammar<'a>) -> Grammar<'a> {
    let generating = generating_set(grammar);
    debug!("Generating nonterminals: {{{}}}", generating.iter().format(", "));

    let mut out = Grammar::new(grammar.start());
    for t in grammar.terms() {
        out.add_term(t);
    }
    for &nt in &generating {
        out.add_nonterm(nt);
    }
    for p in grammar.productions() {
        let keep = generating.contains(&p.nt)
            && p.syms.iter().all(|&sym| match sym {
                Symbol::Term(_) => true,
                Symbol::Nonterm(nt) => generating.contains(&nt),
            });
        if keep {
            out.add_production(p.nt, p.syms.clone());
        }
    }
    if !generating.contains(&grammar.start()) {
        info!(
            "Start symbol {} generates nothing; the language is empty",
            grammar.start()
        );
    }
    out
}

/// Drop every symbol that cannot be reached from the start symbol.
pub fn remove_unreachable<'a>(grammar: &Grammar<'a>) -> Grammar<'a> {
    let (nonterms, terms) = reachable_set(grammar);
    debug!(
        "Reachable symbols: {{{}}}",
        nonterms
            .iter()
            .map(|nt| nt.name())
            .chain(terms.iter().map(|t| t.name()))
            .format(", ")
    );

    let mut out = Grammar::new(grammar.start());
    for t in terms {
        out.add_term(t);
    }
    for &nt in &nonterms {
        out.add_nonterm(nt);
        for p in grammar.productions_of(nt) {
            out.add_production(nt, p.syms.clone());
        }
    }
    out
}

/// Remove all useless symbols from the grammar.
///
/// If the start symbol generates nothing the result is a valid grammar of the
/// empty language; see `Grammar::is_empty_language`.
pub fn remove_useless_symbols<'a>(grammar: &Grammar<'a>) -> Grammar<'a> {
    debug!("Removing useless symbols");
    let out = remove_unreachable(&remove_non_generating(grammar));
    debug!(
        "{} nonterminals, {} terminals, {} productions after removing useless symbols",
        out.nonterms().count(),
        out.terms().count(),
        out.num_productions()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GrammarArena;

    #[test]
    fn generating_before_reachable() {
        // S -> A B | a, A -> a, B -> B b
        //
        // B generates nothing. Once S -> A B is gone, A is unreachable.
        let arena = GrammarArena::default();
        let (s, a, b) = (arena.nonterm("S"), arena.nonterm("A"), arena.nonterm("B"));
        let (ta, tb) = (arena.term("a"), arena.term("b"));
        let mut g = Grammar::new(s);
        g.add_nonterm(a);
        g.add_nonterm(b);
        g.add_term(ta);
        g.add_term(tb);
        g.add_production(s, vec![a.into(), b.into()]);
        g.add_production(s, vec![ta.into()]);
        g.add_production(a, vec![ta.into()]);
        g.add_production(b, vec![b.into(), tb.into()]);

        let out = remove_useless_symbols(&g);
        assert_eq!(out.nonterms().collect::<Vec<_>>(), vec![s]);
        assert_eq!(out.terms().collect::<Vec<_>>(), vec![ta]);
        assert_eq!(out.num_productions(), 1);
    }

    #[test]
    fn empty_language_is_not_an_error() {
        // S -> S a
        let arena = GrammarArena::default();
        let s = arena.nonterm("S");
        let ta = arena.term("a");
        let mut g = Grammar::new(s);
        g.add_term(ta);
        g.add_production(s, vec![s.into(), ta.into()]);

        let out = remove_useless_symbols(&g);
        assert!(out.is_empty_language());
        assert!(out.check().is_ok());
        assert_eq!(out.terms().count(), 0);
    }
}
