// Copyright (c) 2016-2021 Fabian Schuiki

//! Splitting of long right-hand sides into pairs.

use crate::context::Grammar;
use crate::fresh::FreshNameAllocator;

/// Replace every production with more than two symbols by a chain of
/// productions with exactly two.
///
/// The two rightmost symbols are repeatedly folded into a fresh nonterminal,
/// so `A -> B C D` becomes `A -> B X0` and `X0 -> C D`. Each fresh
/// nonterminal is used by exactly one production.
pub fn binarize<'a>(grammar: &Grammar<'a>, alloc: &mut FreshNameAllocator<'a>) -> Grammar<'a> {
    debug!("Binarizing productions");
    let mut out = grammar.without_productions();
    let mut created = 0;
    for p in grammar.productions() {
        let mut syms = p.syms.clone();
        while syms.len() > 2 {
            let tail = syms.split_off(syms.len() - 2);
            let nt = alloc.fresh(&mut out);
            out.add_production(nt, tail);
            syms.push(nt.into());
            created += 1;
        }
        out.add_production(p.nt, syms);
    }
    debug!("Created {} nonterminals while binarizing", created);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{GrammarArena, Symbol};

    #[test]
    fn splits_from_the_right() {
        // S -> A A A A, A -> a
        let arena = GrammarArena::default();
        let (s, a) = (arena.nonterm("S"), arena.nonterm("A"));
        let ta = arena.term("a");
        let mut g = Grammar::new(s);
        g.add_nonterm(a);
        g.add_term(ta);
        g.add_production(s, vec![a.into(); 4]);
        g.add_production(a, vec![ta.into()]);

        let mut alloc = FreshNameAllocator::new(&arena, "X");
        let out = binarize(&g, &mut alloc);
        let (x0, x1) = (arena.nonterm("X0"), arena.nonterm("X1"));
        let rhs = |nt| out.productions_of(nt).map(|p| p.syms.clone()).collect::<Vec<_>>();
        assert_eq!(rhs(s), vec![vec![Symbol::from(a), x1.into()]]);
        assert_eq!(rhs(x1), vec![vec![Symbol::from(a), x0.into()]]);
        assert_eq!(rhs(x0), vec![vec![Symbol::from(a), a.into()]]);
        assert!(out.productions().all(|p| p.syms.len() <= 2));
    }
}
