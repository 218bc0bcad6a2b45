// Copyright (c) 2016-2021 Fabian Schuiki

//! Nullable nonterminals and the elimination of ε-productions.

use crate::context::{Grammar, Nonterm, Production, Symbol};
use crate::errors::{GrammarError, GrammarResult};
use itertools::Itertools;
use std::collections::BTreeSet;

/// The most nullable positions a single right-hand side may have. A
/// production with `n` nullable positions expands into up to `2^n` variants.
pub const MAX_NULLABLE_POSITIONS: usize = 20;

/// Compute the nonterminals that can derive the empty string.
pub fn nullable_set<'a>(grammar: &Grammar<'a>) -> BTreeSet<Nonterm<'a>> {
    nullable_passes(grammar).pop().unwrap_or_default()
}

/// Compute the nullable set, recording the set after every pass.
///
/// The first entry holds the nonterminals with an explicit ε-production, the
/// last entry is the fixpoint. Each entry is a superset of its predecessor.
pub fn nullable_passes<'a>(grammar: &Grammar<'a>) -> Vec<BTreeSet<Nonterm<'a>>> {
    let mut nullable: BTreeSet<_> = grammar
        .productions()
        .filter(|p| p.is_epsilon())
        .map(|p| p.nt)
        .collect();
    let mut passes = vec![nullable.clone()];

    // Keep iterating until the set converges.
    for i in 1.. {
        trace!("Nullable set iteration {}", i);
        let mut modified = false;
        for p in grammar.productions() {
            if nullable.contains(&p.nt) {
                continue;
            }
            if p.syms.iter().all(|&sym| is_nullable(&nullable, sym)) {
                nullable.insert(p.nt);
                modified = true;
            }
        }
        if !modified {
            break;
        }
        passes.push(nullable.clone());
    }
    passes
}

fn is_nullable<'a>(nullable: &BTreeSet<Nonterm<'a>>, sym: Symbol<'a>) -> bool {
    match sym {
        Symbol::Term(_) => false,
        Symbol::Nonterm(nt) => nullable.contains(&nt),
    }
}

/// Positions in a production's right-hand side that hold nullable symbols.
fn nullable_positions<'a>(
    nullable: &BTreeSet<Nonterm<'a>>,
    prod: &Production<'a>,
) -> Vec<usize> {
    prod.syms
        .iter()
        .enumerate()
        .filter(|&(_, &sym)| is_nullable(nullable, sym))
        .map(|(i, _)| i)
        .collect()
}

/// Ensure that no production would expand into more than `2^limit` variants.
///
/// `limit` is clamped to `MAX_NULLABLE_POSITIONS`.
pub fn check_expansion_limit(grammar: &Grammar, limit: usize) -> GrammarResult<()> {
    let nullable = nullable_set(grammar);
    for p in grammar.productions() {
        within_limit(p, nullable_positions(&nullable, p).len(), limit)?;
    }
    Ok(())
}

fn within_limit(prod: &Production, positions: usize, limit: usize) -> GrammarResult<()> {
    let limit = limit.min(MAX_NULLABLE_POSITIONS);
    if positions > limit {
        return Err(GrammarError::ExpansionLimit {
            lhs: prod.nt.name().to_string(),
            positions,
            limit,
        });
    }
    Ok(())
}

/// Eliminate ε-productions from the grammar.
///
/// Every production is replaced by all variants that omit some subset of its
/// nullable symbols, except the empty one. If the start symbol is nullable it
/// keeps a single ε-production; no other nonterminal does.
///
/// Fails with `GrammarError::ExpansionLimit` if a production has more than
/// `MAX_NULLABLE_POSITIONS` nullable positions.
pub fn remove_epsilon_productions<'a>(grammar: &Grammar<'a>) -> GrammarResult<Grammar<'a>> {
    debug!("Removing ε-productions");
    let nullable = nullable_set(grammar);
    debug!("Nullable nonterminals: {{{}}}", nullable.iter().format(", "));

    let mut out = grammar.without_productions();
    for p in grammar.productions() {
        if p.is_epsilon() {
            continue;
        }
        let positions = nullable_positions(&nullable, p);
        within_limit(p, positions.len(), MAX_NULLABLE_POSITIONS)?;

        // Bit `i` of the mask set means the symbol at `positions[i]` is
        // dropped from the variant.
        for mask in 0..(1u64 << positions.len()) {
            let mut dropped = positions
                .iter()
                .enumerate()
                .filter(|&(bit, _)| mask & (1u64 << bit) != 0)
                .map(|(_, &pos)| pos)
                .peekable();
            let mut syms = Vec::with_capacity(p.syms.len());
            for (i, &sym) in p.syms.iter().enumerate() {
                if dropped.peek() == Some(&i) {
                    dropped.next();
                } else {
                    syms.push(sym);
                }
            }
            if !syms.is_empty() {
                out.add_production(p.nt, syms);
            }
        }
    }

    if nullable.contains(&grammar.start()) {
        out.add_production(grammar.start(), vec![]);
    }
    debug!(
        "{} productions after removing ε-productions",
        out.num_productions()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::GrammarArena;

    #[test]
    fn nullable_through_chain() {
        // S -> A B, A -> ε, B -> A A | b
        let arena = GrammarArena::default();
        let (s, a, b) = (arena.nonterm("S"), arena.nonterm("A"), arena.nonterm("B"));
        let tb = arena.term("b");
        let mut g = Grammar::new(s);
        g.add_nonterm(a);
        g.add_nonterm(b);
        g.add_term(tb);
        g.add_production(s, vec![a.into(), b.into()]);
        g.add_production(a, vec![]);
        g.add_production(b, vec![a.into(), a.into()]);
        g.add_production(b, vec![tb.into()]);

        let passes = nullable_passes(&g);
        let first: BTreeSet<_> = vec![a].into_iter().collect();
        let last: BTreeSet<_> = vec![s, a, b].into_iter().collect();
        assert_eq!(passes[0], first);
        assert_eq!(passes.last(), Some(&last));
        assert!(passes.len() <= 3);
    }

    #[test]
    fn start_keeps_single_epsilon() {
        // S -> A, A -> a | ε
        let arena = GrammarArena::default();
        let (s, a) = (arena.nonterm("S"), arena.nonterm("A"));
        let ta = arena.term("a");
        let mut g = Grammar::new(s);
        g.add_nonterm(a);
        g.add_term(ta);
        g.add_production(s, vec![a.into()]);
        g.add_production(a, vec![ta.into()]);
        g.add_production(a, vec![]);

        let out = remove_epsilon_productions(&g).unwrap();
        let eps: Vec<_> = out.productions().filter(|p| p.is_epsilon()).collect();
        assert_eq!(eps.len(), 1);
        assert_eq!(eps[0].nt, s);
        assert_eq!(out.productions_of(a).count(), 1);
    }

    #[test]
    fn expansion_limit() {
        let arena = GrammarArena::default();
        let (s, a) = (arena.nonterm("S"), arena.nonterm("A"));
        let mut g = Grammar::new(s);
        g.add_nonterm(a);
        g.add_production(a, vec![]);
        g.add_production(s, vec![a.into(); 5]);
        assert!(check_expansion_limit(&g, 5).is_ok());
        assert_eq!(
            check_expansion_limit(&g, 4),
            Err(GrammarError::ExpansionLimit {
                lhs: "S".into(),
                positions: 5,
                limit: 4
            })
        );
    }

    #[test]
    fn elimination_refuses_oversized_expansion() {
        // S -> A^(MAX + 1) | a, A -> ε
        let arena = GrammarArena::default();
        let (s, a) = (arena.nonterm("S"), arena.nonterm("A"));
        let ta = arena.term("a");
        let mut g = Grammar::new(s);
        g.add_nonterm(a);
        g.add_term(ta);
        g.add_production(a, vec![]);
        g.add_production(s, vec![ta.into()]);
        g.add_production(s, vec![a.into(); MAX_NULLABLE_POSITIONS + 1]);
        assert_eq!(
            remove_epsilon_productions(&g),
            Err(GrammarError::ExpansionLimit {
                lhs: "S".into(),
                positions: MAX_NULLABLE_POSITIONS + 1,
                limit: MAX_NULLABLE_POSITIONS
            })
        );
        assert_eq!(
            check_expansion_limit(&g, 64),
            Err(GrammarError::ExpansionLimit {
                lhs: "S".into(),
                positions: MAX_NULLABLE_POSITIONS + 1,
                limit: MAX_NULLABLE_POSITIONS
            })
        );

        let mut small = Grammar::new(s);
        small.add_nonterm(a);
        small.add_term(ta);
        small.add_production(a, vec![]);
        small.add_production(s, vec![a.into(); 3]);
        let out = remove_epsilon_productions(&small).unwrap();
        assert_eq!(out.productions_of(s).filter(|p| !p.is_epsilon()).count(), 3);
    }
}
