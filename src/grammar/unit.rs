// Copyright (c) 2016-2021 Fabian Schuiki

//! Unit pairs and the elimination of unit productions.

use crate::context::{Grammar, Nonterm};
use std::collections::{BTreeMap, BTreeSet};

/// The reflexive-transitive closure of the unit productions of a grammar.
///
/// `(A, B)` is a unit pair if `A` derives `B` using only unit productions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitPairs<'a> {
    pairs: BTreeMap<Nonterm<'a>, BTreeSet<Nonterm<'a>>>,
}

impl<'a> UnitPairs<'a> {
    /// Compute the unit pairs of a grammar.
    pub fn compute(grammar: &Grammar<'a>) -> Self {
        let mut pairs: BTreeMap<Nonterm<'a>, BTreeSet<Nonterm<'a>>> = BTreeMap::new();
        for nt in grammar.nonterms() {
            pairs.entry(nt).or_default().insert(nt);
        }
        for p in grammar.productions() {
            if let Some(target) = p.unit_target() {
                pairs.entry(p.nt).or_default().insert(target);
            }
        }

        // Add (A, D) for every (A, B) and (B, D) until nothing changes.
        for i in 1.. {
            trace!("Unit pair iteration {}", i);
            let mut modified = false;
            let heads: Vec<_> = pairs.keys().cloned().collect();
            for a in heads {
                let reach: BTreeSet<_> = pairs[&a]
                    .iter()
                    .flat_map(|b| pairs.get(b).into_iter().flatten())
                    .cloned()
                    .collect();
                let into = pairs.entry(a).or_default();
                for d in reach {
                    modified |= into.insert(d);
                }
            }
            if !modified {
                break;
            }
        }

        UnitPairs { pairs }
    }

    pub fn contains(&self, a: Nonterm<'a>, b: Nonterm<'a>) -> bool {
        self.pairs.get(&a).map_or(false, |bs| bs.contains(&b))
    }

    /// Iterate over all pairs `(A, B)`, ordered by `A`.
    pub fn iter(&self) -> impl Iterator<Item = (Nonterm<'a>, Nonterm<'a>)> + '_ {
        self.pairs
            .iter()
            .flat_map(|(&a, bs)| bs.iter().map(move |&b| (a, b)))
    }

    pub fn len(&self) -> usize {
        self.pairs.values().map(|bs| bs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Eliminate unit productions from the grammar.
///
/// For every unit pair `(A, B)`, `A` receives a copy of each non-unit
/// production of `B`. An ε-production is only ever kept by the start symbol,
/// even if another nonterminal reaches the start symbol through unit
/// productions.
pub fn remove_unit_productions<'a>(grammar: &Grammar<'a>) -> Grammar<'a> {
    debug!("Removing unit productions");
    let pairs = UnitPairs::compute(grammar);
    debug!("{} unit pairs", pairs.len());

    let mut out = grammar.without_productions();
    for (a, b) in pairs.iter() {
        for p in grammar.productions_of(b) {
            if p.unit_target().is_some() || (p.is_epsilon() && a != grammar.start()) {
                continue;
            }
            out.add_production(a, p.syms.clone());
        }
    }
    debug!(
        "{} productions after removing unit productions",
        out.num_productions()
    );
    out
}
