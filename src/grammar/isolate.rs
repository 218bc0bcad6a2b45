// Copyright (c) 2016-2021 Fabian Schuiki

//! Isolation of terminals into dedicated nonterminals.

use crate::context::{Grammar, Nonterm, Symbol, Term};
use crate::fresh::FreshNameAllocator;
use std::collections::BTreeMap;

/// Replace every terminal inside a right-hand side of two or more symbols by
/// a nonterminal that derives exactly that terminal.
///
/// One such nonterminal, named `<prefix><terminal>` where possible, is created
/// per distinct terminal. Productions of the form `A -> a` are kept as they
/// are.
pub fn isolate_terminals<'a>(
    grammar: &Grammar<'a>,
    alloc: &mut FreshNameAllocator<'a>,
    prefix: &str,
) -> Grammar<'a> {
    debug!("Isolating terminals");
    let mut out = grammar.without_productions();
    let mut isolated = BTreeMap::<Term<'a>, Nonterm<'a>>::new();

    for p in grammar.productions() {
        if p.syms.len() < 2 {
            out.add_production(p.nt, p.syms.clone());
            continue;
        }
        let mut syms = Vec::with_capacity(p.syms.len());
        for &sym in &p.syms {
            let t = match sym {
                Symbol::Term(t) => t,
                Symbol::Nonterm(_) => {
                    syms.push(sym);
                    continue;
                }
            };
            let nt = match isolated.get(&t) {
                Some(&nt) => nt,
                None => {
                    let nt = alloc.fresh_named(&mut out, &format!("{}{}", prefix, t));
                    trace!("Isolating {} as {}", t, nt);
                    isolated.insert(t, nt);
                    nt
                }
            };
            syms.push(nt.into());
        }
        out.add_production(p.nt, syms);
    }

    for (&t, &nt) in &isolated {
        out.add_production(nt, vec![t.into()]);
    }
    debug!("Isolated {} terminals", isolated.len());
    out
}
