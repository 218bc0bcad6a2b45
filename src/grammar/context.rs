// Copyright (c) 2016-2021 Fabian Schuiki

//! The grammar model shared by all conversion passes.

use crate::errors::{GrammarError, GrammarResult};
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};
use typed_arena::Arena;

/// Storage for the names of terminals and nonterminals.
///
/// Grammars only hold references into this arena, which keeps symbols `Copy`
/// and lets every pass hand out new grammar values cheaply. Names allocated
/// during a conversion (see `FreshNameAllocator`) land here as well.
#[derive(Default)]
pub struct GrammarArena {
    names: Arena<u8>,
}

impl GrammarArena {
    /// Allocate a name.
    pub fn alloc_name(&self, name: &str) -> &str {
        self.names.alloc_str(name)
    }

    /// Allocate a terminal.
    pub fn term(&self, name: &str) -> Term<'_> {
        Term(self.alloc_name(name))
    }

    /// Allocate a nonterminal.
    pub fn nonterm(&self, name: &str) -> Nonterm<'_> {
        Nonterm(self.alloc_name(name))
    }
}

/// A terminal.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term<'a>(&'a str);

impl<'a> Term<'a> {
    pub fn name(self) -> &'a str {
        self.0
    }
}

impl std::fmt::Display for Term<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for Term<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// A nonterminal.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Nonterm<'a>(&'a str);

impl<'a> Nonterm<'a> {
    pub fn name(self) -> &'a str {
        self.0
    }
}

impl std::fmt::Display for Nonterm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for Nonterm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// A symbol in a production.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol<'a> {
    Term(Term<'a>),
    Nonterm(Nonterm<'a>),
}

impl<'a> Symbol<'a> {
    pub fn name(self) -> &'a str {
        match self {
            Symbol::Term(t) => t.name(),
            Symbol::Nonterm(nt) => nt.name(),
        }
    }

    pub fn is_term(self) -> bool {
        match self {
            Symbol::Term(_) => true,
            Symbol::Nonterm(_) => false,
        }
    }

    pub fn as_term(self) -> Option<Term<'a>> {
        match self {
            Symbol::Term(t) => Some(t),
            Symbol::Nonterm(_) => None,
        }
    }

    pub fn as_nonterm(self) -> Option<Nonterm<'a>> {
        match self {
            Symbol::Term(_) => None,
            Symbol::Nonterm(nt) => Some(nt),
        }
    }
}

impl<'a> From<Term<'a>> for Symbol<'a> {
    fn from(x: Term<'a>) -> Self {
        Symbol::Term(x)
    }
}

impl<'a> From<Nonterm<'a>> for Symbol<'a> {
    fn from(x: Nonterm<'a>) -> Self {
        Symbol::Nonterm(x)
    }
}

impl std::fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::fmt::Debug for Symbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// A formatter for symbol sequences.
pub struct SymbolsFormatter<'a>(&'a [Symbol<'a>]);

impl std::fmt::Display for SymbolsFormatter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.0.is_empty() {
            write!(f, "ε")
        } else {
            write!(f, "{}", self.0.iter().format(" "))
        }
    }
}

impl std::fmt::Debug for SymbolsFormatter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

pub fn format_symbols<'a>(syms: &'a [Symbol<'a>]) -> SymbolsFormatter<'a> {
    SymbolsFormatter(syms)
}

/// A production in the grammar.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Production<'a> {
    pub nt: Nonterm<'a>,
    pub syms: Vec<Symbol<'a>>,
}

impl<'a> Production<'a> {
    pub fn is_epsilon(&self) -> bool {
        self.syms.is_empty()
    }

    /// The target of a unit production `A -> B`, if this is one.
    pub fn unit_target(&self) -> Option<Nonterm<'a>> {
        match self.syms.as_slice() {
            [Symbol::Nonterm(nt)] => Some(*nt),
            _ => None,
        }
    }
}

impl std::fmt::Display for Production<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} -> {}", self.nt, format_symbols(&self.syms))
    }
}

impl std::fmt::Debug for Production<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// A context-free grammar.
///
/// Every pass consumes a grammar by reference and builds a new one. Adding a
/// production that already exists is a no-op.
#[derive(Clone, PartialEq, Eq)]
pub struct Grammar<'a> {
    nonterms: BTreeSet<Nonterm<'a>>,
    terms: BTreeSet<Term<'a>>,
    prods: BTreeMap<Nonterm<'a>, BTreeSet<Production<'a>>>,
    start: Nonterm<'a>,
}

impl<'a> Grammar<'a> {
    /// Create an empty grammar with the given start symbol.
    pub fn new(start: Nonterm<'a>) -> Self {
        let mut nonterms = BTreeSet::new();
        nonterms.insert(start);
        Grammar {
            nonterms,
            terms: Default::default(),
            prods: Default::default(),
            start,
        }
    }

    /// Create a grammar with the same symbols and start as `self`, but without
    /// any productions.
    pub fn without_productions(&self) -> Self {
        Grammar {
            nonterms: self.nonterms.clone(),
            terms: self.terms.clone(),
            prods: Default::default(),
            start: self.start,
        }
    }

    pub fn start(&self) -> Nonterm<'a> {
        self.start
    }

    /// Obtain an iterator over all terminals.
    pub fn terms(&self) -> impl Iterator<Item = Term<'a>> + '_ {
        self.terms.iter().cloned()
    }

    /// Obtain an iterator over all nonterminals.
    pub fn nonterms(&self) -> impl Iterator<Item = Nonterm<'a>> + '_ {
        self.nonterms.iter().cloned()
    }

    pub fn is_term(&self, t: Term<'a>) -> bool {
        self.terms.contains(&t)
    }

    pub fn is_nonterm(&self, nt: Nonterm<'a>) -> bool {
        self.nonterms.contains(&nt)
    }

    /// Check whether a name is already used by any symbol of the grammar.
    pub fn contains_name(&self, name: &str) -> bool {
        self.terms.iter().any(|t| t.name() == name)
            || self.nonterms.iter().any(|nt| nt.name() == name)
    }

    pub fn add_term(&mut self, t: Term<'a>) {
        self.terms.insert(t);
    }

    pub fn add_nonterm(&mut self, nt: Nonterm<'a>) {
        self.nonterms.insert(nt);
    }

    /// Add a production. Returns false if it was already present.
    pub fn add_production(&mut self, nt: Nonterm<'a>, syms: Vec<Symbol<'a>>) -> bool {
        debug_assert!(self.is_nonterm(nt), "{} is not a nonterminal", nt);
        self.prods
            .entry(nt)
            .or_default()
            .insert(Production { nt, syms })
    }

    /// Obtain an iterator over the productions of a nonterminal.
    pub fn productions_of(
        &self,
        nt: Nonterm<'a>,
    ) -> impl Iterator<Item = &Production<'a>> + '_ {
        self.prods.get(&nt).into_iter().flatten()
    }

    /// Obtain an iterator over all productions, ordered by nonterminal.
    pub fn productions(&self) -> impl Iterator<Item = &Production<'a>> + '_ {
        self.prods.values().flatten()
    }

    pub fn num_productions(&self) -> usize {
        self.prods.values().map(|ps| ps.len()).sum()
    }

    /// Check whether the grammar derives no string at all.
    ///
    /// This is the normal outcome of filtering a grammar whose start symbol
    /// cannot generate anything.
    pub fn is_empty_language(&self) -> bool {
        self.productions_of(self.start).next().is_none()
    }

    /// Verify the structural invariants of the grammar.
    pub fn check(&self) -> GrammarResult<()> {
        if !self.is_nonterm(self.start) {
            return Err(GrammarError::UndeclaredStart(self.start.name().to_string()));
        }
        for t in &self.terms {
            if t.name().is_empty() {
                return Err(GrammarError::EmptyName);
            }
            if self.nonterms.iter().any(|nt| nt.name() == t.name()) {
                return Err(GrammarError::AmbiguousSymbol(t.name().to_string()));
            }
        }
        if self.nonterms.iter().any(|nt| nt.name().is_empty()) {
            return Err(GrammarError::EmptyName);
        }
        for p in self.productions() {
            if !self.is_nonterm(p.nt) {
                return Err(GrammarError::UndeclaredNonterm(p.nt.name().to_string()));
            }
            for &sym in &p.syms {
                let declared = match sym {
                    Symbol::Term(t) => self.is_term(t),
                    Symbol::Nonterm(nt) => self.is_nonterm(nt),
                };
                if !declared {
                    return Err(GrammarError::UndeclaredSymbol {
                        lhs: p.nt.name().to_string(),
                        symbol: sym.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Grammar<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "Non-terminals: {}", self.nonterms.iter().format(", "))?;
        writeln!(f, "Terminals: {}", self.terms.iter().format(", "))?;
        writeln!(f, "Start symbol: {}", self.start)?;
        writeln!(f, "Productions:")?;
        for (nt, ps) in &self.prods {
            if ps.is_empty() {
                continue;
            }
            writeln!(
                f,
                "  {} -> {}",
                nt,
                ps.iter().map(|p| format_symbols(&p.syms)).format(" | ")
            )?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Grammar<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_is_idempotent() {
        let arena = GrammarArena::default();
        let s = arena.nonterm("S");
        let a = arena.term("a");
        let mut g = Grammar::new(s);
        g.add_term(a);
        assert!(g.add_production(s, vec![a.into()]));
        assert!(!g.add_production(s, vec![arena.term("a").into()]));
        assert_eq!(g.num_productions(), 1);
    }

    #[test]
    fn rendering_is_sorted() {
        let arena = GrammarArena::default();
        let s = arena.nonterm("S");
        let b = arena.nonterm("B");
        let x = arena.term("x");
        let mut g = Grammar::new(s);
        g.add_nonterm(b);
        g.add_term(x);
        g.add_production(s, vec![b.into(), x.into()]);
        g.add_production(s, vec![]);
        g.add_production(b, vec![x.into()]);
        assert_eq!(
            g.to_string(),
            "Non-terminals: B, S\n\
             Terminals: x\n\
             Start symbol: S\n\
             Productions:\n  \
             B -> x\n  \
             S -> ε | B x\n"
        );
    }

    #[test]
    fn check_rejects_undeclared_symbols() {
        let arena = GrammarArena::default();
        let s = arena.nonterm("S");
        let mut g = Grammar::new(s);
        g.add_production(s, vec![arena.term("a").into()]);
        assert_eq!(
            g.check(),
            Err(GrammarError::UndeclaredSymbol {
                lhs: "S".into(),
                symbol: "a".into()
            })
        );
    }
}
