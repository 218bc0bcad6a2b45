// Copyright (c) 2016-2021 Fabian Schuiki

//! Allocation of fresh nonterminal names.

use crate::context::{Grammar, GrammarArena, Nonterm};

/// Mints nonterminals whose names do not collide with any symbol of a grammar.
///
/// An allocator lives for exactly one conversion. Its counter only ever
/// increases, so two conversions of the same grammar with their own
/// allocators produce identical names.
pub struct FreshNameAllocator<'a> {
    arena: &'a GrammarArena,
    prefix: String,
    next: usize,
}

impl<'a> FreshNameAllocator<'a> {
    pub fn new(arena: &'a GrammarArena, prefix: impl Into<String>) -> Self {
        FreshNameAllocator {
            arena,
            prefix: prefix.into(),
            next: 0,
        }
    }

    /// Allocate a nonterminal named `<prefix><n>` that is not yet present in
    /// `grammar`, and declare it there.
    pub fn fresh(&mut self, grammar: &mut Grammar<'a>) -> Nonterm<'a> {
        loop {
            let name = format!("{}{}", self.prefix, self.next);
            self.next += 1;
            if !grammar.contains_name(&name) {
                return self.declare(grammar, &name);
            }
        }
    }

    /// Allocate a nonterminal named `base` if that name is free in `grammar`,
    /// or `base` with a numeric suffix otherwise, and declare it there.
    pub fn fresh_named(&mut self, grammar: &mut Grammar<'a>, base: &str) -> Nonterm<'a> {
        if !grammar.contains_name(base) {
            return self.declare(grammar, base);
        }
        loop {
            let name = format!("{}{}", base, self.next);
            self.next += 1;
            if !grammar.contains_name(&name) {
                return self.declare(grammar, &name);
            }
        }
    }

    fn declare(&self, grammar: &mut Grammar<'a>, name: &str) -> Nonterm<'a> {
        let nt = self.arena.nonterm(name);
        trace!("Allocated fresh nonterminal {}", nt);
        grammar.add_nonterm(nt);
        nt
    }
}
