// Copyright (c) 2016-2021 Fabian Schuiki

//! The conversion driver.
//!
//! The passes run in a fixed order. Removing ε-productions may introduce unit
//! productions, and both steps may strand symbols that the usefulness filter
//! then prunes. Terminals are isolated before binarization so that the latter
//! sees the final shape of every right-hand side.

use crate::binarize::binarize;
use crate::context::{Grammar, GrammarArena, Production, Symbol};
use crate::epsilon::{check_expansion_limit, remove_epsilon_productions};
use crate::errors::GrammarResult;
use crate::fresh::FreshNameAllocator;
use crate::isolate::isolate_terminals;
use crate::unit::remove_unit_productions;
use crate::useful::remove_useless_symbols;

/// Conversion options.
#[derive(Clone, Debug)]
pub struct Options {
    /// Reject productions with more nullable positions than this.
    pub max_nullable_positions: usize,
    /// Prefix of the nonterminals created during binarization.
    pub fresh_prefix: String,
    /// Prefix of the nonterminals created for isolated terminals.
    pub terminal_prefix: String,
    /// Retain a copy of the grammar after each pass.
    pub keep_stages: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            max_nullable_positions: 16,
            fresh_prefix: "X".into(),
            terminal_prefix: "T_".into(),
            keep_stages: false,
        }
    }
}

/// A pass of the conversion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Epsilon,
    Unit,
    Useless,
    Isolate,
    Binarize,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Stage::Epsilon => "eliminating ε-productions",
            Stage::Unit => "eliminating unit productions",
            Stage::Useless => "eliminating useless symbols",
            Stage::Isolate => "isolating terminals",
            Stage::Binarize => "binarizing productions",
        };
        write!(f, "{}", s)
    }
}

/// The outcome of a conversion.
pub struct Conversion<'a> {
    /// The grammar in Chomsky Normal Form.
    pub grammar: Grammar<'a>,
    /// The grammar after each pass, if requested in the options.
    pub stages: Vec<(Stage, Grammar<'a>)>,
}

/// Convert a grammar to Chomsky Normal Form.
///
/// The grammar is validated before any pass runs. Names created during the
/// conversion are allocated in `arena`.
pub fn convert<'a>(
    arena: &'a GrammarArena,
    grammar: &Grammar<'a>,
    opts: &Options,
) -> GrammarResult<Conversion<'a>> {
    grammar.check()?;
    check_expansion_limit(grammar, opts.max_nullable_positions)?;
    info!(
        "Converting grammar with {} productions, {} nonterminals, {} terminals",
        grammar.num_productions(),
        grammar.nonterms().count(),
        grammar.terms().count(),
    );

    let mut alloc = FreshNameAllocator::new(arena, opts.fresh_prefix.clone());
    let mut stages = vec![];
    let mut keep = |stage: Stage, g: &Grammar<'a>| {
        trace!("After {}:\n{}", stage, g);
        if opts.keep_stages {
            stages.push((stage, g.clone()));
        }
    };

    let g = remove_epsilon_productions(grammar)?;
    keep(Stage::Epsilon, &g);
    let g = remove_unit_productions(&g);
    keep(Stage::Unit, &g);
    let g = remove_useless_symbols(&g);
    keep(Stage::Useless, &g);
    let g = isolate_terminals(&g, &mut alloc, &opts.terminal_prefix);
    keep(Stage::Isolate, &g);
    let g = binarize(&g, &mut alloc);
    keep(Stage::Binarize, &g);

    debug_assert_eq!(check_cnf(&g), Ok(()));
    info!(
        "Grammar has {} productions, {} nonterminals, {} terminals",
        g.num_productions(),
        g.nonterms().count(),
        g.terms().count(),
    );
    Ok(Conversion { grammar: g, stages })
}

/// Convert a grammar to Chomsky Normal Form with default options.
pub fn to_cnf<'a>(
    arena: &'a GrammarArena,
    grammar: &Grammar<'a>,
) -> GrammarResult<Grammar<'a>> {
    convert(arena, grammar, &Options::default()).map(|c| c.grammar)
}

/// Check that a grammar is in Chomsky Normal Form.
///
/// Every production must be `A -> B C` with two nonterminals or `A -> a` with
/// a terminal. Only the start symbol may have an ε-production. Returns the
/// first production violating this.
pub fn check_cnf<'a>(grammar: &Grammar<'a>) -> Result<(), Production<'a>> {
    for p in grammar.productions() {
        let ok = match p.syms.as_slice() {
            [] => p.nt == grammar.start(),
            [Symbol::Term(_)] => true,
            [Symbol::Nonterm(_), Symbol::Nonterm(_)] => true,
            _ => false,
        };
        if !ok {
            return Err(p.clone());
        }
    }
    Ok(())
}
