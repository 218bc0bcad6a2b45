// Copyright (c) 2016-2021 Fabian Schuiki

//! Converts a context-free grammar into Chomsky Normal Form.

#[macro_use]
extern crate log;

use anyhow::{anyhow, Context as _, Result};
use chomsky::{parser, pipeline, populate, GrammarArena, Options};
use clap::{App, Arg};
use log::LevelFilter;

fn main() -> Result<()> {
    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Converts a context-free grammar into Chomsky Normal Form.")
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Increase message verbosity"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .help("Silence all log messages"),
        )
        .arg(
            Arg::with_name("dump-stages")
                .short("d")
                .long("dump-stages")
                .help("Print the grammar after every conversion pass"),
        )
        .arg(
            Arg::with_name("max-nullable")
                .long("max-nullable")
                .value_name("N")
                .help("Reject productions with more than N nullable symbols")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            Arg::with_name("fresh-prefix")
                .long("fresh-prefix")
                .value_name("PREFIX")
                .help("Prefix of nonterminals created during binarization")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            Arg::with_name("terminal-prefix")
                .long("terminal-prefix")
                .value_name("PREFIX")
                .help("Prefix of nonterminals created for isolated terminals")
                .takes_value(true)
                .number_of_values(1),
        )
        .arg(
            Arg::with_name("GRAMMAR")
                .help("The grammar description to convert")
                .required(true)
                .index(1),
        )
        .get_matches();

    // Configure the logger.
    let level = if matches.is_present("quiet") {
        LevelFilter::Off
    } else {
        match matches.occurrences_of("verbosity") {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    // Assemble the conversion options.
    let mut opts = Options::default();
    opts.keep_stages = matches.is_present("dump-stages");
    if let Some(n) = matches.value_of("max-nullable") {
        opts.max_nullable_positions = n
            .parse()
            .map_err(|_| anyhow!("invalid value `{}` for --max-nullable", n))?;
    }
    if let Some(prefix) = matches.value_of("fresh-prefix") {
        opts.fresh_prefix = prefix.to_string();
    }
    if let Some(prefix) = matches.value_of("terminal-prefix") {
        opts.terminal_prefix = prefix.to_string();
    }

    // Read and validate the grammar.
    let path = matches
        .value_of("GRAMMAR")
        .ok_or_else(|| anyhow!("no grammar given"))?;
    let input =
        std::fs::read_to_string(path).with_context(|| format!("cannot read `{}`", path))?;
    let spec = parser::parse_grammar(&input).with_context(|| format!("in `{}`", path))?;
    let arena = GrammarArena::default();
    let grammar = populate::build(&arena, &spec).with_context(|| format!("in `{}`", path))?;
    info!("Read grammar from `{}`", path);

    let conv = pipeline::convert(&arena, &grammar, &opts)?;
    if opts.keep_stages {
        println!("Original grammar:\n{}", grammar);
        for (stage, g) in &conv.stages {
            println!("After {}:\n{}", stage, g);
        }
    }
    if conv.grammar.is_empty_language() {
        warn!("The grammar generates the empty language");
    }
    println!("Grammar in Chomsky Normal Form:\n{}", conv.grammar);
    Ok(())
}
