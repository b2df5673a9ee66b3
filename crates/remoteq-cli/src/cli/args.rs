//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Query document (positional). `-` reads stdin.
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("JSON document with `schema` and `query`, or `-` for stdin")
}

/// Print the parameter model instead of the query string (--params).
pub fn params_arg() -> Arg {
    Arg::new("params")
        .long("params")
        .action(ArgAction::SetTrue)
        .help("Print the query parameters as JSON")
}

/// Leave `$filter` unencoded (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Do not percent-encode the $filter value")
}

/// Combine repeated expands instead of replacing (--combine-expand).
pub fn combine_expand_arg() -> Arg {
    Arg::new("combine_expand")
        .long("combine-expand")
        .action(ArgAction::SetTrue)
        .help("Join repeated Expand paths with ',' instead of keeping the last")
}

/// Traversal depth limit (--recursion-limit).
pub fn recursion_limit_arg() -> Arg {
    Arg::new("recursion_limit")
        .long("recursion-limit")
        .value_name("DEPTH")
        .value_parser(value_parser!(usize))
        .help("Maximum expression nesting depth [default: 256]")
}

/// Entity type the expression is written against (--from).
pub fn from_type_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .value_name("TYPE")
        .required(true)
        .help("Entity type the expression is written against")
}

/// Entity type to rewrite onto (--to).
pub fn to_type_arg() -> Arg {
    Arg::new("to")
        .long("to")
        .value_name("TYPE")
        .required(true)
        .help("Entity type to rewrite onto")
}

/// Single-line JSON output (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}
