//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap;
//! `Into<*Args>` bridges dispatch to the command handlers.

use std::path::PathBuf;

use clap::ArgMatches;
use remoteq_compiler::TranslatorConfig;

use crate::commands::check::CheckArgs;
use crate::commands::rewrite::RewriteArgs;
use crate::commands::translate::TranslateArgs;

pub struct TranslateParams {
    pub input: PathBuf,
    pub params: bool,
    pub compact: bool,
    pub config: TranslatorConfig,
}

impl TranslateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: parse_input(m),
            params: m.get_flag("params"),
            compact: m.get_flag("compact"),
            config: parse_config(m),
        }
    }
}

impl From<TranslateParams> for TranslateArgs {
    fn from(p: TranslateParams) -> Self {
        Self {
            input: p.input,
            params: p.params,
            pretty: !p.compact,
            config: p.config,
        }
    }
}

pub struct RewriteParams {
    pub input: PathBuf,
    pub from: String,
    pub to: String,
    pub compact: bool,
    pub recursion_limit: usize,
}

impl RewriteParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: parse_input(m),
            from: m.get_one::<String>("from").cloned().unwrap_or_default(),
            to: m.get_one::<String>("to").cloned().unwrap_or_default(),
            compact: m.get_flag("compact"),
            recursion_limit: parse_recursion_limit(m),
        }
    }
}

impl From<RewriteParams> for RewriteArgs {
    fn from(p: RewriteParams) -> Self {
        Self {
            input: p.input,
            from: p.from,
            to: p.to,
            pretty: !p.compact,
            recursion_limit: p.recursion_limit,
        }
    }
}

pub struct CheckParams {
    pub input: PathBuf,
    pub config: TranslatorConfig,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: parse_input(m),
            config: parse_config(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.input,
            config: p.config,
        }
    }
}

fn parse_input(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("input")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_recursion_limit(m: &ArgMatches) -> usize {
    m.get_one::<usize>("recursion_limit")
        .copied()
        .unwrap_or(TranslatorConfig::DEFAULT_RECURSION_LIMIT)
}

fn parse_config(m: &ArgMatches) -> TranslatorConfig {
    TranslatorConfig::new()
        .encode_filter(!m.get_flag("raw"))
        .combine_expand(m.get_flag("combine_expand"))
        .recursion_limit(parse_recursion_limit(m))
}
