//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Params extraction: correct fields are extracted from ArgMatches
//! 2. Config flags map onto `TranslatorConfig`
//! 3. Required arguments are enforced

use std::path::PathBuf;

use remoteq_compiler::TranslatorConfig;

use super::*;
use crate::cli::commands::{check_command, rewrite_command, translate_command};

#[test]
fn cli_definition_is_consistent() {
    build_cli().debug_assert();
}

#[test]
fn subcommand_is_required() {
    let result = build_cli().try_get_matches_from(["remoteq"]);
    assert!(result.is_err());
}

#[test]
fn translate_defaults() {
    let m = translate_command()
        .try_get_matches_from(["translate", "query.json"])
        .unwrap();
    let params = TranslateParams::from_matches(&m);

    assert_eq!(params.input, PathBuf::from("query.json"));
    assert!(!params.params);
    assert!(!params.compact);
    assert_eq!(params.config, TranslatorConfig::default());
}

#[test]
fn translate_config_flags() {
    let m = translate_command()
        .try_get_matches_from([
            "translate",
            "-",
            "--raw",
            "--combine-expand",
            "--recursion-limit",
            "8",
        ])
        .unwrap();
    let params = TranslateParams::from_matches(&m);

    assert_eq!(params.input, PathBuf::from("-"));
    assert!(!params.config.get_encode_filter());
    assert!(params.config.get_combine_expand());
    assert_eq!(params.config.get_recursion_limit(), 8);
}

#[test]
fn translate_params_and_compact() {
    let m = translate_command()
        .try_get_matches_from(["translate", "query.json", "--params", "--compact"])
        .unwrap();
    let args: crate::commands::translate::TranslateArgs =
        TranslateParams::from_matches(&m).into();

    assert!(args.params);
    assert!(!args.pretty);
}

#[test]
fn translate_requires_input() {
    let result = translate_command().try_get_matches_from(["translate"]);
    assert!(result.is_err());
}

#[test]
fn recursion_limit_must_be_a_number() {
    let result = translate_command().try_get_matches_from([
        "translate",
        "query.json",
        "--recursion-limit",
        "deep",
    ]);
    assert!(result.is_err());
}

#[test]
fn rewrite_extracts_types() {
    let m = rewrite_command()
        .try_get_matches_from([
            "rewrite",
            "query.json",
            "--from",
            "Customer",
            "--to",
            "Contact",
            "--compact",
        ])
        .unwrap();
    let params = RewriteParams::from_matches(&m);

    assert_eq!(params.from, "Customer");
    assert_eq!(params.to, "Contact");
    assert!(params.compact);
    assert_eq!(
        params.recursion_limit,
        TranslatorConfig::DEFAULT_RECURSION_LIMIT
    );
}

#[test]
fn rewrite_requires_both_types() {
    let result =
        rewrite_command().try_get_matches_from(["rewrite", "query.json", "--from", "Customer"]);
    assert!(result.is_err());
}

#[test]
fn rewrite_rejects_translation_flags() {
    let result = rewrite_command().try_get_matches_from([
        "rewrite",
        "query.json",
        "--from",
        "Customer",
        "--to",
        "Contact",
        "--raw",
    ]);
    assert!(result.is_err());
}

#[test]
fn check_reads_stdin() {
    let m = check_command()
        .try_get_matches_from(["check", "-", "--recursion-limit", "16"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.input, PathBuf::from("-"));
    assert_eq!(params.config.get_recursion_limit(), 16);
    assert!(params.config.get_encode_filter());
}

#[test]
fn help_lists_subcommands() {
    let help = build_cli().render_help().to_string();

    assert!(help.contains("translate"));
    assert!(help.contains("rewrite"));
    assert!(help.contains("check"));
}
