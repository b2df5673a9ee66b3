use std::path::PathBuf;

use remoteq_compiler::TranslatorConfig;

use super::check::{CheckArgs, validate};
use super::test_fixtures::{adults, adults_ending_in};

fn args(config: TranslatorConfig) -> CheckArgs {
    CheckArgs {
        input: PathBuf::from("-"),
        config,
    }
}

#[test]
fn valid_query_passes() {
    assert!(validate(&adults(), &args(TranslatorConfig::default())).is_ok());
}

#[test]
fn last_is_rejected() {
    let err = validate(
        &adults_ending_in("Last"),
        &args(TranslatorConfig::default()),
    )
    .unwrap_err();

    insta::assert_snapshot!(err, @"query operator `Last` is not supported: reverse the order with OrderByDescending(), then use First() or FirstOrDefault()");
}

#[test]
fn unknown_operator_is_rejected() {
    let err = validate(
        &adults_ending_in("Reverse"),
        &args(TranslatorConfig::default()),
    )
    .unwrap_err();

    insta::assert_snapshot!(err, @"query operator `Reverse` is not supported: unrecognized query operator");
}

#[test]
fn recursion_limit_applies() {
    let err = validate(&adults(), &args(TranslatorConfig::new().recursion_limit(1))).unwrap_err();

    insta::assert_snapshot!(err, @"recursion limit exceeded");
}
