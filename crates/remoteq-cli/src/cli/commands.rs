//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Translation settings shared by every command that compiles a query.
fn with_config_args(cmd: Command) -> Command {
    cmd.arg(raw_arg())
        .arg(combine_expand_arg())
        .arg(recursion_limit_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("remoteq")
        .about("Translate expression-tree queries into OData query strings")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(translate_command())
        .subcommand(rewrite_command())
        .subcommand(check_command())
}

/// Translate a query chain into a query string.
pub fn translate_command() -> Command {
    let cmd = Command::new("translate")
        .about("Translate a query chain into a query string")
        .after_help(
            r#"EXAMPLES:
  remoteq translate query.json           # $filter=...&$top=...
  remoteq translate query.json --raw     # leave $filter unencoded
  remoteq translate query.json --params  # parameter model as JSON
  cat query.json | remoteq translate -   # read from stdin"#,
        )
        .arg(input_arg())
        .arg(params_arg())
        .arg(compact_arg());

    with_config_args(cmd)
}

/// Rewrite an expression from one entity type onto another.
pub fn rewrite_command() -> Command {
    Command::new("rewrite")
        .about("Rewrite an expression onto another entity type")
        .after_help(
            r#"EXAMPLES:
  remoteq rewrite query.json --from Customer --to Contact
  remoteq rewrite query.json --from Customer --to Contact --compact"#,
        )
        .arg(input_arg())
        .arg(from_type_arg())
        .arg(to_type_arg())
        .arg(compact_arg())
        .arg(recursion_limit_arg())
}

/// Validate that a query translates.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate that a query translates")
        .after_help(
            r#"EXAMPLES:
  remoteq check query.json    # silent on success
  remoteq check -             # read from stdin"#,
        )
        .arg(input_arg());

    with_config_args(cmd)
}
