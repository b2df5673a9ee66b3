mod cli;
mod commands;
mod logging;

use cli::{CheckParams, RewriteParams, TranslateParams, build_cli};

fn main() {
    logging::init();

    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("translate", m)) => {
            let params = TranslateParams::from_matches(m);
            commands::translate::run(params.into());
        }
        Some(("rewrite", m)) => {
            let params = RewriteParams::from_matches(m);
            commands::rewrite::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
