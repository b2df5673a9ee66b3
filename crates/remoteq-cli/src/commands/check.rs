use std::path::PathBuf;

use remoteq_compiler::{QueryTranslator, TranslatorConfig};

use super::input::{QueryDocument, load_document};
use super::{CommandError, exit_with};

pub struct CheckArgs {
    pub input: PathBuf,
    pub config: TranslatorConfig,
}

pub fn run(args: CheckArgs) {
    if let Err(err) = load_document(&args.input).and_then(|doc| validate(&doc, &args)) {
        exit_with(err);
    }

    // Silent on success (like cargo check)
}

pub fn validate(doc: &QueryDocument, args: &CheckArgs) -> Result<(), CommandError> {
    QueryTranslator::with_config(args.config.clone()).translate(&doc.query)?;
    Ok(())
}
