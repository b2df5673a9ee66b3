use std::path::PathBuf;

use remoteq_compiler::{QueryTranslator, TranslatorConfig};
use tracing::debug;

use super::input::{QueryDocument, load_document};
use super::{CommandError, exit_with};

pub struct TranslateArgs {
    pub input: PathBuf,
    pub params: bool,
    pub pretty: bool,
    pub config: TranslatorConfig,
}

pub fn run(args: TranslateArgs) {
    let output = load_document(&args.input).and_then(|doc| render(&doc, &args));
    match output {
        Ok(text) => println!("{}", text),
        Err(err) => exit_with(err),
    }
}

/// Query string, or the parameter model as JSON when `--params` is set.
pub fn render(doc: &QueryDocument, args: &TranslateArgs) -> Result<String, CommandError> {
    let translator = QueryTranslator::with_config(args.config.clone());
    let param = translator.translate(&doc.query)?;
    debug!(executor = %param.executor, "translated query");

    if !args.params {
        return Ok(translator.query_string(&param));
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(&param)?
    } else {
        serde_json::to_string(&param)?
    };
    Ok(json)
}
