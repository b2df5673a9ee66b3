use std::path::PathBuf;

use remoteq_compiler::Rewriter;
use remoteq_core::TypeRef;

use super::input::{QueryDocument, load_document};
use super::{CommandError, exit_with};

pub struct RewriteArgs {
    pub input: PathBuf,
    pub from: String,
    pub to: String,
    pub pretty: bool,
    pub recursion_limit: usize,
}

pub fn run(args: RewriteArgs) {
    let output = load_document(&args.input).and_then(|doc| render(&doc, &args));
    match output {
        Ok(json) => println!("{}", json),
        Err(err) => exit_with(err),
    }
}

/// Rewritten expression as JSON.
pub fn render(doc: &QueryDocument, args: &RewriteArgs) -> Result<String, CommandError> {
    for name in [&args.from, &args.to] {
        if doc.schema.entity(name).is_none() {
            return Err(CommandError::Input(format!(
                "entity type '{}' is not in the schema",
                name
            )));
        }
    }

    let source = TypeRef::entity(args.from.as_str());
    let target = TypeRef::entity(args.to.as_str());
    let rewritten = Rewriter::new(&doc.schema, &source, &target)
        .recursion_limit(args.recursion_limit)
        .rewrite(&doc.query)?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&rewritten)?
    } else {
        serde_json::to_string(&rewritten)?
    };
    Ok(json)
}
