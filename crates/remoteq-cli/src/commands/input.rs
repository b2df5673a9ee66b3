use std::fs;
use std::io::{self, Read};
use std::path::Path;

use remoteq_core::{Expr, Schema};
use serde::Deserialize;

use super::CommandError;

/// What every command reads: an expression plus the schema it is typed against.
#[derive(Debug, Deserialize)]
pub struct QueryDocument {
    #[serde(default)]
    pub schema: Schema,
    pub query: Expr,
}

pub fn load_document(path: &Path) -> Result<QueryDocument, CommandError> {
    let text = if path.as_os_str() == "-" {
        load_stdin()?
    } else {
        load_file(path)?
    };
    parse_document(&text)
}

pub fn parse_document(text: &str) -> Result<QueryDocument, CommandError> {
    if text.trim().is_empty() {
        return Err(CommandError::Input("query document cannot be empty".to_string()));
    }
    serde_json::from_str(text).map_err(CommandError::Document)
}

fn load_stdin() -> Result<String, CommandError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| CommandError::Input(format!("failed to read stdin: {}", e)))?;
    Ok(buf)
}

fn load_file(path: &Path) -> Result<String, CommandError> {
    fs::read_to_string(path)
        .map_err(|e| CommandError::Input(format!("failed to read '{}': {}", path.display(), e)))
}
