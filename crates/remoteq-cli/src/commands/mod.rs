pub mod check;
pub mod input;
pub mod rewrite;
pub mod translate;

#[cfg(test)]
mod check_tests;
#[cfg(test)]
mod input_tests;
#[cfg(test)]
mod test_fixtures;

/// Failure of a CLI command, printed as `error: ...`.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Input(String),

    #[error("invalid query document: {0}")]
    Document(serde_json::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Compile(#[from] remoteq_compiler::Error),
}

/// Print the error and terminate with exit code 1.
pub fn exit_with(err: CommandError) -> ! {
    tracing::debug!(?err, "command failed");
    eprintln!("error: {}", err);
    std::process::exit(1);
}
