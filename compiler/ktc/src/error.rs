use std::io;

use thiserror::Error;

/// Process-level failures. Syntax errors in the input are not `CliError`s;
/// they are reported as diagnostics.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("missing file path")]
    MissingPath,

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("invalid value '{value}' for {option}: {reason}")]
    InvalidValue {
        option: &'static str,
        value: String,
        reason: String,
    },

    #[error("unknown error code '{0}' (codes look like E1001)")]
    UnknownCode(String),

    #[error("unknown command '{0}'")]
    UnknownCommand(String),
}
