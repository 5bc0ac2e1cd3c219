//! Command-line options shared by `parse` and `check`.
//!
//! ```text
//! ktc parse Foo.kt --entry=expression --lazy --max-depth=64 --color=never
//! ```
//!
//! Parser settings start from [`ParserConfig::from_env`]; flags override
//! them.

use kt_diagnostic::emitter::ColorMode;
use kt_parse::{EntryPoint, ParserConfig};

use crate::CliError;

/// Everything a command needs besides the file contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Options {
    pub path: String,
    pub entry: EntryPoint,
    pub config: ParserConfig,
    pub color: ColorMode,
}

impl Options {
    /// Parse the arguments after the command name.
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        Self::parse_with(args, ParserConfig::from_env())
    }

    fn parse_with(args: &[String], config: ParserConfig) -> Result<Self, CliError> {
        let mut path = None;
        let mut options = Options {
            path: String::new(),
            entry: EntryPoint::Statements,
            config,
            color: ColorMode::Auto,
        };

        for arg in args {
            if let Some(value) = arg.strip_prefix("--entry=") {
                options.entry = value.parse().map_err(|reason| CliError::InvalidValue {
                    option: "--entry",
                    value: value.to_string(),
                    reason,
                })?;
            } else if arg == "--lazy" {
                options.config.lazy = true;
            } else if let Some(value) = arg.strip_prefix("--max-depth=") {
                options.config.max_nesting_depth = parse_depth(value)?;
            } else if let Some(value) = arg.strip_prefix("--color=") {
                options.color = parse_color(value)?;
            } else if arg.starts_with('-') {
                return Err(CliError::UnknownOption(arg.clone()));
            } else if path.is_none() {
                path = Some(arg.clone());
            } else {
                return Err(CliError::UnexpectedArgument(arg.clone()));
            }
        }

        options.path = path.ok_or(CliError::MissingPath)?;
        Ok(options)
    }
}

fn parse_depth(value: &str) -> Result<u32, CliError> {
    let invalid = |reason: String| CliError::InvalidValue {
        option: "--max-depth",
        value: value.to_string(),
        reason,
    };
    match value.parse::<u32>() {
        Ok(0) => Err(invalid("must be at least 1".to_string())),
        Ok(depth) => Ok(depth),
        Err(error) => Err(invalid(error.to_string())),
    }
}

fn parse_color(value: &str) -> Result<ColorMode, CliError> {
    match value {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        _ => Err(CliError::InvalidValue {
            option: "--color",
            value: value.to_string(),
            reason: "expected auto, always or never".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests;
