//! Command handlers.
//!
//! Each command returns whether the input had syntax errors; I/O problems
//! come back as [`CliError`]. Rendering is split from printing so the
//! output can be checked without a terminal.

use std::fmt::Write as _;
use std::io::{self, IsTerminal};

use kt_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use kt_diagnostic::ErrorCode;
use kt_ir::TokenList;
use kt_parse::{EntryPoint, ParseOutput, ParserConfig};
use tracing::debug;

use crate::{CliError, Options};

fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })
}

/// One line per token, trivia included: `KIND "text" @ start..end`.
pub fn render_tokens(tokens: &TokenList, source: &str) -> String {
    let mut out = String::new();
    for (index, token) in tokens.iter().enumerate() {
        let text = tokens.text(index, source).escape_debug();
        let _ = writeln!(out, "{:?} \"{text}\" @ {:?}", token.kind, token.span);
    }
    out
}

/// Lex and parse `source` as `entry`.
pub fn parse_source(
    source: &str,
    entry: EntryPoint,
    config: &ParserConfig,
) -> (TokenList, ParseOutput) {
    let tokens = kt_lexer::lex(source);
    debug!(tokens = tokens.len(), %entry, "lexed");
    let output = kt_parse::parse(&tokens, source, entry, config);
    (tokens, output)
}

fn report(options: &Options, source: &str, output: &ParseOutput) {
    let diagnostics = output.diagnostics();
    let mut emitter = TerminalEmitter::stderr(options.color, io::stderr().is_terminal())
        .with_source(&options.path, source);
    emitter.emit_all(&diagnostics);
    emitter.emit_summary(diagnostics.len(), 0);
    emitter.flush();
}

/// `ktc lex <file>`
pub fn lex_file(path: &str) -> Result<bool, CliError> {
    let source = read_file(path)?;
    let tokens = kt_lexer::lex(&source);
    print!("{}", render_tokens(&tokens, &source));
    Ok(false)
}

/// `ktc parse <file>`: the tree, then any diagnostics.
pub fn parse_file(options: &Options) -> Result<bool, CliError> {
    let source = read_file(&options.path)?;
    let (tokens, output) = parse_source(&source, options.entry, &options.config);
    print!("{}", output.tree.dump(&tokens, &source));
    report(options, &source, &output);
    Ok(output.has_errors())
}

/// `ktc check <file>`: diagnostics only.
pub fn check_file(options: &Options) -> Result<bool, CliError> {
    let source = read_file(&options.path)?;
    let (_, output) = parse_source(&source, options.entry, &options.config);
    report(options, &source, &output);
    Ok(output.has_errors())
}

/// `CODE: description` for one code, or every code when `code` is `None`.
pub fn render_explanation(code: Option<&str>) -> Result<String, CliError> {
    let codes = match code {
        Some(text) => vec![text
            .parse::<ErrorCode>()
            .map_err(|_| CliError::UnknownCode(text.to_string()))?],
        None => ErrorCode::ALL.to_vec(),
    };
    let mut out = String::new();
    for code in codes {
        let _ = writeln!(out, "{code}: {}", code.description());
    }
    Ok(out)
}

/// `ktc explain [code]`
pub fn explain(code: Option<&str>) -> Result<bool, CliError> {
    print!("{}", render_explanation(code)?);
    Ok(false)
}
