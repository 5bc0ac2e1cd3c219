//! Parser scenario tests.
//!
//! Tests are organized into modules by category:
//! - `statements`: separators, blocks, scripts, local declarations
//! - `lambda`: function literals, trailing lambdas, lazy bodies
//! - `control`: `if`, `when`, `try` and loops
//! - `template`: string templates
//! - `recovery`: malformed input and the errors it produces
//! - `properties`: termination, coverage and rollback over arbitrary input

mod control;
mod lambda;
mod recovery;
mod template;

use kt_ir::TokenList;

use crate::{parse, EntryPoint, ParseOutput, ParserConfig};

pub(crate) fn parse_with(
    source: &str,
    entry: EntryPoint,
    config: &ParserConfig,
) -> (TokenList, ParseOutput) {
    let tokens = kt_lexer::lex(source);
    let output = parse(&tokens, source, entry, config);
    (tokens, output)
}

/// Node-only shape of the whole tree for `source` parsed as `entry`.
pub(crate) fn shape_of(entry: EntryPoint, source: &str) -> String {
    let (_, output) = parse_with(source, entry, &ParserConfig::default());
    output.tree.shape(output.tree.root())
}

/// [`shape_of`] for statements.
pub(crate) fn shape(source: &str) -> String {
    shape_of(EntryPoint::Statements, source)
}

/// Error messages for `source` parsed as `entry`.
pub(crate) fn messages_of(entry: EntryPoint, source: &str) -> Vec<String> {
    let (_, output) = parse_with(source, entry, &ParserConfig::default());
    output.errors.into_iter().map(|error| error.message).collect()
}

/// [`messages_of`] for statements.
pub(crate) fn messages(source: &str) -> Vec<String> {
    messages_of(EntryPoint::Statements, source)
}

/// Full tree dump for statements.
pub(crate) fn dump(source: &str) -> String {
    let (tokens, output) = parse_with(source, EntryPoint::Statements, &ParserConfig::default());
    output.tree.dump(&tokens, source)
}
