//! Lazy function literals and their reparse.
//!
//! With [`ParserConfig::lazy`] set, the body of a collapsible lambda is
//! skipped by brace matching and its `FUNCTION_LITERAL` keeps the raw
//! tokens. A later pass can parse just that range:
//!
//! ```text
//! let output = kt_parse::parse(&tokens, source, EntryPoint::Statements, &lazy);
//! for range in incremental::lazy_lambdas(&output.tree) {
//!     let body = incremental::reparse_lazy_lambda(&tokens, source, range, &lazy);
//! }
//! ```
//!
//! A reparse runs on a fresh cursor bounded to the range, so layout flags
//! start from their defaults and cannot leak into or out of it.

use std::ops::Range;

use kt_ir::{NodeKind, SyntaxTree, TokenKind, TokenList};
use tracing::debug;

use crate::{parse, EntryPoint, ParseOutput, Parser, ParserConfig};

/// Whether `range` holds exactly one balanced `{ ... }`, trivia aside.
pub fn is_reparsable(tokens: &TokenList, range: Range<usize>) -> bool {
    if range.end > tokens.len() || range.is_empty() {
        return false;
    }

    let mut depth = 0usize;
    let mut closed = false;
    for index in range {
        let kind = tokens.kind(index);
        if kind.is_trivia() || kind == TokenKind::Eof {
            continue;
        }
        if closed {
            // Something after the closing brace.
            return false;
        }
        match kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace if depth > 0 => {
                depth -= 1;
                closed = depth == 0;
            }
            _ if depth == 0 => return false,
            _ => {}
        }
    }
    closed
}

/// Token ranges of the lazily parsed function literals in `tree`.
pub fn lazy_lambdas(tree: &SyntaxTree) -> Vec<Range<usize>> {
    tree.descendants(tree.root())
        .into_iter()
        .filter(|&node| tree.kind(node) == NodeKind::FunctionLiteral && tree.is_lazy(node))
        .map(|node| {
            let range = tree.token_range(node);
            range.start as usize..range.end as usize
        })
        .collect()
}

/// Parse the lambda in `range` eagerly. Returns `None` when the range is
/// not a single balanced block.
///
/// Lambdas nested in the body stay lazy if `config` asks for it.
pub fn reparse_lazy_lambda(
    tokens: &TokenList,
    source: &str,
    range: Range<usize>,
    config: &ParserConfig,
) -> Option<ParseOutput> {
    if !is_reparsable(tokens, range.clone()) {
        debug!(?range, "range is not a balanced block");
        return None;
    }

    let mut parser = Parser::bounded(tokens, source, range.clone(), *config);
    parser.parse_function_literal(false, false);
    parser.parse_remaining();
    let output = parser.finish();
    debug!(?range, errors = output.errors.len(), "reparsed lazy lambda");
    Some(output)
}

/// A fully structured tree for input that was parsed with lazy lambdas.
pub fn expand_lazy(
    tokens: &TokenList,
    source: &str,
    entry: EntryPoint,
    config: &ParserConfig,
) -> ParseOutput {
    let eager = ParserConfig {
        lazy: false,
        ..*config
    };
    parse(tokens, source, entry, &eager)
}

#[cfg(test)]
mod tests;
