//! Reference lexer for Kotlin.
//!
//! Produces the [`TokenList`] the parser consumes:
//! - trivia is kept, so the syntax tree covers the whole source
//! - string literals are split into template pieces
//! - `?`, `.`, `:` and `!` are emitted as separate tokens; the parser's
//!   cursor joins `?.`, `?:` and `!!` when its grammar allows it
//! - every token carries [`TokenFlags`] describing the trivia before it
//!
//! The list always ends with exactly one `EOF` token.

mod keywords;
mod scanner;

use kt_ir::{Span, Token, TokenFlags, TokenKind, TokenList};
use tracing::debug;

use scanner::Scanner;

/// Lex `source` into a token list.
pub fn lex(source: &str) -> TokenList {
    let raw = Scanner::new(source).run();
    let mut tokens = TokenList::with_capacity(raw.len() + 1);

    let mut newline = false;
    let mut comment = false;
    let mut previous_trivia = false;
    for &(kind, span) in &raw {
        let flags = layout_flags(newline, comment, previous_trivia);
        tokens.push_with_flags(Token::new(kind, span), flags);

        if kind.is_trivia() {
            let text = source.get(span.to_range()).unwrap_or("");
            newline |= kind == TokenKind::Whitespace && text.contains('\n');
            comment |= kind.is_comment();
            previous_trivia = true;
        } else {
            newline = false;
            comment = false;
            previous_trivia = false;
        }
    }

    tokens.push_with_flags(
        Token::new(TokenKind::Eof, Span::from_offsets(source.len(), source.len())),
        layout_flags(newline, comment, previous_trivia),
    );

    debug!(bytes = source.len(), tokens = tokens.len(), "lexed source");
    tokens
}

fn layout_flags(newline: bool, comment: bool, previous_trivia: bool) -> TokenFlags {
    let mut flags = TokenFlags::EMPTY;
    if newline {
        flags.set(TokenFlags::NEWLINE_BEFORE);
    }
    if comment {
        flags.set(TokenFlags::COMMENT_BEFORE);
    }
    if !previous_trivia {
        flags.set(TokenFlags::ADJACENT);
    }
    flags
}

#[cfg(test)]
mod tests;
