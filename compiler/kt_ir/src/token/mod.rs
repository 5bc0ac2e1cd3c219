//! Kotlin tokens as produced by the lexer.
//!
//! Tokens carry only a kind and a span. Trivia (whitespace and comments)
//! stays in the list so the syntax tree can cover every byte of the source;
//! the parser's cursor skips it and reads the per-token [`TokenFlags`]
//! instead.

mod flags;
mod kind;
mod list;

pub use flags::TokenFlags;
pub use kind::TokenKind;
pub use list::TokenList;

use std::fmt;

use super::Span;

/// A token with its span in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Source text of this token.
    ///
    /// Returns an empty string if the span does not fall on `source`'s
    /// character boundaries (a token list paired with the wrong source).
    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.to_range()).unwrap_or("")
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

// Token is stored once per lexeme; keep it compact.
// Contains: TokenKind (1 byte) + padding + Span (8 bytes) = 12 bytes
#[cfg(target_pointer_width = "64")]
crate::static_assert_size!(Token, 12);
crate::static_assert_size!(TokenKind, 1);
