//! The lexer's output: tokens with parallel flags.

use std::fmt;

use super::{Token, TokenFlags, TokenKind};
use crate::Span;

/// All tokens of one source text, trivia included, terminated by a single
/// [`TokenKind::Eof`] token.
///
/// `flags[i]` describes the trivia in front of `tokens[i]`. Indices into
/// this list ("raw" indices) are what the parser and the syntax tree store.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TokenList {
    tokens: Vec<Token>,
    flags: Vec<TokenFlags>,
}

impl TokenList {
    #[inline]
    pub fn new() -> Self {
        TokenList {
            tokens: Vec::new(),
            flags: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        TokenList {
            tokens: Vec::with_capacity(capacity),
            flags: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn push_with_flags(&mut self, token: Token, flags: TokenFlags) {
        self.tokens.push(token);
        self.flags.push(flags);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Kind at `index`, or `Eof` past the end.
    #[inline]
    pub fn kind(&self, index: usize) -> TokenKind {
        self.tokens.get(index).map_or(TokenKind::Eof, |t| t.kind)
    }

    /// Flags at `index`, or empty flags past the end.
    #[inline]
    pub fn flags(&self, index: usize) -> TokenFlags {
        self.flags.get(index).copied().unwrap_or(TokenFlags::EMPTY)
    }

    /// Span at `index`. Past the end, a zero-width span at the end of the
    /// last token.
    #[inline]
    pub fn span(&self, index: usize) -> Span {
        match self.tokens.get(index) {
            Some(token) => token.span,
            None => self
                .tokens
                .last()
                .map_or(Span::default(), |last| Span::point(last.span.end)),
        }
    }

    /// Source text of the token at `index`.
    #[inline]
    pub fn text<'s>(&self, index: usize, source: &'s str) -> &'s str {
        self.tokens.get(index).map_or("", |t| t.text(source))
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Number of tokens the parser actually sees (trivia excluded).
    pub fn significant_len(&self) -> usize {
        self.tokens.iter().filter(|t| !t.kind.is_trivia()).count()
    }
}

impl fmt::Debug for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
