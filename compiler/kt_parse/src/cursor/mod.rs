//! Token cursor for navigating the token stream.
//!
//! The cursor walks the raw [`TokenList`] (trivia included) but only ever
//! stops on significant tokens. It owns the two layout switches the grammar
//! toggles in scoped fashion:
//!
//! - **Newline sensitivity.** When disabled (inside parentheses, brackets,
//!   `when` conditions), [`Cursor::newline_before_current`] reports `false`
//!   so line breaks never terminate an expression.
//! - **Complex token joining.** When enabled, adjacent `?` `.`, `?` `:` and
//!   `!` `!` are presented as the single tokens `?.`, `?:` and `!!`. Prefix
//!   parsing switches this off so `!!x` reads as two negations.
//!
//! Both switches are stacks. They are pushed and popped by
//! `Parser::with_newlines` / `Parser::with_joining`, which restore the
//! previous state on every exit path.
//!
//! Token remaps (a soft keyword consumed as a keyword) are logged so the
//! builder can undo them on rollback; see [`CursorCheckpoint`].

use std::ops::Range;

use kt_ir::{Span, TokenKind, TokenList};
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};
use tracing::trace;

/// Position and remap log length, restored by a rollback.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CursorCheckpoint {
    pos: usize,
    last_end: usize,
    remaps: usize,
}

impl CursorCheckpoint {
    /// Raw index of the significant token the checkpoint was taken at.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }
}

/// One remap, with the kind it replaced so it can be undone.
#[derive(Copy, Clone, Debug)]
struct RemapEntry {
    index: u32,
    previous: Option<TokenKind>,
}

/// Cursor over a token list.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    source: &'a str,
    /// Raw index of the current significant token.
    pos: usize,
    /// Raw index just past the last consumed significant token.
    last_end: usize,
    /// First raw index the cursor may read.
    start: usize,
    /// Raw indices at or past `end` read as end of file.
    end: usize,
    newlines: SmallVec<[bool; 16]>,
    joining: SmallVec<[bool; 16]>,
    remaps: FxHashMap<u32, TokenKind>,
    remap_log: Vec<RemapEntry>,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over the whole token list.
    pub fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        Self::bounded(tokens, source, 0..tokens.len())
    }

    /// Create a cursor that sees only the raw tokens in `range`.
    pub fn bounded(tokens: &'a TokenList, source: &'a str, range: Range<usize>) -> Self {
        let end = range.end.min(tokens.len());
        let start = range.start.min(end);
        let mut cursor = Cursor {
            tokens,
            source,
            pos: start,
            last_end: start,
            start,
            end,
            newlines: smallvec![true],
            joining: smallvec![true],
            remaps: FxHashMap::default(),
            remap_log: Vec::new(),
        };
        cursor.pos = cursor.skip_trivia(start);
        cursor
    }

    #[inline]
    pub fn tokens(&self) -> &'a TokenList {
        self.tokens
    }

    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Raw token range this cursor reads.
    #[inline]
    pub fn bounds(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Raw index of the current significant token.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Raw index just past the last consumed significant token.
    #[inline]
    pub fn last_end(&self) -> usize {
        self.last_end
    }

    pub fn checkpoint(&self) -> CursorCheckpoint {
        CursorCheckpoint {
            pos: self.pos,
            last_end: self.last_end,
            remaps: self.remap_log.len(),
        }
    }

    /// Return to `checkpoint`, undoing every remap made since.
    pub fn restore(&mut self, checkpoint: CursorCheckpoint) {
        debug_assert!(
            checkpoint.remaps <= self.remap_log.len(),
            "restoring a checkpoint from a discarded branch"
        );
        while self.remap_log.len() > checkpoint.remaps {
            let Some(entry) = self.remap_log.pop() else {
                break;
            };
            match entry.previous {
                Some(kind) => {
                    self.remaps.insert(entry.index, kind);
                }
                None => {
                    self.remaps.remove(&entry.index);
                }
            }
        }
        self.pos = checkpoint.pos;
        self.last_end = checkpoint.last_end;
    }

    // ─── Raw access ───

    /// Kind at raw `index`, remaps applied. Past the bound reads `Eof`.
    fn raw_kind(&self, index: usize) -> TokenKind {
        if index >= self.end {
            return TokenKind::Eof;
        }
        match u32::try_from(index).ok().and_then(|i| self.remaps.get(&i)) {
            Some(&kind) => kind,
            None => self.tokens.kind(index),
        }
    }

    fn skip_trivia(&self, mut index: usize) -> usize {
        while index < self.end && self.tokens.kind(index).is_trivia() {
            index += 1;
        }
        index
    }

    /// Kind of the raw token `offset` positions from the current one,
    /// trivia included. Negative offsets look backwards.
    pub fn raw_lookup(&self, offset: isize) -> TokenKind {
        match self.pos.checked_add_signed(offset) {
            Some(index) if index >= self.start => self.raw_kind(index),
            _ => TokenKind::Eof,
        }
    }

    /// Make raw indices at or past `end` read as end of file. Returns the
    /// previous bound so the caller can put it back.
    pub fn replace_end(&mut self, end: usize) -> usize {
        let previous = self.end;
        self.end = end.clamp(self.start, self.tokens.len());
        previous
    }

    // ─── Joining ───

    /// Joined kind for the complex token starting at raw `index`, if any.
    fn joined_at(&self, index: usize) -> Option<TokenKind> {
        let next = index + 1;
        if next >= self.end || !self.tokens.flags(next).is_adjacent() {
            return None;
        }
        match (self.raw_kind(index), self.raw_kind(next)) {
            (TokenKind::Quest, TokenKind::Dot) => Some(TokenKind::SafeAccess),
            (TokenKind::Quest, TokenKind::Colon) => Some(TokenKind::Elvis),
            (TokenKind::Excl, TokenKind::Excl) => Some(TokenKind::ExclExcl),
            _ => None,
        }
    }

    /// Logical kind and raw width of the token at raw `index`.
    fn logical_at(&self, index: usize) -> (TokenKind, usize) {
        if self.joining_enabled() {
            if let Some(joined) = self.joined_at(index) {
                return (joined, 2);
            }
        }
        (self.raw_kind(index), 1)
    }

    // ─── Current token ───

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.logical_at(self.pos).0
    }

    /// Source text of the current token (both halves of a joined token).
    pub fn current_text(&self) -> &'a str {
        if self.pos >= self.end {
            return "";
        }
        let (_, width) = self.logical_at(self.pos);
        let span = self.tokens.span(self.pos).merge(self.tokens.span(self.pos + width - 1));
        self.source.get(span.to_range()).unwrap_or("")
    }

    /// Span of the current token; a point at the end for end of file.
    pub fn current_span(&self) -> Span {
        if self.pos >= self.end {
            let offset = if self.end == 0 {
                0
            } else {
                self.tokens.span(self.end - 1).end
            };
            return Span::point(offset);
        }
        let (_, width) = self.logical_at(self.pos);
        self.tokens.span(self.pos).merge(self.tokens.span(self.pos + width - 1))
    }

    /// Span from raw index `from` to the last consumed token.
    pub fn span_since(&self, from: usize) -> Span {
        if self.last_end > from && from < self.end {
            self.tokens.span(from).merge(self.tokens.span(self.last_end - 1))
        } else {
            self.current_span()
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Kind of the `n`-th significant token after the current one.
    pub fn lookahead(&self, n: usize) -> TokenKind {
        let mut index = self.pos;
        for _ in 0..n {
            if index >= self.end {
                return TokenKind::Eof;
            }
            let (_, width) = self.logical_at(index);
            index = self.skip_trivia(index + width);
        }
        self.logical_at(index).0
    }

    /// Whether a line break separates the current token from the previous
    /// significant one. Always `false` while newlines are disabled and
    /// always `true` at end of file otherwise.
    pub fn newline_before_current(&self) -> bool {
        if !self.newlines_enabled() {
            return false;
        }
        if self.pos >= self.end || self.tokens.kind(self.pos) == TokenKind::Eof {
            return true;
        }
        self.tokens.flags(self.pos).has_newline_before()
    }

    /// Consume the current token.
    pub fn advance(&mut self) {
        if self.pos >= self.end {
            return;
        }
        let (kind, width) = self.logical_at(self.pos);
        if kind == TokenKind::Eof {
            return;
        }
        trace!(
            pos = self.pos,
            kind = ?kind,
            span_start = self.tokens.span(self.pos).start,
            "advance"
        );
        self.last_end = self.pos + width;
        self.pos = self.skip_trivia(self.pos + width);
    }

    /// Read the current token as `kind` from now on (until rolled back).
    pub fn remap_current(&mut self, kind: TokenKind) {
        let Ok(index) = u32::try_from(self.pos) else {
            return;
        };
        if self.pos >= self.end {
            return;
        }
        let previous = self.remaps.insert(index, kind);
        self.remap_log.push(RemapEntry { index, previous });
    }

    /// Final remap table, keyed by raw token index.
    pub fn remaps(&self) -> impl Iterator<Item = (u32, TokenKind)> + '_ {
        self.remaps.iter().map(|(&index, &kind)| (index, kind))
    }

    // ─── Layout switches ───

    #[inline]
    pub fn newlines_enabled(&self) -> bool {
        self.newlines.last().copied().unwrap_or(true)
    }

    #[inline]
    pub fn joining_enabled(&self) -> bool {
        self.joining.last().copied().unwrap_or(true)
    }

    pub fn push_newlines(&mut self, enabled: bool) {
        self.newlines.push(enabled);
    }

    pub fn pop_newlines(&mut self) {
        debug_assert!(self.newlines.len() > 1, "unbalanced newline state");
        if self.newlines.len() > 1 {
            self.newlines.pop();
        }
    }

    pub fn push_joining(&mut self, enabled: bool) {
        self.joining.push(enabled);
    }

    pub fn pop_joining(&mut self) {
        debug_assert!(self.joining.len() > 1, "unbalanced joining state");
        if self.joining.len() > 1 {
            self.joining.pop();
        }
    }

    /// Depths of the newline and joining stacks. Both are `(1, 1)` whenever
    /// no grammar rule is running.
    pub fn flag_depths(&self) -> (usize, usize) {
        (self.newlines.len(), self.joining.len())
    }
}
