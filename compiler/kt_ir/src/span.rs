//! Byte-offset spans into a single source text.

use std::fmt;
use std::ops::Range;

/// Half-open byte range `start..end` in the source.
///
/// Offsets are `u32` so a span stays 8 bytes; one is stored per token.
/// Sources past 4 GiB saturate rather than wrap.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Span from `usize` offsets, saturating at `u32::MAX`.
    pub fn from_offsets(start: usize, end: usize) -> Self {
        let clamp = |offset: usize| u32::try_from(offset).unwrap_or(u32::MAX);
        Span::new(clamp(start), clamp(end))
    }

    /// Empty span sitting at `offset`. Errors that cover no tokens and
    /// the end-of-file token use these.
    #[inline]
    pub const fn point(offset: u32) -> Span {
        Span::new(offset, offset)
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// From the start of `self` to the end of `other`, whichever order
    /// they come in.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    #[inline]
    pub fn to_range(self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

crate::static_assert_size!(Span, 8);
