//! Per-token layout flags.

/// Facts about the trivia preceding a token, packed into one byte.
///
/// The lexer computes these once so the parser never has to walk back over
/// whitespace tokens to answer "was there a line break before this?".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TokenFlags(u8);

impl TokenFlags {
    /// A whitespace run containing a line break lies between the previous
    /// significant token and this one.
    pub const NEWLINE_BEFORE: u8 = 1 << 0;
    /// A comment lies between the previous significant token and this one.
    pub const COMMENT_BEFORE: u8 = 1 << 1;
    /// No trivia at all between the previous token and this one.
    pub const ADJACENT: u8 = 1 << 2;

    pub const EMPTY: Self = TokenFlags(0);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        TokenFlags(bits)
    }

    #[inline]
    pub const fn contains(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    #[inline]
    pub fn set(&mut self, flag: u8) {
        self.0 |= flag;
    }

    #[inline]
    pub const fn has_newline_before(self) -> bool {
        self.contains(Self::NEWLINE_BEFORE)
    }

    #[inline]
    pub const fn has_comment_before(self) -> bool {
        self.contains(Self::COMMENT_BEFORE)
    }

    #[inline]
    pub const fn is_adjacent(self) -> bool {
        self.contains(Self::ADJACENT)
    }
}

const _: () = assert!(size_of::<TokenFlags>() == 1);
