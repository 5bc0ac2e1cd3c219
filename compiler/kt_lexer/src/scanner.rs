//! Hand-written scanner producing `(kind, start, end)` triples.
//!
//! The scanner is a small mode machine. Code mode lexes ordinary Kotlin;
//! string mode lexes the inside of a string literal and pushes a nested code
//! mode for every `${`. The mode stack is the only allocation besides the
//! output.
//!
//! Errors are never reported here. Malformed input becomes
//! `BAD_CHARACTER`, a dangling newline, or a string that simply ends at end
//! of input, and the parser reports what it cannot make sense of.

use kt_ir::{Span, TokenKind};

use crate::keywords;

#[derive(Clone, Copy, Debug)]
enum Mode {
    /// Ordinary code. `template` is set inside `${ ... }`, where `depth`
    /// counts unclosed `{` so the matching `}` can end the entry.
    Code { template: bool, depth: u32 },
    /// Inside a string literal. `dollars` is the number of `$` that start a
    /// template entry (more than one after an interpolation prefix).
    Str { raw: bool, dollars: usize },
}

pub(crate) struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    modes: Vec<Mode>,
    /// Dollar count of an interpolation prefix waiting for its quote.
    pending_prefix: usize,
    out: Vec<(TokenKind, Span)>,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Scanner {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            modes: vec![Mode::Code {
                template: false,
                depth: 0,
            }],
            pending_prefix: 0,
            out: Vec::new(),
        }
    }

    /// Scan the whole input. The result does not include the end-of-file
    /// token.
    pub(crate) fn run(mut self) -> Vec<(TokenKind, Span)> {
        while self.pos < self.bytes.len() {
            let before = self.pos;
            match self.modes.last().copied() {
                Some(Mode::Str { raw, dollars }) => self.string_piece(raw, dollars),
                Some(Mode::Code { template, depth }) => self.code_token(template, depth),
                None => break,
            }
            // Every step consumes input.
            if self.pos == before {
                self.bump_char();
                self.emit(TokenKind::BadCharacter, before);
            }
        }
        self.out
    }

    // ─── Helpers ────────────────────────────────────────────────────────

    #[inline]
    fn peek(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    fn bump_char(&mut self) {
        let width = self.current_char().map_or(1, char::len_utf8);
        self.pos = (self.pos + width).min(self.bytes.len());
    }

    fn emit(&mut self, kind: TokenKind, start: usize) {
        self.out.push((kind, Span::from_offsets(start, self.pos)));
    }

    fn single(&mut self, kind: TokenKind, len: usize) {
        let start = self.pos;
        self.pos += len;
        self.emit(kind, start);
    }

    fn set_top(&mut self, mode: Mode) {
        if let Some(top) = self.modes.last_mut() {
            *top = mode;
        }
    }

    fn is_ident_start(c: char) -> bool {
        c == '_' || c.is_alphabetic()
    }

    fn is_ident_continue(c: char) -> bool {
        c == '_' || c.is_alphanumeric()
    }

    fn at_ident_start(&self) -> bool {
        self.current_char().is_some_and(Self::is_ident_start)
    }

    fn eat_ident_chars(&mut self) {
        while self.current_char().is_some_and(Self::is_ident_continue) {
            self.bump_char();
        }
    }

    // ─── Code mode ──────────────────────────────────────────────────────

    fn code_token(&mut self, template: bool, depth: u32) {
        let start = self.pos;
        match self.peek(0) {
            b' ' | b'\t' | b'\r' | b'\n' | 0x0c => self.whitespace(),
            b'/' if self.peek(1) == b'/' => self.line_comment(TokenKind::EolComment),
            b'/' if self.peek(1) == b'*' => self.block_comment(),
            b'#' if start == 0 && self.peek(1) == b'!' => self.line_comment(TokenKind::Shebang),
            b'0'..=b'9' => self.number(),
            b'.' if self.peek(1).is_ascii_digit() => self.number(),
            b'`' => self.backtick_ident(),
            b'\'' => self.char_literal(),
            b'"' => self.open_quote(),
            b'$' => self.dollar(),
            b'{' => {
                if template {
                    self.set_top(Mode::Code {
                        template,
                        depth: depth + 1,
                    });
                }
                self.single(TokenKind::LBrace, 1);
            }
            b'}' => {
                if template && depth == 0 {
                    self.modes.pop();
                    self.single(TokenKind::LongTemplateEntryEnd, 1);
                } else {
                    if template {
                        self.set_top(Mode::Code {
                            template,
                            depth: depth - 1,
                        });
                    }
                    self.single(TokenKind::RBrace, 1);
                }
            }
            _ if self.at_ident_start() => self.ident_or_keyword(),
            _ => self.operator(),
        }
    }

    fn whitespace(&mut self) {
        let start = self.pos;
        while matches!(self.peek(0), b' ' | b'\t' | b'\r' | b'\n' | 0x0c) {
            self.pos += 1;
        }
        self.emit(TokenKind::Whitespace, start);
    }

    fn line_comment(&mut self, kind: TokenKind) {
        let start = self.pos;
        while self.pos < self.bytes.len() && !matches!(self.peek(0), b'\n' | b'\r') {
            self.pos += 1;
        }
        self.emit(kind, start);
    }

    /// Block comments nest in Kotlin. `/**` starts a doc comment unless it
    /// is the empty comment `/**/`.
    fn block_comment(&mut self) {
        let start = self.pos;
        let kind = if self.peek(2) == b'*' && self.peek(3) != b'/' {
            TokenKind::DocComment
        } else {
            TokenKind::BlockComment
        };
        self.pos += 2;
        let mut depth = 1u32;
        while self.pos < self.bytes.len() && depth > 0 {
            match (self.peek(0), self.peek(1)) {
                (b'/', b'*') => {
                    depth += 1;
                    self.pos += 2;
                }
                (b'*', b'/') => {
                    depth -= 1;
                    self.pos += 2;
                }
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.bytes.len());
        self.emit(kind, start);
    }

    fn ident_or_keyword(&mut self) {
        let start = self.pos;
        self.eat_ident_chars();
        let text = self.text.get(start..self.pos).unwrap_or("");
        let kind = keywords::lookup(text).unwrap_or(TokenKind::Ident);
        if kind == TokenKind::AsKw && self.peek(0) == b'?' {
            self.pos += 1;
            self.emit(TokenKind::AsSafe, start);
            return;
        }
        self.emit(kind, start);
    }

    fn backtick_ident(&mut self) {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.bytes.len() && !matches!(self.peek(0), b'`' | b'\n' | b'\r') {
            self.bump_char();
        }
        if self.peek(0) == b'`' {
            self.pos += 1;
        }
        self.emit(TokenKind::Ident, start);
    }

    fn number(&mut self) {
        let start = self.pos;
        if self.peek(0) == b'0' && matches!(self.peek(1), b'x' | b'X' | b'b' | b'B') {
            self.pos += 2;
            while self.peek(0).is_ascii_hexdigit() || self.peek(0) == b'_' {
                self.pos += 1;
            }
            self.integer_suffix();
            self.emit(TokenKind::IntegerLiteral, start);
            return;
        }

        let mut is_float = false;
        self.eat_digits();
        if self.peek(0) == b'.' && self.peek(1).is_ascii_digit() {
            is_float = true;
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.peek(0), b'e' | b'E')
            && (self.peek(1).is_ascii_digit()
                || (matches!(self.peek(1), b'+' | b'-') && self.peek(2).is_ascii_digit()))
        {
            is_float = true;
            self.pos += 2;
            self.eat_digits();
        }
        if matches!(self.peek(0), b'f' | b'F') {
            is_float = true;
            self.pos += 1;
        } else if !is_float {
            self.integer_suffix();
        }
        let kind = if is_float {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntegerLiteral
        };
        self.emit(kind, start);
    }

    fn eat_digits(&mut self) {
        while self.peek(0).is_ascii_digit() || self.peek(0) == b'_' {
            self.pos += 1;
        }
    }

    /// `L`, `u`, `U`, `uL`, `UL`.
    fn integer_suffix(&mut self) {
        if matches!(self.peek(0), b'u' | b'U') {
            self.pos += 1;
        }
        if self.peek(0) == b'L' {
            self.pos += 1;
        }
    }

    fn char_literal(&mut self) {
        let start = self.pos;
        self.pos += 1;
        if self.peek(0) == b'\\' {
            self.escape_body();
        } else if !matches!(self.peek(0), b'\'' | b'\n' | b'\r') && self.pos < self.bytes.len() {
            self.bump_char();
        }
        // Unterminated or overlong literals run to the closing quote on the
        // same line.
        while self.pos < self.bytes.len() && !matches!(self.peek(0), b'\'' | b'\n' | b'\r') {
            self.bump_char();
        }
        if self.peek(0) == b'\'' {
            self.pos += 1;
        }
        self.emit(TokenKind::CharacterLiteral, start);
    }

    /// Consume `\x` or `\uXXXX` starting at the backslash.
    fn escape_body(&mut self) {
        self.pos += 1;
        if self.peek(0) == b'u' {
            self.pos += 1;
            let mut digits = 0;
            while digits < 4 && self.peek(0).is_ascii_hexdigit() {
                self.pos += 1;
                digits += 1;
            }
        } else if self.pos < self.bytes.len() && !matches!(self.peek(0), b'\n' | b'\r') {
            self.bump_char();
        }
    }

    fn open_quote(&mut self) {
        let dollars = std::mem::take(&mut self.pending_prefix).max(1);
        let raw = self.peek(1) == b'"' && self.peek(2) == b'"';
        self.single(TokenKind::OpenQuote, if raw { 3 } else { 1 });
        self.modes.push(Mode::Str { raw, dollars });
    }

    /// `$` in code is only meaningful as an interpolation prefix directly
    /// before a string (`$$"..."`).
    fn dollar(&mut self) {
        let start = self.pos;
        let mut count = 0;
        while self.peek(count) == b'$' {
            count += 1;
        }
        if self.peek(count) == b'"' {
            self.pos += count;
            self.emit(TokenKind::InterpolationPrefix, start);
            self.pending_prefix = count;
        } else {
            self.single(TokenKind::BadCharacter, 1);
        }
    }

    fn operator(&mut self) {
        use TokenKind as T;
        let (kind, len) = match (self.peek(0), self.peek(1), self.peek(2)) {
            (b'!', b'=', b'=') => (T::ExclEqEqEq, 3),
            (b'!', b'=', _) => (T::ExclEq, 2),
            (b'!', b'i', c) if self.word_at(1, c, b'n') => (T::NotIn, 3),
            (b'!', b'i', c) if self.word_at(1, c, b's') => (T::NotIs, 3),
            (b'!', _, _) => (T::Excl, 1),
            (b'=', b'=', b'=') => (T::EqEqEq, 3),
            (b'=', b'=', _) => (T::EqEq, 2),
            (b'=', b'>', _) => (T::DoubleArrow, 2),
            (b'=', _, _) => (T::Eq, 1),
            (b'+', b'+', _) => (T::PlusPlus, 2),
            (b'+', b'=', _) => (T::PlusEq, 2),
            (b'+', _, _) => (T::Plus, 1),
            (b'-', b'-', _) => (T::MinusMinus, 2),
            (b'-', b'=', _) => (T::MinusEq, 2),
            (b'-', b'>', _) => (T::Arrow, 2),
            (b'-', _, _) => (T::Minus, 1),
            (b'*', b'=', _) => (T::MulEq, 2),
            (b'*', _, _) => (T::Mul, 1),
            (b'/', b'=', _) => (T::DivEq, 2),
            (b'/', _, _) => (T::Div, 1),
            (b'%', b'=', _) => (T::PercEq, 2),
            (b'%', _, _) => (T::Perc, 1),
            (b'<', b'=', _) => (T::LtEq, 2),
            (b'<', _, _) => (T::Lt, 1),
            (b'>', b'=', _) => (T::GtEq, 2),
            (b'>', _, _) => (T::Gt, 1),
            (b'&', b'&', _) => (T::AndAnd, 2),
            (b'&', _, _) => (T::And, 1),
            (b'|', b'|', _) => (T::OrOr, 2),
            (b'.', b'.', b'<') => (T::RangeUntil, 3),
            (b'.', b'.', _) => (T::Range, 2),
            (b'.', _, _) => (T::Dot, 1),
            (b':', b':', _) => (T::ColonColon, 2),
            (b':', _, _) => (T::Colon, 1),
            (b'?', _, _) => (T::Quest, 1),
            (b';', _, _) => (T::Semicolon, 1),
            (b',', _, _) => (T::Comma, 1),
            (b'(', _, _) => (T::LPar, 1),
            (b')', _, _) => (T::RPar, 1),
            (b'[', _, _) => (T::LBracket, 1),
            (b']', _, _) => (T::RBracket, 1),
            (b'@', _, _) => (T::At, 1),
            (b'#', _, _) => (T::Hash, 1),
            _ => {
                let start = self.pos;
                self.bump_char();
                self.emit(T::BadCharacter, start);
                return;
            }
        };
        self.single(kind, len);
    }

    /// `!in` / `!is`: the letter after `i` must match and the word must end
    /// there (`!inside` is `!` followed by an identifier).
    fn word_at(&self, offset: usize, second: u8, expected: u8) -> bool {
        if second != expected {
            return false;
        }
        let after = self.text.get(self.pos + offset + 2..).and_then(|s| s.chars().next());
        !after.is_some_and(Self::is_ident_continue)
    }

    // ─── String mode ────────────────────────────────────────────────────

    fn string_piece(&mut self, raw: bool, dollars: usize) {
        let start = self.pos;
        match self.peek(0) {
            b'"' if raw => {
                let mut quotes = 0;
                while self.peek(quotes) == b'"' {
                    quotes += 1;
                }
                if quotes >= 3 {
                    // Extra leading quotes are content: `""""` ends with `"`.
                    if quotes > 3 {
                        self.pos += quotes - 3;
                        self.emit(TokenKind::RegularStringPart, start);
                    }
                    self.modes.pop();
                    self.single(TokenKind::ClosingQuote, 3);
                } else {
                    self.pos += quotes;
                    self.emit(TokenKind::RegularStringPart, start);
                }
            }
            b'"' => {
                self.modes.pop();
                self.single(TokenKind::ClosingQuote, 1);
            }
            b'\n' | b'\r' if !raw => {
                self.modes.pop();
                let len = if self.peek(0) == b'\r' && self.peek(1) == b'\n' {
                    2
                } else {
                    1
                };
                self.single(TokenKind::DanglingNewline, len);
            }
            b'\\' if !raw => {
                self.escape_body();
                self.emit(TokenKind::EscapeSequence, start);
            }
            b'$' => self.template_entry(dollars),
            _ => self.regular_text(raw),
        }
    }

    fn template_entry(&mut self, dollars: usize) {
        let start = self.pos;
        let mut run = 0;
        while self.peek(run) == b'$' {
            run += 1;
        }
        let after = self.pos + run;
        let next_is_brace = self.bytes.get(after) == Some(&b'{');
        let next_is_name = self
            .text
            .get(after..)
            .and_then(|s| s.chars().next())
            .is_some_and(|c| Self::is_ident_start(c) || c == '`');

        if run < dollars || !(next_is_brace || next_is_name) {
            self.pos += run;
            self.emit(TokenKind::RegularStringPart, start);
            return;
        }

        // Surplus dollars are literal text.
        if run > dollars {
            self.pos += run - dollars;
            self.emit(TokenKind::RegularStringPart, start);
        }
        if next_is_brace {
            self.single(TokenKind::LongTemplateEntryStart, dollars + 1);
            self.modes.push(Mode::Code {
                template: true,
                depth: 0,
            });
        } else {
            self.single(TokenKind::ShortTemplateEntryStart, dollars);
            if self.peek(0) == b'`' {
                self.backtick_ident();
            } else {
                let name_start = self.pos;
                self.eat_ident_chars();
                let text = self.text.get(name_start..self.pos).unwrap_or("");
                let kind = keywords::lookup(text).unwrap_or(TokenKind::Ident);
                self.emit(kind, name_start);
            }
        }
    }

    fn regular_text(&mut self, raw: bool) {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            match self.peek(0) {
                b'"' | b'$' => break,
                b'\\' | b'\n' | b'\r' if !raw => break,
                _ => self.bump_char(),
            }
        }
        self.emit(TokenKind::RegularStringPart, start);
    }
}
