//! Recursive descent parser for Kotlin expressions and statements.
//!
//! The parser reads a [`TokenList`] through a [`Cursor`] and records what
//! it recognizes as marker events (see `builder`). [`Parser::finish`]
//! replays the events into a lossless [`SyntaxTree`]: every token of the
//! input, trivia included, ends up under exactly one node.
//!
//! Parsing never fails. Problems are reported as [`ParseError`]s and as
//! `ERROR_ELEMENT` nodes in the tree, and the parser always runs to the end
//! of its input.
//!
//! ```text
//! let tokens = kt_lexer::lex(source);
//! let output = kt_parse::parse(&tokens, source, EntryPoint::Statements, &ParserConfig::default());
//! println!("{}", output.tree.dump(&tokens, source));
//! ```

mod builder;
mod config;
mod cursor;
mod error;
mod grammar;
pub mod incremental;
mod precedence;
mod recovery;
mod stack;

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use kt_diagnostic::{Diagnostic, ErrorCode};
use kt_ir::{SyntaxTree, TokenKind, TokenList};
use tracing::debug;

pub use config::ParserConfig;
pub use cursor::Cursor;
pub use error::ParseError;
pub use precedence::Precedence;
pub use recovery::TokenSet;

use builder::Event;
use recovery::TokenSet as Set;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    events: Vec<Event>,
    /// Errors with the index of the event they were raised at.
    errors: Vec<(u32, ParseError)>,
    /// `(child, parent)` event pairs linked by `precede`.
    precedes: Vec<(u32, u32)>,
    config: ParserConfig,
    depth: u32,
}

impl<'a> Parser<'a> {
    /// Create a parser over the whole token list.
    pub fn new(tokens: &'a TokenList, source: &'a str, config: ParserConfig) -> Self {
        Self::with_cursor(Cursor::new(tokens, source), config)
    }

    /// Create a parser that sees only the raw tokens in `range`.
    pub fn bounded(
        tokens: &'a TokenList,
        source: &'a str,
        range: Range<usize>,
        config: ParserConfig,
    ) -> Self {
        Self::with_cursor(Cursor::bounded(tokens, source, range), config)
    }

    fn with_cursor(cursor: Cursor<'a>, config: ParserConfig) -> Self {
        Parser {
            cursor,
            events: Vec::new(),
            errors: Vec::new(),
            precedes: Vec::new(),
            config,
            depth: 0,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    // Cursor delegation

    #[inline]
    fn current(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_text(&self) -> &'a str {
        self.cursor.current_text()
    }

    /// Kind of the `n`-th significant token after the current one.
    #[inline]
    fn nth(&self, n: usize) -> TokenKind {
        self.cursor.lookahead(n)
    }

    #[inline]
    fn raw_lookup(&self, offset: isize) -> TokenKind {
        self.cursor.raw_lookup(offset)
    }

    #[inline]
    fn eof(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn newline_before(&self) -> bool {
        self.cursor.newline_before_current()
    }

    /// Raw index of the current token; grows whenever a token is consumed.
    #[inline]
    fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Kind of the last consumed token, ignoring remaps.
    fn last_token(&self) -> TokenKind {
        self.cursor
            .last_end()
            .checked_sub(1)
            .map_or(TokenKind::Eof, |index| self.cursor.tokens().kind(index))
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor.advance();
    }

    /// Consume the current token, recording it as `kind` in the tree.
    fn advance_as(&mut self, kind: TokenKind) {
        if self.current() != kind {
            self.cursor.remap_current(kind);
        }
        self.cursor.advance();
    }

    /// Whether the current token is `kind`.
    ///
    /// Soft keywords match an identifier with the keyword's spelling, and
    /// `EolOrSemicolon` matches a `;`, a line break or the end of input.
    fn at(&self, kind: TokenKind) -> bool {
        let current = self.current();
        if current == kind {
            return true;
        }
        match kind {
            TokenKind::EolOrSemicolon => {
                current == TokenKind::Semicolon || self.eof() || self.newline_before()
            }
            TokenKind::Ident => current.is_soft_keyword(),
            _ if kind.is_soft_keyword() => {
                current == TokenKind::Ident
                    && TokenKind::soft_keyword(self.current_text()) == Some(kind)
            }
            _ => false,
        }
    }

    /// Whether the current token is in `set`, with the same soft keyword
    /// and end-of-line rules as [`Parser::at`].
    fn at_set(&self, set: Set) -> bool {
        let current = self.current();
        if set.contains(current) {
            return true;
        }
        if set.contains(TokenKind::EolOrSemicolon) && self.at(TokenKind::EolOrSemicolon) {
            return true;
        }
        if current == TokenKind::Ident {
            return TokenKind::soft_keyword(self.current_text()).is_some_and(|kw| set.contains(kw));
        }
        current.is_soft_keyword() && set.contains(TokenKind::Ident)
    }

    /// Run `f` with newline sensitivity switched to `enabled`.
    fn with_newlines<R>(&mut self, enabled: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        self.cursor.push_newlines(enabled);
        let result = f(self);
        self.cursor.pop_newlines();
        result
    }

    /// Run `f` with complex token joining switched to `enabled`.
    fn with_joining<R>(&mut self, enabled: bool, f: impl FnOnce(&mut Self) -> R) -> R {
        self.cursor.push_joining(enabled);
        let result = f(self);
        self.cursor.pop_joining();
        result
    }

    /// Run `f` on a view of the input that ends just before raw index `end`.
    fn truncated<R>(&mut self, end: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = self.cursor.replace_end(end);
        let result = f(self);
        self.cursor.replace_end(previous);
        result
    }

    /// Run a recursive rule one nesting level deeper.
    ///
    /// Past `max_nesting_depth` the current token is wrapped in an error
    /// element instead and `R::default()` is returned.
    fn nested<R: Default>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        if self.depth >= self.config.max_nesting_depth {
            debug!(depth = self.depth, "nesting limit reached");
            self.error_and_advance(ErrorCode::E1009, "Expression is too deeply nested");
            return R::default();
        }
        self.depth += 1;
        let result = stack::ensure_sufficient_stack(|| f(self));
        self.depth -= 1;
        result
    }

    /// Parse the construct `entry` names, then everything left over as an
    /// error.
    pub fn parse_entry_point(&mut self, entry: EntryPoint) {
        debug!(entry = %entry, tokens = self.cursor.bounds().len(), "parse");
        match entry {
            EntryPoint::Statements => self.parse_statements(false),
            EntryPoint::Script => self.parse_statements(true),
            EntryPoint::Expression => self.parse_expression(),
            EntryPoint::Block => self.parse_block(),
            EntryPoint::Lambda => {
                if self.at(TokenKind::LBrace) {
                    let collapse = self.config.lazy;
                    self.parse_function_literal(false, collapse);
                } else {
                    self.error(ErrorCode::E1003, "Expecting '{'");
                }
            }
            EntryPoint::Arguments => self.parse_value_argument_list(),
            EntryPoint::Contract => {
                if self.at(TokenKind::ContractKw) {
                    self.parse_contract_description_block();
                } else {
                    self.error(ErrorCode::E1002, "Expecting 'contract'");
                }
            }
        }
        self.parse_remaining();
    }

    /// Wrap whatever is left of the input in one error element.
    fn parse_remaining(&mut self) {
        if !self.eof() {
            let rest = self.mark();
            while !self.eof() {
                self.advance();
            }
            rest.error(self, ErrorCode::E1001, "Unexpected tokens");
        }
        debug_assert_eq!(self.cursor.flag_depths(), (1, 1), "unbalanced layout flags");
    }
}

/// Which construct a parse starts with.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntryPoint {
    /// `;`/newline separated statements.
    Statements,
    /// Statements of a script; top-level expressions become initializers.
    Script,
    /// A single expression.
    Expression,
    /// `{ statements }`.
    Block,
    /// `{ params -> statements }`.
    Lambda,
    /// `(arguments)`.
    Arguments,
    /// `contract [effects]`.
    Contract,
}

impl EntryPoint {
    pub const ALL: &'static [EntryPoint] = &[
        EntryPoint::Statements,
        EntryPoint::Script,
        EntryPoint::Expression,
        EntryPoint::Block,
        EntryPoint::Lambda,
        EntryPoint::Arguments,
        EntryPoint::Contract,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntryPoint::Statements => "statements",
            EntryPoint::Script => "script",
            EntryPoint::Expression => "expression",
            EntryPoint::Block => "block",
            EntryPoint::Lambda => "lambda",
            EntryPoint::Arguments => "arguments",
            EntryPoint::Contract => "contract",
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryPoint::ALL
            .iter()
            .copied()
            .find(|entry| entry.as_str() == s)
            .ok_or_else(|| format!("unknown entry point `{s}`"))
    }
}

/// Tree and errors produced by one parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOutput {
    pub tree: SyntaxTree,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors.iter().map(ParseError::to_diagnostic).collect()
    }
}

/// Parse `tokens` starting with the construct `entry` names.
pub fn parse(
    tokens: &TokenList,
    source: &str,
    entry: EntryPoint,
    config: &ParserConfig,
) -> ParseOutput {
    let mut parser = Parser::new(tokens, source, *config);
    parser.parse_entry_point(entry);
    let output = parser.finish();
    debug!(
        entry = %entry,
        nodes = output.tree.node_count(),
        errors = output.errors.len(),
        "parsed"
    );
    output
}

#[cfg(test)]
mod tests;
