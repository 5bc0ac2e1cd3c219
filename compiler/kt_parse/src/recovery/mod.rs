//! Token sets and error recovery.
//!
//! Recovery is local: a rule that does not find what it expects reports an
//! error and either stays put (when the current token is something an
//! enclosing rule will want) or swallows the offending token into the error
//! element. Which tokens count as "wanted" is decided by the [`TokenSet`]s
//! below.

use kt_diagnostic::ErrorCode;
use kt_ir::TokenKind;
use kt_ir::TokenKind as T;
use tracing::trace;

use crate::Parser;

/// Set of token kinds, one bit per `TokenKind` discriminant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct TokenSet([u128; 2]);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet([0, 0]);

    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }

    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        let index = kind.index();
        let mut bits = self.0;
        bits[(index / 128) as usize] |= 1u128 << (index % 128);
        TokenSet(bits)
    }

    #[must_use]
    pub const fn union(self, other: TokenSet) -> Self {
        TokenSet([self.0[0] | other.0[0], self.0[1] | other.0[1]])
    }

    #[must_use]
    pub const fn intersect(self, other: TokenSet) -> Self {
        TokenSet([self.0[0] & other.0[0], self.0[1] & other.0[1]])
    }

    #[must_use]
    pub const fn without(self, other: TokenSet) -> Self {
        TokenSet([self.0[0] & !other.0[0], self.0[1] & !other.0[1]])
    }

    #[inline]
    pub const fn contains(self, kind: TokenKind) -> bool {
        let index = kind.index();
        self.0[(index / 128) as usize] & (1u128 << (index % 128)) != 0
    }
}

/// Tokens that can start an expression.
pub(crate) const EXPRESSION_FIRST: TokenSet = TokenSet::new(&[
    // prefix operators; `!!` because joining may be on when this is asked
    T::Minus,
    T::Plus,
    T::MinusMinus,
    T::PlusPlus,
    T::Excl,
    T::ExclExcl,
    T::ColonColon,
    T::LPar,
    T::TrueKw,
    T::FalseKw,
    T::InterpolationPrefix,
    T::OpenQuote,
    T::IntegerLiteral,
    T::CharacterLiteral,
    T::FloatLiteral,
    T::NullKw,
    T::LBrace,
    T::FunKw,
    T::ThisKw,
    T::SuperKw,
    T::IfKw,
    T::WhenKw,
    T::TryKw,
    T::ObjectKw,
    T::ThrowKw,
    T::ReturnKw,
    T::ContinueKw,
    T::BreakKw,
    T::ForKw,
    T::WhileKw,
    T::DoKw,
    T::Ident,
    T::At,
    T::LBracket,
]);

/// Tokens that end an expression.
pub(crate) const EXPRESSION_FOLLOW: TokenSet = TokenSet::new(&[
    T::EolOrSemicolon,
    T::Arrow,
    T::Comma,
    T::RBrace,
    T::RPar,
    T::RBracket,
]);

/// Tokens that can start a statement.
pub(crate) const STATEMENT_FIRST: TokenSet = EXPRESSION_FIRST
    .union(TokenSet::new(&[
        T::FunKw,
        T::ValKw,
        T::VarKw,
        T::InterfaceKw,
        T::ClassKw,
        T::TypealiasKw,
    ]))
    .union(MODIFIER_KEYWORDS);

pub(crate) const MODIFIER_KEYWORDS: TokenSet = TokenSet::new(TokenKind::MODIFIER_KEYWORDS);

pub(crate) const HARD_KEYWORDS: TokenSet = TokenSet::new(TokenKind::HARD_KEYWORDS);

/// Statement starters after which a missing separator is reported without
/// skipping anything.
pub(crate) const STATEMENT_NEW_LINE_QUICK_RECOVERY: TokenSet = STATEMENT_FIRST
    .intersect(HARD_KEYWORDS.without(TokenSet::new(&[T::InKw])))
    .with(T::EolOrSemicolon);

pub(crate) const PREFIX_OPERATIONS: TokenSet =
    TokenSet::new(&[T::Minus, T::Plus, T::MinusMinus, T::PlusPlus, T::Excl]);

pub(crate) const POSTFIX_OPERATIONS: TokenSet =
    TokenSet::new(&[T::PlusPlus, T::MinusMinus, T::ExclExcl]);

/// Tokens that cannot appear inside a type argument list; hitting one means
/// a `<` was a comparison after all.
pub(crate) const TYPE_ARGUMENT_LIST_STOPPERS: TokenSet = TokenSet::new(&[
    T::IntegerLiteral,
    T::FloatLiteral,
    T::CharacterLiteral,
    T::InterpolationPrefix,
    T::OpenQuote,
    T::PackageKw,
    T::AsKw,
    T::TypealiasKw,
    T::InterfaceKw,
    T::ClassKw,
    T::ThisKw,
    T::ValKw,
    T::VarKw,
    T::FunKw,
    T::ForKw,
    T::NullKw,
    T::TrueKw,
    T::FalseKw,
    T::IsKw,
    T::ThrowKw,
    T::ReturnKw,
    T::BreakKw,
    T::ContinueKw,
    T::ObjectKw,
    T::IfKw,
    T::TryKw,
    T::ElseKw,
    T::WhileKw,
    T::DoKw,
    T::WhenKw,
    T::RBracket,
    T::RBrace,
    T::RPar,
    T::PlusPlus,
    T::MinusMinus,
    T::ExclExcl,
    T::Plus,
    T::Minus,
    T::Excl,
    T::Div,
    T::Perc,
    T::LtEq,
    T::EqEqEq,
    T::ExclEqEqEq,
    T::EqEq,
    T::ExclEq,
    T::AndAnd,
    T::OrOr,
    T::SafeAccess,
    T::Elvis,
    T::Semicolon,
    T::Range,
    T::RangeUntil,
    T::Eq,
    T::MulEq,
    T::DivEq,
    T::PercEq,
    T::PlusEq,
    T::MinusEq,
    T::NotIn,
    T::NotIs,
    T::ColonColon,
    T::Colon,
]);

pub(crate) const WHEN_CONDITION_RECOVERY: TokenSet = TokenSet::new(&[
    T::RBrace,
    T::InKw,
    T::NotIn,
    T::IsKw,
    T::NotIs,
    T::ElseKw,
]);

pub(crate) const WHEN_CONDITION_RECOVERY_WITH_ARROW: TokenSet =
    WHEN_CONDITION_RECOVERY.with(T::Arrow).with(T::Dot);

pub(crate) const PARAMETER_NAME_RECOVERY: TokenSet =
    TokenSet::new(&[T::Colon, T::Eq, T::Comma, T::RPar, T::ValKw, T::VarKw]);

/// What may follow a destructuring declaration in a lambda parameter list.
pub(crate) const LAMBDA_DESTRUCTURING_FOLLOW: TokenSet =
    TokenSet::new(&[T::Arrow, T::Comma, T::Colon]);

pub(crate) const LAMBDA_DESTRUCTURING_RECOVERY: TokenSet =
    LAMBDA_DESTRUCTURING_FOLLOW.union(PARAMETER_NAME_RECOVERY);

pub(crate) const TRY_CATCH_RECOVERY: TokenSet =
    TokenSet::new(&[T::LBrace, T::RBrace, T::FinallyKw, T::CatchKw]);

impl Parser<'_> {
    /// Report `message` as an empty error element before the current token.
    pub(crate) fn error(&mut self, code: ErrorCode, message: &str) {
        let marker = self.mark();
        marker.error(self, code, message);
    }

    /// Report `message` on the current token, consuming it.
    pub(crate) fn error_and_advance(&mut self, code: ErrorCode, message: &str) {
        self.error_and_advance_n(code, message, 1);
    }

    /// Report `message` on the next `count` tokens, consuming them.
    pub(crate) fn error_and_advance_n(&mut self, code: ErrorCode, message: &str, count: usize) {
        let marker = self.mark();
        for _ in 0..count {
            self.advance();
        }
        marker.error(self, code, message);
    }

    /// Report `message`; consume the current token unless an enclosing rule
    /// can use it.
    ///
    /// The token stays when it is in `recovery`, is a brace, or (with
    /// `EolOrSemicolon` in `recovery`) ends the line.
    pub(crate) fn error_with_recovery(
        &mut self,
        code: ErrorCode,
        message: &str,
        recovery: Option<TokenSet>,
    ) {
        let current = self.current();
        let stay = match recovery {
            None => true,
            Some(set) => {
                self.at_set(set)
                    || matches!(current, T::LBrace | T::RBrace)
                    || (set.contains(T::EolOrSemicolon) && self.at(T::EolOrSemicolon))
            }
        };
        if stay {
            self.error(code, message);
        } else {
            self.error_and_advance(code, message);
        }
    }

    /// Skip tokens up to the first one in `stop` and report them as one
    /// error element.
    pub(crate) fn error_until(&mut self, code: ErrorCode, message: &str, stop: TokenSet) {
        let marker = self.mark();
        let mut skipped = 0usize;
        while !self.eof() && !self.at_set(stop) {
            self.advance();
            skipped += 1;
        }
        trace!(skipped, "error_until");
        marker.error(self, code, message);
    }

    /// Consume `kind` if the parser is at it.
    pub(crate) fn consume_if(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume `kind`, or report `message` without moving.
    pub(crate) fn expect(&mut self, kind: TokenKind, code: ErrorCode, message: &str) -> bool {
        self.expect_with_recovery(kind, code, message, None)
    }

    /// Consume `kind`, or report `message` with [`Parser::error_with_recovery`].
    pub(crate) fn expect_with_recovery(
        &mut self,
        kind: TokenKind,
        code: ErrorCode,
        message: &str,
        recovery: Option<TokenSet>,
    ) -> bool {
        if self.consume_if(kind) {
            return true;
        }
        self.error_with_recovery(code, message, recovery);
        false
    }
}
