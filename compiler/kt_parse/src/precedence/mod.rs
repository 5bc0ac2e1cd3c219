//! Binary operator precedence.
//!
//! Levels are declared from loosest to tightest binding, so the derived
//! `Ord` reads naturally: `Precedence::Additive < Precedence::Multiplicative`
//! means multiplication binds tighter.
//!
//! | Level          | Operators                          |
//! |----------------|------------------------------------|
//! | Assignment     | `=` `+=` `-=` `*=` `/=` `%=`       |
//! | Disjunction    | `\|\|`                             |
//! | Conjunction    | `&&`                               |
//! | Equality       | `==` `!=` `===` `!==`              |
//! | Comparison     | `<` `>` `<=` `>=`                  |
//! | InOrIs         | `in` `!in` `is` `!is`              |
//! | Elvis          | `?:`                               |
//! | Infix          | identifiers (`a shl b`, `x to y`)  |
//! | Range          | `..` `..<`                         |
//! | Additive       | `+` `-`                            |
//! | Multiplicative | `*` `/` `%`                        |
//! | As             | `as` `as?`                         |

use kt_ir::TokenKind;

/// Binding strength of a binary operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    Assignment,
    Disjunction,
    Conjunction,
    Equality,
    Comparison,
    InOrIs,
    Elvis,
    Infix,
    Range,
    Additive,
    Multiplicative,
    As,
}

impl Precedence {
    /// Loosest level; a full expression is parsed at this level.
    pub const LOOSEST: Precedence = Precedence::Assignment;

    /// Tightest level.
    pub const TIGHTEST: Precedence = Precedence::As;

    /// Every level, loosest first.
    pub const ALL: [Precedence; 12] = [
        Precedence::Assignment,
        Precedence::Disjunction,
        Precedence::Conjunction,
        Precedence::Equality,
        Precedence::Comparison,
        Precedence::InOrIs,
        Precedence::Elvis,
        Precedence::Infix,
        Precedence::Range,
        Precedence::Additive,
        Precedence::Multiplicative,
        Precedence::As,
    ];

    /// The level operator at `kind` belongs to, if it is a binary operator.
    ///
    /// Identifiers are infix function names. Soft keywords reach the
    /// parser as identifiers, so `a by b` or `x to y` land here too.
    pub fn of(kind: TokenKind) -> Option<Precedence> {
        use TokenKind as T;
        let level = match kind {
            T::Eq | T::PlusEq | T::MinusEq | T::MulEq | T::DivEq | T::PercEq => {
                Precedence::Assignment
            }
            T::OrOr => Precedence::Disjunction,
            T::AndAnd => Precedence::Conjunction,
            T::EqEq | T::ExclEq | T::EqEqEq | T::ExclEqEqEq => Precedence::Equality,
            T::Lt | T::Gt | T::LtEq | T::GtEq => Precedence::Comparison,
            T::InKw | T::NotIn | T::IsKw | T::NotIs => Precedence::InOrIs,
            T::Elvis => Precedence::Elvis,
            T::Ident => Precedence::Infix,
            T::Range | T::RangeUntil => Precedence::Range,
            T::Plus | T::Minus => Precedence::Additive,
            T::Mul | T::Div | T::Perc => Precedence::Multiplicative,
            T::AsKw | T::AsSafe => Precedence::As,
            _ => return None,
        };
        Some(level)
    }

    /// The next tighter level.
    ///
    /// Must not be called on [`Precedence::TIGHTEST`]; it returns `As`
    /// again there.
    pub fn higher_priority(self) -> Precedence {
        debug_assert!(self != Self::TIGHTEST, "no level binds tighter than `as`");
        match self {
            Precedence::Assignment => Precedence::Disjunction,
            Precedence::Disjunction => Precedence::Conjunction,
            Precedence::Conjunction => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::InOrIs,
            Precedence::InOrIs => Precedence::Elvis,
            Precedence::Elvis => Precedence::Infix,
            Precedence::Infix => Precedence::Range,
            Precedence::Range => Precedence::Additive,
            Precedence::Additive => Precedence::Multiplicative,
            Precedence::Multiplicative | Precedence::As => Precedence::As,
        }
    }
}

/// Operators that may continue an expression on the next line.
///
/// `is` and `!is` are absent: a `when` entry may start with an `is`
/// condition.
pub fn allows_newline_before(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Dot
            | TokenKind::SafeAccess
            | TokenKind::Colon
            | TokenKind::AsKw
            | TokenKind::AsSafe
            | TokenKind::Elvis
            | TokenKind::AndAnd
            | TokenKind::OrOr
    )
}

#[cfg(test)]
mod tests;
