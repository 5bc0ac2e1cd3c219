use kt_ir::TokenKind;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn levels_are_ordered_loosest_first() {
    let mut sorted = Precedence::ALL;
    sorted.sort();
    assert_eq!(sorted, Precedence::ALL);
    assert_eq!(Precedence::ALL[0], Precedence::LOOSEST);
    assert_eq!(Precedence::ALL[11], Precedence::TIGHTEST);
}

#[test]
fn higher_priority_walks_the_table() {
    for pair in Precedence::ALL.windows(2) {
        assert_eq!(pair[0].higher_priority(), pair[1]);
    }
}

#[test]
fn operator_tokens_map_to_levels() {
    let cases = [
        (TokenKind::PlusEq, Precedence::Assignment),
        (TokenKind::OrOr, Precedence::Disjunction),
        (TokenKind::AndAnd, Precedence::Conjunction),
        (TokenKind::ExclEqEqEq, Precedence::Equality),
        (TokenKind::GtEq, Precedence::Comparison),
        (TokenKind::NotIs, Precedence::InOrIs),
        (TokenKind::Elvis, Precedence::Elvis),
        (TokenKind::Ident, Precedence::Infix),
        (TokenKind::RangeUntil, Precedence::Range),
        (TokenKind::Minus, Precedence::Additive),
        (TokenKind::Perc, Precedence::Multiplicative),
        (TokenKind::AsSafe, Precedence::As),
    ];
    for (kind, level) in cases {
        assert_eq!(Precedence::of(kind), Some(level), "{kind:?}");
    }
}

#[test]
fn non_operators_have_no_level() {
    for kind in [
        TokenKind::Dot,
        TokenKind::SafeAccess,
        TokenKind::Quest,
        TokenKind::Excl,
        TokenKind::ExclExcl,
        TokenKind::Arrow,
        TokenKind::LPar,
        TokenKind::IntegerLiteral,
        TokenKind::Eof,
    ] {
        assert_eq!(Precedence::of(kind), None, "{kind:?}");
    }
}

#[test]
fn range_binds_tighter_than_infix_calls() {
    assert!(Precedence::Range > Precedence::Infix);
    assert!(Precedence::Infix > Precedence::Elvis);
}

#[test]
fn newline_allow_list() {
    assert!(allows_newline_before(TokenKind::Dot));
    assert!(allows_newline_before(TokenKind::Elvis));
    assert!(allows_newline_before(TokenKind::OrOr));
    assert!(!allows_newline_before(TokenKind::IsKw));
    assert!(!allows_newline_before(TokenKind::Minus));
    assert!(!allows_newline_before(TokenKind::Ident));
}
