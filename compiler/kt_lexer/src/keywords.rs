//! Hard keyword resolution.
//!
//! Only hard keywords are resolved here. Soft keywords (`catch`, `where`,
//! modifiers, ...) stay identifiers; the parser matches them by text.

use kt_ir::TokenKind;

/// Look up a hard keyword by text.
///
/// Uses length-bucketing for fast rejection: hard keywords are 2-9 bytes
/// and lower-case ASCII.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let len = text.len();
    if !(2..=9).contains(&len) || !text.as_bytes()[0].is_ascii_lowercase() {
        return None;
    }

    match len {
        2 => match text {
            "as" => Some(TokenKind::AsKw),
            "is" => Some(TokenKind::IsKw),
            "in" => Some(TokenKind::InKw),
            "if" => Some(TokenKind::IfKw),
            "do" => Some(TokenKind::DoKw),
            _ => None,
        },
        3 => match text {
            "val" => Some(TokenKind::ValKw),
            "var" => Some(TokenKind::VarKw),
            "fun" => Some(TokenKind::FunKw),
            "for" => Some(TokenKind::ForKw),
            "try" => Some(TokenKind::TryKw),
            _ => None,
        },
        4 => match text {
            "this" => Some(TokenKind::ThisKw),
            "null" => Some(TokenKind::NullKw),
            "true" => Some(TokenKind::TrueKw),
            "else" => Some(TokenKind::ElseKw),
            "when" => Some(TokenKind::WhenKw),
            _ => None,
        },
        5 => match text {
            "class" => Some(TokenKind::ClassKw),
            "super" => Some(TokenKind::SuperKw),
            "false" => Some(TokenKind::FalseKw),
            "throw" => Some(TokenKind::ThrowKw),
            "break" => Some(TokenKind::BreakKw),
            "while" => Some(TokenKind::WhileKw),
            _ => None,
        },
        6 => match text {
            "return" => Some(TokenKind::ReturnKw),
            "object" => Some(TokenKind::ObjectKw),
            "typeof" => Some(TokenKind::TypeofKw),
            _ => None,
        },
        7 => match text {
            "package" => Some(TokenKind::PackageKw),
            _ => None,
        },
        8 => match text {
            "continue" => Some(TokenKind::ContinueKw),
            _ => None,
        },
        9 => match text {
            "typealias" => Some(TokenKind::TypealiasKw),
            "interface" => Some(TokenKind::InterfaceKw),
            _ => None,
        },
        _ => None,
    }
}
