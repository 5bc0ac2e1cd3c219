//! Parse errors.

use kt_diagnostic::{Diagnostic, ErrorCode};
use kt_ir::Span;

/// A syntax error found while parsing.
///
/// Errors never stop the parse. Each one also appears in the tree as an
/// `ERROR_ELEMENT` carrying the same message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    /// Error code for searchability.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Tokens the error element covers, or a point before the current token
    /// when it covers none.
    pub span: Span,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code, &self.message).at(self.span, "")
    }
}
