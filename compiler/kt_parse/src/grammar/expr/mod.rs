//! Expression parsing.
//!
//! # Module Structure
//!
//! - `mod.rs`: entry point, binary operator climbing, prefix operators and
//!   labels
//! - `postfix.rs`: calls, indexing, member access, callable references
//! - `args.rs`: value argument lists and trailing lambdas
//! - `primary.rs`: atomic expressions and jumps
//! - `template.rs`: string templates
//! - `lambda.rs`: function literals
//! - `control.rs`: `if`, `when`, `try` and loops
//!
//! # Newlines
//!
//! A binary operator on the next line ends the expression unless it is one
//! of the operators in [`allows_newline_before`]:
//!
//! ```text
//! val x = a     // `x = a`, then `-b` is a new statement
//!     - b
//! val y = a     // `y = a ?: b`
//!     ?: b
//! ```

mod args;
mod control;
mod lambda;
mod postfix;
mod primary;
mod template;

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use crate::precedence::{allows_newline_before, Precedence};
use crate::recovery::{EXPRESSION_FIRST, PREFIX_OPERATIONS};
use crate::Parser;

impl Parser<'_> {
    /// Parse a full expression.
    ///
    /// When the current token cannot start one, reports "Expecting an
    /// expression" and consumes nothing.
    pub fn parse_expression(&mut self) {
        if !self.at_set(EXPRESSION_FIRST) {
            self.error(ErrorCode::E1002, "Expecting an expression");
            return;
        }
        self.nested(|p| {
            p.parse_binary_expression(Precedence::LOOSEST);
        });
    }

    /// Parse operators of level `loosest` or tighter, left-associatively.
    ///
    /// Returns the tightest level an operator may still have to continue
    /// the chain. `as` and `is` take a type, not an expression, on the
    /// right; after one of them a tighter operator cannot follow:
    ///
    /// ```text
    /// a is B && c    // (a is B) && c
    /// a is B + c     // `+ c` is left for the caller
    /// ```
    fn parse_binary_expression(&mut self, loosest: Precedence) -> Precedence {
        let mut expression = self.mark();
        self.parse_prefix_expression();
        let mut tightest = Precedence::TIGHTEST;

        while !self.interrupted_with_newline() {
            let operation = self.current();
            let Some(level) = Precedence::of(operation) else {
                break;
            };
            if level < loosest || level > tightest {
                break;
            }
            self.parse_operation_reference();
            let kind = match operation {
                T::AsKw | T::AsSafe => {
                    self.parse_type_ref();
                    tightest = Precedence::As;
                    NodeKind::BinaryWithType
                }
                T::IsKw | T::NotIs => {
                    self.parse_type_ref();
                    tightest = Precedence::InOrIs;
                    NodeKind::IsExpression
                }
                _ => {
                    tightest = self.parse_binary_expression(level.higher_priority());
                    NodeKind::BinaryExpression
                }
            };
            let completed = expression.done(self, kind);
            expression = completed.precede(self);
        }

        expression.abandon(self);
        tightest
    }

    /// Whether the current token sits on a new line and cannot continue the
    /// expression before it.
    pub(crate) fn interrupted_with_newline(&self) -> bool {
        !allows_newline_before(self.current()) && self.newline_before()
    }

    fn parse_prefix_expression(&mut self) {
        self.nested(Self::parse_prefix_expression_inner);
    }

    fn parse_prefix_expression_inner(&mut self) {
        if self.at(T::At) {
            if !self.parse_local_declaration(false, false) {
                let expression = self.mark();
                self.parse_annotations();
                self.parse_prefix_expression();
                expression.done(self, NodeKind::AnnotatedExpression);
            }
            return;
        }

        // `!!x` is two negations here, not a postfix `!!`.
        let (label, prefix) = self.with_joining(false, |p| {
            (
                p.at_label_definition_or_missing_identifier(),
                p.at_set(PREFIX_OPERATIONS),
            )
        });
        if label {
            let expression = self.mark();
            self.parse_label_definition();
            self.parse_prefix_expression();
            expression.done(self, NodeKind::LabeledExpression);
        } else if prefix {
            let expression = self.mark();
            self.with_joining(false, Self::parse_operation_reference);
            self.parse_prefix_expression();
            expression.done(self, NodeKind::PrefixExpression);
        } else {
            self.parse_postfix_expression();
        }
    }

    /// `name@` with nothing between the name and the `@`, or a stray `@`.
    pub(crate) fn at_label_definition_or_missing_identifier(&self) -> bool {
        (self.at(T::Ident) && self.raw_lookup(1) == T::At) || self.at(T::At)
    }

    pub(crate) fn parse_label_definition(&mut self) {
        if self.at(T::At) {
            self.error_and_advance(
                ErrorCode::E1011,
                "Expecting identifier before '@' in label definition",
            );
            return;
        }
        let qualifier = self.mark();
        let label = self.mark();
        self.advance(); // name
        self.advance(); // @
        label.done(self, NodeKind::Label);
        qualifier.done(self, NodeKind::LabelQualifier);
    }

    /// Wrap the current operator token in an `OPERATION_REFERENCE`.
    pub(crate) fn parse_operation_reference(&mut self) {
        let reference = self.mark();
        self.advance();
        reference.done(self, NodeKind::OperationReference);
    }
}

#[cfg(test)]
mod tests;
