//! Value arguments and trailing lambdas.

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use crate::recovery::{EXPRESSION_FIRST, EXPRESSION_FOLLOW};
use crate::Parser;

impl Parser<'_> {
    /// Parse `(a, name = b, *c)`.
    ///
    /// A trailing comma is accepted. A missing comma between two arguments
    /// is reported and parsing goes on with the next argument.
    pub fn parse_value_argument_list(&mut self) {
        let list = self.mark();
        self.with_newlines(false, |p| {
            if !p.expect_with_recovery(
                T::LPar,
                ErrorCode::E1003,
                "Expecting an argument list",
                Some(EXPRESSION_FOLLOW),
            ) {
                return;
            }
            if !p.at(T::RPar) {
                loop {
                    let start = p.position();
                    p.parse_value_argument();
                    if p.at(T::Colon) && p.nth(1) == T::Ident {
                        p.error_and_advance_n(ErrorCode::E1005, "Unexpected type specification", 2);
                    }
                    if p.at(T::Comma) {
                        p.advance();
                        if p.at(T::RPar) {
                            break;
                        }
                        continue;
                    }
                    if p.at_set(EXPRESSION_FIRST) && p.position() != start {
                        p.error(ErrorCode::E1003, "Expecting ','");
                        continue;
                    }
                    break;
                }
            }
            p.expect_with_recovery(T::RPar, ErrorCode::E1003, "Expecting ')'", Some(EXPRESSION_FOLLOW));
        });
        list.done(self, NodeKind::ValueArgumentList);
    }

    fn parse_value_argument(&mut self) {
        let argument = self.mark();
        if self.at(T::Ident) && self.nth(1) == T::Eq {
            let name = self.mark();
            let reference = self.mark();
            self.advance();
            reference.done(self, NodeKind::ReferenceExpression);
            name.done(self, NodeKind::ValueArgumentName);
            self.advance(); // =
        }
        self.consume_if(T::Mul);
        if self.at(T::RPar) || self.at(T::Comma) {
            let empty = self.mark();
            empty.done(self, NodeKind::EmptyValueArgument);
        } else {
            self.parse_expression();
        }
        argument.done(self, NodeKind::ValueArgument);
    }

    /// Parse trailing lambdas: `f { } label@{ } @Ann { }`. Returns whether
    /// there was at least one.
    pub(super) fn parse_call_with_closure(&mut self) -> bool {
        let mut found = false;
        loop {
            let argument = self.mark();
            if !self.parse_annotated_lambda(false) {
                argument.rollback_to(self);
                break;
            }
            argument.done(self, NodeKind::LambdaArgument);
            found = true;
        }
        found
    }

    /// A lambda, optionally annotated and labeled. Consumes nothing and
    /// returns `false` when no `{` follows the prefix.
    pub(crate) fn parse_annotated_lambda(&mut self, prefer_block: bool) -> bool {
        let annotated = self.mark();
        let annotations = self.parse_annotations();

        let labeled = self.mark();
        let label = self.at_label_definition_or_missing_identifier();
        if label {
            self.parse_label_definition();
        }

        if !self.at(T::LBrace) {
            labeled.abandon(self);
            annotated.rollback_to(self);
            return false;
        }

        self.parse_function_literal(prefer_block, true);

        labeled.done_if(self, NodeKind::LabeledExpression, label);
        annotated.done_if(self, NodeKind::AnnotatedExpression, annotations);
        true
    }
}
