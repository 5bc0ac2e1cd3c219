//! Postfix forms: calls, indexing, member access, `++`/`--`/`!!` and
//! callable references.

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use crate::builder::{CompletedMarker, Marker};
use crate::recovery::{POSTFIX_OPERATIONS, TYPE_ARGUMENT_LIST_STOPPERS};
use crate::Parser;

impl Parser<'_> {
    pub(super) fn parse_postfix_expression(&mut self) {
        let mut expression = self.mark();

        let mut first_parsed = if self.at(T::ColonColon) {
            let reference = self.mark();
            self.parse_double_colon_suffix(reference);
            true
        } else {
            self.parse_atomic_expression()
        };

        loop {
            if self.interrupted_with_newline() {
                break;
            }
            let completed = if self.at(T::LBracket) {
                self.parse_array_access();
                expression.done(self, NodeKind::ArrayAccessExpression)
            } else if self.parse_call_suffix() {
                expression.done(self, NodeKind::CallExpression)
            } else if self.at(T::Dot) || self.at(T::SafeAccess) {
                let kind = if self.at(T::Dot) {
                    NodeKind::DotQualifiedExpression
                } else {
                    NodeKind::SafeAccessExpression
                };
                self.advance();
                if !first_parsed {
                    // `.foo` with nothing usable before the dot: start over
                    // from the selector.
                    expression.abandon(self);
                    expression = self.mark();
                    first_parsed = self.parse_atomic_expression();
                    continue;
                }
                self.parse_selector_call_expression();
                expression.done(self, kind)
            } else if self.at_set(POSTFIX_OPERATIONS) {
                self.parse_operation_reference();
                expression.done(self, NodeKind::PostfixExpression)
            } else {
                self.skip_question_marks_before_double_colon();
                if !self.at(T::ColonColon) {
                    break;
                }
                self.parse_double_colon_suffix(expression)
            };
            expression = completed.precede(self);
        }

        expression.abandon(self);
    }

    /// `Foo?::bar`: the `?`s belong to the receiver type.
    fn skip_question_marks_before_double_colon(&mut self) {
        if !self.at(T::Quest) {
            return;
        }
        let mut count = 1;
        while self.nth(count) == T::Quest {
            count += 1;
        }
        if self.nth(count) == T::ColonColon {
            for _ in 0..count {
                self.advance();
            }
        }
    }

    /// `::name`, `::class`, with the receiver (if any) already inside
    /// `expression`.
    fn parse_double_colon_suffix(&mut self, expression: Marker) -> CompletedMarker {
        self.advance(); // ::

        if self.at(T::ClassKw) {
            self.advance();
            return expression.done(self, NodeKind::ClassLiteralExpression);
        }

        self.parse_simple_name_expression();

        if self.at(T::Lt) {
            let arguments = self.mark();
            if self.try_parse_type_argument_list(TYPE_ARGUMENT_LIST_STOPPERS) {
                arguments.error(self, ErrorCode::E1005, "Type arguments are not allowed");
            } else {
                arguments.rollback_to(self);
            }
        }

        if self.at(T::LPar) && !self.newline_before() {
            let call = self.mark();
            self.parse_call_suffix();
            call.error(
                self,
                ErrorCode::E1013,
                "This syntax is reserved for future use; to call a reference, enclose it in parentheses: (foo::bar)(args)",
            );
        }

        expression.done(self, NodeKind::CallableReferenceExpression)
    }

    /// Everything that may follow a callee: type arguments, a value
    /// argument list and trailing lambdas. Returns `false`, consuming
    /// nothing, when none of them is there.
    pub(super) fn parse_call_suffix(&mut self) -> bool {
        if self.parse_call_with_closure() {
            return true;
        }
        if self.at(T::LPar) {
            self.parse_value_argument_list();
            self.parse_call_with_closure();
            return true;
        }
        if self.at(T::Lt) {
            let arguments = self.mark();
            if self.try_parse_type_argument_list(TYPE_ARGUMENT_LIST_STOPPERS) {
                arguments.done(self, NodeKind::TypeArgumentList);
                if !self.newline_before() && self.at(T::LPar) {
                    self.parse_value_argument_list();
                }
                self.parse_call_with_closure();
                return true;
            }
            // `a < b` after all
            arguments.rollback_to(self);
        }
        false
    }

    /// The part after `.` or `?.`: an atom, called when a call suffix
    /// follows on the same line.
    fn parse_selector_call_expression(&mut self) {
        let call = self.mark();
        self.parse_atomic_expression();
        if !self.newline_before() && self.parse_call_suffix() {
            call.done(self, NodeKind::CallExpression);
        } else {
            call.abandon(self);
        }
    }

    fn parse_array_access(&mut self) {
        self.parse_as_collection_literal_expression(NodeKind::Indices, false);
    }
}
