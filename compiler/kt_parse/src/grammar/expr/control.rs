//! Control structures: `if`, `when`, `try`, `for`, `while` and `do`.

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use crate::grammar::decl::{DeclarationMode, DestructuringMode};
use crate::recovery::{
    EXPRESSION_FIRST, PARAMETER_NAME_RECOVERY, TRY_CATCH_RECOVERY, WHEN_CONDITION_RECOVERY,
    WHEN_CONDITION_RECOVERY_WITH_ARROW,
};
use crate::{Parser, TokenSet};

const WHEN_SUBJECT_ANNOTATIONS_STOP: TokenSet = TokenSet::new(&[T::Eq, T::RPar]);

const WHEN_ELSE_RECOVERY: TokenSet =
    TokenSet::new(&[T::Arrow, T::LBrace, T::RBrace, T::EolOrSemicolon]);

const WHEN_GUARD_RECOVERY: TokenSet = TokenSet::new(&[T::LBrace, T::RBrace, T::Arrow]);

const LOOP_PARAMETER_MODIFIERS_STOP: TokenSet = TokenSet::new(&[T::InKw, T::RPar, T::Colon]);

const LOOP_DESTRUCTURING_FOLLOW: TokenSet = TokenSet::new(&[T::InKw, T::LBrace]);

const LOOP_IN_RECOVERY: TokenSet = TokenSet::new(&[T::LPar, T::LBrace, T::RPar]);

impl Parser<'_> {
    /// The body of `if`, `else`, loops and `when` entries: a block, a
    /// (possibly labeled or annotated) lambda, or a single expression.
    pub(super) fn parse_control_structure_body(&mut self) {
        if !self.parse_annotated_lambda(true) {
            self.parse_block_level_expression();
        }
    }

    /// `(expression)` after `if` and `while`.
    fn parse_condition(&mut self) {
        self.with_newlines(false, |p| {
            if !p.expect_with_recovery(
                T::LPar,
                ErrorCode::E1003,
                "Expecting a condition in parentheses '(...)'",
                Some(EXPRESSION_FIRST),
            ) {
                return;
            }
            let condition = p.mark();
            p.parse_expression();
            condition.done(p, NodeKind::Condition);
            p.expect(T::RPar, ErrorCode::E1003, "Expecting ')'");
        });
    }

    /// `if (c) a else b`. A `;` between the branches is absorbed:
    /// `if (c) a; else b`.
    pub(super) fn parse_if(&mut self) {
        let expression = self.mark();
        self.advance(); // if

        self.parse_condition();

        let then_branch = self.mark();
        if !self.at(T::ElseKw) && !self.at(T::Semicolon) {
            self.parse_control_structure_body();
        }
        if self.at(T::Semicolon) && self.nth(1) == T::ElseKw {
            self.advance();
        }
        then_branch.done(self, NodeKind::Then);

        // `else ->` belongs to an enclosing `when`.
        if self.at(T::ElseKw) && self.nth(1) != T::Arrow {
            self.advance();
            let else_branch = self.mark();
            if !self.at(T::Semicolon) {
                self.parse_control_structure_body();
            }
            else_branch.done(self, NodeKind::Else);
        }

        expression.done(self, NodeKind::If);
    }

    /// `when (subject) { entries }`. The subject may declare a value:
    /// `when (val x = f()) { ... }`.
    pub(super) fn parse_when(&mut self) {
        let expression = self.mark();
        self.advance(); // when

        self.with_newlines(false, |p| {
            if !p.consume_if(T::LPar) {
                return;
            }
            let declaration = p.mark();
            p.parse_annotations_list(WHEN_SUBJECT_ANNOTATIONS_STOP);
            if p.at(T::ValKw) || p.at(T::VarKw) {
                let kind = p.parse_property(DeclarationMode::Local);
                let property = declaration.done(p, kind);
                property.set_comment_binders(p);
            } else {
                declaration.rollback_to(p);
                p.parse_expression();
            }
            p.expect(T::RPar, ErrorCode::E1003, "Expecting ')'");
        });

        self.with_newlines(true, |p| {
            if !p.expect(T::LBrace, ErrorCode::E1003, "Expecting '{'") {
                return;
            }
            while !p.eof() && !p.at(T::RBrace) {
                let start = p.position();
                p.parse_when_entry();
                if p.position() == start {
                    p.error_and_advance(ErrorCode::E1010, "Expecting a when-condition");
                }
            }
            p.expect(T::RBrace, ErrorCode::E1003, "Expecting '}'");
        });

        expression.done(self, NodeKind::When);
    }

    fn parse_when_entry(&mut self) {
        let entry = self.mark();

        if self.at(T::ElseKw) {
            self.advance();
            self.parse_when_entry_guard_or_suggest();

            if !self.at(T::Arrow) {
                self.error_until(ErrorCode::E1010, "Expecting '->'", WHEN_ELSE_RECOVERY);
            }

            if self.consume_if(T::Arrow) {
                if self.at_set(WHEN_CONDITION_RECOVERY) {
                    self.error(ErrorCode::E1002, "Expecting an element");
                } else {
                    self.parse_control_structure_body();
                }
            } else if self.at(T::LBrace) {
                self.parse_control_structure_body();
            } else if !self.at_set(WHEN_CONDITION_RECOVERY) {
                self.error_and_advance(ErrorCode::E1010, "Expecting '->'");
            }
        } else {
            self.parse_when_entry_not_else();
        }

        entry.done(self, NodeKind::WhenEntry);
        self.consume_if(T::Semicolon);
    }

    fn parse_when_entry_not_else(&mut self) {
        loop {
            while self.at(T::Comma) {
                self.error_and_advance(ErrorCode::E1010, "Expecting a when-condition");
            }
            self.parse_when_condition();
            if !self.consume_if(T::Comma) {
                break;
            }
            if self.at(T::Arrow) {
                break;
            }
        }

        self.parse_when_entry_guard_or_suggest();

        self.expect_with_recovery(
            T::Arrow,
            ErrorCode::E1010,
            "Expecting '->'",
            Some(WHEN_CONDITION_RECOVERY),
        );
        if self.at_set(WHEN_CONDITION_RECOVERY) {
            self.error(ErrorCode::E1002, "Expecting an element");
        } else {
            self.parse_control_structure_body();
        }
    }

    /// `if guard` after the conditions. `&&` in its place is reported and
    /// skipped.
    fn parse_when_entry_guard_or_suggest(&mut self) {
        if self.at(T::AndAnd) {
            self.error_until(
                ErrorCode::E1010,
                "Unexpected '&&', use 'if' to introduce additional conditions; see https://kotl.in/guards-in-when",
                WHEN_GUARD_RECOVERY,
            );
        } else if self.at(T::IfKw) {
            let guard = self.mark();
            self.advance();
            self.parse_expression();
            guard.done(self, NodeKind::WhenEntryGuard);
        }
    }

    fn parse_when_condition(&mut self) {
        let condition = self.mark();
        let kind = self.with_newlines(false, |p| match p.current() {
            T::InKw | T::NotIn => {
                p.parse_operation_reference();
                if p.at_set(WHEN_CONDITION_RECOVERY_WITH_ARROW) {
                    p.error(ErrorCode::E1002, "Expecting an element");
                } else {
                    p.parse_expression();
                }
                NodeKind::WhenConditionInRange
            }
            T::IsKw | T::NotIs => {
                p.advance();
                if p.at_set(WHEN_CONDITION_RECOVERY_WITH_ARROW) {
                    p.error(ErrorCode::E1005, "Expecting a type");
                } else {
                    p.parse_type_ref();
                }
                NodeKind::WhenConditionIsPattern
            }
            T::RBrace | T::ElseKw | T::Arrow | T::Dot => {
                p.error(
                    ErrorCode::E1010,
                    "Expecting an expression, is-condition or in-condition",
                );
                NodeKind::WhenConditionExpression
            }
            _ => {
                p.parse_expression();
                NodeKind::WhenConditionExpression
            }
        });
        condition.done(self, kind);
    }

    /// `try { } catch (e: E) { } finally { }`.
    pub(super) fn parse_try(&mut self) {
        let expression = self.mark();
        self.advance(); // try

        self.parse_block();

        let mut handled = false;
        while self.at(T::CatchKw) {
            handled = true;
            self.parse_catch();
        }

        if self.at(T::FinallyKw) {
            handled = true;
            let finally = self.mark();
            self.advance_as(T::FinallyKw);
            self.parse_block();
            finally.done(self, NodeKind::Finally);
        }

        if !handled {
            self.error(ErrorCode::E1012, "Expecting 'catch' or 'finally'");
        }

        expression.done(self, NodeKind::Try);
    }

    fn parse_catch(&mut self) {
        let catch = self.mark();
        self.advance_as(T::CatchKw);

        if self.at_set(TRY_CATCH_RECOVERY) {
            self.error(ErrorCode::E1004, "Expecting exception variable declaration");
        } else {
            let parameters = self.mark();
            self.expect_with_recovery(
                T::LPar,
                ErrorCode::E1003,
                "Expecting '('",
                Some(TRY_CATCH_RECOVERY),
            );
            if self.at_set(TRY_CATCH_RECOVERY) {
                self.error(ErrorCode::E1004, "Expecting exception variable declaration");
            } else {
                self.parse_value_parameter(true);
                self.consume_if(T::Comma);
                self.expect_with_recovery(
                    T::RPar,
                    ErrorCode::E1003,
                    "Expecting ')'",
                    Some(TRY_CATCH_RECOVERY),
                );
            }
            parameters.done(self, NodeKind::ValueParameterList);
        }

        if self.at(T::LBrace) {
            self.parse_block();
        } else {
            self.error(ErrorCode::E1003, "Expecting a block: { ... }");
        }

        catch.done(self, NodeKind::Catch);
    }

    /// `for (x in xs) body`, `for ((a, b) in pairs) body`.
    pub(super) fn parse_for(&mut self) {
        let expression = self.mark();
        self.advance(); // for

        if self.expect_with_recovery(
            T::LPar,
            ErrorCode::E1003,
            "Expecting '(' to open a loop range",
            Some(EXPRESSION_FIRST),
        ) {
            self.with_newlines(false, |p| {
                if p.at(T::RPar) {
                    p.error(ErrorCode::E1004, "Expecting a variable name");
                } else {
                    p.parse_loop_parameter();
                    if p.expect_with_recovery(
                        T::InKw,
                        ErrorCode::E1003,
                        "Expecting 'in'",
                        Some(LOOP_IN_RECOVERY),
                    ) {
                        let range = p.mark();
                        p.parse_expression();
                        range.done(p, NodeKind::LoopRange);
                    }
                }
                p.expect(T::RPar, ErrorCode::E1003, "Expecting ')'");
            });
        }

        self.parse_loop_body();
        expression.done(self, NodeKind::For);
    }

    fn parse_loop_parameter(&mut self) {
        let parameter = self.mark();

        if !self.at(T::InKw) {
            self.parse_modifier_list(LOOP_PARAMETER_MODIFIERS_STOP);
        }
        if self.at(T::ValKw) || self.at(T::VarKw) {
            self.advance();
        }

        if self.at(T::LPar) || self.at(T::LBracket) {
            let mode = DestructuringMode::for_parameter(self);
            let destructuring = self.mark();
            self.parse_multi_declaration_entry(
                LOOP_DESTRUCTURING_FOLLOW,
                LOOP_DESTRUCTURING_FOLLOW.union(PARAMETER_NAME_RECOVERY),
                mode,
            );
            destructuring.done(self, NodeKind::DestructuringDeclaration);
        } else {
            self.expect_with_recovery(
                T::Ident,
                ErrorCode::E1004,
                "Expecting a variable name",
                Some(TokenSet::new(&[T::Colon, T::InKw])),
            );
            if self.at(T::Colon) {
                self.advance();
                self.parse_type_ref_with_recovery(TokenSet::new(&[T::InKw]));
            }
        }

        parameter.done(self, NodeKind::ValueParameter);
    }

    /// `BODY` of a loop; a lone `;` leaves it empty.
    fn parse_loop_body(&mut self) {
        let body = self.mark();
        if !self.at(T::Semicolon) {
            self.parse_control_structure_body();
        }
        body.done(self, NodeKind::Body);
    }

    pub(super) fn parse_while(&mut self) {
        let expression = self.mark();
        self.advance(); // while
        self.parse_condition();
        self.parse_loop_body();
        expression.done(self, NodeKind::While);
    }

    /// `do body while (condition)`; the body may be omitted.
    pub(super) fn parse_do_while(&mut self) {
        let expression = self.mark();
        self.advance(); // do

        if !self.at(T::WhileKw) {
            self.parse_loop_body();
        }

        if self.expect(
            T::WhileKw,
            ErrorCode::E1003,
            "Expecting 'while' followed by a post-condition",
        ) {
            self.parse_condition();
        }

        expression.done(self, NodeKind::DoWhile);
    }
}
