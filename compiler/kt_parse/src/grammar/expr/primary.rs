//! Atomic expressions: literals, names, parentheses, `this`/`super`,
//! object literals, jumps and collection literals.

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use crate::grammar::decl::NameMode;
use crate::recovery::{EXPRESSION_FIRST, EXPRESSION_FOLLOW};
use crate::Parser;

impl Parser<'_> {
    /// Parse one atom. Returns `false` after reporting "Expecting an
    /// element" when the current token starts none.
    pub(super) fn parse_atomic_expression(&mut self) -> bool {
        let parsed = match self.current() {
            T::LPar => {
                self.parse_parenthesized_expression();
                true
            }
            T::LBracket => {
                self.parse_as_collection_literal_expression(
                    NodeKind::CollectionLiteralExpression,
                    true,
                );
                true
            }
            T::ThisKw => {
                self.parse_this_expression();
                true
            }
            T::SuperKw => {
                self.parse_super_expression();
                true
            }
            T::ObjectKw => {
                self.parse_object_literal();
                true
            }
            T::ThrowKw => {
                self.parse_throw();
                true
            }
            T::ReturnKw => {
                self.parse_return();
                true
            }
            T::ContinueKw => {
                self.parse_jump(NodeKind::Continue);
                true
            }
            T::BreakKw => {
                self.parse_jump(NodeKind::Break);
                true
            }
            T::IfKw => {
                self.parse_if();
                true
            }
            T::WhenKw => {
                self.parse_when();
                true
            }
            T::TryKw => {
                self.parse_try();
                true
            }
            T::ForKw => {
                self.parse_for();
                true
            }
            T::WhileKw => {
                self.parse_while();
                true
            }
            T::DoKw => {
                self.parse_do_while();
                true
            }
            T::Ident => {
                // `context(A) fun () {}` as an anonymous function
                let declaration = self.at(T::ContextKw)
                    && self.nth(1) == T::LPar
                    && self.parse_local_declaration(true, false);
                if !declaration {
                    self.parse_simple_name_expression();
                }
                true
            }
            T::LBrace => {
                self.parse_function_literal(false, true);
                true
            }
            T::InterpolationPrefix | T::OpenQuote => {
                self.parse_string_template();
                true
            }
            T::TrueKw | T::FalseKw => {
                self.parse_one_token_expression(NodeKind::BooleanConstant);
                true
            }
            T::IntegerLiteral => {
                self.parse_one_token_expression(NodeKind::IntegerConstant);
                true
            }
            T::CharacterLiteral => {
                self.parse_one_token_expression(NodeKind::CharacterConstant);
                true
            }
            T::FloatLiteral => {
                self.parse_one_token_expression(NodeKind::FloatConstant);
                true
            }
            T::NullKw => {
                self.parse_one_token_expression(NodeKind::Null);
                true
            }
            T::ClassKw | T::InterfaceKw | T::FunKw | T::ValKw | T::VarKw | T::TypealiasKw => {
                // A declaration on its own line is a statement of its own;
                // only an anonymous `fun` may be an expression.
                let rollback = self.newline_before();
                self.parse_local_declaration(rollback, false)
            }
            _ => false,
        };

        if !parsed {
            self.error_with_recovery(
                ErrorCode::E1002,
                "Expecting an element",
                Some(EXPRESSION_FOLLOW.with(T::LongTemplateEntryEnd)),
            );
        }
        parsed
    }

    /// `name` as a `REFERENCE_EXPRESSION`.
    pub(crate) fn parse_simple_name_expression(&mut self) {
        let name = self.mark();
        self.expect(T::Ident, ErrorCode::E1004, "Expecting an identifier");
        name.done(self, NodeKind::ReferenceExpression);
    }

    fn parse_one_token_expression(&mut self, kind: NodeKind) {
        let expression = self.mark();
        self.advance();
        expression.done(self, kind);
    }

    fn parse_parenthesized_expression(&mut self) {
        let expression = self.mark();
        self.with_newlines(false, |p| {
            p.advance(); // (
            if p.at(T::RPar) {
                p.error(ErrorCode::E1002, "Expecting an expression");
            } else {
                p.parse_expression();
            }
            p.expect(T::RPar, ErrorCode::E1003, "Expecting ')'");
        });
        expression.done(self, NodeKind::Parenthesized);
    }

    /// `[a, b]` as `kind`: a collection literal, or the `INDICES` of an
    /// array access. Empty slots become `EMPTY_VALUE_ARGUMENT`.
    pub(super) fn parse_as_collection_literal_expression(
        &mut self,
        kind: NodeKind,
        can_be_empty: bool,
    ) {
        let literal = self.mark();
        self.with_newlines(false, |p| {
            p.advance(); // [
            if !can_be_empty && p.at(T::RBracket) {
                let empty = p.mark();
                empty.done(p, NodeKind::EmptyValueArgument);
            } else {
                p.parse_inner_expressions();
            }
            p.expect(T::RBracket, ErrorCode::E1003, "Expecting ']'");
        });
        literal.done(self, kind);
    }

    fn parse_inner_expressions(&mut self) {
        loop {
            if self.at(T::Comma) {
                let empty = self.mark();
                empty.done(self, NodeKind::EmptyValueArgument);
            } else if self.at(T::RBracket) {
                break;
            } else {
                self.parse_expression();
                if !self.at(T::Comma) {
                    break;
                }
            }
            self.advance(); // ,
        }
    }

    fn parse_this_expression(&mut self) {
        let expression = self.mark();
        let reference = self.mark();
        self.advance(); // this
        reference.done(self, NodeKind::ReferenceExpression);
        self.parse_label_reference_with_no_whitespace();
        expression.done(self, NodeKind::ThisExpression);
    }

    /// `super`, `super<Base>`, `super@Outer`, `super<Base>@Outer`.
    fn parse_super_expression(&mut self) {
        let expression = self.mark();
        let reference = self.mark();
        self.advance(); // super
        reference.done(self, NodeKind::ReferenceExpression);

        if self.at(T::Lt) {
            let supertype = self.mark();
            let closed = self.with_newlines(false, |p| {
                p.advance(); // <
                p.parse_type_ref();
                p.consume_if(T::Gt)
            });
            if closed {
                supertype.abandon(self);
            } else {
                // `super < x`
                supertype.rollback_to(self);
            }
        }
        self.parse_label_reference_with_no_whitespace();
        expression.done(self, NodeKind::SuperExpression);
    }

    fn parse_object_literal(&mut self) {
        let literal = self.mark();
        let declaration = self.mark();
        self.parse_object(NameMode::Prohibited, false);
        declaration.done(self, NodeKind::ObjectDeclaration);
        literal.done(self, NodeKind::ObjectLiteral);
    }

    fn parse_throw(&mut self) {
        let expression = self.mark();
        self.advance(); // throw
        self.parse_expression();
        expression.done(self, NodeKind::Throw);
    }

    /// `return`, `return@label`, `return value`. The value must start on
    /// the same line.
    fn parse_return(&mut self) {
        let expression = self.mark();
        self.advance(); // return
        self.parse_label_reference_with_no_whitespace();
        if self.at_set(EXPRESSION_FIRST) && !self.at(T::EolOrSemicolon) {
            self.parse_expression();
        }
        expression.done(self, NodeKind::Return);
    }

    fn parse_jump(&mut self, kind: NodeKind) {
        let expression = self.mark();
        self.advance(); // break or continue
        self.parse_label_reference_with_no_whitespace();
        expression.done(self, kind);
    }

    /// `@label` directly after `this`, `super`, `return`, `break` or
    /// `continue`.
    fn parse_label_reference_with_no_whitespace(&mut self) {
        if !self.at(T::At) || self.newline_before() {
            return;
        }
        if self.raw_lookup(-1).is_trivia() {
            self.error(
                ErrorCode::E1011,
                "There should be no space or comments before '@' in label reference",
            );
        }
        if self.raw_lookup(1) != T::Ident {
            self.error_and_advance(ErrorCode::E1011, "Label must be named");
            return;
        }
        let qualifier = self.mark();
        let label = self.mark();
        self.advance(); // @
        self.advance(); // name
        label.done(self, NodeKind::Label);
        qualifier.done(self, NodeKind::LabelQualifier);
    }
}
