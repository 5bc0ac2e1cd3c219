//! Statements, blocks and contract descriptions.
//!
//! A statement is a local declaration or an expression. Outside script top
//! level, statements on the same line need a `;` between them:
//!
//! ```text
//! val a = 1; a + 1      // ok
//! val a = 1 a + 1       // "Unexpected tokens (use ';' ...)"
//! ```

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use crate::grammar::decl::{DeclarationMode, NameMode};
use crate::recovery::{EXPRESSION_FIRST, STATEMENT_FIRST, STATEMENT_NEW_LINE_QUICK_RECOVERY};
use crate::{Parser, TokenSet};

const SEVERAL_STATEMENTS: &str =
    "Unexpected tokens (use ';' to separate expressions on the same line)";

const STATEMENT_END: TokenSet = TokenSet::new(&[T::EolOrSemicolon, T::LBrace, T::RBrace]);

impl Parser<'_> {
    /// Statements up to a `}` or the end of input.
    ///
    /// With `script`, top-level expressions are wrapped in
    /// `SCRIPT_INITIALIZER` and properties may have accessors.
    pub fn parse_statements(&mut self, script: bool) {
        while self.consume_if(T::Semicolon) {}

        while !self.eof() && !self.at(T::RBrace) {
            let start = self.position();
            if !self.at_set(STATEMENT_FIRST) {
                self.error_and_advance(ErrorCode::E1002, "Expecting an element");
            }
            if self.at_set(STATEMENT_FIRST) {
                self.parse_statement(script);
            }

            if self.at(T::Semicolon) {
                while self.consume_if(T::Semicolon) {}
            } else if self.at(T::RBrace) {
                break;
            } else if !script && !self.newline_before() {
                if self.at_set(STATEMENT_NEW_LINE_QUICK_RECOVERY) {
                    self.error(ErrorCode::E1007, SEVERAL_STATEMENTS);
                } else {
                    self.error_until(ErrorCode::E1007, SEVERAL_STATEMENTS, STATEMENT_END);
                }
            }

            if self.position() == start {
                self.error_and_advance(ErrorCode::E1001, "Unexpected token");
            }
        }
    }

    fn parse_statement(&mut self, script: bool) {
        if self.parse_local_declaration(false, script) {
            return;
        }
        if !self.at_set(EXPRESSION_FIRST) {
            self.error_and_advance(ErrorCode::E1002, "Expecting a statement");
        } else if script {
            let initializer = self.mark();
            self.parse_block_level_expression();
            initializer.done(self, NodeKind::ScriptInitializer);
        } else {
            self.parse_block_level_expression();
        }
    }

    /// An expression in statement position. Annotations followed by a line
    /// break annotate the whole statement rather than its first operand:
    ///
    /// ```text
    /// @Suppress("x")
    /// a + b           // ANNOTATED_EXPRESSION(a + b)
    /// @Ann a + b      // BINARY_EXPRESSION(ANNOTATED_EXPRESSION(a), b)
    /// ```
    pub(crate) fn parse_block_level_expression(&mut self) {
        if !self.at(T::At) {
            self.parse_expression();
            return;
        }

        let expression = self.mark();
        self.parse_annotations();
        if !self.newline_before() {
            expression.rollback_to(self);
            self.parse_expression();
            return;
        }
        self.nested(Self::parse_block_level_expression);
        expression.done(self, NodeKind::AnnotatedExpression);
    }

    /// Try a declaration with its modifiers. Returns `false`, consuming
    /// nothing, when there is none.
    ///
    /// With `rollback_if_definitely_not_expression`, only an anonymous
    /// function is accepted: anything else is left for the statement loop.
    pub(crate) fn parse_local_declaration(
        &mut self,
        rollback_if_definitely_not_expression: bool,
        script: bool,
    ) -> bool {
        let declaration = self.mark();
        let modifiers = self.parse_modifier_list(TokenSet::EMPTY);

        let kind = if self.at(T::FunKw) {
            self.parse_function(rollback_if_definitely_not_expression)
        } else if rollback_if_definitely_not_expression
            || (self.at(T::ObjectKw) && matches!(self.nth(1), T::Colon | T::LBrace))
        {
            // `object : Base {}` in statement position is an object literal.
            None
        } else {
            let mode = if script {
                DeclarationMode::ScriptTopLevel
            } else {
                DeclarationMode::Local
            };
            self.parse_common_declaration(modifiers, NameMode::Required, mode)
        };

        let Some(kind) = kind else {
            declaration.rollback_to(self);
            return false;
        };
        let declaration = declaration.done(self, kind);
        // Comments above a local variable usually describe the statements
        // after it too.
        if !matches!(
            declaration.kind(),
            NodeKind::Property | NodeKind::DestructuringDeclaration
        ) {
            declaration.set_comment_binders(self);
        }
        true
    }

    /// `{ statements }`.
    pub fn parse_block(&mut self) {
        self.nested(|p| {
            let block = p.mark();
            p.with_newlines(true, |p| {
                p.expect(T::LBrace, ErrorCode::E1003, "Expecting '{' to open a block");
                p.parse_statements(false);
                p.expect(T::RBrace, ErrorCode::E1003, "Expecting '}'");
            });
            block.done(p, NodeKind::Block);
        });
    }

    /// Skip to the `}` matching an already consumed `{`. Returns `false`
    /// when the input ends first.
    pub(crate) fn advance_balanced_block(&mut self) -> bool {
        let mut depth = 1usize;
        while !self.eof() {
            match self.current() {
                T::LBrace => depth += 1,
                T::RBrace => depth -= 1,
                _ => {}
            }
            self.advance();
            if depth == 0 {
                return true;
            }
        }
        false
    }

    /// `contract [effect, ...]` after a function signature.
    pub fn parse_contract_description_block(&mut self) {
        self.advance_as(T::ContractKw);

        let list = self.mark();
        self.expect(T::LBracket, ErrorCode::E1003, "Expecting '['");
        self.with_newlines(true, |p| {
            while !p.eof() && !p.at(T::RBracket) {
                if p.at(T::Comma) {
                    p.error_and_advance(ErrorCode::E1002, "Expecting a contract effect");
                    continue;
                }
                let effect = p.mark();
                p.parse_expression();
                effect.done(p, NodeKind::ContractEffect);
                if !p.consume_if(T::Comma) {
                    break;
                }
            }
            p.expect(T::RBracket, ErrorCode::E1003, "Expecting ']'");
        });
        list.done(self, NodeKind::ContractEffectList);
    }
}
