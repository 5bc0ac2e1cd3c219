//! Function literals.
//!
//! `{` opens either a lambda or, in a control structure body, a plain
//! block. The parameter list is parsed speculatively: it is only kept when
//! a `->` follows.
//!
//! ```text
//! { a, b -> a + b }    // two parameters
//! { a -> }             // one parameter, empty body
//! { (a, b), c -> }     // destructuring
//! { -> 1 }             // explicit empty parameter list
//! { a }                // no parameters: `a` is the body
//! ```

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use crate::builder::Marker;
use crate::grammar::decl::DestructuringMode;
use crate::recovery::{LAMBDA_DESTRUCTURING_FOLLOW, LAMBDA_DESTRUCTURING_RECOVERY};
use crate::{Parser, TokenSet};

impl Parser<'_> {
    /// Parse `{ params -> statements }` starting at `{`.
    ///
    /// With `prefer_block`, a literal without an arrow is produced as a
    /// `BLOCK` (the body of `if`, `for`, `when` entries). With `collapse`
    /// and lazy parsing enabled, the body is skipped by brace matching and
    /// the `FUNCTION_LITERAL` left lazy.
    pub fn parse_function_literal(&mut self, prefer_block: bool, collapse: bool) {
        let lazy = collapse && self.config.lazy;
        let literal_expression = self.mark();
        let literal = self.mark();

        self.with_newlines(true, |p| {
            p.advance(); // {

            let params_found = p.parse_function_literal_parameters();

            if !params_found && prefer_block {
                literal.abandon(p);
                p.parse_statements(false);
                p.expect(T::RBrace, ErrorCode::E1003, "Expecting '}'");
                literal_expression.done(p, NodeKind::Block);
                return;
            }

            if lazy {
                // An unclosed body is parsed eagerly so it can report the
                // missing `}`.
                let body_start = p.cursor.checkpoint();
                if p.advance_balanced_block() {
                    literal.collapse(p, NodeKind::FunctionLiteral);
                    literal_expression.done(p, NodeKind::LambdaExpression);
                    return;
                }
                p.cursor.restore(body_start);
            }

            let body = p.mark();
            p.parse_statements(false);
            let body = body.done(p, NodeKind::Block);
            body.set_comment_binders(p);
            p.expect(T::RBrace, ErrorCode::E1003, "Expecting '}'");
            literal.done(p, NodeKind::FunctionLiteral);
            literal_expression.done(p, NodeKind::LambdaExpression);
        });
    }

    /// Try the parameter list after `{`. Returns whether one was kept.
    fn parse_function_literal_parameters(&mut self) -> bool {
        match self.current() {
            T::Arrow => {
                let list = self.mark();
                list.done(self, NodeKind::ValueParameterList);
                self.advance();
                true
            }
            T::Ident | T::Colon | T::LPar | T::LBracket => {
                let attempt = self.mark();
                // `{ a, ` and `{ a: ` can only be parameters; anything else
                // is a parameter list only if an arrow shows up.
                let prefer_params = matches!(self.nth(1), T::Comma | T::Colon);
                self.parse_function_literal_parameter_list();
                self.keep_parameters_or_rollback(attempt, prefer_params)
            }
            _ => false,
        }
    }

    /// Keep the speculatively parsed parameters when a `->` follows. With
    /// `missing_arrow_ok`, a `}` also keeps them and reports the arrow.
    fn keep_parameters_or_rollback(&mut self, attempt: Marker, missing_arrow_ok: bool) -> bool {
        if self.at(T::Arrow) {
            self.advance();
            attempt.abandon(self);
            true
        } else if missing_arrow_ok && self.at(T::RBrace) {
            attempt.abandon(self);
            self.expect(T::Arrow, ErrorCode::E1003, "An -> is expected");
            true
        } else {
            attempt.rollback_to(self);
            false
        }
    }

    fn parse_function_literal_parameter_list(&mut self) {
        let list = self.mark();

        while !self.eof() && !self.at(T::Arrow) {
            let parameter = self.mark();

            if self.at(T::Colon) {
                self.error(ErrorCode::E1004, "Expecting parameter name");
            } else if self.at(T::LPar) || self.at(T::LBracket) {
                let mode = DestructuringMode::for_parameter(self);
                let destructuring = self.mark();
                self.parse_multi_declaration_entry(
                    LAMBDA_DESTRUCTURING_FOLLOW,
                    LAMBDA_DESTRUCTURING_RECOVERY,
                    mode,
                );
                destructuring.done(self, NodeKind::DestructuringDeclaration);
            } else {
                self.expect_with_recovery(
                    T::Ident,
                    ErrorCode::E1004,
                    "Expecting parameter name",
                    Some(TokenSet::new(&[T::Arrow])),
                );
            }

            if self.at(T::Colon) {
                self.advance();
                self.parse_type_ref_with_recovery(TokenSet::new(&[T::Arrow, T::Comma]));
            }
            parameter.done(self, NodeKind::ValueParameter);

            if self.at(T::Arrow) {
                break;
            }
            if !self.consume_if(T::Comma) {
                self.error(ErrorCode::E1003, "Expecting '->' or ','");
                break;
            }
        }

        list.done(self, NodeKind::ValueParameterList);
    }
}
