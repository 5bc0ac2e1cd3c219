//! Type references and parameter lists.
//!
//! ```text
//! suspend A.(B) -> C?    TYPE_REFERENCE(MODIFIER_LIST, FUNCTION_TYPE(...))
//! (A) -> B               FUNCTION_TYPE
//! (A)                    parenthesized USER_TYPE
//! a.b.C<D>?              NULLABLE_TYPE(USER_TYPE(USER_TYPE(USER_TYPE ...)))
//! ```

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use super::{DestructuringMode, DECLARATION_FIRST, TYPE_PARAMETER_GT_RECOVERY};
use crate::builder::Marker;
use crate::recovery::{EXPRESSION_FIRST, EXPRESSION_FOLLOW, MODIFIER_KEYWORDS, PARAMETER_NAME_RECOVERY};
use crate::{Parser, TokenSet};

const TYPE_REF_FIRST: TokenSet =
    TokenSet::new(&[T::LBracket, T::Ident, T::LPar, T::Hash, T::DynamicKw]);

/// Where a missing type gives up and leaves the token alone.
const TYPE_RECOVERY: TokenSet = TokenSet::new(&[
    T::RPar,
    T::RBracket,
    T::Gt,
    T::Comma,
    T::Eq,
    T::LBrace,
    T::RBrace,
    T::Arrow,
    T::Colon,
    T::Semicolon,
    T::EolOrSemicolon,
]);

const USER_TYPE_NAME_RECOVERY: TokenSet =
    EXPRESSION_FIRST.union(EXPRESSION_FOLLOW).union(DECLARATION_FIRST);

const VALUE_PARAMETER_FIRST: TokenSet = TokenSet::new(&[T::Ident, T::At, T::ValKw, T::VarKw])
    .union(MODIFIER_KEYWORDS.without(TokenSet::new(&[T::FunKw])));

const LAMBDA_VALUE_PARAMETER_FIRST: TokenSet = TokenSet::new(&[T::Ident, T::At])
    .union(MODIFIER_KEYWORDS.without(TokenSet::new(&[T::FunKw])));

const VALUE_PARAMETER_MODIFIERS_STOP: TokenSet =
    TokenSet::new(&[T::Comma, T::Colon, T::Eq, T::RPar]);

const TYPE_PARAMETER_MODIFIERS_STOP: TokenSet = TokenSet::new(&[T::Gt, T::Comma, T::Colon]);

const DESTRUCTURING_ENTRY_MODIFIERS_STOP: TokenSet =
    TokenSet::new(&[T::Comma, T::RPar, T::RBracket, T::Colon, T::Eq]);

impl Parser<'_> {
    pub(crate) fn parse_type_ref(&mut self) {
        self.parse_type_ref_with_recovery(TokenSet::EMPTY);
    }

    /// A `TYPE_REFERENCE`. Tokens in `extra` are left alone when no type
    /// is found.
    pub(crate) fn parse_type_ref_with_recovery(&mut self, extra: TokenSet) {
        self.nested(|p| p.parse_type_ref_contents(extra, true));
    }

    fn parse_type_ref_contents(&mut self, extra: TokenSet, wrap: bool) {
        let reference = self.mark();
        self.parse_type_modifier_list();

        let element = self.mark();
        let mut element_parsed = true;
        if self.at(T::DynamicKw) && !self.dynamic_is_type_name() {
            let dynamic = self.mark();
            self.advance_as(T::DynamicKw);
            dynamic.done(self, NodeKind::DynamicType);
        } else if self.at(T::Ident) || self.at(T::PackageKw) {
            self.parse_user_type();
        } else if self.at(T::LPar) {
            self.parse_parenthesized_or_function_type();
        } else {
            self.error_with_recovery(
                ErrorCode::E1005,
                "Type expected",
                Some(TYPE_RECOVERY.union(extra)),
            );
            element_parsed = false;
        }

        let element = self.with_joining(false, |p| p.parse_nullable_type_suffix(element));

        if element_parsed && self.at(T::Dot) {
            // `A.(B) -> C`: what was parsed is the receiver.
            let receiver = element.done(self, NodeKind::TypeReference);
            let receiver = receiver.precede(self).done(self, NodeKind::FunctionTypeReceiver);
            let function_type = receiver.precede(self);
            self.advance(); // .
            if self.at(T::LPar) {
                self.parse_function_type_contents();
            } else {
                self.error(ErrorCode::E1005, "Expecting function type");
            }
            function_type.done(self, NodeKind::FunctionType);
        } else {
            element.abandon(self);
        }

        reference.done_if(self, NodeKind::TypeReference, wrap);
    }

    /// `dynamic.Foo` and `dynamic<T>` use `dynamic` as a plain name.
    fn dynamic_is_type_name(&self) -> bool {
        let next = self.nth(1);
        next == T::Lt || (next == T::Dot && self.nth(2) == T::Ident)
    }

    /// `(A)` or `(A, B) -> C`.
    fn parse_parenthesized_or_function_type(&mut self) {
        let attempt = self.mark();
        self.advance(); // (
        self.nested(|p| p.parse_type_ref_contents(TokenSet::EMPTY, false));

        if self.consume_if(T::RPar) && !self.at(T::Arrow) {
            attempt.abandon(self);
            return;
        }

        attempt.rollback_to(self);
        let function_type = self.mark();
        self.parse_function_type_contents();
        function_type.done(self, NodeKind::FunctionType);
    }

    fn parse_nullable_type_suffix(&mut self, mut element: Marker) -> Marker {
        // `A? :` would be a nullable type, `A?:` an elvis.
        while self.at(T::Quest) && self.raw_lookup(1) != T::Colon {
            self.advance(); // ?
            element = element.done(self, NodeKind::NullableType).precede(self);
        }
        element
    }

    fn parse_function_type_contents(&mut self) {
        self.parse_value_parameter_list(true, false, TokenSet::EMPTY);
        self.expect_with_recovery(
            T::Arrow,
            ErrorCode::E1005,
            "Expecting '->' to specify return type of a function type",
            Some(TYPE_REF_FIRST),
        );
        self.parse_type_ref();
    }

    /// `a.b.C<D>`, each qualifier nesting one more `USER_TYPE`.
    pub(super) fn parse_user_type(&mut self) {
        let mut user_type = self.mark();

        if self.at(T::PackageKw) {
            let keyword = self.mark();
            self.advance();
            keyword.error(self, ErrorCode::E1005, "Expecting an element");
            self.expect_with_recovery(
                T::Dot,
                ErrorCode::E1003,
                "Expecting '.'",
                Some(TokenSet::new(&[T::Ident, T::LBrace, T::RBrace])),
            );
        }

        loop {
            let reference = self.mark();
            if self.expect_with_recovery(
                T::Ident,
                ErrorCode::E1005,
                "Expecting type name",
                Some(USER_TYPE_NAME_RECOVERY),
            ) {
                reference.done(self, NodeKind::ReferenceExpression);
            } else {
                reference.abandon(self);
                break;
            }

            if self.at(T::Lt) {
                self.parse_type_argument_list();
            }
            // `a.b.(c)` is a function type with receiver `a.b`.
            if !self.at(T::Dot) || self.nth(1) == T::LPar {
                break;
            }
            user_type = user_type.done(self, NodeKind::UserType).precede(self);
            self.advance(); // .
        }

        user_type.done(self, NodeKind::UserType);
    }

    pub(super) fn parse_type_argument_list(&mut self) {
        let list = self.mark();
        self.try_parse_type_argument_list(TokenSet::EMPTY);
        list.done(self, NodeKind::TypeArgumentList);
    }

    /// `<A, out B, *>` starting at `<`, without the list node. Returns
    /// whether the closing `>` was found.
    pub(crate) fn try_parse_type_argument_list(&mut self, extra: TokenSet) -> bool {
        self.with_newlines(false, |p| {
            p.advance(); // <
            loop {
                let projection = p.mark();
                p.parse_type_argument_modifier_list();
                if !p.consume_if(T::Mul) {
                    p.parse_type_ref_with_recovery(extra);
                }
                projection.done(p, NodeKind::TypeProjection);
                if !p.consume_if(T::Comma) || p.at(T::Gt) {
                    break;
                }
            }

            let closed = p.at(T::Gt);
            if closed {
                p.advance();
            } else {
                p.error(ErrorCode::E1005, "Expecting a '>'");
            }
            closed
        })
    }

    /// `<T, in U : Bound>` starting at `<`.
    pub(super) fn parse_type_parameter_list(&mut self, recovery: TokenSet) {
        let list = self.mark();
        self.with_newlines(false, |p| {
            p.advance(); // <
            loop {
                if p.at(T::Comma) {
                    p.error_and_advance(ErrorCode::E1006, "Expecting type parameter declaration");
                }
                p.parse_type_parameter();
                if !p.consume_if(T::Comma) || p.at(T::Gt) {
                    break;
                }
            }
            p.expect_with_recovery(T::Gt, ErrorCode::E1003, "Missing '>'", Some(recovery));
        });
        list.done(self, NodeKind::TypeParameterList);
    }

    fn parse_type_parameter(&mut self) {
        if self.at_set(TYPE_PARAMETER_GT_RECOVERY) {
            self.error(ErrorCode::E1006, "Type parameter declaration expected");
            return;
        }

        let parameter = self.mark();
        self.parse_modifier_list(TYPE_PARAMETER_MODIFIERS_STOP);
        self.expect_with_recovery(
            T::Ident,
            ErrorCode::E1004,
            "Type parameter name expected",
            Some(TokenSet::EMPTY),
        );
        if self.consume_if(T::Colon) {
            self.parse_type_ref();
        }
        parameter.done(self, NodeKind::TypeParameter);
    }

    /// `(a: A, b: B = 1)` starting at `(`.
    ///
    /// In a function type, parameters may be bare types: `(A, b: B) -> C`.
    pub(super) fn parse_value_parameter_list(
        &mut self,
        function_type: bool,
        type_required: bool,
        recovery: TokenSet,
    ) {
        let list = self.mark();
        self.with_newlines(false, |p| {
            p.advance(); // (
            if !p.at(T::RPar) && !p.at_set(recovery) {
                p.parse_value_parameters(function_type, type_required);
            }
            p.expect_with_recovery(T::RPar, ErrorCode::E1003, "Expecting ')'", Some(recovery));
        });
        list.done(self, NodeKind::ValueParameterList);
    }

    fn parse_value_parameters(&mut self, function_type: bool, type_required: bool) {
        let first = if function_type {
            LAMBDA_VALUE_PARAMETER_FIRST
        } else {
            VALUE_PARAMETER_FIRST
        };

        loop {
            let start = self.position();
            if self.at(T::Comma) {
                self.error_and_advance(ErrorCode::E1006, "Expecting a parameter declaration");
            } else if self.at(T::RPar) {
                break;
            }

            if function_type {
                if !self.parse_value_parameter_with(true, type_required) {
                    let parameter = self.mark();
                    self.parse_function_type_parameter_modifier_list();
                    self.parse_type_ref();
                    parameter.done(self, NodeKind::ValueParameter);
                }
            } else {
                self.parse_value_parameter(type_required);
            }

            if self.position() == start {
                break;
            }
            if self.consume_if(T::Comma) || self.at(T::Colon) {
                continue;
            }
            if !self.at(T::RPar) {
                self.error(ErrorCode::E1003, "Expecting comma or ')'");
            }
            if !self.at_set(first) {
                break;
            }
        }
    }

    pub(crate) fn parse_value_parameter(&mut self, type_required: bool) {
        self.parse_value_parameter_with(false, type_required);
    }

    /// With `rollback`, nothing is consumed when the parameter is not
    /// `name: Type`.
    fn parse_value_parameter_with(&mut self, rollback: bool, type_required: bool) -> bool {
        let parameter = self.mark();
        self.parse_modifier_list(VALUE_PARAMETER_MODIFIERS_STOP);
        if self.at(T::ValKw) || self.at(T::VarKw) {
            self.advance();
        }

        let named = self.at(T::Ident) && self.nth(1) == T::Colon;
        if rollback && !named {
            parameter.rollback_to(self);
            return false;
        }
        if !self.parse_value_parameter_rest(type_required) && rollback {
            parameter.rollback_to(self);
            return false;
        }
        parameter.done(self, NodeKind::ValueParameter);
        true
    }

    fn parse_value_parameter_rest(&mut self, type_required: bool) -> bool {
        let mut complete = true;

        if (self.at(T::Ident) && self.nth(1) == T::Lt) || self.at(T::Colon) {
            // `fun f(List<Int>)` or `fun f(: Int)`
            self.error(ErrorCode::E1004, "Parameter name expected");
            if self.at(T::Colon) {
                self.advance();
            } else {
                complete = false;
            }
            self.parse_type_ref();
        } else {
            self.expect_with_recovery(
                T::Ident,
                ErrorCode::E1004,
                "Parameter name expected",
                Some(PARAMETER_NAME_RECOVERY),
            );
            if self.consume_if(T::Colon) {
                // `fun f(a: b: B)`
                if self.at(T::Ident) && self.nth(1) == T::Colon {
                    self.error(ErrorCode::E1005, "Type reference expected");
                    return false;
                }
                self.parse_type_ref();
            } else if type_required {
                self.error_with_recovery(
                    ErrorCode::E1005,
                    "Parameters must have type annotation",
                    Some(PARAMETER_NAME_RECOVERY),
                );
                complete = false;
            }
        }

        if self.consume_if(T::Eq) {
            self.parse_expression();
        }
        complete
    }

    /// `(a, b: B)` or `[a, b]` starting at the opening bracket, without
    /// the declaration node.
    pub(crate) fn parse_multi_declaration_entry(
        &mut self,
        follow: TokenSet,
        recovery: TokenSet,
        mode: DestructuringMode,
    ) {
        let closer = if self.at(T::LBracket) {
            T::RBracket
        } else {
            T::RPar
        };

        self.with_newlines(false, |p| {
            p.advance(); // ( or [
            if !p.at_set(follow) {
                loop {
                    if p.at(T::Comma) {
                        p.error_and_advance(ErrorCode::E1004, "Expecting a name");
                    } else if p.at(closer) {
                        p.error(ErrorCode::E1004, "Expecting a name");
                        break;
                    }

                    let entry = p.mark();
                    p.parse_modifier_list(DESTRUCTURING_ENTRY_MODIFIERS_STOP);
                    if p.at(T::ValKw) || p.at(T::VarKw) {
                        if mode.allows(p.current()) {
                            p.advance();
                        } else {
                            let message = if p.at(T::ValKw) {
                                "'val' is not allowed here"
                            } else {
                                "'var' is not allowed here"
                            };
                            p.error_and_advance(ErrorCode::E1006, message);
                        }
                    }
                    p.expect_with_recovery(
                        T::Ident,
                        ErrorCode::E1004,
                        "Expecting a name",
                        Some(recovery.with(closer)),
                    );
                    if p.consume_if(T::Colon) {
                        p.parse_type_ref_with_recovery(follow);
                    }
                    entry.done(p, NodeKind::DestructuringDeclarationEntry);

                    if !p.consume_if(T::Comma) || p.at(closer) {
                        break;
                    }
                }
            }

            let message = if closer == T::RBracket {
                "Expecting ']'"
            } else {
                "Expecting ')'"
            };
            p.expect_with_recovery(closer, ErrorCode::E1003, message, Some(follow));
        });
    }
}
