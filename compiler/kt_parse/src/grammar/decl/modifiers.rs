//! Modifier lists and annotations.
//!
//! A `MODIFIER_LIST` mixes keyword modifiers, annotations and, on
//! declarations, a `context(...)` parameter list. Soft keyword modifiers
//! are lexed as identifiers and remapped when consumed.

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use crate::recovery::MODIFIER_KEYWORDS;
use crate::{Parser, TokenSet};

/// What a modifier list contained.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Modifiers {
    pub(crate) present: bool,
    pub(crate) companion: bool,
    pub(crate) enumeration: bool,
}

/// What a modifier list may contain.
#[derive(Copy, Clone)]
struct ModifierMode {
    keywords: TokenSet,
    annotations: bool,
    context_parameters: bool,
    /// Annotations in type position do not take arguments after a space.
    type_context: bool,
    /// A modifier keyword directly before one of these is a name instead.
    stop: TokenSet,
}

impl ModifierMode {
    const fn declaration(stop: TokenSet) -> Self {
        ModifierMode {
            keywords: MODIFIER_KEYWORDS,
            annotations: true,
            context_parameters: true,
            type_context: false,
            stop,
        }
    }
}

const TYPE_MODIFIERS: ModifierMode = ModifierMode {
    keywords: TokenSet::new(&[T::SuspendKw]),
    annotations: true,
    context_parameters: false,
    type_context: true,
    stop: TokenSet::EMPTY,
};

const TYPE_ARGUMENT_MODIFIERS: ModifierMode = ModifierMode {
    keywords: TokenSet::new(&[T::InKw, T::OutKw]),
    annotations: false,
    context_parameters: false,
    type_context: false,
    stop: TokenSet::new(&[T::Comma, T::Colon, T::Gt]),
};

const FUNCTION_TYPE_PARAMETER_MODIFIERS: ModifierMode = ModifierMode {
    keywords: TokenSet::new(&[T::VarargKw, T::NoinlineKw, T::CrossinlineKw]),
    annotations: false,
    context_parameters: false,
    type_context: false,
    stop: TokenSet::new(&[T::Comma, T::Colon, T::Eq, T::RPar]),
};

/// Soft keywords that can prefix an annotation as `@target:Annotation`.
const ANNOTATION_TARGETS: TokenSet = TokenSet::new(&[
    T::FileKw,
    T::FieldKw,
    T::GetKw,
    T::SetKw,
    T::PropertyKw,
    T::ReceiverKw,
    T::ParamKw,
    T::SetparamKw,
    T::DelegateKw,
]);

impl Parser<'_> {
    /// Declaration modifiers. A keyword directly before a token in `stop`
    /// is left alone (`fun f(open: Int)`).
    pub(crate) fn parse_modifier_list(&mut self, stop: TokenSet) -> Modifiers {
        self.parse_modifier_list_with(ModifierMode::declaration(stop))
    }

    /// Annotations only, as in `when (@Ann val x = y)`.
    pub(crate) fn parse_annotations_list(&mut self, stop: TokenSet) {
        self.parse_modifier_list_with(ModifierMode {
            keywords: TokenSet::EMPTY,
            context_parameters: false,
            ..ModifierMode::declaration(stop)
        });
    }

    pub(super) fn parse_type_modifier_list(&mut self) {
        self.parse_modifier_list_with(TYPE_MODIFIERS);
    }

    pub(super) fn parse_type_argument_modifier_list(&mut self) {
        self.parse_modifier_list_with(TYPE_ARGUMENT_MODIFIERS);
    }

    pub(super) fn parse_function_type_parameter_modifier_list(&mut self) {
        self.parse_modifier_list_with(FUNCTION_TYPE_PARAMETER_MODIFIERS);
    }

    fn parse_modifier_list_with(&mut self, mode: ModifierMode) -> Modifiers {
        let list = self.mark();
        let mut modifiers = Modifiers::default();

        while !self.eof() {
            if mode.annotations && self.at(T::At) {
                self.parse_annotation_or_list(mode.type_context);
            } else if mode.context_parameters && self.at(T::ContextKw) && self.nth(1) == T::LPar {
                self.parse_context_parameter_list();
            } else if let Some(keyword) = self.try_parse_modifier(&mode) {
                modifiers.companion |= keyword == T::CompanionKw;
                modifiers.enumeration |= keyword == T::EnumKw;
            } else {
                break;
            }
            modifiers.present = true;
        }

        if modifiers.present {
            list.done(self, NodeKind::ModifierList);
        } else {
            list.rollback_to(self);
        }
        modifiers
    }

    fn try_parse_modifier(&mut self, mode: &ModifierMode) -> Option<T> {
        let current = self.current();
        let keyword = if current == T::Ident {
            T::soft_keyword(self.current_text())?
        } else {
            current
        };
        if !mode.keywords.contains(keyword) {
            return None;
        }
        // `fun` is only a modifier in `fun interface`.
        if keyword == T::FunKw && self.nth(1) != T::InterfaceKw {
            return None;
        }
        let next = self.nth(1);
        if next == T::Eof || mode.stop.contains(next) {
            return None;
        }
        self.advance_as(keyword);
        Some(keyword)
    }

    /// `context(a: A, B)`.
    fn parse_context_parameter_list(&mut self) {
        let list = self.mark();
        self.advance_as(T::ContextKw);
        self.with_newlines(false, |p| {
            p.advance(); // (
            loop {
                if p.at(T::Comma) {
                    p.error_and_advance(ErrorCode::E1005, "Expecting a type reference");
                }
                let start = p.position();
                p.parse_context_parameter();
                if p.consume_if(T::RPar) {
                    break;
                }
                if p.consume_if(T::Comma) {
                    continue;
                }
                p.error(ErrorCode::E1003, "Expecting comma or ')'");
                if p.eof() || p.position() == start {
                    break;
                }
            }
        });
        list.done(self, NodeKind::ContextParameterList);
    }

    fn parse_context_parameter(&mut self) {
        if self.at(T::Ident) && self.nth(1) == T::Colon {
            let parameter = self.mark();
            self.advance(); // name
            self.advance(); // :
            self.parse_type_ref();
            parameter.done(self, NodeKind::ValueParameter);
        } else {
            self.parse_type_ref();
        }
    }

    /// One or more annotations in a row. Returns whether any was parsed.
    pub(crate) fn parse_annotations(&mut self) -> bool {
        if !self.parse_annotation_or_list(false) {
            return false;
        }
        while self.parse_annotation_or_list(false) {}
        true
    }

    /// `@Ann`, `@target:Ann`, `@[A B]` or `@target:[A B]`. Returns `false`
    /// when not at `@`.
    fn parse_annotation_or_list(&mut self, type_context: bool) -> bool {
        if !self.at(T::At) {
            return false;
        }

        let (targeted, next) = if self.raw_lookup(1) == T::Ident && self.nth(2) == T::Colon {
            (true, self.nth(3))
        } else if self.nth(1) == T::Colon {
            (true, self.nth(2))
        } else {
            (false, self.raw_lookup(1))
        };

        match next {
            T::Ident => self.parse_annotation(type_context),
            T::LBracket => self.parse_annotation_list(),
            _ if targeted => {
                let count = if self.nth(1) == T::Colon { 2 } else { 3 };
                self.error_and_advance_n(
                    ErrorCode::E1006,
                    "Expected annotation identifier after ':'",
                    count,
                );
            }
            _ => self.error_and_advance(ErrorCode::E1006, "Expected annotation identifier after '@'"),
        }
        true
    }

    /// `target:` after `@`, if present.
    fn parse_annotation_target(&mut self) {
        if self.at(T::Colon) {
            self.error_and_advance(ErrorCode::E1006, "Expected annotation target before ':'");
            return;
        }
        if !self.at(T::Ident) || self.nth(1) != T::Colon {
            return;
        }

        let target = T::soft_keyword(self.current_text()).filter(|kw| ANNOTATION_TARGETS.contains(*kw));
        if let Some(keyword) = target {
            let marker = self.mark();
            self.advance_as(keyword);
            marker.done(self, NodeKind::AnnotationTarget);
        } else {
            self.error_and_advance(ErrorCode::E1006, "Expected annotation target before ':'");
        }
        self.advance(); // :
    }

    /// `@Name<T>.Inner(args)`, with or without the `@` (inside `@[...]`).
    fn parse_annotation(&mut self, type_context: bool) {
        let annotation = self.mark();
        if self.at(T::At) {
            self.advance();
            self.parse_annotation_target();
        }

        let callee = self.mark();
        let reference = self.mark();
        self.parse_user_type();
        reference.done(self, NodeKind::TypeReference);
        callee.done(self, NodeKind::ConstructorCallee);

        if self.at(T::Lt) {
            self.parse_type_argument_list();
        }

        // `fun f(): @Ann (Int) -> Unit` annotates the function type.
        let spaced = self.raw_lookup(-1).is_trivia();
        if self.at(T::LPar) && !self.newline_before() && !(type_context && spaced) {
            self.parse_value_argument_list();
        }

        annotation.done(self, NodeKind::AnnotationEntry);
    }

    /// `@[A B(1)]`.
    fn parse_annotation_list(&mut self) {
        let annotation = self.mark();
        self.with_newlines(false, |p| {
            p.advance(); // @
            p.parse_annotation_target();
            p.expect(T::LBracket, ErrorCode::E1003, "Expecting '['");

            if !p.at(T::Ident) && !p.at(T::At) {
                p.error(ErrorCode::E1006, "Expecting a list of annotations");
            }
            while p.at(T::Ident) || p.at(T::At) {
                if p.at(T::At) {
                    p.error_and_advance(ErrorCode::E1006, "No '@' needed in annotation list");
                    continue;
                }
                p.parse_annotation(false);
                while p.at(T::Comma) {
                    p.error_and_advance(ErrorCode::E1006, "No commas needed to separate annotations");
                }
            }

            p.expect(T::RBracket, ErrorCode::E1003, "Expecting ']' to close the annotation list");
        });
        annotation.done(self, NodeKind::Annotation);
    }
}
