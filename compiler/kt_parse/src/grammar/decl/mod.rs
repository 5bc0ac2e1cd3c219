//! Declarations reachable from expression and statement position.
//!
//! Local `fun`, `val`/`var`, `class`/`interface`, `object` and `typealias`
//! declarations, with class bodies parsed recursively. File-level
//! structure (package, imports) is not handled here.
//!
//! # Module Structure
//!
//! - `mod.rs`: declarations, class bodies, properties and functions
//! - `modifiers.rs`: modifier lists, annotations, context parameters
//! - `ty.rs`: type references, type and value parameter lists,
//!   destructuring entries

mod modifiers;
mod ty;

use kt_diagnostic::ErrorCode;
use kt_ir::{NodeKind, TokenKind as T};

use crate::builder::Marker;
use crate::recovery::PARAMETER_NAME_RECOVERY;
use crate::{Parser, TokenSet};

pub(crate) use modifiers::Modifiers;

/// Whether a class-like declaration needs a name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum NameMode {
    Required,
    /// `companion object` may omit it.
    Allowed,
    /// Object literals cannot have one.
    Prohibited,
}

/// Where a declaration appears.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DeclarationMode {
    /// Inside a class body.
    Member,
    /// Inside a block.
    Local,
    /// A statement at the top level of a script.
    ScriptTopLevel,
}

impl DeclarationMode {
    fn destructuring_allowed(self) -> bool {
        matches!(self, DeclarationMode::Local | DeclarationMode::ScriptTopLevel)
    }

    fn accessors_allowed(self) -> bool {
        matches!(self, DeclarationMode::Member | DeclarationMode::ScriptTopLevel)
    }
}

/// What may precede each name of a destructuring entry list.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum DestructuringMode {
    /// `val` or `var` on any entry.
    Full,
    /// `val` only, chosen when the first entry starts with `val`.
    FullValOnly,
    /// Bare names.
    Short,
}

impl DestructuringMode {
    /// Mode for a loop or lambda parameter list sitting at its `(` or `[`.
    pub(crate) fn for_parameter(p: &Parser<'_>) -> Self {
        if p.nth(1) == T::ValKw {
            DestructuringMode::FullValOnly
        } else {
            DestructuringMode::Short
        }
    }

    fn allows(self, keyword: T) -> bool {
        match self {
            DestructuringMode::Full => true,
            DestructuringMode::FullValOnly => keyword == T::ValKw,
            DestructuringMode::Short => false,
        }
    }
}

/// Which class-like declaration is being parsed.
#[derive(Copy, Clone, Debug)]
enum Classifier {
    Class { enumeration: bool },
    /// `enum Foo { ... }` with the `class` keyword missing.
    EnumWithoutKeyword,
    Object { name: NameMode, optional_body: bool },
}

/// Raw index scan state for [`Parser::last_dot_after_receiver`].
#[derive(Default)]
struct BracketDepth {
    parens: i32,
    angles: i32,
    braces: i32,
    brackets: i32,
}

impl BracketDepth {
    fn is_top_level(&self) -> bool {
        self.parens == 0 && self.angles == 0 && self.braces == 0 && self.brackets == 0
    }

    fn track(&mut self, kind: T) {
        match kind {
            T::LPar => self.parens += 1,
            T::RPar => self.parens -= 1,
            T::Lt => self.angles += 1,
            T::Gt => self.angles -= 1,
            T::LBrace => self.braces += 1,
            T::RBrace => self.braces -= 1,
            T::LBracket => self.brackets += 1,
            T::RBracket => self.brackets -= 1,
            _ => {}
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum AccessorKind {
    Getter,
    Setter,
}

/// Keywords that start a declaration at any level.
const TOP_LEVEL_DECLARATION_FIRST: TokenSet = TokenSet::new(&[
    T::TypealiasKw,
    T::InterfaceKw,
    T::ClassKw,
    T::ObjectKw,
    T::FunKw,
    T::ValKw,
    T::PackageKw,
]);

const DECLARATION_FIRST: TokenSet = TOP_LEVEL_DECLARATION_FIRST.union(TokenSet::new(&[
    T::InitKw,
    T::GetKw,
    T::SetKw,
    T::ConstructorKw,
]));

const CLASS_NAME_RECOVERY: TokenSet =
    TokenSet::new(&[T::Lt, T::LPar, T::Colon, T::LBrace]).union(TOP_LEVEL_DECLARATION_FIRST);

const TYPE_PARAMETER_GT_RECOVERY: TokenSet =
    TokenSet::new(&[T::WhereKw, T::LPar, T::Colon, T::LBrace, T::Gt]);

const PRIMARY_CONSTRUCTOR_FOLLOW: TokenSet =
    TokenSet::new(&[T::LPar, T::LBrace, T::Colon, T::ConstructorKw]);

/// Soft keywords that start a member, so cannot name an enum entry.
const MEMBER_START_SOFT_KEYWORDS: TokenSet = TokenSet::new(&[T::ConstructorKw, T::InitKw]);

const ENUM_ENTRY_MODIFIERS_STOP: TokenSet = TokenSet::new(&[T::Comma, T::Semicolon, T::RBrace]);

const RECEIVER_TYPE_TERMINATORS: TokenSet = TokenSet::new(&[T::Dot, T::SafeAccess]);

const OUT_OF_RECEIVER: TokenSet = TokenSet::new(&[T::Eq, T::Colon, T::LBrace, T::RBrace, T::ByKw])
    .union(TOP_LEVEL_DECLARATION_FIRST);

const PROPERTY_TYPE_PARAMETER_RECOVERY: TokenSet =
    TokenSet::new(&[T::Ident, T::Eq, T::Colon, T::Semicolon]);

const PROPERTY_NAME_FOLLOW: TokenSet = TokenSet::new(&[
    T::Colon,
    T::Eq,
    T::LBrace,
    T::RBrace,
    T::Semicolon,
    T::ValKw,
    T::VarKw,
    T::FunKw,
    T::ClassKw,
]);

const PROPERTY_END: TokenSet = DECLARATION_FIRST.union(TokenSet::new(&[
    T::EolOrSemicolon,
    T::LBrace,
    T::RBrace,
]));

const ACCESSOR_FIRST_OR_PROPERTY_END: TokenSet = crate::recovery::MODIFIER_KEYWORDS.union(
    TokenSet::new(&[
        T::At,
        T::GetKw,
        T::SetKw,
        T::FieldKw,
        T::EolOrSemicolon,
        T::RBrace,
    ]),
);

const ACCESSOR_BODY_RECOVERY: TokenSet =
    ACCESSOR_FIRST_OR_PROPERTY_END.union(TokenSet::new(&[T::LBrace, T::LPar, T::Eq]));

const ACCESSOR_LPAR_RECOVERY: TokenSet =
    TokenSet::new(&[T::RPar, T::Ident, T::Colon, T::LBrace, T::Eq]);

const SETTER_PARAMETER_MODIFIERS_STOP: TokenSet = TokenSet::new(&[T::Comma, T::Colon, T::RPar]);

const SETTER_PARAMETER_RECOVERY: TokenSet =
    TokenSet::new(&[T::RPar, T::Colon, T::LBrace, T::Eq]);

const ACCESSOR_RPAR_RECOVERY: TokenSet = TokenSet::new(&[
    T::RPar,
    T::Colon,
    T::LBrace,
    T::RBrace,
    T::Eq,
    T::EolOrSemicolon,
]);

const FUNCTION_TYPE_PARAMETER_RECOVERY: TokenSet =
    TokenSet::new(&[T::LBracket, T::LBrace, T::RBrace, T::LPar]);

const FUNCTION_NAME_FOLLOW: TokenSet = TokenSet::new(&[T::Lt, T::LPar, T::RPar, T::Colon, T::Eq]);

const VALUE_PARAMETERS_FOLLOW: TokenSet =
    TokenSet::new(&[T::Eq, T::LBrace, T::RBrace, T::Semicolon, T::RPar]);

impl Parser<'_> {
    /// Parse the declaration starting at the current token, after its
    /// modifier list. Returns the node kind to close the declaration with,
    /// or `None` (consuming nothing) when no declaration keyword is there.
    pub(crate) fn parse_common_declaration(
        &mut self,
        modifiers: Modifiers,
        name: NameMode,
        mode: DeclarationMode,
    ) -> Option<NodeKind> {
        match self.current() {
            T::ClassKw | T::InterfaceKw => Some(self.parse_classifier(Classifier::Class {
                enumeration: modifiers.enumeration,
            })),
            T::FunKw => self.parse_function(false),
            T::ValKw | T::VarKw => Some(self.parse_property(mode)),
            T::TypealiasKw => Some(self.parse_type_alias()),
            T::ObjectKw => {
                self.parse_object(name, true);
                Some(NodeKind::ObjectDeclaration)
            }
            T::Ident if modifiers.enumeration && mode == DeclarationMode::Member => {
                Some(self.parse_classifier(Classifier::EnumWithoutKeyword))
            }
            _ => None,
        }
    }

    /// Close `marker` as `kind`, pulling adjacent comments in.
    fn close_declaration(&mut self, marker: Marker, kind: NodeKind) {
        let declaration = marker.done(self, kind);
        declaration.set_comment_binders(self);
    }

    /// Turn `marker` into an error element if `failed`, else drop it.
    fn error_if(&mut self, marker: Marker, failed: bool, message: &str) {
        if failed {
            marker.error(self, ErrorCode::E1006, message);
        } else {
            marker.abandon(self);
        }
    }

    /// `object Name : Base { ... }` starting at `object`.
    pub(crate) fn parse_object(&mut self, name: NameMode, optional_body: bool) {
        self.parse_classifier(Classifier::Object {
            name,
            optional_body,
        });
    }

    fn parse_classifier(&mut self, classifier: Classifier) -> NodeKind {
        let (kind, name, optional_body, enumeration) = match classifier {
            Classifier::Class { enumeration } => {
                (NodeKind::Class, NameMode::Required, true, enumeration)
            }
            Classifier::EnumWithoutKeyword => (NodeKind::Class, NameMode::Required, true, true),
            Classifier::Object {
                name,
                optional_body,
            } => (NodeKind::ObjectDeclaration, name, optional_body, false),
        };

        if matches!(classifier, Classifier::EnumWithoutKeyword) {
            self.error(ErrorCode::E1006, "'class' keyword is expected after 'enum'");
        } else {
            self.advance(); // class, interface or object
        }

        match name {
            NameMode::Required => {
                self.expect_with_recovery(
                    T::Ident,
                    ErrorCode::E1004,
                    "Name expected",
                    Some(CLASS_NAME_RECOVERY),
                );
            }
            NameMode::Allowed => {
                self.consume_if(T::Ident);
            }
            NameMode::Prohibited => {
                if self.at(T::Ident) {
                    self.error_and_advance(
                        ErrorCode::E1006,
                        "An object expression cannot bind a name",
                    );
                }
            }
        }

        if self.at(T::Lt) {
            self.parse_type_parameter_list(TYPE_PARAMETER_GT_RECOVERY);
        }

        let constructor = self.mark();
        let constructor_modifiers = self.parse_modifier_list(TokenSet::EMPTY);
        if constructor_modifiers.present && !self.at_set(PRIMARY_CONSTRUCTOR_FOLLOW) {
            // The modifiers belong to whatever follows the declaration.
            constructor.rollback_to(self);
            return kind;
        }

        let keyword = self.at(T::ConstructorKw);
        if keyword {
            self.advance_as(T::ConstructorKw);
        }
        if self.at(T::LPar) {
            self.parse_value_parameter_list(false, true, TokenSet::new(&[T::LBrace, T::RBrace]));
            constructor.done(self, NodeKind::PrimaryConstructor);
        } else if constructor_modifiers.present || keyword {
            constructor.done(self, NodeKind::PrimaryConstructor);
            if keyword {
                self.error(ErrorCode::E1006, "Expecting primary constructor parameter list");
            } else {
                self.error(ErrorCode::E1006, "Expecting 'constructor' keyword");
            }
        } else {
            constructor.rollback_to(self);
        }

        if self.consume_if(T::Colon) {
            self.parse_super_type_list();
        }

        if self.at(T::LBrace) {
            if enumeration {
                self.nested(Self::parse_enum_class_body);
            } else {
                self.nested(Self::parse_class_body);
            }
        } else if !optional_body {
            let body = self.mark();
            self.error(ErrorCode::E1006, "Expecting a class body");
            body.done(self, NodeKind::ClassBody);
        }

        kind
    }

    fn parse_super_type_list(&mut self) {
        let list = self.mark();
        loop {
            if self.at(T::Comma) {
                self.error_and_advance(ErrorCode::E1006, "Expecting a delegation specifier");
                continue;
            }
            self.parse_super_type_entry();
            if !self.consume_if(T::Comma) {
                break;
            }
        }
        list.done(self, NodeKind::SuperTypeList);
    }

    /// `Base` or `Base(args)`.
    fn parse_super_type_entry(&mut self) {
        let entry = self.mark();
        let callee = self.mark();
        self.parse_type_ref();
        if self.at(T::LPar) {
            callee.done(self, NodeKind::ConstructorCallee);
            self.parse_value_argument_list();
            entry.done(self, NodeKind::SuperTypeCallEntry);
        } else {
            callee.abandon(self);
            entry.done(self, NodeKind::SuperTypeEntry);
        }
    }

    fn parse_class_body(&mut self) {
        let body = self.mark();
        self.with_newlines(true, |p| {
            if p.expect(T::LBrace, ErrorCode::E1003, "Expecting a class body") {
                p.parse_members();
                p.expect(T::RBrace, ErrorCode::E1003, "Missing '}'");
            }
        });
        body.done(self, NodeKind::ClassBody);
    }

    /// Entries first, then members after a `;`.
    fn parse_enum_class_body(&mut self) {
        let body = self.mark();
        self.with_newlines(true, |p| {
            p.advance(); // {
            if !p.parse_enum_entries() && !p.at(T::RBrace) {
                p.error(
                    ErrorCode::E1006,
                    "Expecting ';' after the last enum entry or '}' to close enum class body",
                );
            }
            p.parse_members();
            p.expect(T::RBrace, ErrorCode::E1003, "Expecting '}' to close enum class body");
        });
        body.done(self, NodeKind::ClassBody);
    }

    /// Returns whether members may follow the entries.
    fn parse_enum_entries(&mut self) -> bool {
        while !self.eof() && !self.at(T::RBrace) {
            let entry = self.mark();
            self.parse_modifier_list(ENUM_ENTRY_MODIFIERS_STOP);
            if self.at_set(MEMBER_START_SOFT_KEYWORDS) || !self.at(T::Ident) {
                entry.rollback_to(self);
                // No entries at all, but members after a `;`.
                return self.consume_if(T::Semicolon);
            }

            self.advance(); // name
            if self.at(T::LPar) {
                self.parse_value_argument_list();
            }
            if self.at(T::LBrace) {
                self.nested(Self::parse_class_body);
            }
            let comma = self.consume_if(T::Comma);
            let semicolon = self.consume_if(T::Semicolon);
            self.close_declaration(entry, NodeKind::EnumEntry);

            if semicolon {
                return true;
            }
            if !comma {
                return false;
            }
        }
        false
    }

    fn parse_members(&mut self) {
        while !self.eof() && !self.at(T::RBrace) {
            let start = self.position();
            self.parse_member_declaration();
            if self.position() == start {
                self.error_and_advance(ErrorCode::E1006, "Expecting member declaration");
            }
        }
    }

    fn parse_member_declaration(&mut self) {
        if self.consume_if(T::Semicolon) {
            return;
        }
        let declaration = self.mark();
        let modifiers = self.parse_modifier_list(TokenSet::EMPTY);
        let name = if modifiers.companion {
            NameMode::Allowed
        } else {
            NameMode::Required
        };

        let kind = match self.parse_common_declaration(modifiers, name, DeclarationMode::Member) {
            Some(kind) => Some(kind),
            None => self.parse_member_declaration_rest(),
        };
        if let Some(kind) = kind {
            self.close_declaration(declaration, kind);
        } else {
            self.error_with_recovery(
                ErrorCode::E1006,
                "Expecting member declaration",
                Some(TokenSet::EMPTY),
            );
            declaration.abandon(self);
        }
    }

    fn parse_member_declaration_rest(&mut self) -> Option<NodeKind> {
        if self.at(T::InitKw) {
            self.advance_as(T::InitKw);
            if self.at(T::LBrace) {
                self.parse_block();
            } else {
                self.error(ErrorCode::E1006, "Expecting '{' after 'init'");
            }
            Some(NodeKind::ClassInitializer)
        } else if self.at(T::LBrace) {
            self.error(ErrorCode::E1006, "Expecting member declaration");
            self.parse_block();
            Some(NodeKind::Fun)
        } else {
            None
        }
    }

    /// `typealias Name<T> = Type`.
    fn parse_type_alias(&mut self) -> NodeKind {
        self.advance(); // typealias
        self.expect_with_recovery(
            T::Ident,
            ErrorCode::E1004,
            "Type name expected",
            Some(TokenSet::new(&[T::Lt, T::Eq, T::Semicolon]).union(TOP_LEVEL_DECLARATION_FIRST)),
        );
        if self.at(T::Lt) {
            self.parse_type_parameter_list(TYPE_PARAMETER_GT_RECOVERY);
        }
        self.expect_with_recovery(
            T::Eq,
            ErrorCode::E1003,
            "Expecting '='",
            Some(TOP_LEVEL_DECLARATION_FIRST.with(T::Semicolon)),
        );
        self.parse_type_ref();
        self.consume_if(T::Semicolon);
        NodeKind::TypeAlias
    }

    /// `val`/`var` declaration starting at the keyword. Returns
    /// `DESTRUCTURING_DECLARATION` for `val (a, b) = ...`.
    pub(crate) fn parse_property(&mut self, mode: DeclarationMode) -> NodeKind {
        self.advance(); // val or var

        if self.at(T::Lt) {
            self.parse_type_parameter_list(PROPERTY_TYPE_PARAMETER_RECOVERY);
        }

        let (receiver, destructuring, name_on_next_line, before_name) =
            self.with_joining(false, |p| {
                let receiver_marker = p.mark();
                let receiver = p.parse_receiver_type("property", PROPERTY_NAME_FOLLOW);
                let destructuring = p.at(T::LPar);
                p.error_if(
                    receiver_marker,
                    destructuring && receiver,
                    "Receiver type is not allowed on a destructuring declaration",
                );

                let name_on_next_line = p.newline_before();
                let before_name = p.mark();
                if destructuring {
                    let entries = p.mark();
                    p.parse_multi_declaration_entry(
                        PROPERTY_NAME_FOLLOW,
                        PROPERTY_NAME_FOLLOW.union(PARAMETER_NAME_RECOVERY),
                        DestructuringMode::Full,
                    );
                    p.error_if(
                        entries,
                        !mode.destructuring_allowed(),
                        "Destructuring declarations are only allowed for local variables/values",
                    );
                } else {
                    p.parse_function_or_property_name(receiver, "property", PROPERTY_NAME_FOLLOW, true);
                }
                (receiver, destructuring, name_on_next_line, before_name)
            });

        let typed = self.at(T::Colon);
        if typed {
            let annotation = self.mark();
            self.advance(); // :
            self.parse_type_ref();
            self.error_if(
                annotation,
                destructuring,
                "Type annotations are not allowed on destructuring declarations",
            );
        }

        let initialized = self.parse_property_delegate_or_assignment();
        if !initialized && name_on_next_line && !typed && !receiver {
            // The name most likely starts the next statement.
            before_name.rollback_to(self);
            self.error(ErrorCode::E1006, "Expecting property name or receiver type");
            return NodeKind::Property;
        }
        before_name.abandon(self);

        if mode.accessors_allowed() {
            self.parse_property_accessors();
        }

        if destructuring {
            NodeKind::DestructuringDeclaration
        } else {
            NodeKind::Property
        }
    }

    fn parse_property_delegate_or_assignment(&mut self) -> bool {
        if self.at(T::ByKw) {
            let delegate = self.mark();
            self.advance_as(T::ByKw);
            self.parse_expression();
            delegate.done(self, NodeKind::PropertyDelegate);
            true
        } else if self.consume_if(T::Eq) {
            self.parse_expression();
            true
        } else {
            false
        }
    }

    fn parse_property_accessors(&mut self) {
        let separated = self.with_newlines(true, |p| p.consume_if(T::Semicolon) && p.newline_before());
        if separated {
            return;
        }

        let mut getter = false;
        let mut setter = false;
        while let Some(kind) = self.parse_property_accessor(getter, setter) {
            match kind {
                AccessorKind::Getter => getter = true,
                AccessorKind::Setter => setter = true,
            }
        }

        if self.at(T::EolOrSemicolon) || self.at(T::RBrace) {
            self.consume_if(T::Semicolon);
        } else if self.last_token() != T::Semicolon {
            self.error_until(ErrorCode::E1006, "Property getter or setter expected", PROPERTY_END);
        }
    }

    /// `get() = ...`, `set(value) { ... }`, or a bare `private set`.
    fn parse_property_accessor(&mut self, getter: bool, setter: bool) -> Option<AccessorKind> {
        let accessor = self.mark();
        self.parse_modifier_list(TokenSet::EMPTY);

        let (kind, keyword) = if self.at(T::GetKw) && !getter {
            (AccessorKind::Getter, T::GetKw)
        } else if self.at(T::SetKw) && !setter {
            (AccessorKind::Setter, T::SetKw)
        } else {
            accessor.rollback_to(self);
            return None;
        };
        self.advance_as(keyword);

        if !self.at(T::LPar) {
            if self.at_set(ACCESSOR_FIRST_OR_PROPERTY_END) {
                self.close_declaration(accessor, NodeKind::PropertyAccessor);
                return Some(kind);
            }
            self.error_until(ErrorCode::E1006, "Accessor body expected", ACCESSOR_BODY_RECOVERY);
        }

        self.with_newlines(false, |p| {
            p.expect_with_recovery(
                T::LPar,
                ErrorCode::E1003,
                "Expecting '('",
                Some(ACCESSOR_LPAR_RECOVERY),
            );
            if kind == AccessorKind::Setter {
                p.parse_setter_parameter();
            }
            if !p.at(T::RPar) {
                p.error_until(ErrorCode::E1003, "Expecting ')'", ACCESSOR_RPAR_RECOVERY);
            }
            p.consume_if(T::RPar);
        });

        if self.consume_if(T::Colon) {
            self.parse_type_ref();
        }
        self.parse_function_contract();
        self.parse_function_body();

        self.close_declaration(accessor, NodeKind::PropertyAccessor);
        Some(kind)
    }

    fn parse_setter_parameter(&mut self) {
        let list = self.mark();
        let parameter = self.mark();
        self.parse_modifier_list(SETTER_PARAMETER_MODIFIERS_STOP);
        self.expect_with_recovery(
            T::Ident,
            ErrorCode::E1004,
            "Expecting parameter name",
            Some(SETTER_PARAMETER_RECOVERY),
        );
        if self.consume_if(T::Colon) {
            self.parse_type_ref();
        }
        parameter.done(self, NodeKind::ValueParameter);
        self.consume_if(T::Comma);
        list.done(self, NodeKind::ValueParameterList);
    }

    /// `fun` declaration starting at the keyword.
    ///
    /// With `fail_if_named`, a named function is not parsed: `None` is
    /// returned and the caller rolls back. Otherwise the result is always
    /// `Some(FUN)`.
    pub(crate) fn parse_function(&mut self, fail_if_named: bool) -> Option<NodeKind> {
        self.advance(); // fun

        // `class A { fun }`
        if self.at(T::RBrace) {
            self.error(ErrorCode::E1006, "Function body expected");
            return Some(NodeKind::Fun);
        }

        let type_parameters = self.at(T::Lt);
        if type_parameters {
            self.parse_type_parameter_list(FUNCTION_TYPE_PARAMETER_RECOVERY);
        }

        let named = self.with_joining(false, |p| {
            let receiver = p.parse_receiver_type("function", FUNCTION_NAME_FOLLOW);
            if fail_if_named && p.at(T::Ident) {
                return true;
            }
            p.parse_function_or_property_name(receiver, "function", FUNCTION_NAME_FOLLOW, false);
            false
        });
        if named {
            return None;
        }

        if self.at(T::Lt) {
            let list = self.mark();
            self.parse_type_parameter_list(VALUE_PARAMETERS_FOLLOW.with(T::LPar));
            self.error_if(
                list,
                type_parameters,
                "Only one type parameter list is allowed for a function",
            );
        }

        if self.at(T::LPar) {
            self.parse_value_parameter_list(false, false, VALUE_PARAMETERS_FOLLOW);
        } else {
            self.error(ErrorCode::E1003, "Expecting '('");
        }

        if self.consume_if(T::Colon) {
            self.parse_type_ref();
        }

        self.parse_function_contract();

        if !self.consume_if(T::Semicolon) && (self.at(T::Eq) || self.at(T::LBrace)) {
            self.parse_function_body();
        }

        Some(NodeKind::Fun)
    }

    /// `{ statements }` or `= expression`.
    fn parse_function_body(&mut self) {
        if self.at(T::LBrace) {
            self.parse_block();
        } else if self.consume_if(T::Eq) {
            self.parse_expression();
            self.consume_if(T::Semicolon);
        } else {
            self.error(ErrorCode::E1006, "Expecting function body");
        }
    }

    fn parse_function_contract(&mut self) {
        if self.at(T::ContractKw) {
            self.parse_contract_description_block();
        }
    }

    /// `Type.` before a function or property name. Returns whether a
    /// receiver was parsed.
    fn parse_receiver_type(&mut self, title: &str, name_follow: TokenSet) -> bool {
        let annotations = self.mark();
        let annotated = self.parse_annotations();
        let last_dot = self.last_dot_after_receiver();

        match (annotated, last_dot.is_some()) {
            // The annotations belong to the receiver type.
            (true, true) => annotations.rollback_to(self),
            (true, false) => annotations.error(
                self,
                ErrorCode::E1006,
                "Annotations are not allowed in this position",
            ),
            (false, _) => annotations.rollback_to(self),
        }

        let Some(dot) = last_dot else {
            return false;
        };

        self.truncated(dot, Self::parse_type_ref);

        if self.at_set(RECEIVER_TYPE_TERMINATORS) {
            self.advance();
        } else {
            self.error_with_recovery(
                ErrorCode::E1006,
                &format!("Expecting '.' before a {title} name"),
                Some(name_follow),
            );
        }
        true
    }

    /// Raw index of the `.` that ends a receiver type, if there is one.
    ///
    /// A parenthesized receiver ends at the first top-level dot; otherwise
    /// the last top-level dot before the name wins:
    ///
    /// ```text
    /// fun (A).f()          // `(A)`
    /// fun a.b.C<D>.f()     // `a.b.C<D>`
    /// fun f()              // no receiver
    /// ```
    fn last_dot_after_receiver(&mut self) -> Option<usize> {
        let start = self.cursor.checkpoint();
        let parenthesized = self.at(T::LPar);
        let mut depth = BracketDepth::default();
        let mut dot = None;

        while !self.eof() {
            let top_level = depth.is_top_level();
            if top_level && self.at_set(RECEIVER_TYPE_TERMINATORS) {
                dot = Some(self.position());
                if parenthesized {
                    break;
                }
            } else if top_level && self.receiver_scan_stops(parenthesized) {
                break;
            }
            depth.track(self.current());
            self.advance();
        }

        self.cursor.restore(start);
        dot
    }

    fn receiver_scan_stops(&self, parenthesized: bool) -> bool {
        if self.at_set(OUT_OF_RECEIVER) {
            return true;
        }
        if parenthesized {
            return !matches!(self.current(), T::Quest | T::LPar | T::RPar);
        }
        if self.at(T::LPar) {
            return true;
        }
        self.at(T::Ident) && !matches!(self.nth(1), T::Lt | T::Dot | T::SafeAccess | T::Quest)
    }

    fn parse_function_or_property_name(
        &mut self,
        receiver: bool,
        title: &str,
        name_follow: TokenSet,
        required: bool,
    ) {
        // Anonymous functions have no name.
        if !required && self.at_set(name_follow) {
            return;
        }
        let recovery = name_follow
            .union(TokenSet::new(&[T::LBrace, T::RBrace]))
            .union(TOP_LEVEL_DECLARATION_FIRST);
        let message = if receiver {
            format!("Expecting {title} name")
        } else {
            format!("Expecting {title} name or receiver type")
        };
        self.expect_with_recovery(T::Ident, ErrorCode::E1004, &message, Some(recovery));
    }
}

#[cfg(test)]
mod tests;
