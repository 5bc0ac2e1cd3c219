//! Syntax tree node kinds.

use std::fmt;

macro_rules! node_kinds {
    ($($(#[$doc:meta])* $variant:ident => $name:literal,)*) => {
        /// Kind of an interior node of the syntax tree.
        ///
        /// The printed names follow the usual Kotlin PSI element names so
        /// dumps can be compared against other Kotlin tooling.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        pub enum NodeKind {
            $($(#[$doc])* $variant,)*
        }

        impl NodeKind {
            /// Every node kind, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant,)*];

            /// Upper-snake name used in dumps.
            pub const fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$variant => $name,)*
                }
            }
        }
    };
}

node_kinds! {
    /// Wrapper around everything an entry point parsed.
    Root => "ROOT",
    /// Holds skipped tokens or marks a missing construct; carries a message.
    Error => "ERROR_ELEMENT",

    // Operators
    BinaryExpression => "BINARY_EXPRESSION",
    BinaryWithType => "BINARY_WITH_TYPE",
    IsExpression => "IS_EXPRESSION",
    OperationReference => "OPERATION_REFERENCE",
    PrefixExpression => "PREFIX_EXPRESSION",
    PostfixExpression => "POSTFIX_EXPRESSION",
    AnnotatedExpression => "ANNOTATED_EXPRESSION",
    LabeledExpression => "LABELED_EXPRESSION",
    LabelQualifier => "LABEL_QUALIFIER",
    Label => "LABEL",

    // Postfix forms
    CallExpression => "CALL_EXPRESSION",
    ArrayAccessExpression => "ARRAY_ACCESS_EXPRESSION",
    Indices => "INDICES",
    DotQualifiedExpression => "DOT_QUALIFIED_EXPRESSION",
    SafeAccessExpression => "SAFE_ACCESS_EXPRESSION",
    CallableReferenceExpression => "CALLABLE_REFERENCE_EXPRESSION",
    ClassLiteralExpression => "CLASS_LITERAL_EXPRESSION",
    TypeArgumentList => "TYPE_ARGUMENT_LIST",
    TypeProjection => "TYPE_PROJECTION",
    ValueArgumentList => "VALUE_ARGUMENT_LIST",
    ValueArgument => "VALUE_ARGUMENT",
    ValueArgumentName => "VALUE_ARGUMENT_NAME",
    EmptyValueArgument => "EMPTY_VALUE_ARGUMENT",
    LambdaArgument => "LAMBDA_ARGUMENT",

    // Lambdas and blocks
    LambdaExpression => "LAMBDA_EXPRESSION",
    FunctionLiteral => "FUNCTION_LITERAL",
    Block => "BLOCK",
    ValueParameterList => "VALUE_PARAMETER_LIST",
    ValueParameter => "VALUE_PARAMETER",
    DestructuringDeclaration => "DESTRUCTURING_DECLARATION",
    DestructuringDeclarationEntry => "DESTRUCTURING_DECLARATION_ENTRY",

    // Atoms
    Parenthesized => "PARENTHESIZED",
    CollectionLiteralExpression => "COLLECTION_LITERAL_EXPRESSION",
    ThisExpression => "THIS_EXPRESSION",
    SuperExpression => "SUPER_EXPRESSION",
    ReferenceExpression => "REFERENCE_EXPRESSION",
    ObjectLiteral => "OBJECT_LITERAL",
    BooleanConstant => "BOOLEAN_CONSTANT",
    IntegerConstant => "INTEGER_CONSTANT",
    CharacterConstant => "CHARACTER_CONSTANT",
    FloatConstant => "FLOAT_CONSTANT",
    Null => "NULL",

    // Jumps
    Throw => "THROW",
    Return => "RETURN",
    Break => "BREAK",
    Continue => "CONTINUE",

    // Control flow
    If => "IF",
    Condition => "CONDITION",
    Then => "THEN",
    Else => "ELSE",
    When => "WHEN",
    WhenEntry => "WHEN_ENTRY",
    WhenEntryGuard => "WHEN_ENTRY_GUARD",
    WhenConditionExpression => "WHEN_CONDITION_EXPRESSION",
    WhenConditionInRange => "WHEN_CONDITION_IN_RANGE",
    WhenConditionIsPattern => "WHEN_CONDITION_IS_PATTERN",
    Try => "TRY",
    Catch => "CATCH",
    Finally => "FINALLY",
    For => "FOR",
    While => "WHILE",
    DoWhile => "DO_WHILE",
    Body => "BODY",
    LoopRange => "LOOP_RANGE",

    // String templates
    StringTemplate => "STRING_TEMPLATE",
    StringInterpolationPrefix => "STRING_INTERPOLATION_PREFIX",
    LiteralStringTemplateEntry => "LITERAL_STRING_TEMPLATE_ENTRY",
    EscapeStringTemplateEntry => "ESCAPE_STRING_TEMPLATE_ENTRY",
    ShortStringTemplateEntry => "SHORT_STRING_TEMPLATE_ENTRY",
    LongStringTemplateEntry => "LONG_STRING_TEMPLATE_ENTRY",

    // Statements
    ScriptInitializer => "SCRIPT_INITIALIZER",
    ContractEffectList => "CONTRACT_EFFECT_LIST",
    ContractEffect => "CONTRACT_EFFECT",

    // Declarations
    Property => "PROPERTY",
    PropertyDelegate => "PROPERTY_DELEGATE",
    PropertyAccessor => "PROPERTY_ACCESSOR",
    Fun => "FUN",
    Class => "CLASS",
    ObjectDeclaration => "OBJECT_DECLARATION",
    TypeAlias => "TYPEALIAS",
    ClassBody => "CLASS_BODY",
    ClassInitializer => "CLASS_INITIALIZER",
    EnumEntry => "ENUM_ENTRY",
    PrimaryConstructor => "PRIMARY_CONSTRUCTOR",
    SuperTypeList => "SUPER_TYPE_LIST",
    SuperTypeEntry => "SUPER_TYPE_ENTRY",
    SuperTypeCallEntry => "SUPER_TYPE_CALL_ENTRY",
    ConstructorCallee => "CONSTRUCTOR_CALLEE",
    TypeParameterList => "TYPE_PARAMETER_LIST",
    TypeParameter => "TYPE_PARAMETER",
    ModifierList => "MODIFIER_LIST",
    AnnotationEntry => "ANNOTATION_ENTRY",
    Annotation => "ANNOTATION",
    AnnotationTarget => "ANNOTATION_TARGET",
    ContextParameterList => "CONTEXT_PARAMETER_LIST",

    // Types
    TypeReference => "TYPE_REFERENCE",
    UserType => "USER_TYPE",
    NullableType => "NULLABLE_TYPE",
    FunctionType => "FUNCTION_TYPE",
    FunctionTypeReceiver => "FUNCTION_TYPE_RECEIVER",
    DynamicType => "DYNAMIC_TYPE",
}

impl NodeKind {
    /// Kinds that are expressions in their own right (as opposed to parts
    /// of one, like `OPERATION_REFERENCE` or `CONDITION`).
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            NodeKind::BinaryExpression
                | NodeKind::BinaryWithType
                | NodeKind::IsExpression
                | NodeKind::PrefixExpression
                | NodeKind::PostfixExpression
                | NodeKind::AnnotatedExpression
                | NodeKind::LabeledExpression
                | NodeKind::CallExpression
                | NodeKind::ArrayAccessExpression
                | NodeKind::DotQualifiedExpression
                | NodeKind::SafeAccessExpression
                | NodeKind::CallableReferenceExpression
                | NodeKind::ClassLiteralExpression
                | NodeKind::LambdaExpression
                | NodeKind::Parenthesized
                | NodeKind::CollectionLiteralExpression
                | NodeKind::ThisExpression
                | NodeKind::SuperExpression
                | NodeKind::ReferenceExpression
                | NodeKind::ObjectLiteral
                | NodeKind::BooleanConstant
                | NodeKind::IntegerConstant
                | NodeKind::CharacterConstant
                | NodeKind::FloatConstant
                | NodeKind::Null
                | NodeKind::Throw
                | NodeKind::Return
                | NodeKind::Break
                | NodeKind::Continue
                | NodeKind::If
                | NodeKind::When
                | NodeKind::Try
                | NodeKind::For
                | NodeKind::While
                | NodeKind::DoWhile
                | NodeKind::StringTemplate
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
