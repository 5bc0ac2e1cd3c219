//! Token kinds for Kotlin.

use std::fmt;

/// Kotlin token kinds.
///
/// Fieldless and one byte wide: payloads (identifier text, literal values)
/// are recovered from the source through the token's span. Discriminants are
/// grouped into ranges so category checks are range comparisons:
///
/// | Range   | Category                    |
/// |---------|-----------------------------|
/// | 0-7     | Trivia                      |
/// | 8-19    | Identifier and literals     |
/// | 20-29   | String template pieces      |
/// | 30-69   | Hard keywords               |
/// | 70-129  | Punctuation and operators   |
/// | 130-199 | Soft and modifier keywords  |
/// | 250-255 | Special                     |
///
/// Soft keywords are never produced by the lexer. They arrive as
/// [`TokenKind::Ident`] and the parser matches them by text; a consumed
/// modifier is remapped to its keyword kind in the tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenKind {
    // === Trivia (0-7) ===
    Whitespace = 0,
    EolComment = 1,
    BlockComment = 2,
    DocComment = 3,
    Shebang = 4,

    // === Identifier and literals (8-19) ===
    Ident = 8,
    IntegerLiteral = 9,
    FloatLiteral = 10,
    CharacterLiteral = 11,

    // === String templates (20-29) ===
    /// `$$` before an opening quote (multi-dollar interpolation).
    InterpolationPrefix = 20,
    OpenQuote = 21,
    ClosingQuote = 22,
    RegularStringPart = 23,
    EscapeSequence = 24,
    /// `$` directly followed by a name.
    ShortTemplateEntryStart = 25,
    /// `${`
    LongTemplateEntryStart = 26,
    /// `}` closing a long template entry.
    LongTemplateEntryEnd = 27,
    /// Line break inside a single-line string.
    DanglingNewline = 28,

    // === Hard keywords (30-69) ===
    PackageKw = 30,
    AsKw = 31,
    TypealiasKw = 32,
    ClassKw = 33,
    ThisKw = 34,
    SuperKw = 35,
    ValKw = 36,
    VarKw = 37,
    FunKw = 38,
    ForKw = 39,
    NullKw = 40,
    TrueKw = 41,
    FalseKw = 42,
    IsKw = 43,
    InKw = 44,
    ThrowKw = 45,
    ReturnKw = 46,
    BreakKw = 47,
    ContinueKw = 48,
    ObjectKw = 49,
    IfKw = 50,
    ElseKw = 51,
    WhileKw = 52,
    DoKw = 53,
    TryKw = 54,
    WhenKw = 55,
    InterfaceKw = 56,
    TypeofKw = 57,
    /// `!in`
    NotIn = 58,
    /// `!is`
    NotIs = 59,
    /// `as?`
    AsSafe = 60,

    // === Punctuation and operators (70-129) ===
    LBracket = 70,
    RBracket = 71,
    LBrace = 72,
    RBrace = 73,
    LPar = 74,
    RPar = 75,
    Dot = 76,
    PlusPlus = 77,
    MinusMinus = 78,
    Mul = 79,
    Plus = 80,
    Minus = 81,
    Excl = 82,
    Div = 83,
    Perc = 84,
    Lt = 85,
    Gt = 86,
    LtEq = 87,
    GtEq = 88,
    EqEqEq = 89,
    Arrow = 90,
    DoubleArrow = 91,
    ExclEqEqEq = 92,
    EqEq = 93,
    ExclEq = 94,
    /// `!!`, only ever produced by joining two adjacent `!`.
    ExclExcl = 95,
    AndAnd = 96,
    And = 97,
    OrOr = 98,
    /// `?.`, only ever produced by joining `?` and `.`.
    SafeAccess = 99,
    /// `?:`, only ever produced by joining `?` and `:`.
    Elvis = 100,
    Quest = 101,
    ColonColon = 102,
    Colon = 103,
    Semicolon = 104,
    DoubleSemicolon = 105,
    Range = 106,
    RangeUntil = 107,
    Eq = 108,
    MulEq = 109,
    DivEq = 110,
    PercEq = 111,
    PlusEq = 112,
    MinusEq = 113,
    Hash = 114,
    At = 115,
    Comma = 116,

    // === Soft and modifier keywords (130-199) ===
    FileKw = 130,
    ImportKw = 131,
    WhereKw = 132,
    ByKw = 133,
    GetKw = 134,
    SetKw = 135,
    AbstractKw = 136,
    EnumKw = 137,
    ContractKw = 138,
    OpenKw = 139,
    InnerKw = 140,
    OverrideKw = 141,
    PrivateKw = 142,
    PublicKw = 143,
    InternalKw = 144,
    ProtectedKw = 145,
    CatchKw = 146,
    FinallyKw = 147,
    OutKw = 148,
    FinalKw = 149,
    VarargKw = 150,
    ReifiedKw = 151,
    DynamicKw = 152,
    CompanionKw = 153,
    ConstructorKw = 154,
    InitKw = 155,
    SealedKw = 156,
    FieldKw = 157,
    PropertyKw = 158,
    ReceiverKw = 159,
    ParamKw = 160,
    SetparamKw = 161,
    DelegateKw = 162,
    LateinitKw = 163,
    DataKw = 164,
    InlineKw = 165,
    NoinlineKw = 166,
    TailrecKw = 167,
    ExternalKw = 168,
    AnnotationKw = 169,
    CrossinlineKw = 170,
    ConstKw = 171,
    OperatorKw = 172,
    InfixKw = 173,
    SuspendKw = 174,
    ExpectKw = 175,
    ActualKw = 176,
    ValueKw = 177,
    ContextKw = 178,

    // === Special (250-255) ===
    BadCharacter = 250,
    /// Pseudo token for recovery sets: a `;`, a line break before the
    /// current token, or end of input. Never present in a token list.
    EolOrSemicolon = 254,
    Eof = 255,
}

impl TokenKind {
    /// Every hard keyword, in declaration order.
    pub const HARD_KEYWORDS: &'static [TokenKind] = &[
        TokenKind::PackageKw,
        TokenKind::AsKw,
        TokenKind::TypealiasKw,
        TokenKind::ClassKw,
        TokenKind::ThisKw,
        TokenKind::SuperKw,
        TokenKind::ValKw,
        TokenKind::VarKw,
        TokenKind::FunKw,
        TokenKind::ForKw,
        TokenKind::NullKw,
        TokenKind::TrueKw,
        TokenKind::FalseKw,
        TokenKind::IsKw,
        TokenKind::InKw,
        TokenKind::ThrowKw,
        TokenKind::ReturnKw,
        TokenKind::BreakKw,
        TokenKind::ContinueKw,
        TokenKind::ObjectKw,
        TokenKind::IfKw,
        TokenKind::ElseKw,
        TokenKind::WhileKw,
        TokenKind::DoKw,
        TokenKind::TryKw,
        TokenKind::WhenKw,
        TokenKind::InterfaceKw,
        TokenKind::TypeofKw,
        TokenKind::NotIn,
        TokenKind::NotIs,
        TokenKind::AsSafe,
    ];

    /// Every soft keyword, in declaration order.
    pub const SOFT_KEYWORDS: &'static [TokenKind] = &[
        TokenKind::FileKw,
        TokenKind::ImportKw,
        TokenKind::WhereKw,
        TokenKind::ByKw,
        TokenKind::GetKw,
        TokenKind::SetKw,
        TokenKind::AbstractKw,
        TokenKind::EnumKw,
        TokenKind::ContractKw,
        TokenKind::OpenKw,
        TokenKind::InnerKw,
        TokenKind::OverrideKw,
        TokenKind::PrivateKw,
        TokenKind::PublicKw,
        TokenKind::InternalKw,
        TokenKind::ProtectedKw,
        TokenKind::CatchKw,
        TokenKind::FinallyKw,
        TokenKind::OutKw,
        TokenKind::FinalKw,
        TokenKind::VarargKw,
        TokenKind::ReifiedKw,
        TokenKind::DynamicKw,
        TokenKind::CompanionKw,
        TokenKind::ConstructorKw,
        TokenKind::InitKw,
        TokenKind::SealedKw,
        TokenKind::FieldKw,
        TokenKind::PropertyKw,
        TokenKind::ReceiverKw,
        TokenKind::ParamKw,
        TokenKind::SetparamKw,
        TokenKind::DelegateKw,
        TokenKind::LateinitKw,
        TokenKind::DataKw,
        TokenKind::InlineKw,
        TokenKind::NoinlineKw,
        TokenKind::TailrecKw,
        TokenKind::ExternalKw,
        TokenKind::AnnotationKw,
        TokenKind::CrossinlineKw,
        TokenKind::ConstKw,
        TokenKind::OperatorKw,
        TokenKind::InfixKw,
        TokenKind::SuspendKw,
        TokenKind::ExpectKw,
        TokenKind::ActualKw,
        TokenKind::ValueKw,
        TokenKind::ContextKw,
    ];

    /// Keywords that may appear in a modifier list. `in` and `fun` are hard
    /// keywords (variance and `fun interface`); the rest are soft.
    pub const MODIFIER_KEYWORDS: &'static [TokenKind] = &[
        TokenKind::AbstractKw,
        TokenKind::EnumKw,
        TokenKind::ContractKw,
        TokenKind::OpenKw,
        TokenKind::InnerKw,
        TokenKind::OverrideKw,
        TokenKind::PrivateKw,
        TokenKind::PublicKw,
        TokenKind::InternalKw,
        TokenKind::ProtectedKw,
        TokenKind::OutKw,
        TokenKind::InKw,
        TokenKind::FinalKw,
        TokenKind::VarargKw,
        TokenKind::ReifiedKw,
        TokenKind::CompanionKw,
        TokenKind::SealedKw,
        TokenKind::LateinitKw,
        TokenKind::DataKw,
        TokenKind::InlineKw,
        TokenKind::NoinlineKw,
        TokenKind::TailrecKw,
        TokenKind::ExternalKw,
        TokenKind::AnnotationKw,
        TokenKind::CrossinlineKw,
        TokenKind::ConstKw,
        TokenKind::OperatorKw,
        TokenKind::InfixKw,
        TokenKind::SuspendKw,
        TokenKind::ExpectKw,
        TokenKind::ActualKw,
        TokenKind::FunKw,
        TokenKind::ValueKw,
    ];

    /// One-byte discriminant, used as the bit index in token sets.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Whitespace and comments.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        (self as u8) < 8
    }

    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::EolComment
                | TokenKind::BlockComment
                | TokenKind::DocComment
                | TokenKind::Shebang
        )
    }

    /// Hard (reserved) keyword, including `!in`, `!is` and `as?`.
    #[inline]
    pub const fn is_keyword(self) -> bool {
        let i = self as u8;
        i >= 30 && i < 70
    }

    #[inline]
    pub const fn is_soft_keyword(self) -> bool {
        let i = self as u8;
        i >= 130 && i < 200
    }

    pub fn is_modifier_keyword(self) -> bool {
        Self::MODIFIER_KEYWORDS.contains(&self)
    }

    /// Look up a soft keyword by its spelling.
    pub fn soft_keyword(text: &str) -> Option<TokenKind> {
        Self::SOFT_KEYWORDS
            .iter()
            .copied()
            .find(|kind| kind.fixed_text() == Some(text))
    }

    /// Source text of tokens that are always spelled the same way.
    pub const fn fixed_text(self) -> Option<&'static str> {
        use TokenKind::{
            AbstractKw, ActualKw, And, AndAnd, AnnotationKw, Arrow, AsKw, AsSafe, At, BreakKw,
            ByKw, CatchKw, ClassKw, Colon, ColonColon, Comma, CompanionKw, ConstKw, ConstructorKw,
            ContextKw, ContinueKw, ContractKw, CrossinlineKw, DataKw, DelegateKw, Div, DivEq,
            DoKw, Dot, DoubleArrow, DoubleSemicolon, DynamicKw, ElseKw, Elvis, EnumKw, Eq, EqEq,
            EqEqEq, Excl, ExclEq, ExclEqEqEq, ExclExcl, ExpectKw, ExternalKw, FalseKw, FieldKw,
            FileKw, FinalKw, FinallyKw, ForKw, FunKw, GetKw, Gt, GtEq, Hash, IfKw, ImportKw, InKw,
            InfixKw, InitKw, InlineKw, InnerKw, InterfaceKw, InternalKw, IsKw, LBrace, LBracket,
            LPar, LateinitKw, LongTemplateEntryEnd, LongTemplateEntryStart, Lt, LtEq, Minus,
            MinusEq, MinusMinus, Mul, MulEq, NoinlineKw, NotIn, NotIs, NullKw, ObjectKw, OpenKw,
            OperatorKw, OrOr, OutKw, OverrideKw, PackageKw, ParamKw, Perc, PercEq, Plus, PlusEq,
            PlusPlus, PrivateKw, PropertyKw, ProtectedKw, PublicKw, Quest, RBrace, RBracket, RPar,
            Range, RangeUntil, ReceiverKw, ReifiedKw, ReturnKw, SafeAccess, SealedKw, Semicolon,
            SetKw, SetparamKw, ShortTemplateEntryStart, SuperKw, SuspendKw, TailrecKw, ThisKw,
            ThrowKw, TrueKw, TryKw, TypealiasKw, TypeofKw, ValKw, ValueKw, VarKw, VarargKw,
            WhenKw, WhereKw, WhileKw,
        };
        let text = match self {
            PackageKw => "package",
            AsKw => "as",
            TypealiasKw => "typealias",
            ClassKw => "class",
            ThisKw => "this",
            SuperKw => "super",
            ValKw => "val",
            VarKw => "var",
            FunKw => "fun",
            ForKw => "for",
            NullKw => "null",
            TrueKw => "true",
            FalseKw => "false",
            IsKw => "is",
            InKw => "in",
            ThrowKw => "throw",
            ReturnKw => "return",
            BreakKw => "break",
            ContinueKw => "continue",
            ObjectKw => "object",
            IfKw => "if",
            ElseKw => "else",
            WhileKw => "while",
            DoKw => "do",
            TryKw => "try",
            WhenKw => "when",
            InterfaceKw => "interface",
            TypeofKw => "typeof",
            NotIn => "!in",
            NotIs => "!is",
            AsSafe => "as?",

            LBracket => "[",
            RBracket => "]",
            LBrace => "{",
            RBrace | LongTemplateEntryEnd => "}",
            LPar => "(",
            RPar => ")",
            Dot => ".",
            PlusPlus => "++",
            MinusMinus => "--",
            Mul => "*",
            Plus => "+",
            Minus => "-",
            Excl => "!",
            Div => "/",
            Perc => "%",
            Lt => "<",
            Gt => ">",
            LtEq => "<=",
            GtEq => ">=",
            EqEqEq => "===",
            Arrow => "->",
            DoubleArrow => "=>",
            ExclEqEqEq => "!==",
            EqEq => "==",
            ExclEq => "!=",
            ExclExcl => "!!",
            AndAnd => "&&",
            And => "&",
            OrOr => "||",
            SafeAccess => "?.",
            Elvis => "?:",
            Quest => "?",
            ColonColon => "::",
            Colon => ":",
            Semicolon => ";",
            DoubleSemicolon => ";;",
            Range => "..",
            RangeUntil => "..<",
            Eq => "=",
            MulEq => "*=",
            DivEq => "/=",
            PercEq => "%=",
            PlusEq => "+=",
            MinusEq => "-=",
            Hash => "#",
            At => "@",
            Comma => ",",
            ShortTemplateEntryStart => "$",
            LongTemplateEntryStart => "${",

            FileKw => "file",
            ImportKw => "import",
            WhereKw => "where",
            ByKw => "by",
            GetKw => "get",
            SetKw => "set",
            AbstractKw => "abstract",
            EnumKw => "enum",
            ContractKw => "contract",
            OpenKw => "open",
            InnerKw => "inner",
            OverrideKw => "override",
            PrivateKw => "private",
            PublicKw => "public",
            InternalKw => "internal",
            ProtectedKw => "protected",
            CatchKw => "catch",
            FinallyKw => "finally",
            OutKw => "out",
            FinalKw => "final",
            VarargKw => "vararg",
            ReifiedKw => "reified",
            DynamicKw => "dynamic",
            CompanionKw => "companion",
            ConstructorKw => "constructor",
            InitKw => "init",
            SealedKw => "sealed",
            FieldKw => "field",
            PropertyKw => "property",
            ReceiverKw => "receiver",
            ParamKw => "param",
            SetparamKw => "setparam",
            DelegateKw => "delegate",
            LateinitKw => "lateinit",
            DataKw => "data",
            InlineKw => "inline",
            NoinlineKw => "noinline",
            TailrecKw => "tailrec",
            ExternalKw => "external",
            AnnotationKw => "annotation",
            CrossinlineKw => "crossinline",
            ConstKw => "const",
            OperatorKw => "operator",
            InfixKw => "infix",
            SuspendKw => "suspend",
            ExpectKw => "expect",
            ActualKw => "actual",
            ValueKw => "value",
            ContextKw => "context",
            _ => return None,
        };
        Some(text)
    }

    /// Upper-snake name, as printed in tree dumps and token listings.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Whitespace => "WHITE_SPACE",
            TokenKind::EolComment => "EOL_COMMENT",
            TokenKind::BlockComment => "BLOCK_COMMENT",
            TokenKind::DocComment => "DOC_COMMENT",
            TokenKind::Shebang => "SHEBANG_COMMENT",
            TokenKind::Ident => "IDENTIFIER",
            TokenKind::IntegerLiteral => "INTEGER_LITERAL",
            TokenKind::FloatLiteral => "FLOAT_LITERAL",
            TokenKind::CharacterLiteral => "CHARACTER_LITERAL",
            TokenKind::InterpolationPrefix => "INTERPOLATION_PREFIX",
            TokenKind::OpenQuote => "OPEN_QUOTE",
            TokenKind::ClosingQuote => "CLOSING_QUOTE",
            TokenKind::RegularStringPart => "REGULAR_STRING_PART",
            TokenKind::EscapeSequence => "ESCAPE_SEQUENCE",
            TokenKind::ShortTemplateEntryStart => "SHORT_TEMPLATE_ENTRY_START",
            TokenKind::LongTemplateEntryStart => "LONG_TEMPLATE_ENTRY_START",
            TokenKind::LongTemplateEntryEnd => "LONG_TEMPLATE_ENTRY_END",
            TokenKind::DanglingNewline => "DANGLING_NEWLINE",
            TokenKind::NotIn => "NOT_IN",
            TokenKind::NotIs => "NOT_IS",
            TokenKind::AsSafe => "AS_SAFE",
            TokenKind::LBracket => "LBRACKET",
            TokenKind::RBracket => "RBRACKET",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LPar => "LPAR",
            TokenKind::RPar => "RPAR",
            TokenKind::Dot => "DOT",
            TokenKind::PlusPlus => "PLUSPLUS",
            TokenKind::MinusMinus => "MINUSMINUS",
            TokenKind::Mul => "MUL",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Excl => "EXCL",
            TokenKind::Div => "DIV",
            TokenKind::Perc => "PERC",
            TokenKind::Lt => "LT",
            TokenKind::Gt => "GT",
            TokenKind::LtEq => "LTEQ",
            TokenKind::GtEq => "GTEQ",
            TokenKind::EqEqEq => "EQEQEQ",
            TokenKind::Arrow => "ARROW",
            TokenKind::DoubleArrow => "DOUBLE_ARROW",
            TokenKind::ExclEqEqEq => "EXCLEQEQEQ",
            TokenKind::EqEq => "EQEQ",
            TokenKind::ExclEq => "EXCLEQ",
            TokenKind::ExclExcl => "EXCLEXCL",
            TokenKind::AndAnd => "ANDAND",
            TokenKind::And => "AND",
            TokenKind::OrOr => "OROR",
            TokenKind::SafeAccess => "SAFE_ACCESS",
            TokenKind::Elvis => "ELVIS",
            TokenKind::Quest => "QUEST",
            TokenKind::ColonColon => "COLONCOLON",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::DoubleSemicolon => "DOUBLE_SEMICOLON",
            TokenKind::Range => "RANGE",
            TokenKind::RangeUntil => "RANGE_UNTIL",
            TokenKind::Eq => "EQ",
            TokenKind::MulEq => "MULTEQ",
            TokenKind::DivEq => "DIVEQ",
            TokenKind::PercEq => "PERCEQ",
            TokenKind::PlusEq => "PLUSEQ",
            TokenKind::MinusEq => "MINUSEQ",
            TokenKind::Hash => "HASH",
            TokenKind::At => "AT",
            TokenKind::Comma => "COMMA",
            TokenKind::BadCharacter => "BAD_CHARACTER",
            TokenKind::EolOrSemicolon => "EOL_OR_SEMICOLON",
            TokenKind::Eof => "EOF",
            // Keywords print as their spelling.
            keyword => keyword.fixed_text().unwrap_or("UNKNOWN"),
        }
    }

    /// Human-readable name for "expected ..." messages.
    pub fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::FloatLiteral => "floating-point literal",
            TokenKind::CharacterLiteral => "character literal",
            TokenKind::OpenQuote | TokenKind::ClosingQuote => "'\"'",
            TokenKind::EolOrSemicolon => "newline or ';'",
            TokenKind::Eof => "end of file",
            TokenKind::BadCharacter => "invalid character",
            kind if kind.is_trivia() => "whitespace or comment",
            kind => match kind.fixed_text() {
                Some(text) => text,
                None => "token",
            },
        }
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
