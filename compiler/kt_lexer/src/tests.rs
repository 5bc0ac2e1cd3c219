use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

/// Kinds of all non-trivia tokens, end-of-file excluded.
fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia() && *k != TokenKind::Eof)
        .collect()
}

fn texts(source: &str) -> Vec<String> {
    let tokens = lex(source);
    tokens
        .iter()
        .filter(|t| !t.kind.is_trivia() && t.kind != TokenKind::Eof)
        .map(|t| t.text(source).to_string())
        .collect()
}

#[test]
fn operators_use_longest_match() {
    use TokenKind as T;
    assert_eq!(
        kinds("a === b !== c == d != e"),
        vec![T::Ident, T::EqEqEq, T::Ident, T::ExclEqEqEq, T::Ident, T::EqEq, T::Ident, T::ExclEq, T::Ident]
    );
    assert_eq!(kinds("1..2"), vec![T::IntegerLiteral, T::Range, T::IntegerLiteral]);
    assert_eq!(kinds("0..<n"), vec![T::IntegerLiteral, T::RangeUntil, T::Ident]);
    assert_eq!(kinds("x -> y"), vec![T::Ident, T::Arrow, T::Ident]);
    assert_eq!(kinds("a::b"), vec![T::Ident, T::ColonColon, T::Ident]);
}

#[test]
fn joinable_operators_stay_split() {
    use TokenKind as T;
    assert_eq!(kinds("a?.b"), vec![T::Ident, T::Quest, T::Dot, T::Ident]);
    assert_eq!(kinds("a ?: b"), vec![T::Ident, T::Quest, T::Colon, T::Ident]);
    assert_eq!(kinds("a!!"), vec![T::Ident, T::Excl, T::Excl]);
}

#[test]
fn negated_keywords_need_a_word_boundary() {
    use TokenKind as T;
    assert_eq!(kinds("a !in b"), vec![T::Ident, T::NotIn, T::Ident]);
    assert_eq!(kinds("a !is B"), vec![T::Ident, T::NotIs, T::Ident]);
    assert_eq!(kinds("!inside"), vec![T::Excl, T::Ident]);
    assert_eq!(kinds("x as? T"), vec![T::Ident, T::AsSafe, T::Ident]);
}

#[test]
fn soft_keywords_are_identifiers() {
    use TokenKind as T;
    assert_eq!(
        kinds("catch finally where suspend when"),
        vec![T::Ident, T::Ident, T::Ident, T::Ident, T::WhenKw]
    );
}

#[test]
fn numbers() {
    use TokenKind as T;
    assert_eq!(
        kinds("1 1L 0xFF 0b101 1_000 2u 3uL"),
        vec![T::IntegerLiteral; 7]
    );
    assert_eq!(kinds("1.5 .5 1e10 2.5e-3 1f 3.0F"), vec![T::FloatLiteral; 6]);
    assert_eq!(kinds("1.foo"), vec![T::IntegerLiteral, T::Dot, T::Ident]);
}

#[test]
fn char_literals() {
    assert_eq!(texts("'a' '\\n' '\\u0041'"), vec!["'a'", "'\\n'", "'\\u0041'"]);
    assert_eq!(kinds("'a'"), vec![TokenKind::CharacterLiteral]);
}

#[test]
fn simple_string_template() {
    use TokenKind as T;
    assert_eq!(
        kinds(r#""a $b c${d + 1}\n""#),
        vec![
            T::OpenQuote,
            T::RegularStringPart,
            T::ShortTemplateEntryStart,
            T::Ident,
            T::RegularStringPart,
            T::LongTemplateEntryStart,
            T::Ident,
            T::Plus,
            T::IntegerLiteral,
            T::LongTemplateEntryEnd,
            T::EscapeSequence,
            T::ClosingQuote,
        ]
    );
}

#[test]
fn braces_inside_long_template_entry() {
    use TokenKind as T;
    assert_eq!(
        kinds(r#""${ f { it } }""#),
        vec![
            T::OpenQuote,
            T::LongTemplateEntryStart,
            T::Ident,
            T::LBrace,
            T::Ident,
            T::RBrace,
            T::LongTemplateEntryEnd,
            T::ClosingQuote,
        ]
    );
}

#[test]
fn keyword_after_dollar() {
    use TokenKind as T;
    assert_eq!(
        kinds(r#""$this $if""#),
        vec![
            T::OpenQuote,
            T::ShortTemplateEntryStart,
            T::ThisKw,
            T::RegularStringPart,
            T::ShortTemplateEntryStart,
            T::IfKw,
            T::ClosingQuote,
        ]
    );
}

#[test]
fn lone_dollar_is_text() {
    use TokenKind as T;
    assert_eq!(
        kinds(r#""cost: $ 5""#),
        vec![
            T::OpenQuote,
            T::RegularStringPart,
            T::RegularStringPart,
            T::RegularStringPart,
            T::ClosingQuote,
        ]
    );
}

#[test]
fn dangling_newline_ends_string() {
    use TokenKind as T;
    assert_eq!(
        kinds("\"abc\nfoo"),
        vec![T::OpenQuote, T::RegularStringPart, T::DanglingNewline, T::Ident]
    );
}

#[test]
fn raw_strings() {
    use TokenKind as T;
    assert_eq!(
        kinds("\"\"\"a\\n\n$x\"\"\"\""),
        vec![
            T::OpenQuote,
            T::RegularStringPart,
            T::ShortTemplateEntryStart,
            T::Ident,
            T::RegularStringPart,
            T::ClosingQuote,
        ]
    );
}

#[test]
fn interpolation_prefix() {
    use TokenKind as T;
    assert_eq!(
        kinds(r#"$$"a $b $$c""#),
        vec![
            T::InterpolationPrefix,
            T::OpenQuote,
            T::RegularStringPart,
            T::RegularStringPart,
            T::RegularStringPart,
            T::ShortTemplateEntryStart,
            T::Ident,
            T::ClosingQuote,
        ]
    );
}

#[test]
fn nested_block_comments() {
    let tokens = lex("/* a /* b */ c */ x");
    assert_eq!(tokens.kind(0), TokenKind::BlockComment);
    assert_eq!(tokens.text(0, "/* a /* b */ c */ x"), "/* a /* b */ c */");
    assert_eq!(lex("/** doc */").kind(0), TokenKind::DocComment);
    assert_eq!(lex("/**/").kind(0), TokenKind::BlockComment);
}

#[test]
fn layout_flags_describe_preceding_trivia() {
    let source = "a\n  // c\n b c";
    let tokens = lex(source);
    let significant: Vec<(String, TokenFlags)> = tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| !t.kind.is_trivia())
        .map(|(i, t)| (t.text(source).to_string(), tokens.flags(i)))
        .collect();

    let (ref a, a_flags) = significant[0];
    assert_eq!(a, "a");
    assert!(a_flags.is_adjacent());
    assert!(!a_flags.has_newline_before());

    let (ref b, b_flags) = significant[1];
    assert_eq!(b, "b");
    assert!(b_flags.has_newline_before());
    assert!(b_flags.has_comment_before());
    assert!(!b_flags.is_adjacent());

    let (ref c, c_flags) = significant[2];
    assert_eq!(c, "c");
    assert!(!c_flags.has_newline_before());
    assert!(!c_flags.has_comment_before());
}

#[test]
fn ends_with_single_eof() {
    let tokens = lex("");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens.kind(0), TokenKind::Eof);

    let tokens = lex("a");
    assert_eq!(tokens.kind(tokens.len() - 1), TokenKind::Eof);
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
}

#[test]
fn bad_characters_do_not_stop_lexing() {
    use TokenKind as T;
    assert_eq!(kinds("a | b ~ c"), vec![T::Ident, T::BadCharacter, T::Ident, T::BadCharacter, T::Ident]);
}

proptest! {
    #[test]
    fn tokens_tile_the_source(source in "[a-z0-9 \\n\"${}()!?.:;,+*/<>=-]{0,64}") {
        let tokens = lex(&source);
        let mut offset = 0u32;
        for token in &tokens {
            prop_assert_eq!(token.span.start, offset);
            offset = token.span.end;
        }
        prop_assert_eq!(offset as usize, source.len());
    }

    #[test]
    fn any_unicode_input_lexes(source in "\\PC{0,40}") {
        let tokens = lex(&source);
        let rebuilt: String = tokens.iter().map(|t| t.text(&source)).collect();
        prop_assert_eq!(rebuilt, source);
    }
}
