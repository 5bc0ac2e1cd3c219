use kt_ir::TokenList;
use pretty_assertions::assert_eq;

use super::*;

fn lazy() -> ParserConfig {
    ParserConfig {
        lazy: true,
        ..ParserConfig::default()
    }
}

fn lexed(source: &str) -> TokenList {
    kt_lexer::lex(source)
}

fn whole(tokens: &TokenList) -> Range<usize> {
    0..tokens.len()
}

#[test]
fn balanced_block_is_reparsable() {
    let tokens = lexed("{ a { b } }");
    assert!(is_reparsable(&tokens, whole(&tokens)));

    let tokens = lexed("  { }  // trailing");
    assert!(is_reparsable(&tokens, whole(&tokens)));
}

#[test]
fn other_ranges_are_not_reparsable() {
    for source in ["{ a } b", "{ a", "a { }", "} {", ""] {
        let tokens = lexed(source);
        assert!(!is_reparsable(&tokens, whole(&tokens)), "{source:?}");
    }

    let tokens = lexed("{ }");
    assert!(!is_reparsable(&tokens, 0..tokens.len() + 1));
}

#[test]
fn eager_parse_has_no_lazy_lambdas() {
    let source = "foo { a -> a }";
    let tokens = lexed(source);
    let output = parse(&tokens, source, EntryPoint::Statements, &ParserConfig::default());
    assert!(lazy_lambdas(&output.tree).is_empty());
}

#[test]
fn reparse_matches_lambda_entry_point() {
    let source = "val f = { a: Int -> a * 2 }";
    let tokens = lexed(source);
    let output = parse(&tokens, source, EntryPoint::Statements, &lazy());

    let ranges = lazy_lambdas(&output.tree);
    assert_eq!(ranges.len(), 1);
    let range = ranges[0].clone();

    let Some(body) = reparse_lazy_lambda(&tokens, source, range.clone(), &lazy()) else {
        panic!("lazy lambda should reparse");
    };
    let start = tokens.span(range.start).start as usize;
    let end = tokens.span(range.end - 1).end as usize;
    let text = &source[start..end];
    let standalone_tokens = lexed(text);
    let standalone = parse(
        &standalone_tokens,
        text,
        EntryPoint::Lambda,
        &ParserConfig::default(),
    );

    assert_eq!(
        body.tree.shape(body.tree.root()),
        standalone.tree.shape(standalone.tree.root())
    );
    assert!(body.errors.is_empty());
}

#[test]
fn nested_lambdas_follow_the_config() {
    let source = "foo { bar { 1 } }";
    let tokens = lexed(source);
    let output = parse(&tokens, source, EntryPoint::Statements, &lazy());
    let ranges = lazy_lambdas(&output.tree);
    assert_eq!(ranges.len(), 1);

    let Some(still_lazy) = reparse_lazy_lambda(&tokens, source, ranges[0].clone(), &lazy()) else {
        panic!("lazy lambda should reparse");
    };
    assert!(still_lazy.tree.has_lazy());

    let Some(eager) =
        reparse_lazy_lambda(&tokens, source, ranges[0].clone(), &ParserConfig::default())
    else {
        panic!("lazy lambda should reparse");
    };
    assert!(!eager.tree.has_lazy());
}

#[test]
fn reparse_rejects_unbalanced_ranges() {
    let source = "foo { a }";
    let tokens = lexed(source);
    assert!(reparse_lazy_lambda(&tokens, source, 0..1, &lazy()).is_none());
}

#[test]
fn unclosed_lambda_is_parsed_eagerly() {
    let source = "foo { a";
    let tokens = lexed(source);
    let output = parse(&tokens, source, EntryPoint::Statements, &lazy());
    assert!(!output.tree.has_lazy());
    assert_eq!(
        output.errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>(),
        vec!["Expecting '}'"]
    );
}

#[test]
fn expand_lazy_matches_eager_parse() {
    let source = "items.map { it + 1 }.filter { x -> x > 2 }";
    let tokens = lexed(source);

    let expanded = expand_lazy(&tokens, source, EntryPoint::Statements, &lazy());
    let eager = parse(&tokens, source, EntryPoint::Statements, &ParserConfig::default());

    assert!(!expanded.tree.has_lazy());
    assert_eq!(expanded, eager);
}
