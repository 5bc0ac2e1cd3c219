//! Malformed input: which errors are reported and where parsing resumes.

use pretty_assertions::assert_eq;

use super::{messages, messages_of, parse_with, shape};
use crate::{EntryPoint, ParserConfig};

const TOO_DEEP: &str = "Expression is too deeply nested";

#[test]
fn missing_operand() {
    assert_eq!(messages("a +"), vec!["Expecting an element"]);
    assert_eq!(messages("a."), vec!["Expecting an element"]);
}

#[test]
fn statement_cannot_start_with_a_dot() {
    assert_eq!(messages(".foo"), vec!["Expecting an element"]);
    assert_eq!(shape(".foo"), "ROOT(ERROR_ELEMENT REFERENCE_EXPRESSION)");
}

#[test]
fn unclosed_parenthesis() {
    assert_eq!(messages("(a"), vec!["Expecting ')'"]);
    assert_eq!(messages("()"), vec!["Expecting an expression"]);
}

#[test]
fn missing_comma_between_arguments() {
    assert_eq!(messages("foo(a 1)"), vec!["Expecting ','"]);
    assert_eq!(
        shape("foo(a 1)"),
        "ROOT(CALL_EXPRESSION(REFERENCE_EXPRESSION VALUE_ARGUMENT_LIST(VALUE_ARGUMENT(REFERENCE_EXPRESSION) \
         ERROR_ELEMENT VALUE_ARGUMENT(INTEGER_CONSTANT))))"
    );
}

#[test]
fn type_specification_in_argument() {
    assert_eq!(messages("foo(a: Int)"), vec!["Unexpected type specification"]);
}

#[test]
fn calling_a_callable_reference_is_reserved() {
    assert_eq!(
        messages("foo::bar(1)"),
        vec![
            "This syntax is reserved for future use; to call a reference, enclose it in parentheses: (foo::bar)(args)"
        ]
    );
}

#[test]
fn missing_property_name() {
    assert_eq!(
        messages("val = 1"),
        vec!["Expecting property name or receiver type"]
    );
}

#[test]
fn missing_when_arrow() {
    assert_eq!(
        messages("when (x) { 1 a }"),
        vec!["Expecting '->'", "Expecting an element"]
    );
}

#[test]
fn malformed_catch_clauses() {
    assert_eq!(
        messages("try {} catch {}"),
        vec!["Expecting exception variable declaration"]
    );
    assert_eq!(
        messages("try {} catch (e) {}"),
        vec!["Parameters must have type annotation"]
    );
}

#[test]
fn unclosed_block() {
    assert_eq!(messages_of(EntryPoint::Block, "{ a"), vec!["Expecting '}'"]);
}

#[test]
fn every_error_has_an_error_element() {
    for source in ["a +", "foo(a 1)", "when (x) { 1 a }", "val = 1", "(a"] {
        let (_, output) = parse_with(source, EntryPoint::Statements, &ParserConfig::default());
        let tree = &output.tree;
        let elements: Vec<&str> = tree
            .descendants(tree.root())
            .into_iter()
            .filter_map(|node| tree.error_message(node))
            .collect();
        let reported: Vec<&str> = output.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(elements, reported, "{source}");
    }
}

#[test]
fn nesting_limit_is_reported() {
    let config = ParserConfig {
        max_nesting_depth: 3,
        ..ParserConfig::default()
    };
    let (_, output) = parse_with("((((a))))", EntryPoint::Expression, &config);
    assert!(output.errors.iter().any(|e| e.message == TOO_DEEP));
}

#[test]
fn deep_nesting_does_not_overflow_the_stack() {
    let depth = 5_000;
    let source = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
    let (tokens, output) = parse_with(&source, EntryPoint::Statements, &ParserConfig::default());

    assert!(output.errors.iter().any(|e| e.message == TOO_DEEP));
    let covered = output.tree.tokens_under(output.tree.root()).len();
    assert_eq!(covered, tokens.len());
}
