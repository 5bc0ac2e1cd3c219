//! Function literals, trailing lambdas and lazy bodies.

use pretty_assertions::assert_eq;

use super::{messages_of, parse_with, shape, shape_of};
use crate::{incremental, EntryPoint, ParserConfig};

const LAZY: ParserConfig = ParserConfig {
    lazy: true,
    max_nesting_depth: ParserConfig::DEFAULT_MAX_NESTING_DEPTH,
};

#[test]
fn trailing_lambda_with_parameter() {
    assert_eq!(
        shape("foo { a -> a + 1 }"),
        "ROOT(CALL_EXPRESSION(REFERENCE_EXPRESSION LAMBDA_ARGUMENT(LAMBDA_EXPRESSION(FUNCTION_LITERAL(\
         VALUE_PARAMETER_LIST(VALUE_PARAMETER) \
         BLOCK(BINARY_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE INTEGER_CONSTANT)))))))"
    );
}

#[test]
fn parameter_list_forms() {
    assert_eq!(
        shape_of(EntryPoint::Lambda, "{ a, b -> }"),
        "ROOT(LAMBDA_EXPRESSION(FUNCTION_LITERAL(VALUE_PARAMETER_LIST(VALUE_PARAMETER VALUE_PARAMETER) BLOCK)))"
    );
    assert_eq!(
        shape_of(EntryPoint::Lambda, "{ -> 1 }"),
        "ROOT(LAMBDA_EXPRESSION(FUNCTION_LITERAL(VALUE_PARAMETER_LIST BLOCK(INTEGER_CONSTANT))))"
    );
    assert_eq!(
        shape_of(EntryPoint::Lambda, "{ a }"),
        "ROOT(LAMBDA_EXPRESSION(FUNCTION_LITERAL(BLOCK(REFERENCE_EXPRESSION))))"
    );
}

#[test]
fn destructuring_and_typed_parameters() {
    assert_eq!(
        shape_of(EntryPoint::Lambda, "{ (a, b), c: Int -> a }"),
        "ROOT(LAMBDA_EXPRESSION(FUNCTION_LITERAL(VALUE_PARAMETER_LIST(\
         VALUE_PARAMETER(DESTRUCTURING_DECLARATION(DESTRUCTURING_DECLARATION_ENTRY DESTRUCTURING_DECLARATION_ENTRY)) \
         VALUE_PARAMETER(TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION)))) \
         BLOCK(REFERENCE_EXPRESSION))))"
    );
}

#[test]
fn typed_parameter_without_arrow() {
    assert_eq!(
        messages_of(EntryPoint::Lambda, "{ a: Int }"),
        vec!["Expecting '->' or ','", "An -> is expected"]
    );
}

#[test]
fn lambda_entry_needs_a_brace() {
    assert_eq!(
        messages_of(EntryPoint::Lambda, "a"),
        vec!["Expecting '{'", "Unexpected tokens"]
    );
}

#[test]
fn arguments_then_trailing_lambda() {
    assert_eq!(
        shape("foo(1) { it }"),
        "ROOT(CALL_EXPRESSION(REFERENCE_EXPRESSION VALUE_ARGUMENT_LIST(VALUE_ARGUMENT(INTEGER_CONSTANT)) \
         LAMBDA_ARGUMENT(LAMBDA_EXPRESSION(FUNCTION_LITERAL(BLOCK(REFERENCE_EXPRESSION))))))"
    );
}

#[test]
fn labeled_and_annotated_trailing_lambdas() {
    assert_eq!(
        shape("foo lit@{ 1 }"),
        "ROOT(CALL_EXPRESSION(REFERENCE_EXPRESSION LAMBDA_ARGUMENT(LABELED_EXPRESSION(LABEL_QUALIFIER(LABEL) \
         LAMBDA_EXPRESSION(FUNCTION_LITERAL(BLOCK(INTEGER_CONSTANT)))))))"
    );
    assert_eq!(
        shape("foo @Ann { 1 }"),
        "ROOT(CALL_EXPRESSION(REFERENCE_EXPRESSION LAMBDA_ARGUMENT(ANNOTATED_EXPRESSION(\
         ANNOTATION_ENTRY(CONSTRUCTOR_CALLEE(TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION)))) \
         LAMBDA_EXPRESSION(FUNCTION_LITERAL(BLOCK(INTEGER_CONSTANT)))))))"
    );
}

#[test]
fn lambda_on_the_next_line_is_a_new_statement() {
    assert_eq!(
        shape("foo\n{ a }"),
        "ROOT(REFERENCE_EXPRESSION LAMBDA_EXPRESSION(FUNCTION_LITERAL(BLOCK(REFERENCE_EXPRESSION))))"
    );
}

#[test]
fn lazy_lambda_keeps_raw_tokens() {
    let source = "foo { a -> a + 1 }";
    let (tokens, output) = parse_with(source, EntryPoint::Statements, &LAZY);

    assert!(output.errors.is_empty());
    assert!(output.tree.has_lazy());
    assert_eq!(
        output.tree.shape(output.tree.root()),
        "ROOT(CALL_EXPRESSION(REFERENCE_EXPRESSION LAMBDA_ARGUMENT(LAMBDA_EXPRESSION(FUNCTION_LITERAL))))"
    );
    assert!(output
        .tree
        .dump(&tokens, source)
        .contains("FUNCTION_LITERAL (lazy)"));
}

#[test]
fn lazy_lambda_reparses_to_the_eager_tree() {
    let source = "foo { a -> a + 1 }";
    let (tokens, output) = parse_with(source, EntryPoint::Statements, &LAZY);

    let ranges = incremental::lazy_lambdas(&output.tree);
    assert_eq!(ranges.len(), 1);

    let Some(body) = incremental::reparse_lazy_lambda(&tokens, source, ranges[0].clone(), &LAZY)
    else {
        panic!("lazy range should be reparsable");
    };
    assert!(body.errors.is_empty());
    assert_eq!(
        body.tree.shape(body.tree.root()),
        "ROOT(LAMBDA_EXPRESSION(FUNCTION_LITERAL(VALUE_PARAMETER_LIST(VALUE_PARAMETER) \
         BLOCK(BINARY_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE INTEGER_CONSTANT)))))"
    );
}

#[test]
fn control_bodies_are_never_lazy() {
    let (_, output) = parse_with("if (a) { b }", EntryPoint::Statements, &LAZY);
    assert!(!output.tree.has_lazy());
}
