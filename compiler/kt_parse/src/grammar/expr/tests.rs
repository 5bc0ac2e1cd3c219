use pretty_assertions::assert_eq;

use crate::tests::{messages, shape, shape_of};
use crate::EntryPoint;

fn expression(source: &str) -> String {
    shape_of(EntryPoint::Expression, source)
}

// Operators

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(
        expression("1 + 2 * 3"),
        "ROOT(BINARY_EXPRESSION(INTEGER_CONSTANT OPERATION_REFERENCE \
         BINARY_EXPRESSION(INTEGER_CONSTANT OPERATION_REFERENCE INTEGER_CONSTANT)))"
    );
    assert_eq!(
        expression("1 * 2 + 3"),
        "ROOT(BINARY_EXPRESSION(BINARY_EXPRESSION(INTEGER_CONSTANT OPERATION_REFERENCE INTEGER_CONSTANT) \
         OPERATION_REFERENCE INTEGER_CONSTANT))"
    );
}

#[test]
fn same_level_is_left_associative() {
    assert_eq!(
        expression("a - b - c"),
        "ROOT(BINARY_EXPRESSION(BINARY_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE REFERENCE_EXPRESSION) \
         OPERATION_REFERENCE REFERENCE_EXPRESSION))"
    );
}

#[test]
fn infix_call() {
    assert_eq!(
        expression("a to b"),
        "ROOT(BINARY_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE REFERENCE_EXPRESSION))"
    );
}

#[test]
fn type_operators() {
    assert_eq!(
        expression("x as T"),
        "ROOT(BINARY_WITH_TYPE(REFERENCE_EXPRESSION OPERATION_REFERENCE TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION))))"
    );
    assert_eq!(
        expression("a is B && c"),
        "ROOT(BINARY_EXPRESSION(\
         IS_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION))) \
         OPERATION_REFERENCE REFERENCE_EXPRESSION))"
    );
    assert_eq!(
        expression("a as T * 2"),
        "ROOT(BINARY_EXPRESSION(\
         BINARY_WITH_TYPE(REFERENCE_EXPRESSION OPERATION_REFERENCE TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION))) \
         OPERATION_REFERENCE INTEGER_CONSTANT))"
    );
}

#[test]
fn prefix_and_postfix() {
    assert_eq!(
        expression("-a * b"),
        "ROOT(BINARY_EXPRESSION(PREFIX_EXPRESSION(OPERATION_REFERENCE REFERENCE_EXPRESSION) \
         OPERATION_REFERENCE REFERENCE_EXPRESSION))"
    );
    assert_eq!(
        expression("!a"),
        "ROOT(PREFIX_EXPRESSION(OPERATION_REFERENCE REFERENCE_EXPRESSION))"
    );
    assert_eq!(
        expression("a!!"),
        "ROOT(POSTFIX_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE))"
    );
    assert_eq!(
        expression("a++"),
        "ROOT(POSTFIX_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE))"
    );
}

#[test]
fn labeled_expression() {
    assert_eq!(
        expression("l@ foo"),
        "ROOT(LABELED_EXPRESSION(LABEL_QUALIFIER(LABEL) REFERENCE_EXPRESSION))"
    );
}

// Postfix forms

#[test]
fn member_call() {
    assert_eq!(
        expression("a.b(c)"),
        "ROOT(DOT_QUALIFIED_EXPRESSION(REFERENCE_EXPRESSION \
         CALL_EXPRESSION(REFERENCE_EXPRESSION VALUE_ARGUMENT_LIST(VALUE_ARGUMENT(REFERENCE_EXPRESSION)))))"
    );
    assert_eq!(
        expression("a?.b"),
        "ROOT(SAFE_ACCESS_EXPRESSION(REFERENCE_EXPRESSION REFERENCE_EXPRESSION))"
    );
}

#[test]
fn dot_on_the_next_line_continues() {
    assert_eq!(
        shape("a\n.b"),
        "ROOT(DOT_QUALIFIED_EXPRESSION(REFERENCE_EXPRESSION REFERENCE_EXPRESSION))"
    );
}

#[test]
fn parenthesis_on_the_next_line_is_a_new_statement() {
    assert_eq!(
        shape("a\n(b)"),
        "ROOT(REFERENCE_EXPRESSION PARENTHESIZED(REFERENCE_EXPRESSION))"
    );
}

#[test]
fn named_and_spread_arguments() {
    assert_eq!(
        expression("f(x = 1, *y)"),
        "ROOT(CALL_EXPRESSION(REFERENCE_EXPRESSION VALUE_ARGUMENT_LIST(\
         VALUE_ARGUMENT(VALUE_ARGUMENT_NAME(REFERENCE_EXPRESSION) INTEGER_CONSTANT) \
         VALUE_ARGUMENT(REFERENCE_EXPRESSION))))"
    );
}

#[test]
fn generic_call_versus_comparison() {
    assert_eq!(
        expression("f<Int>(1)"),
        "ROOT(CALL_EXPRESSION(REFERENCE_EXPRESSION \
         TYPE_ARGUMENT_LIST(TYPE_PROJECTION(TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION)))) \
         VALUE_ARGUMENT_LIST(VALUE_ARGUMENT(INTEGER_CONSTANT))))"
    );
    assert_eq!(
        expression("a < b"),
        "ROOT(BINARY_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE REFERENCE_EXPRESSION))"
    );
    assert!(messages("a < b").is_empty());

    let comparison = expression("foo < bar && baz > 1");
    assert_eq!(
        comparison,
        "ROOT(BINARY_EXPRESSION(\
         BINARY_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE REFERENCE_EXPRESSION) \
         OPERATION_REFERENCE \
         BINARY_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE INTEGER_CONSTANT)))"
    );
    assert!(!comparison.contains("TYPE_ARGUMENT_LIST"));
    assert!(messages("foo < bar && baz > 1").is_empty());
}

#[test]
fn callable_references() {
    assert_eq!(
        expression("Foo::class"),
        "ROOT(CLASS_LITERAL_EXPRESSION(REFERENCE_EXPRESSION))"
    );
    assert_eq!(
        expression("Foo::bar"),
        "ROOT(CALLABLE_REFERENCE_EXPRESSION(REFERENCE_EXPRESSION REFERENCE_EXPRESSION))"
    );
    assert_eq!(
        expression("::bar"),
        "ROOT(CALLABLE_REFERENCE_EXPRESSION(REFERENCE_EXPRESSION))"
    );
}

#[test]
fn indexing_and_collection_literals() {
    assert_eq!(
        expression("a[1]"),
        "ROOT(ARRAY_ACCESS_EXPRESSION(REFERENCE_EXPRESSION INDICES(INTEGER_CONSTANT)))"
    );
    assert_eq!(
        expression("[1, 2]"),
        "ROOT(COLLECTION_LITERAL_EXPRESSION(INTEGER_CONSTANT INTEGER_CONSTANT))"
    );
    assert_eq!(expression("[]"), "ROOT(COLLECTION_LITERAL_EXPRESSION)");
}

// Atoms

#[test]
fn literals() {
    assert_eq!(
        shape("1; 2.0; 'c'; true; null"),
        "ROOT(INTEGER_CONSTANT FLOAT_CONSTANT CHARACTER_CONSTANT BOOLEAN_CONSTANT NULL)"
    );
}

#[test]
fn this_and_super() {
    assert_eq!(
        expression("this@Outer"),
        "ROOT(THIS_EXPRESSION(REFERENCE_EXPRESSION LABEL_QUALIFIER(LABEL)))"
    );
    assert_eq!(
        expression("super<A>.foo()"),
        "ROOT(DOT_QUALIFIED_EXPRESSION(\
         SUPER_EXPRESSION(REFERENCE_EXPRESSION TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION))) \
         CALL_EXPRESSION(REFERENCE_EXPRESSION VALUE_ARGUMENT_LIST)))"
    );
}

#[test]
fn object_literal() {
    assert_eq!(
        shape("object : A {}"),
        "ROOT(OBJECT_LITERAL(OBJECT_DECLARATION(\
         SUPER_TYPE_LIST(SUPER_TYPE_ENTRY(TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION)))) CLASS_BODY)))"
    );
    assert_eq!(
        messages("val x = object Named {}"),
        vec!["An object expression cannot bind a name"]
    );
}

#[test]
fn anonymous_function_is_an_expression() {
    assert_eq!(
        expression("fun(x: Int) = x"),
        "ROOT(FUN(VALUE_PARAMETER_LIST(VALUE_PARAMETER(TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION)))) \
         REFERENCE_EXPRESSION))"
    );
}
