//! `if`, `when`, `try`, loops and jumps.

use pretty_assertions::assert_eq;

use super::{messages, shape};

#[test]
fn if_else_with_expression_branches() {
    assert_eq!(
        shape("if (a) b else c"),
        "ROOT(IF(CONDITION(REFERENCE_EXPRESSION) THEN(REFERENCE_EXPRESSION) ELSE(REFERENCE_EXPRESSION)))"
    );
}

#[test]
fn if_branches_in_braces_are_blocks() {
    assert_eq!(
        shape("if (a) { b } else { c }"),
        "ROOT(IF(CONDITION(REFERENCE_EXPRESSION) THEN(BLOCK(REFERENCE_EXPRESSION)) ELSE(BLOCK(REFERENCE_EXPRESSION))))"
    );
}

#[test]
fn semicolon_before_else_is_absorbed() {
    assert_eq!(
        shape("if (a) b; else c"),
        "ROOT(IF(CONDITION(REFERENCE_EXPRESSION) THEN(REFERENCE_EXPRESSION) ELSE(REFERENCE_EXPRESSION)))"
    );
    assert!(messages("if (a) b; else c").is_empty());
}

#[test]
fn if_without_parentheses() {
    assert_eq!(
        messages("if a"),
        vec!["Expecting a condition in parentheses '(...)'"]
    );
}

#[test]
fn when_with_every_condition_kind() {
    let source = "when (x) {\n    1 -> a\n    in r -> b\n    is T -> c\n    else -> d\n}";
    assert_eq!(
        shape(source),
        "ROOT(WHEN(REFERENCE_EXPRESSION \
         WHEN_ENTRY(WHEN_CONDITION_EXPRESSION(INTEGER_CONSTANT) REFERENCE_EXPRESSION) \
         WHEN_ENTRY(WHEN_CONDITION_IN_RANGE(OPERATION_REFERENCE REFERENCE_EXPRESSION) REFERENCE_EXPRESSION) \
         WHEN_ENTRY(WHEN_CONDITION_IS_PATTERN(TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION))) REFERENCE_EXPRESSION) \
         WHEN_ENTRY(REFERENCE_EXPRESSION)))"
    );
    assert!(messages(source).is_empty());
}

#[test]
fn when_without_subject() {
    assert_eq!(
        shape("when { a -> b }"),
        "ROOT(WHEN(WHEN_ENTRY(WHEN_CONDITION_EXPRESSION(REFERENCE_EXPRESSION) REFERENCE_EXPRESSION)))"
    );
}

#[test]
fn when_subject_may_declare_a_value() {
    assert_eq!(
        shape("when (val y = f()) { else -> y }"),
        "ROOT(WHEN(PROPERTY(CALL_EXPRESSION(REFERENCE_EXPRESSION VALUE_ARGUMENT_LIST)) WHEN_ENTRY(REFERENCE_EXPRESSION)))"
    );
}

#[test]
fn when_entry_guard() {
    let source = "when (x) {\n    is A if x.ok -> 1\n    else -> 2\n}";
    assert!(shape(source).contains(
        "WHEN_ENTRY(WHEN_CONDITION_IS_PATTERN(TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION))) \
         WHEN_ENTRY_GUARD(DOT_QUALIFIED_EXPRESSION(REFERENCE_EXPRESSION REFERENCE_EXPRESSION)) INTEGER_CONSTANT)"
    ));
    assert!(messages(source).is_empty());
}

#[test]
fn when_guard_written_with_and_and() {
    assert_eq!(
        messages("when (x) { is A && y -> 2 }"),
        vec![
            "Unexpected '&&', use 'if' to introduce additional conditions; see https://kotl.in/guards-in-when"
        ]
    );
}

#[test]
fn else_without_arrow_keeps_the_next_line_in_its_entry() {
    assert_eq!(
        shape("when { else\n x }"),
        "ROOT(WHEN(WHEN_ENTRY(ERROR_ELEMENT ERROR_ELEMENT)))"
    );
    assert_eq!(
        messages("when { else\n x }"),
        vec!["Expecting '->'", "Expecting '->'"]
    );
}

#[test]
fn when_entry_with_several_conditions() {
    assert_eq!(
        shape("when (x) { 1, 2 -> a }"),
        "ROOT(WHEN(REFERENCE_EXPRESSION WHEN_ENTRY(WHEN_CONDITION_EXPRESSION(INTEGER_CONSTANT) \
         WHEN_CONDITION_EXPRESSION(INTEGER_CONSTANT) REFERENCE_EXPRESSION)))"
    );
}

#[test]
fn try_catch_finally() {
    assert_eq!(
        shape("try { a } catch (e: E) { b } finally { c }"),
        "ROOT(TRY(BLOCK(REFERENCE_EXPRESSION) \
         CATCH(VALUE_PARAMETER_LIST(VALUE_PARAMETER(TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION)))) BLOCK(REFERENCE_EXPRESSION)) \
         FINALLY(BLOCK(REFERENCE_EXPRESSION))))"
    );
}

#[test]
fn try_needs_catch_or_finally() {
    assert_eq!(messages("try { a }"), vec!["Expecting 'catch' or 'finally'"]);
}

#[test]
fn for_loop() {
    assert_eq!(
        shape("for (x in xs) { a }"),
        "ROOT(FOR(VALUE_PARAMETER LOOP_RANGE(REFERENCE_EXPRESSION) BODY(BLOCK(REFERENCE_EXPRESSION))))"
    );
}

#[test]
fn for_loop_with_destructuring() {
    assert_eq!(
        shape("for ((a, b) in m) a"),
        "ROOT(FOR(VALUE_PARAMETER(DESTRUCTURING_DECLARATION(DESTRUCTURING_DECLARATION_ENTRY DESTRUCTURING_DECLARATION_ENTRY)) \
         LOOP_RANGE(REFERENCE_EXPRESSION) BODY(REFERENCE_EXPRESSION)))"
    );
}

#[test]
fn for_loop_destructuring_keywords() {
    assert!(messages("for ((val a, val b) in m) a").is_empty());
    assert_eq!(
        messages("for ((val a, var b) in m) a"),
        vec!["'var' is not allowed here"]
    );
    assert_eq!(
        messages("for ((a, val b) in m) a"),
        vec!["'val' is not allowed here"]
    );
}

#[test]
fn for_loop_with_typed_parameter_and_empty_body() {
    assert_eq!(
        shape("for (x: Int in xs);"),
        "ROOT(FOR(VALUE_PARAMETER(TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION))) LOOP_RANGE(REFERENCE_EXPRESSION) BODY))"
    );
}

#[test]
fn for_loop_without_in() {
    assert_eq!(messages("for (x xs) a"), vec!["Expecting 'in'"]);
}

#[test]
fn while_and_do_while() {
    assert_eq!(
        shape("while (a) b"),
        "ROOT(WHILE(CONDITION(REFERENCE_EXPRESSION) BODY(REFERENCE_EXPRESSION)))"
    );
    assert_eq!(
        shape("do { a } while (b)"),
        "ROOT(DO_WHILE(BODY(BLOCK(REFERENCE_EXPRESSION)) CONDITION(REFERENCE_EXPRESSION)))"
    );
    assert_eq!(
        shape("do while (b)"),
        "ROOT(DO_WHILE(CONDITION(REFERENCE_EXPRESSION)))"
    );
}

#[test]
fn do_without_while() {
    assert_eq!(
        messages("do { a }"),
        vec!["Expecting 'while' followed by a post-condition"]
    );
}

#[test]
fn jumps_with_labels() {
    assert_eq!(
        shape("return@f 1"),
        "ROOT(RETURN(LABEL_QUALIFIER(LABEL) INTEGER_CONSTANT))"
    );
    assert_eq!(shape("break@outer"), "ROOT(BREAK(LABEL_QUALIFIER(LABEL)))");
    assert_eq!(shape("continue"), "ROOT(CONTINUE)");
    assert_eq!(shape("throw e"), "ROOT(THROW(REFERENCE_EXPRESSION))");
}

#[test]
fn return_value_must_be_on_the_same_line() {
    assert_eq!(shape("return\n1"), "ROOT(RETURN INTEGER_CONSTANT)");
}

#[test]
fn space_before_label_reference() {
    assert_eq!(
        messages("return @f"),
        vec!["There should be no space or comments before '@' in label reference"]
    );
}

#[test]
fn labeled_loop() {
    assert_eq!(
        shape("loop@ for (x in xs) break@loop"),
        "ROOT(LABELED_EXPRESSION(LABEL_QUALIFIER(LABEL) \
         FOR(VALUE_PARAMETER LOOP_RANGE(REFERENCE_EXPRESSION) BODY(BREAK(LABEL_QUALIFIER(LABEL))))))"
    );
}
