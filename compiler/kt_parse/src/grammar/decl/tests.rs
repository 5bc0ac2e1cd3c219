use pretty_assertions::assert_eq;

use crate::tests::{messages, messages_of, shape, shape_of};
use crate::EntryPoint;

const SIMPLE_TYPE: &str = "TYPE_REFERENCE(USER_TYPE(REFERENCE_EXPRESSION))";

// Classes and objects

#[test]
fn class_with_constructor_supertypes_and_body() {
    assert_eq!(
        shape("class A(val x: Int) : B(), C { fun f() = 1 }"),
        format!(
            "ROOT(CLASS(PRIMARY_CONSTRUCTOR(VALUE_PARAMETER_LIST(VALUE_PARAMETER({SIMPLE_TYPE}))) \
             SUPER_TYPE_LIST(SUPER_TYPE_CALL_ENTRY(CONSTRUCTOR_CALLEE({SIMPLE_TYPE}) VALUE_ARGUMENT_LIST) \
             SUPER_TYPE_ENTRY({SIMPLE_TYPE})) \
             CLASS_BODY(FUN(VALUE_PARAMETER_LIST INTEGER_CONSTANT))))"
        )
    );
}

#[test]
fn enum_class_entries_then_members() {
    assert_eq!(
        shape("enum class Color { RED, GREEN; fun f() {} }"),
        "ROOT(CLASS(MODIFIER_LIST CLASS_BODY(ENUM_ENTRY ENUM_ENTRY FUN(VALUE_PARAMETER_LIST BLOCK))))"
    );
    assert!(messages("enum class Color { RED, GREEN; fun f() {} }").is_empty());
}

#[test]
fn enum_without_class_keyword() {
    assert_eq!(
        messages("class A { enum B { X } }"),
        vec!["'class' keyword is expected after 'enum'"]
    );
}

#[test]
fn companion_object_and_initializer() {
    assert_eq!(
        shape("class A { companion object { }\n init { } }"),
        "ROOT(CLASS(CLASS_BODY(OBJECT_DECLARATION(MODIFIER_LIST CLASS_BODY) CLASS_INITIALIZER(BLOCK))))"
    );
}

#[test]
fn interface_function_without_body() {
    assert_eq!(
        shape("interface I { fun f() }"),
        "ROOT(CLASS(CLASS_BODY(FUN(VALUE_PARAMETER_LIST))))"
    );
}

#[test]
fn unclosed_class_body() {
    assert_eq!(messages("class A {"), vec!["Missing '}'"]);
}

#[test]
fn named_object_declaration() {
    assert_eq!(
        shape("object O : A"),
        format!("ROOT(OBJECT_DECLARATION(SUPER_TYPE_LIST(SUPER_TYPE_ENTRY({SIMPLE_TYPE}))))")
    );
}

// Properties

#[test]
fn nullable_property_type() {
    assert_eq!(
        shape("val x: String? = null"),
        "ROOT(PROPERTY(TYPE_REFERENCE(NULLABLE_TYPE(USER_TYPE(REFERENCE_EXPRESSION))) NULL))"
    );
}

#[test]
fn delegated_property() {
    assert_eq!(
        shape("val x by lazy { 1 }"),
        "ROOT(PROPERTY(PROPERTY_DELEGATE(CALL_EXPRESSION(REFERENCE_EXPRESSION \
         LAMBDA_ARGUMENT(LAMBDA_EXPRESSION(FUNCTION_LITERAL(BLOCK(INTEGER_CONSTANT))))))))"
    );
}

#[test]
fn accessors_in_script() {
    assert_eq!(
        shape_of(EntryPoint::Script, "val x: Int\n    get() = 1"),
        format!("ROOT(PROPERTY({SIMPLE_TYPE} PROPERTY_ACCESSOR(INTEGER_CONSTANT)))")
    );
    assert!(messages_of(EntryPoint::Script, "val x: Int\n    get() = 1").is_empty());
}

#[test]
fn destructuring_with_type_annotation() {
    assert_eq!(
        messages("val (a, b): Pair = p"),
        vec!["Type annotations are not allowed on destructuring declarations"]
    );
}

// Functions

#[test]
fn extension_function() {
    assert_eq!(
        shape("fun String.foo() {}"),
        format!("ROOT(FUN({SIMPLE_TYPE} VALUE_PARAMETER_LIST BLOCK))")
    );
}

#[test]
fn generic_function_with_defaults() {
    assert_eq!(
        shape("fun <T : Any> f(x: T = y): T = x"),
        format!(
            "ROOT(FUN(TYPE_PARAMETER_LIST(TYPE_PARAMETER({SIMPLE_TYPE})) \
             VALUE_PARAMETER_LIST(VALUE_PARAMETER({SIMPLE_TYPE} REFERENCE_EXPRESSION)) \
             {SIMPLE_TYPE} REFERENCE_EXPRESSION))"
        )
    );
}

#[test]
fn second_type_parameter_list() {
    assert_eq!(
        messages("fun <T> f<U>() {}"),
        vec!["Only one type parameter list is allowed for a function"]
    );
}

#[test]
fn missing_parameter_list() {
    assert_eq!(messages("fun f {}"), vec!["Expecting '('"]);
}

// Type aliases and types

#[test]
fn type_alias_to_function_type() {
    assert_eq!(
        shape("typealias F<T> = (T) -> Unit"),
        format!(
            "ROOT(TYPEALIAS(TYPE_PARAMETER_LIST(TYPE_PARAMETER) \
             TYPE_REFERENCE(FUNCTION_TYPE(VALUE_PARAMETER_LIST(VALUE_PARAMETER({SIMPLE_TYPE})) {SIMPLE_TYPE}))))"
        )
    );
}

#[test]
fn suspend_function_type() {
    assert_eq!(
        shape("val f: suspend () -> Unit = {}"),
        format!(
            "ROOT(PROPERTY(TYPE_REFERENCE(MODIFIER_LIST FUNCTION_TYPE(VALUE_PARAMETER_LIST {SIMPLE_TYPE})) \
             LAMBDA_EXPRESSION(FUNCTION_LITERAL(BLOCK))))"
        )
    );
}

#[test]
fn function_type_with_receiver() {
    assert_eq!(
        shape("val f: Int.(Int) -> Int = g"),
        format!(
            "ROOT(PROPERTY(TYPE_REFERENCE(FUNCTION_TYPE(FUNCTION_TYPE_RECEIVER({SIMPLE_TYPE}) \
             VALUE_PARAMETER_LIST(VALUE_PARAMETER({SIMPLE_TYPE})) {SIMPLE_TYPE})) \
             REFERENCE_EXPRESSION))"
        )
    );
}

#[test]
fn named_function_type_parameter() {
    assert_eq!(
        shape("val f: (x: Int) -> Unit = g"),
        format!(
            "ROOT(PROPERTY(TYPE_REFERENCE(FUNCTION_TYPE(VALUE_PARAMETER_LIST(VALUE_PARAMETER({SIMPLE_TYPE})) \
             {SIMPLE_TYPE})) REFERENCE_EXPRESSION))"
        )
    );
}

// Modifiers

#[test]
fn annotation_with_target() {
    assert_eq!(
        shape("@field:Ann val x = 1"),
        format!(
            "ROOT(PROPERTY(MODIFIER_LIST(ANNOTATION_ENTRY(ANNOTATION_TARGET CONSTRUCTOR_CALLEE({SIMPLE_TYPE}))) \
             INTEGER_CONSTANT))"
        )
    );
}

#[test]
fn annotation_with_arguments() {
    assert_eq!(
        shape("@Ann(1) fun f() {}"),
        format!(
            "ROOT(FUN(MODIFIER_LIST(ANNOTATION_ENTRY(CONSTRUCTOR_CALLEE({SIMPLE_TYPE}) \
             VALUE_ARGUMENT_LIST(VALUE_ARGUMENT(INTEGER_CONSTANT)))) VALUE_PARAMETER_LIST BLOCK))"
        )
    );
}

#[test]
fn context_parameters() {
    assert_eq!(
        shape("context(a: A, B) fun f() {}"),
        format!(
            "ROOT(FUN(MODIFIER_LIST(CONTEXT_PARAMETER_LIST(VALUE_PARAMETER({SIMPLE_TYPE}) {SIMPLE_TYPE})) \
             VALUE_PARAMETER_LIST BLOCK))"
        )
    );
}

#[test]
fn keyword_modifiers() {
    assert_eq!(
        shape("private data class P(val x: Int)"),
        format!("ROOT(CLASS(MODIFIER_LIST PRIMARY_CONSTRUCTOR(VALUE_PARAMETER_LIST(VALUE_PARAMETER({SIMPLE_TYPE})))))")
    );
}
