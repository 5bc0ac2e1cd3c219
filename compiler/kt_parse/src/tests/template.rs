//! String templates.

use pretty_assertions::assert_eq;

use super::{messages, shape};

#[test]
fn entries_of_every_kind() {
    assert_eq!(
        shape(r#""a $b c${d + 1}\n""#),
        "ROOT(STRING_TEMPLATE(LITERAL_STRING_TEMPLATE_ENTRY SHORT_STRING_TEMPLATE_ENTRY(REFERENCE_EXPRESSION) \
         LITERAL_STRING_TEMPLATE_ENTRY \
         LONG_STRING_TEMPLATE_ENTRY(BINARY_EXPRESSION(REFERENCE_EXPRESSION OPERATION_REFERENCE INTEGER_CONSTANT)) \
         ESCAPE_STRING_TEMPLATE_ENTRY))"
    );
    assert!(messages(r#""a $b c${d + 1}\n""#).is_empty());
}

#[test]
fn short_entry_with_this() {
    assert_eq!(
        shape(r#""$this""#),
        "ROOT(STRING_TEMPLATE(SHORT_STRING_TEMPLATE_ENTRY(THIS_EXPRESSION(REFERENCE_EXPRESSION))))"
    );
}

#[test]
fn keyword_after_dollar_is_reported() {
    assert_eq!(
        messages(r#""$if""#),
        vec!["Keyword cannot be used as a reference"]
    );
}

#[test]
fn interpolation_prefix() {
    assert_eq!(
        shape(r#"$$"a $b $$c""#),
        "ROOT(STRING_TEMPLATE(STRING_INTERPOLATION_PREFIX LITERAL_STRING_TEMPLATE_ENTRY LITERAL_STRING_TEMPLATE_ENTRY \
         LITERAL_STRING_TEMPLATE_ENTRY SHORT_STRING_TEMPLATE_ENTRY(REFERENCE_EXPRESSION)))"
    );
}

#[test]
fn lambda_inside_long_entry() {
    assert_eq!(
        shape(r#""${ f { it } }""#),
        "ROOT(STRING_TEMPLATE(LONG_STRING_TEMPLATE_ENTRY(CALL_EXPRESSION(REFERENCE_EXPRESSION \
         LAMBDA_ARGUMENT(LAMBDA_EXPRESSION(FUNCTION_LITERAL(BLOCK(REFERENCE_EXPRESSION))))))))"
    );
}

#[test]
fn extra_expression_in_long_entry() {
    assert_eq!(messages(r#""${a 1}""#), vec!["Expecting '}'"]);
    assert_eq!(
        shape(r#""${a 1}""#),
        "ROOT(STRING_TEMPLATE(LONG_STRING_TEMPLATE_ENTRY(REFERENCE_EXPRESSION ERROR_ELEMENT INTEGER_CONSTANT)))"
    );
}

#[test]
fn unterminated_templates() {
    assert_eq!(messages("\"abc"), vec!["Expecting '\"'"]);
    assert_eq!(
        messages("\"abc\nfoo").first().map(String::as_str),
        Some("Expecting '\"'")
    );
}
