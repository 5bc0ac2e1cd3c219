use pretty_assertions::assert_eq;

use super::*;

#[test]
fn labels_keep_their_order_and_style() {
    let diag = Diagnostic::error(ErrorCode::E1003, "Expecting ')'")
        .related(Span::new(3, 4), "to match this '('")
        .at(Span::point(7), "expected here")
        .note("parentheses must be balanced");

    assert!(diag.is_error());
    assert_eq!(
        diag.labels
            .iter()
            .map(|label| (label.span, label.style))
            .collect::<Vec<_>>(),
        vec![
            (Span::new(3, 4), LabelStyle::Secondary),
            (Span::point(7), LabelStyle::Primary),
        ]
    );
    assert_eq!(diag.primary_span(), Some(Span::point(7)));
    assert_eq!(diag.notes, vec!["parentheses must be balanced".to_string()]);
}

#[test]
fn display_is_the_header_line() {
    let diag = Diagnostic::warning(ErrorCode::E1001, "Unexpected tokens");
    assert_eq!(diag.to_string(), "warning[E1001]: Unexpected tokens");
    assert!(!diag.is_error());
    assert_eq!(diag.primary_span(), None);
}
