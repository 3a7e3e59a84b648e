use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_builder() {
    let diag = Diagnostic::error(ErrorKind::TypeError)
        .with_message("expected int, found bool")
        .with_label(Span::new(3, 7), "this is a bool")
        .with_note("arithmetic operands must be int");

    assert!(diag.is(ErrorKind::TypeError));
    assert_eq!(diag.span, Span::new(3, 7));
    assert_eq!(diag.label.as_deref(), Some("this is a bool"));
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn test_display_uses_kind_prefix() {
    let diag = Diagnostic::error(ErrorKind::ReferenceError).with_message("undefined variable `x`");
    assert_eq!(diag.to_string(), "ReferenceError: undefined variable `x`");
}
