use super::*;
use crate::{Diagnostic, ErrorKind};
use cimpl_ir::Span;
use pretty_assertions::assert_eq;

fn render(source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut emitter =
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false).with_source(source);
    emitter.emit_all(diagnostics);
    emitter.emit_summary(diagnostics.len());
    emitter.flush();
    String::from_utf8(emitter.into_inner()).unwrap_or_default()
}

#[test]
fn test_color_mode_parse() {
    assert_eq!(ColorMode::parse("always"), Some(ColorMode::Always));
    assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
    assert_eq!(ColorMode::parse("auto"), Some(ColorMode::Auto));
    assert_eq!(ColorMode::parse("sometimes"), None);
}

#[test]
fn test_color_mode_resolution() {
    assert!(ColorMode::Auto.should_use_colors(true));
    assert!(!ColorMode::Auto.should_use_colors(false));
    assert!(ColorMode::Always.should_use_colors(false));
    assert!(!ColorMode::Never.should_use_colors(true));
}

#[test]
fn test_snippet_with_label() {
    let source = "a := 1;\nb := a + true;\n";
    let diag = Diagnostic::error(ErrorKind::TypeError)
        .with_message("expected int")
        .with_label(Span::new(17, 21), "this is a bool");

    let expected = "\
TypeError: expected int
 --> 2:10
  |
2 | b := a + true;
  |          ^^^^ this is a bool

error: aborting due to previous error
";
    assert_eq!(render(source, &[diag]), expected);
}

#[test]
fn test_summary_counts_errors() {
    let source = "x;";
    let diag = Diagnostic::error(ErrorKind::ReferenceError)
        .with_message("undefined variable `x`")
        .with_span(Span::new(0, 1));
    let output = render(source, &[diag.clone(), diag]);
    assert!(output.ends_with("error: aborting due to 2 previous errors\n"));
}

#[test]
fn test_notes_are_rendered() {
    let diag = Diagnostic::error(ErrorKind::SyntaxError)
        .with_message("break statement outside of a loop")
        .with_span(Span::new(0, 5))
        .with_note("`break` only exits `while` and `for` bodies");
    let output = render("break;", &[diag]);
    assert!(output.contains("  = note: `break` only exits `while` and `for` bodies\n"));
}

#[test]
fn test_colors_wrap_kind() {
    let diag = Diagnostic::error(ErrorKind::TypeError).with_message("m");
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Always, false);
    emitter.emit(&diag);
    let output = String::from_utf8(emitter.into_inner()).unwrap_or_default();
    assert!(output.starts_with("\x1b[1;31mTypeError\x1b[0m"));
}
