//! Analysis through the driver: what `cimpl check` reports.

use cimpl_diagnostic::{ColorMode, DiagnosticEmitter, ErrorKind, TerminalEmitter};
use cimplc::check_source;
use pretty_assertions::assert_eq;

use crate::common::{diagnostics, kinds};

#[test]
fn test_clean_program() {
    let checked = check_source("a := 1 + 2; b := a + 1;");
    assert!(checked.is_clean(), "{:?}", checked.diagnostics);
}

#[test]
fn test_undeclared_variable_single_reference_error() {
    assert_eq!(kinds("x + 1;"), vec![ErrorKind::ReferenceError]);
}

#[test]
fn test_arity_mismatch_single_type_error() {
    let source = "fn add(a: int, b: int): int { return a + b; } c := add(1); d := c + 1;";
    assert_eq!(kinds(source), vec![ErrorKind::TypeError]);
}

#[test]
fn test_redeclaration_in_one_block_is_silent() {
    assert_eq!(kinds("a := 1; a := 2;"), vec![]);
    assert_eq!(kinds("{ a := 1; a := 2; }"), vec![]);
}

#[test]
fn test_parse_error_is_single_diagnostic() {
    let checked = check_source("a := ; b := 2;");
    assert!(checked.program.is_none());
    assert_eq!(
        checked.diagnostics.iter().map(|d| d.kind).collect::<Vec<_>>(),
        vec![ErrorKind::ParseError]
    );
}

#[test]
fn test_illegal_character_is_parse_error() {
    assert_eq!(kinds("a := 1 @ 2;"), vec![ErrorKind::ParseError]);
}

#[test]
fn test_diagnostics_in_source_order() {
    let source = "
        x := y;
        z: int = true;
        break;
        fn f(): int { return false; }
    ";
    assert_eq!(
        kinds(source),
        vec![
            ErrorKind::ReferenceError,
            ErrorKind::TypeError,
            ErrorKind::SyntaxError,
            ErrorKind::TypeError,
        ]
    );
}

#[test]
fn test_break_in_function_inside_loop_is_accepted() {
    assert_eq!(kinds("while true { fn f() { break; } break; }"), vec![]);
}

#[test]
fn test_rendered_diagnostic() {
    let source = "a := 1;\nx + 1;\n";
    let found = diagnostics(source);
    let mut emitter =
        TerminalEmitter::with_color_mode(Vec::new(), ColorMode::Never, false).with_source(source);
    emitter.emit_all(&found);
    let text = String::from_utf8(emitter.into_inner()).unwrap();

    assert!(text.starts_with("ReferenceError: undefined variable `x`\n"), "{text}");
    assert!(text.contains("--> 2:1"), "{text}");
    assert!(text.contains("2 | x + 1;"), "{text}");
    assert!(!text.contains('\x1b'), "{text}");
}
