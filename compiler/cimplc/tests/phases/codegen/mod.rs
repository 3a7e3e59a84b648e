//! Programs that pass analysis but cannot be lowered.

use cimpl_codegen::CompileError;
use cimplc::PipelineError;

use crate::common::{kinds, run_err};

fn unsupported(source: &str) -> &'static str {
    assert_eq!(kinds(source), vec![], "analysis should accept:\n{source}");
    match run_err(source) {
        PipelineError::Compile(CompileError::Unsupported { what, .. }) => what,
        other => panic!("expected an unsupported construct, got {other:?}"),
    }
}

#[test]
fn test_break_in_nested_function_rejected() {
    let what = unsupported("while true { fn f() { break; } break; }");
    assert!(what.contains("break"), "{what}");
}

#[test]
fn test_enclosing_function_local_rejected() {
    let what = unsupported(
        "fn outer(a: int): int { fn inner(): int { return a; } return inner(); } x := outer(1);",
    );
    assert!(what.contains("enclosing function"), "{what}");
}

#[test]
fn test_function_as_value_rejected() {
    unsupported("fn one(): int { return 1; } f := one;");
}

#[test]
fn test_diagnostics_stop_before_compilation() {
    match run_err("x := y;") {
        PipelineError::Diagnostics(found) => assert_eq!(found.len(), 1),
        other => panic!("expected diagnostics, got {other:?}"),
    }
}
