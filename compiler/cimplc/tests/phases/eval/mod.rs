//! Whole programs: printed output and final module-level values.

use cimpl_vm::RuntimeError;
use cimplc::PipelineError;
use pretty_assertions::assert_eq;

use crate::common::{run, run_err};

#[test]
fn test_straight_line() {
    let (outcome, _) = run("a := 1 + 2; b := a + 1;");
    assert_eq!(outcome.global("a"), Some("3"));
    assert_eq!(outcome.global("b"), Some("4"));
}

#[test]
fn test_redeclaration_keeps_first() {
    let (outcome, _) = run("a := 1; a := 2;");
    assert_eq!(outcome.global("a"), Some("1"));
}

#[test]
fn test_call() {
    let (outcome, _) = run("fn add(a: int, b: int): int { return a + b; } c := add(2, 3);");
    assert_eq!(outcome.global("c"), Some("5"));
}

#[test]
fn test_for_loop() {
    let (outcome, _) = run("total := 0; for i := 0; i < 3; i++ { total += 2; }");
    assert_eq!(outcome.global("total"), Some("6"));
    assert_eq!(outcome.global("i"), None);
}

#[test]
fn test_precedence() {
    let (_, output) = run("println(1 + 2 * 3); println(7 - 2 - 1); println(10 + 7 % 4 * 2); println((1 + 2) * 3);");
    assert_eq!(output, "7\n4\n16\n9\n");
}

#[test]
fn test_else_if_chain() {
    let source = "
        fn grade(n: int): string {
            if n >= 90 { return \"a\"; }
            else if n >= 80 { return \"b\"; }
            else { return \"c\"; }
        }
        println(grade(95)); println(grade(85)); println(grade(10));
    ";
    let (_, output) = run(source);
    assert_eq!(output, "a\nb\nc\n");
}

#[test]
fn test_comments_and_string_escapes() {
    let source = "# greeting\nmsg := \"say \\\"hi\\\"\\n\"; # trailing\nprintln(msg);";
    let (outcome, output) = run(source);
    assert_eq!(output, "say \"hi\"\n\n");
    assert_eq!(outcome.global("msg"), Some("say \"hi\"\n"));
}

#[test]
fn test_shadowing() {
    let source = "
        x := 1;
        { x := 2; println(x); { x := 3; println(x); } println(x); }
        println(x);
    ";
    let (_, output) = run(source);
    assert_eq!(output, "2\n3\n2\n1\n");
}

#[test]
fn test_inner_block_assigns_outer_variable() {
    let (outcome, _) = run("n := 1; { m := 10; { n = n + m; } }");
    assert_eq!(outcome.global("n"), Some("11"));
}

#[test]
fn test_compound_assignment() {
    let (outcome, _) = run("n := 10; n += 5; n -= 3; n *= 2; n /= 4; n %= 4; m := 0; m++; m++; m--;");
    assert_eq!(outcome.global("n"), Some("2"));
    assert_eq!(outcome.global("m"), Some("1"));
}

#[test]
fn test_functions_call_each_other() {
    let source = "
        fn is_even(n: int): bool { if n == 0 { return true; } return is_odd(n - 1); }
        fn is_odd(n: int): bool { if n == 0 { return false; } return is_even(n - 1); }
        println(is_even(10));
    ";
    // `is_odd` is not yet declared when `is_even` is analyzed.
    match run_err(source) {
        PipelineError::Diagnostics(found) => assert_eq!(found.len(), 1),
        other => panic!("expected diagnostics, got {other:?}"),
    }

    let source = "
        fn double(n: int): int { return n * 2; }
        fn quad(n: int): int { return double(double(n)); }
        println(quad(3));
    ";
    let (_, output) = run(source);
    assert_eq!(output, "12\n");
}

#[test]
fn test_fibonacci() {
    let source = "
        fn fib(n: int): int {
            a := 0; b := 1;
            for i := 0; i < n; i++ { t := a + b; a = b; b = t; }
            return a;
        }
        println(fib(1)); println(fib(10)); println(fib(50));
    ";
    let (_, output) = run(source);
    assert_eq!(output, "1\n55\n12586269025\n");
}

#[test]
fn test_nested_loops_with_break_and_continue() {
    let source = "
        count := 0;
        for i := 0; i < 5; i++ {
            j := 0;
            while true {
                j++;
                if j > i { break; }
                if j == 2 { continue; }
                count++;
            }
        }
    ";
    let (outcome, _) = run(source);
    // Inner loop counts j in 1..=i except 2: 0 + 1 + 1 + 2 + 3
    assert_eq!(outcome.global("count"), Some("7"));
}

#[test]
fn test_function_mutates_global_counter() {
    let source = "
        calls := 0;
        fn tick(by: int) { calls += by; }
        for i := 0; i < 4; i++ { tick(i); }
    ";
    let (outcome, _) = run(source);
    assert_eq!(outcome.global("calls"), Some("6"));
}

#[test]
fn test_runtime_error_carries_source_span() {
    let source = "x := 0;\ny := 10 / x;\n";
    match run_err(source) {
        PipelineError::Runtime { error, span } => {
            assert!(matches!(error, RuntimeError::DivisionByZero { .. }), "{error}");
            assert_eq!(&source[span.start as usize..span.end as usize], "10 / x");
        }
        other => panic!("expected a runtime error, got {other:?}"),
    }
}

#[test]
fn test_output_before_runtime_error_is_kept() {
    let print = cimpl_vm::buffer_handler();
    let result = cimplc::run_source(
        "println(1); fn f(n: int): int { if n > 0 { return n; } } println(f(0));",
        print.clone(),
    );
    assert!(matches!(
        result,
        Err(PipelineError::Runtime { error: RuntimeError::MissingReturn { .. }, .. })
    ));
    assert_eq!(print.output(), "1\n");
}
