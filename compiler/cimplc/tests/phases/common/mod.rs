//! Shared helpers for phase tests.

use cimpl_diagnostic::{Diagnostic, ErrorKind};
use cimplc::{check_source, run_source, PipelineError, RunOutcome};

/// Run a program that must succeed; returns its outcome and printed output.
pub fn run(source: &str) -> (RunOutcome, String) {
    let print = cimpl_vm::buffer_handler();
    match run_source(source, print.clone()) {
        Ok(outcome) => (outcome, print.output()),
        Err(err) => panic!("program failed: {err:?}\n{source}"),
    }
}

/// Run a program that must fail.
pub fn run_err(source: &str) -> PipelineError {
    match run_source(source, cimpl_vm::silent_handler()) {
        Ok(outcome) => panic!("program unexpectedly succeeded: {outcome:?}\n{source}"),
        Err(err) => err,
    }
}

pub fn diagnostics(source: &str) -> Vec<Diagnostic> {
    check_source(source).diagnostics
}

pub fn kinds(source: &str) -> Vec<ErrorKind> {
    diagnostics(source).iter().map(|d| d.kind).collect()
}
