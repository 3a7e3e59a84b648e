//! The `check` command: analyze a cimpl source file without running it.

use std::process::ExitCode;

use cimpl_diagnostic::ColorMode;

use super::{emit_diagnostics, failure, read_file, report_failure};
use crate::check_source;

/// Lex, parse and analyze a file, printing every diagnostic, or `ok` when
/// there are none.
pub fn check_file(path: &str, color: ColorMode) -> ExitCode {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(err) => {
            report_failure("", path, &err, color);
            return failure();
        }
    };

    let checked = check_source(&source);
    if checked.diagnostics.is_empty() {
        println!("ok");
        ExitCode::SUCCESS
    } else {
        emit_diagnostics(&source, &checked.diagnostics, color);
        failure()
    }
}
