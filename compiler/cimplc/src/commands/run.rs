use std::process::ExitCode;

use cimpl_diagnostic::ColorMode;
use cimpl_vm::stdout_handler;

use super::{failure, read_file, report_failure};
use crate::run_source;

/// Check, compile and execute a file. Program output goes to stdout,
/// problems to stderr.
pub fn run_file(path: &str, color: ColorMode) -> ExitCode {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(err) => {
            report_failure("", path, &err, color);
            return failure();
        }
    };

    match run_source(&source, stdout_handler()) {
        Ok(outcome) => {
            tracing::debug!(globals = outcome.globals.len(), "finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_failure(&source, path, &err, color);
            failure()
        }
    }
}
