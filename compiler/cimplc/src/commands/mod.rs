//! Command implementations for the `cimpl` binary.
//!
//! Each command reports its own problems on stderr and returns the process
//! exit code.

mod check;
mod run;

pub use check::check_file;
pub use run::run_file;

use std::io::{IsTerminal, Write};
use std::process::ExitCode;

use cimpl_diagnostic::span_utils::LineIndex;
use cimpl_diagnostic::{ColorMode, Diagnostic, DiagnosticEmitter, TerminalEmitter};
use cimpl_ir::Span;

use crate::PipelineError;

/// Exit status for a bad command line.
pub const EXIT_USAGE: u8 = 64;
/// Exit status for any diagnostic, compile error or runtime error.
pub const EXIT_FAILURE: u8 = 1;

pub(crate) fn read_file(path: &str) -> Result<String, PipelineError> {
    std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_owned(),
        source,
    })
}

/// Render diagnostics with source snippets on stderr.
pub(crate) fn emit_diagnostics(source: &str, diagnostics: &[Diagnostic], color: ColorMode) {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(color, is_tty).with_source(source);
    emitter.emit_all(diagnostics);
    emitter.emit_summary(diagnostics.len());
    emitter.flush();
}

/// Report a fatal error from a pass that has no diagnostic kind.
pub(crate) fn report_failure(source: &str, path: &str, err: &PipelineError, color: ColorMode) {
    let span = match err {
        PipelineError::Diagnostics(diagnostics) => {
            emit_diagnostics(source, diagnostics, color);
            return;
        }
        PipelineError::Io { .. } => None,
        PipelineError::Compile(err) => Some(err.span()),
        PipelineError::Runtime { span, .. } => Some(*span),
    };

    let mut stderr = std::io::stderr().lock();
    let _ = writeln!(stderr, "error: {err}");
    if let Some(span) = span.filter(|span| *span != Span::DUMMY) {
        let lines = LineIndex::new(source);
        let _ = writeln!(stderr, "  --> {path}:{}", lines.position(span));
    }
}

pub(crate) fn failure() -> ExitCode {
    ExitCode::from(EXIT_FAILURE)
}
