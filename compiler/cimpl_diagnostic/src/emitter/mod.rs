//! Diagnostic emitters.
//!
//! Only human-readable terminal output is provided; the trait keeps the
//! driver independent of the concrete format.

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

/// Trait for emitting diagnostics in some output format.
pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all(&mut self, diagnostics: &[Diagnostic]) {
        for diag in diagnostics {
            self.emit(diag);
        }
    }

    /// Flush any buffered output.
    fn flush(&mut self);

    /// Emit a closing line such as "aborting due to 3 previous errors".
    fn emit_summary(&mut self, error_count: usize);
}

#[cfg(test)]
mod tests;
