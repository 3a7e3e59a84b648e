//! Diagnostics for the cimpl toolchain.
//!
//! Front-end passes report problems as [`Diagnostic`] values and keep going;
//! the driver decides when and how to render them through a
//! [`DiagnosticEmitter`].

mod diagnostic;
pub mod emitter;
pub mod span_utils;

pub use diagnostic::{Diagnostic, ErrorKind};
pub use emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
