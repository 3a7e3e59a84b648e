//! Cimpl toolchain driver.
//!
//! # Architecture
//!
//! ```text
//! source
//!     │  cimpl_lexer::lex
//!     ▼
//! TokenList
//!     │  cimpl_parse::parse
//!     ▼
//! Program ──► cimpl_sema::analyze ──► annotated Program + diagnostics
//!     │  cimpl_codegen::compile
//!     ▼
//! Chunk ──► cimpl_vm::Vm::run ──► printed lines
//! ```
//!
//! [`check_source`] stops after analysis, [`run_source`] goes all the way.
//! The `cimpl` binary is a thin wrapper over [`commands`].

pub mod commands;
mod pipeline;
mod tracing_setup;

pub use pipeline::{check_source, run_source, Checked, PipelineError, RunOutcome};
pub use tracing_setup::init_tracing;
