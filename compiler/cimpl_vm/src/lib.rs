//! Cimpl VM - executes compiled bytecode.
//!
//! # Architecture
//!
//! - [`Vm`]: fetch/dispatch loop over a [`Chunk`]
//! - one operand stack holding both locals and temporaries
//! - one call-frame stack of `(base, return address)` pairs
//! - [`GrowableStack`]: storage for both, grown and shrunk geometrically
//! - [`PrintHandlerImpl`]: where `Print` output goes
//!
//! [`Chunk`]: cimpl_ir::bytecode::Chunk

mod config;
mod errors;
mod machine;
mod operators;
mod print_handler;
mod stack;

pub use config::VmConfig;
pub use errors::RuntimeError;
pub use machine::{CallFrame, Vm};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};
pub use stack::GrowableStack;
