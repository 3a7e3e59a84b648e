//! Bytecode generation for cimpl.
//!
//! Lowers an analyzed [`Program`] to a [`Chunk`] for the stack VM. The
//! compiler keeps no runtime names: it simulates the operand stack with a
//! cursor and turns every variable reference into a distance from the top
//! of the stack.
//!
//! Only programs the analyzer accepted should be compiled. The compiler
//! re-resolves every name in its own frame stack and fails with
//! [`CompileError::ScopeDrift`] if that ever disagrees with the analysis.
//!
//! [`Program`]: cimpl_ir::ast::Program
//! [`Chunk`]: cimpl_ir::bytecode::Chunk

mod compiler;
mod errors;
mod expr;
mod function;
mod stmt;

pub use compiler::compile;
pub use errors::CompileError;
