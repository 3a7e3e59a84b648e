//! Runtime errors. Every one is fatal and names the failing instruction.

use cimpl_ir::bytecode::{OpCode, Operand};

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RuntimeError {
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    #[error("stack position {position} out of range at instruction {at}")]
    OffsetOutOfRange { position: u32, at: usize },

    #[error("malformed operand `{operand}` for {op:?} at instruction {at}")]
    MalformedOperand {
        op: OpCode,
        operand: Operand,
        at: usize,
    },

    #[error("{op:?} cannot operate on {found} at instruction {at}")]
    TypeMismatch {
        op: OpCode,
        found: &'static str,
        at: usize,
    },

    #[error("{op:?} by zero at instruction {at}")]
    DivisionByZero { op: OpCode, at: usize },

    #[error("integer overflow in {op:?} at instruction {at}")]
    IntegerOverflow { op: OpCode, at: usize },

    #[error("return without an active call at instruction {at}")]
    CallStackUnderflow { at: usize },

    #[error("function ended without returning a value at instruction {at}")]
    MissingReturn { at: usize },

    #[error("jump target {target} out of range at instruction {at}")]
    JumpOutOfRange { target: u32, at: usize },
}

impl RuntimeError {
    /// Index of the instruction that failed.
    pub fn at(&self) -> usize {
        match *self {
            RuntimeError::StackUnderflow { at }
            | RuntimeError::OffsetOutOfRange { at, .. }
            | RuntimeError::MalformedOperand { at, .. }
            | RuntimeError::TypeMismatch { at, .. }
            | RuntimeError::DivisionByZero { at, .. }
            | RuntimeError::IntegerOverflow { at, .. }
            | RuntimeError::CallStackUnderflow { at }
            | RuntimeError::MissingReturn { at }
            | RuntimeError::JumpOutOfRange { at, .. } => at,
        }
    }
}
