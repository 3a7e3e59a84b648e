//! The dispatch loop.

use cimpl_ir::bytecode::{Chunk, OpCode, Operand, Value};
use cimpl_ir::{Environment, Name};

use crate::operators;
use crate::{GrowableStack, RuntimeError, SharedPrintHandler, VmConfig};

/// One function activation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CallFrame {
    /// Operand stack length when the call was made, arguments included.
    pub base: usize,
    pub return_addr: usize,
}

pub struct Vm<'c> {
    chunk: &'c Chunk,
    stack: GrowableStack<Value>,
    frames: GrowableStack<CallFrame>,
    /// Exported module-level names to absolute stack slots.
    globals: Environment<u32>,
    print: SharedPrintHandler,
    ip: usize,
}

impl<'c> Vm<'c> {
    pub fn new(chunk: &'c Chunk, print: SharedPrintHandler) -> Self {
        Self::with_config(chunk, print, &VmConfig::default())
    }

    pub fn with_config(chunk: &'c Chunk, print: SharedPrintHandler, config: &VmConfig) -> Self {
        let mut globals = Environment::new();
        for &(name, slot) in chunk.globals() {
            globals.define(name, slot);
        }
        Vm {
            chunk,
            stack: GrowableStack::from_config(config),
            frames: GrowableStack::from_config(config),
            globals,
            print,
            ip: 0,
        }
    }

    /// Execute from the current instruction until `Halt` or the end of the
    /// chunk.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        while let Some((op, operand)) = self.chunk.instruction(self.ip) {
            if op == OpCode::Halt {
                break;
            }
            self.ip = self.step(op, operand)?;
        }
        tracing::debug!(stack = self.stack.len(), "halted");
        Ok(())
    }

    /// Value of an exported module-level variable.
    pub fn global(&self, name: Name) -> Option<Value> {
        let (&slot, _) = self.globals.lookup(name)?;
        self.stack.get(slot as usize)
    }

    pub fn stack(&self) -> &[Value] {
        self.stack.as_slice()
    }

    pub fn call_depth(&self) -> usize {
        self.frames.len()
    }

    /// Execute one instruction, returning the next instruction pointer.
    fn step(&mut self, op: OpCode, operand: Operand) -> Result<usize, RuntimeError> {
        let at = self.ip;
        let malformed = || RuntimeError::MalformedOperand { op, operand, at };

        match (op, operand) {
            (OpCode::Push, Operand::Const(value)) => self.stack.push(value),
            (OpCode::Load, Operand::Offset(offset)) => {
                let index = self
                    .stack
                    .len()
                    .checked_sub(offset as usize + 1)
                    .ok_or(RuntimeError::OffsetOutOfRange { position: offset, at })?;
                let value = self.read(index, at)?;
                self.stack.push(value);
            }
            (OpCode::Store, Operand::Offset(0)) => {
                if self.stack.is_empty() {
                    return Err(RuntimeError::StackUnderflow { at });
                }
            }
            (OpCode::Store, Operand::Offset(offset)) => {
                let value = self.pop(at)?;
                let index = self
                    .stack
                    .len()
                    .checked_sub(offset as usize)
                    .ok_or(RuntimeError::OffsetOutOfRange { position: offset, at })?;
                self.write(index, value, at)?;
            }
            (OpCode::LoadGlobal, Operand::Slot(slot)) => {
                let value = self.read(slot as usize, at)?;
                self.stack.push(value);
            }
            (OpCode::StoreGlobal, Operand::Slot(slot)) => {
                let value = self.pop(at)?;
                self.write(slot as usize, value, at)?;
            }
            (OpCode::Truncate, Operand::Size(size)) => {
                let target = self.frame_base() + size as usize;
                if !self.stack.truncate(target) {
                    return Err(RuntimeError::OffsetOutOfRange { position: size, at });
                }
            }
            (
                OpCode::Add
                | OpCode::Sub
                | OpCode::Mul
                | OpCode::Div
                | OpCode::Mod
                | OpCode::Lt
                | OpCode::Gt
                | OpCode::LtEq
                | OpCode::GtEq
                | OpCode::Eq
                | OpCode::NotEq
                | OpCode::And
                | OpCode::Or,
                Operand::None,
            ) => {
                let right = self.pop(at)?;
                let left = self.pop(at)?;
                self.stack.push(operators::binary(op, left, right, at)?);
            }
            (OpCode::Not, Operand::None) => {
                let value = self.pop(at)?;
                self.stack.push(operators::not(value, at)?);
            }
            (OpCode::Jump, Operand::Address(target)) => return self.jump_target(target, at),
            (OpCode::JumpIf, Operand::Address(target)) => {
                return match self.pop(at)? {
                    Value::Bool(true) => self.jump_target(target, at),
                    Value::Bool(false) => Ok(at + 1),
                    other => Err(operators::mismatch(op, other, at)),
                };
            }
            (OpCode::Call, Operand::Address(target)) => {
                let entry = self.jump_target(target, at)?;
                self.frames.push(CallFrame {
                    base: self.stack.len(),
                    return_addr: at + 1,
                });
                tracing::trace!(entry, depth = self.frames.len(), "call");
                return Ok(entry);
            }
            (OpCode::Return, Operand::Shift(shift)) => {
                let value = self.pop(at)?;
                let frame = self.leave_frame(shift, at)?;
                self.stack.push(value);
                return Ok(frame.return_addr);
            }
            (OpCode::Resume, Operand::Shift(shift)) => {
                let frame = self.leave_frame(shift, at)?;
                return Ok(frame.return_addr);
            }
            (OpCode::Print, Operand::None) => {
                let value = self.pop(at)?;
                self.print.println(&self.chunk.render(value));
            }
            (OpCode::MissingReturn, _) => return Err(RuntimeError::MissingReturn { at }),
            _ => return Err(malformed()),
        }
        Ok(at + 1)
    }

    /// Stack length at the active call, 0 at module level.
    fn frame_base(&self) -> usize {
        self.frames.last().map_or(0, |frame| frame.base)
    }

    /// Pop the active frame and drop its locals plus `shift` arguments.
    fn leave_frame(&mut self, shift: u32, at: usize) -> Result<CallFrame, RuntimeError> {
        let frame = self
            .frames
            .pop()
            .ok_or(RuntimeError::CallStackUnderflow { at })?;
        let target = frame
            .base
            .checked_sub(shift as usize)
            .ok_or(RuntimeError::StackUnderflow { at })?;
        if !self.stack.truncate(target) {
            return Err(RuntimeError::StackUnderflow { at });
        }
        tracing::trace!(return_addr = frame.return_addr, depth = self.frames.len(), "return");
        Ok(frame)
    }

    fn jump_target(&self, target: u32, at: usize) -> Result<usize, RuntimeError> {
        let target_index = target as usize;
        if target_index > self.chunk.len() {
            return Err(RuntimeError::JumpOutOfRange { target, at });
        }
        Ok(target_index)
    }

    fn pop(&mut self, at: usize) -> Result<Value, RuntimeError> {
        self.stack.pop().ok_or(RuntimeError::StackUnderflow { at })
    }

    fn read(&self, index: usize, at: usize) -> Result<Value, RuntimeError> {
        self.stack.get(index).ok_or(RuntimeError::OffsetOutOfRange {
            position: u32::try_from(index).unwrap_or(u32::MAX),
            at,
        })
    }

    fn write(&mut self, index: usize, value: Value, at: usize) -> Result<(), RuntimeError> {
        if self.stack.set(index, value) {
            Ok(())
        } else {
            Err(RuntimeError::OffsetOutOfRange {
                position: u32::try_from(index).unwrap_or(u32::MAX),
                at,
            })
        }
    }
}
