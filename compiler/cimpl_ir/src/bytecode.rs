//! Compiled program representation shared by the compiler and the VM.
//!
//! A [`Chunk`] is a flat instruction array: instruction `i` is
//! `(code[i], operands[i])` and was produced from source `spans[i]`.
//! Jumps and calls hold absolute instruction indices into the same array.

use rustc_hash::FxHashMap;
use std::fmt;

use crate::{FunctionType, Name, Span};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OpCode {
    /// Push the constant operand.
    Push,
    /// Push a copy of `stack[len - offset - 1]`.
    Load,
    /// Offset `0`: leave the just-pushed value in place as a new local.
    /// Otherwise pop into `stack[len - offset]`, `len` taken after the pop.
    Store,
    /// Push a copy of an absolute module-level slot.
    LoadGlobal,
    /// Pop into an absolute module-level slot.
    StoreGlobal,
    /// Set the stack length to `frame base + size`.
    Truncate,

    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,
    Not,

    Jump,
    /// Pop a bool; jump when it is `true`.
    JumpIf,
    Call,
    /// Pop the result, collapse the frame by `shift`, push the result.
    Return,
    /// Collapse the frame by `shift` without a result.
    Resume,

    Print,
    /// Control fell off the end of a function that must return a value.
    MissingReturn,
    Halt,
}

/// Handle into a chunk's string constant pool.
///
/// The pool is deduplicated, so two string values are equal exactly when
/// their handles are equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct StrId(u32);

impl StrId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One operand-stack slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(StrId),
}

impl Value {
    pub fn kind_name(self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Operand {
    #[default]
    None,
    Const(Value),
    /// Relative distance from the top of the stack.
    Offset(u32),
    /// Absolute stack position.
    Slot(u32),
    /// Absolute instruction index.
    Address(u32),
    /// Stack size relative to the active frame base.
    Size(u32),
    /// Number of stack values below the frame base to discard on exit.
    Shift(u32),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => Ok(()),
            Operand::Const(Value::Int(v)) => write!(f, "{v}"),
            Operand::Const(Value::Bool(v)) => write!(f, "{v}"),
            Operand::Const(Value::Str(id)) => write!(f, "str#{}", id.0),
            Operand::Offset(v) => write!(f, "-{v}"),
            Operand::Slot(v) => write!(f, "[{v}]"),
            Operand::Address(v) => write!(f, "@{v}"),
            Operand::Size(v) => write!(f, "size {v}"),
            Operand::Shift(v) => write!(f, "shift {v}"),
        }
    }
}

/// How a function leaves its activation.
///
/// Derived once from the function's type and used for every exit the
/// compiler emits for it, so the collapse the VM performs always matches
/// the arguments the caller pushed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct CallConvention {
    pub params: u32,
    pub returns_value: bool,
}

impl CallConvention {
    /// Returns `None` when the parameter count does not fit an operand.
    pub fn of(signature: &FunctionType) -> Option<Self> {
        Some(CallConvention {
            params: u32::try_from(signature.params.len()).ok()?,
            returns_value: !signature.ret.is_void(),
        })
    }

    /// The instruction that exits a function using this convention.
    pub fn exit(self) -> (OpCode, Operand) {
        let op = if self.returns_value {
            OpCode::Return
        } else {
            OpCode::Resume
        };
        (op, Operand::Shift(self.params))
    }
}

/// A compiled program.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Chunk {
    code: Vec<OpCode>,
    operands: Vec<Operand>,
    spans: Vec<Span>,
    strings: Vec<String>,
    string_ids: FxHashMap<String, StrId>,
    globals: Vec<(Name, u32)>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction, returning its index.
    pub fn emit(&mut self, op: OpCode, operand: Operand, span: Span) -> usize {
        self.code.push(op);
        self.operands.push(operand);
        self.spans.push(span);
        self.code.len() - 1
    }

    /// Replace the operand of an already emitted instruction.
    ///
    /// Returns `false` if `index` is not an emitted instruction.
    pub fn patch(&mut self, index: usize, operand: Operand) -> bool {
        match self.operands.get_mut(index) {
            Some(slot) => {
                *slot = operand;
                true
            }
            None => false,
        }
    }

    /// Add a string to the constant pool, reusing an equal entry.
    pub fn intern_str(&mut self, s: &str) -> Option<StrId> {
        if let Some(&id) = self.string_ids.get(s) {
            return Some(id);
        }
        let id = StrId(u32::try_from(self.strings.len()).ok()?);
        self.strings.push(s.to_owned());
        self.string_ids.insert(s.to_owned(), id);
        Some(id)
    }

    pub fn string(&self, id: StrId) -> Option<&str> {
        self.strings.get(id.index()).map(String::as_str)
    }

    /// Record a module-level binding and its absolute stack slot.
    pub fn export_global(&mut self, name: Name, slot: u32) {
        self.globals.push((name, slot));
    }

    pub fn globals(&self) -> &[(Name, u32)] {
        &self.globals
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.code.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn code(&self) -> &[OpCode] {
        &self.code
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    #[inline]
    pub fn instruction(&self, index: usize) -> Option<(OpCode, Operand)> {
        Some((*self.code.get(index)?, *self.operands.get(index)?))
    }

    pub fn span(&self, index: usize) -> Span {
        self.spans.get(index).copied().unwrap_or(Span::DUMMY)
    }

    /// Render a value the way `println` shows it.
    pub fn render(&self, value: Value) -> String {
        match value {
            Value::Int(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Str(id) => self.string(id).unwrap_or_default().to_owned(),
        }
    }
}

#[cfg(test)]
mod tests;
