//! Binary and unary operator semantics.
//!
//! Integer arithmetic is checked: overflow and division by zero are
//! runtime errors, never wrapped results. `&&` and `||` see both operands
//! already evaluated. Strings compare by pool handle, which is equality of
//! contents because the pool is deduplicated.

use cimpl_ir::bytecode::{OpCode, Value};

use crate::RuntimeError;

pub(crate) fn binary(op: OpCode, left: Value, right: Value, at: usize) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_binary(op, a, b, at),
        (Value::Bool(a), Value::Bool(b)) => match op {
            OpCode::And => Ok(Value::Bool(a && b)),
            OpCode::Or => Ok(Value::Bool(a || b)),
            OpCode::Eq => Ok(Value::Bool(a == b)),
            OpCode::NotEq => Ok(Value::Bool(a != b)),
            _ => Err(mismatch(op, left, at)),
        },
        (Value::Str(a), Value::Str(b)) => match op {
            OpCode::Eq => Ok(Value::Bool(a == b)),
            OpCode::NotEq => Ok(Value::Bool(a != b)),
            _ => Err(mismatch(op, left, at)),
        },
        _ => Err(mismatch(op, right, at)),
    }
}

fn int_binary(op: OpCode, a: i64, b: i64, at: usize) -> Result<Value, RuntimeError> {
    let overflow = || RuntimeError::IntegerOverflow { op, at };
    let value = match op {
        OpCode::Add => Value::Int(a.checked_add(b).ok_or_else(overflow)?),
        OpCode::Sub => Value::Int(a.checked_sub(b).ok_or_else(overflow)?),
        OpCode::Mul => Value::Int(a.checked_mul(b).ok_or_else(overflow)?),
        OpCode::Div | OpCode::Mod if b == 0 => {
            return Err(RuntimeError::DivisionByZero { op, at })
        }
        OpCode::Div => Value::Int(a.checked_div(b).ok_or_else(overflow)?),
        OpCode::Mod => Value::Int(a.checked_rem(b).ok_or_else(overflow)?),
        OpCode::Lt => Value::Bool(a < b),
        OpCode::Gt => Value::Bool(a > b),
        OpCode::LtEq => Value::Bool(a <= b),
        OpCode::GtEq => Value::Bool(a >= b),
        OpCode::Eq => Value::Bool(a == b),
        OpCode::NotEq => Value::Bool(a != b),
        _ => return Err(mismatch(op, Value::Int(a), at)),
    };
    Ok(value)
}

pub(crate) fn not(value: Value, at: usize) -> Result<Value, RuntimeError> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(mismatch(OpCode::Not, other, at)),
    }
}

#[cold]
pub(crate) fn mismatch(op: OpCode, found: Value, at: usize) -> RuntimeError {
    RuntimeError::TypeMismatch {
        op,
        found: found.kind_name(),
        at,
    }
}
