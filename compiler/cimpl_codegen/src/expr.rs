//! Expression lowering.

use cimpl_ir::ast::{BinaryOp, Expr, ExprKind};
use cimpl_ir::bytecode::{OpCode, Operand, Value};
use cimpl_ir::{literal, Span, Type};
use cimpl_stack::ensure_sufficient_stack;

use crate::compiler::Compiler;
use crate::CompileError;

pub(crate) fn binary_opcode(op: BinaryOp) -> OpCode {
    match op {
        BinaryOp::Add => OpCode::Add,
        BinaryOp::Sub => OpCode::Sub,
        BinaryOp::Mul => OpCode::Mul,
        BinaryOp::Div => OpCode::Div,
        BinaryOp::Mod => OpCode::Mod,
        BinaryOp::Lt => OpCode::Lt,
        BinaryOp::Gt => OpCode::Gt,
        BinaryOp::LtEq => OpCode::LtEq,
        BinaryOp::GtEq => OpCode::GtEq,
        BinaryOp::Eq => OpCode::Eq,
        BinaryOp::NotEq => OpCode::NotEq,
        BinaryOp::And => OpCode::And,
        BinaryOp::Or => OpCode::Or,
    }
}

impl Compiler<'_> {
    /// Emit code leaving the expression's value on top of the stack.
    /// Calls to void functions leave nothing.
    pub(crate) fn compile_expr(&mut self, expr: &Expr) -> Result<(), CompileError> {
        ensure_sufficient_stack(|| {
            if let Some(Type::Function(_)) = expr.ty {
                return Err(CompileError::Unsupported {
                    what: "a function-typed value",
                    span: expr.span,
                });
            }

            match &expr.kind {
                ExprKind::Int => {
                    let text = self.literal_text(expr.span)?;
                    let value = literal::parse_int(text).ok_or_else(|| {
                        CompileError::InvalidLiteral {
                            text: text.to_owned(),
                            span: expr.span,
                        }
                    })?;
                    self.push_const(Value::Int(value), expr.span);
                }
                ExprKind::Str => {
                    let text = self.literal_text(expr.span)?;
                    let value = literal::unescape_string(text).ok_or_else(|| {
                        CompileError::InvalidLiteral {
                            text: text.to_owned(),
                            span: expr.span,
                        }
                    })?;
                    let id = self
                        .chunk
                        .intern_str(&value)
                        .ok_or(CompileError::Overflow {
                            what: "string constant pool",
                            span: expr.span,
                        })?;
                    self.push_const(Value::Str(id), expr.span);
                }
                ExprKind::Bool(value) => self.push_const(Value::Bool(*value), expr.span),
                ExprKind::Ident(ident) => self.load(ident)?,
                ExprKind::Not(operand) => {
                    self.compile_expr(operand)?;
                    self.emit(OpCode::Not, Operand::None, expr.span);
                }
                ExprKind::Binary { op, left, right } => {
                    if [left, right].iter().any(|side| side.ty == Some(Type::Void)) {
                        return Err(CompileError::Unsupported {
                            what: "an operator applied to a void call",
                            span: expr.span,
                        });
                    }
                    self.compile_expr(left)?;
                    self.compile_expr(right)?;
                    self.emit(binary_opcode(*op), Operand::None, expr.span);
                    self.release(1, expr.span)?;
                }
                ExprKind::Call(call) => self.compile_call(call, expr.span)?,
            }
            Ok(())
        })
    }

    pub(crate) fn push_const(&mut self, value: Value, span: Span) {
        self.emit(OpCode::Push, Operand::Const(value), span);
        self.stack_index += 1;
    }
}
