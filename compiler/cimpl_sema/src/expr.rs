//! Expression typing.

use cimpl_diagnostic::ErrorKind;
use cimpl_ir::ast::{BinaryOp, Call, Expr, ExprKind, OperandRule};
use cimpl_ir::{types_match, Span, Type};
use cimpl_stack::ensure_sufficient_stack;

use crate::analyzer::{describe, Analyzer};

impl Analyzer<'_> {
    /// Type `expr` and its subexpressions, storing the result in `expr.ty`.
    pub(crate) fn check_expr(&mut self, expr: &mut Expr) {
        ensure_sufficient_stack(|| {
            let span = expr.span;
            let ty = match &mut expr.kind {
                ExprKind::Int => Some(Type::Int),
                ExprKind::Str => Some(Type::String),
                ExprKind::Bool(_) => Some(Type::Bool),
                ExprKind::Ident(ident) => match self.resolve(ident) {
                    Some(ty) => ty,
                    None => {
                        let message = format!("undefined variable `{}`", self.name(ident.name));
                        self.report(ErrorKind::ReferenceError, message, ident.span);
                        None
                    }
                },
                ExprKind::Not(operand) => {
                    self.check_expr(operand);
                    self.expect_operand(operand, &Type::Bool)
                        .then_some(Type::Bool)
                }
                ExprKind::Binary { op, left, right } => {
                    let op = *op;
                    self.check_expr(left);
                    self.check_expr(right);
                    self.check_binary(op, left, right, span)
                }
                ExprKind::Call(call) => self.check_call(call),
            };
            expr.ty = ty;
        });
    }

    /// Report unless `operand` is compatible with `expected`.
    fn expect_operand(&mut self, operand: &Expr, expected: &Type) -> bool {
        if types_match(operand.ty.as_ref(), Some(expected)) {
            return true;
        }
        let message = format!(
            "invalid operation for given type: expected {expected}, found {}",
            describe(operand.ty.as_ref())
        );
        self.report(ErrorKind::TypeError, message, operand.span);
        false
    }

    fn check_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr, span: Span) -> Option<Type> {
        let ok = match op.operand_rule() {
            OperandRule::BothInt => {
                let l = self.expect_operand(left, &Type::Int);
                let r = self.expect_operand(right, &Type::Int);
                l && r
            }
            OperandRule::BothBool => {
                let l = self.expect_operand(left, &Type::Bool);
                let r = self.expect_operand(right, &Type::Bool);
                l && r
            }
            OperandRule::SameType => self.check_comparable(left, right, span),
        };
        ok.then(|| op.result_type())
    }

    fn check_comparable(&mut self, left: &Expr, right: &Expr, span: Span) -> bool {
        if types_match(left.ty.as_ref(), right.ty.as_ref()) {
            return true;
        }
        let message = format!(
            "cannot compare different types: {} and {}",
            describe(left.ty.as_ref()),
            describe(right.ty.as_ref())
        );
        self.report(ErrorKind::TypeError, message, span);
        false
    }

    /// Type a call. Arity failure keeps the declared return type; an
    /// unresolved or non-function callee yields an unknown type.
    pub(crate) fn check_call(&mut self, call: &mut Call) -> Option<Type> {
        let callee = self.resolve(&mut call.callee);
        for arg in &mut call.args {
            self.check_expr(arg);
        }
        let name = self.name(call.callee.name);

        let signature = match callee {
            None => {
                let message = format!("undefined function `{name}`");
                self.report(ErrorKind::ReferenceError, message, call.callee.span);
                return None;
            }
            Some(None) => return None,
            Some(Some(Type::Function(signature))) => signature,
            Some(Some(other)) => {
                let message = format!("`{name}` is not a function, it has type {other}");
                self.report(ErrorKind::TypeError, message, call.callee.span);
                return None;
            }
        };

        if call.args.len() == signature.params.len() {
            for (index, (arg, param)) in call.args.iter().zip(&signature.params).enumerate() {
                if !types_match(arg.ty.as_ref(), Some(param)) {
                    let message = format!(
                        "argument {} of `{name}` has wrong type: expected {param}, found {}",
                        index + 1,
                        describe(arg.ty.as_ref())
                    );
                    self.report(ErrorKind::TypeError, message, arg.span);
                }
            }
        } else {
            let message = format!(
                "wrong number of arguments: `{name}` takes {}, found {}",
                signature.params.len(),
                call.args.len()
            );
            self.report(ErrorKind::TypeError, message, call.callee.span);
        }
        Some(signature.ret)
    }
}
