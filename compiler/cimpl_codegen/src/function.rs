//! Function bodies, calls and returns.
//!
//! A call leaves the caller's arguments on the stack and pushes a call
//! frame whose base is the stack length at the call. Inside the body the
//! simulated stack index starts at the parameter count, so parameter `i`
//! (0-based) lives at index `i + 1` like any other local, and every exit
//! collapses the frame by `CallConvention::params`.

use cimpl_ir::ast::{Call, Expr, FnDecl};
use cimpl_ir::bytecode::{CallConvention, OpCode, Operand};
use cimpl_ir::Span;

use crate::compiler::{Binding, Compiler, FnContext, Resolved};
use crate::CompileError;

impl Compiler<'_> {
    pub(crate) fn compile_fn(&mut self, decl: &FnDecl, span: Span) -> Result<(), CompileError> {
        let signature = decl
            .signature
            .as_ref()
            .ok_or(CompileError::Unannotated { span })?;
        let convention = CallConvention::of(signature).ok_or(CompileError::Overflow {
            what: "parameter count",
            span,
        })?;
        self.check_locus(&decl.name, self.env.current_index())?;
        if self.env.lookup(decl.name.name).is_some() {
            return Err(self.drift(&decl.name));
        }

        let skip = self.emit(OpCode::Jump, Operand::None, span);
        let entry = self.here(span)?;
        self.env.define(decl.name.name, Binding::FunctionEntry(entry));
        self.functions.insert(entry, convention);
        tracing::debug!(
            function = %self.name(decl.name.name),
            entry,
            params = convention.params,
            "compiling function body"
        );

        let caller_stack = self.stack_index;
        let caller_loops = std::mem::take(&mut self.loops);
        self.env.push_frame();
        self.fn_stack.push(FnContext {
            floor: self.env.current_index(),
            convention,
        });
        for (slot, param) in (1..=convention.params).zip(&decl.params) {
            self.env.define(param.name, Binding::Slot(slot));
        }
        self.stack_index = convention.params;

        for stmt in &decl.body.stmts {
            self.compile_stmt(stmt)?;
        }
        if convention.returns_value {
            self.emit(OpCode::MissingReturn, Operand::None, decl.body.span);
        } else {
            let (op, operand) = convention.exit();
            self.emit(op, operand, decl.body.span);
        }

        self.fn_stack.pop();
        self.env.pop_frame();
        self.loops = caller_loops;
        self.stack_index = caller_stack;
        self.patch_to_here(skip, span)
    }

    pub(crate) fn compile_call(&mut self, call: &Call, span: Span) -> Result<(), CompileError> {
        let Resolved::Function(address) = self.resolve(&call.callee)? else {
            return Err(CompileError::Unsupported {
                what: "calling through a function-typed variable",
                span,
            });
        };
        let convention = self
            .functions
            .get(&address)
            .copied()
            .filter(|c| c.params as usize == call.args.len())
            .ok_or_else(|| self.drift(&call.callee))?;

        for arg in &call.args {
            self.compile_expr(arg)?;
        }
        self.emit(OpCode::Call, Operand::Address(address), span);
        self.release(convention.params, span)?;
        if convention.returns_value {
            self.stack_index += 1;
        }
        Ok(())
    }

    pub(crate) fn compile_return(&mut self, value: Option<&Expr>, span: Span) -> Result<(), CompileError> {
        let Some(convention) = self.fn_stack.last().map(|f| f.convention) else {
            return Err(CompileError::Unsupported {
                what: "`return` outside of a function",
                span,
            });
        };
        if let Some(value) = value {
            self.compile_expr(value)?;
        }
        let (op, operand) = convention.exit();
        self.emit(op, operand, span);
        if convention.returns_value {
            self.release(1, span)?;
        }
        Ok(())
    }
}
