//! Statement lowering and control flow.

use cimpl_ir::ast::{
    Assign, AssignOp, Block, Decl, DeclOutcome, For, If, Stmt, StmtKind, While,
};
use cimpl_ir::bytecode::{OpCode, Operand, Value};
use cimpl_ir::Span;
use cimpl_stack::ensure_sufficient_stack;

use crate::compiler::{Binding, Compiler, LoopContext};
use crate::expr::binary_opcode;
use crate::CompileError;

/// Which list of pending jumps a loop exit belongs to.
#[derive(Copy, Clone)]
enum LoopExit {
    Break,
    Continue,
}

impl Compiler<'_> {
    pub(crate) fn compile_stmt(&mut self, stmt: &Stmt) -> Result<(), CompileError> {
        ensure_sufficient_stack(|| {
            let span = stmt.span;
            match &stmt.kind {
                StmtKind::Block(block) => self.compile_block(block),
                StmtKind::Decl(decl) => self.compile_decl(decl),
                StmtKind::Assign(assign) => self.compile_assign(assign, span),
                StmtKind::Expr(expr) => {
                    let before = self.stack_index;
                    self.compile_expr(expr)?;
                    if self.stack_index > before {
                        self.truncate_to(before, span)?;
                        self.stack_index = before;
                    }
                    Ok(())
                }
                StmtKind::Print(value) => {
                    self.compile_expr(value)?;
                    self.emit(OpCode::Print, Operand::None, span);
                    self.release(1, span)
                }
                StmtKind::If(if_stmt) => self.compile_if(if_stmt, span),
                StmtKind::While(while_stmt) => self.compile_while(while_stmt, span),
                StmtKind::For(for_stmt) => self.compile_for(for_stmt, span),
                StmtKind::Fn(decl) => self.compile_fn(decl, span),
                StmtKind::Break => self.compile_loop_exit(LoopExit::Break, span),
                StmtKind::Continue => self.compile_loop_exit(LoopExit::Continue, span),
                StmtKind::Return(value) => self.compile_return(value.as_ref(), span),
            }
        })
    }

    pub(crate) fn compile_block(&mut self, block: &Block) -> Result<(), CompileError> {
        let entry = self.enter_frame();
        for stmt in &block.stmts {
            self.compile_stmt(stmt)?;
        }
        self.leave_frame(entry, block.span)
    }

    /// The pushed value becomes the variable's slot. A declaration the
    /// analyzer ignored leaves its value behind as an unnamed temporary.
    fn compile_decl(&mut self, decl: &Decl) -> Result<(), CompileError> {
        let span = decl.target.span;
        self.check_locus(&decl.target, self.env.current_index())?;
        let outcome = decl.outcome.ok_or(CompileError::Unannotated { span })?;
        let already_bound = self.env.is_bound_locally(decl.target.name);
        if already_bound != (outcome == DeclOutcome::Ignored) {
            return Err(self.drift(&decl.target));
        }

        self.compile_expr(&decl.value)?;
        if outcome == DeclOutcome::Bound {
            self.emit(OpCode::Store, Operand::Offset(0), span);
            self.env
                .define(decl.target.name, Binding::Slot(self.stack_index));
        }
        Ok(())
    }

    fn compile_assign(&mut self, assign: &Assign, span: Span) -> Result<(), CompileError> {
        if let Some(op) = assign.op.arithmetic() {
            self.load(&assign.target)?;
            match &assign.value {
                Some(value) => self.compile_expr(value)?,
                None => self.push_const(Value::Int(1), span),
            }
            self.emit(binary_opcode(op), Operand::None, span);
            self.release(1, span)?;
        } else {
            debug_assert_eq!(assign.op, AssignOp::Set);
            let value = assign
                .value
                .as_ref()
                .ok_or(CompileError::Unannotated { span })?;
            self.compile_expr(value)?;
        }
        self.store(&assign.target)
    }

    /// cond; `JumpIf then`; `Jump else-or-end`; then; [`Jump end`; else]
    fn compile_if(&mut self, if_stmt: &If, span: Span) -> Result<(), CompileError> {
        self.compile_expr(&if_stmt.cond)?;
        let to_then = self.emit(OpCode::JumpIf, Operand::None, span);
        self.release(1, span)?;
        let to_else = self.emit(OpCode::Jump, Operand::None, span);

        self.patch_to_here(to_then, span)?;
        self.compile_block(&if_stmt.then_branch)?;

        match &if_stmt.else_branch {
            Some(else_branch) => {
                let to_end = self.emit(OpCode::Jump, Operand::None, span);
                self.patch_to_here(to_else, span)?;
                self.compile_block(else_branch)?;
                self.patch_to_here(to_end, span)
            }
            None => self.patch_to_here(to_else, span),
        }
    }

    /// The condition is emitted twice: once as an entry guard and once
    /// after the body, so each iteration takes a single backward jump.
    fn compile_while(&mut self, while_stmt: &While, span: Span) -> Result<(), CompileError> {
        self.compile_expr(&while_stmt.cond)?;
        let to_body = self.emit(OpCode::JumpIf, Operand::None, span);
        self.release(1, span)?;
        let to_exit = self.emit(OpCode::Jump, Operand::None, span);

        let body = self.here(span)?;
        self.patch(to_body, body);
        let exits = self.compile_loop_body(&while_stmt.body)?;

        let retest = self.here(span)?;
        for jump in exits.continues {
            self.patch(jump, retest);
        }
        self.compile_expr(&while_stmt.cond)?;
        self.emit(OpCode::JumpIf, Operand::Address(body), span);
        self.release(1, span)?;

        self.patch_to_here(to_exit, span)?;
        for jump in exits.breaks {
            self.patch_to_here(jump, span)?;
        }
        Ok(())
    }

    /// The header gets its own frame so the loop variable outlives each
    /// iteration's body frame but not the loop.
    fn compile_for(&mut self, for_stmt: &For, span: Span) -> Result<(), CompileError> {
        let entry = self.enter_frame();
        self.compile_stmt(&for_stmt.init)?;

        let test = self.here(span)?;
        self.compile_expr(&for_stmt.cond)?;
        let to_body = self.emit(OpCode::JumpIf, Operand::None, span);
        self.release(1, span)?;
        let to_exit = self.emit(OpCode::Jump, Operand::None, span);

        self.patch_to_here(to_body, span)?;
        let exits = self.compile_loop_body(&for_stmt.body)?;

        let step = self.here(span)?;
        for jump in exits.continues {
            self.patch(jump, step);
        }
        self.compile_stmt(&for_stmt.step)?;
        self.emit(OpCode::Jump, Operand::Address(test), span);

        self.patch_to_here(to_exit, span)?;
        for jump in exits.breaks {
            self.patch_to_here(jump, span)?;
        }
        self.leave_frame(entry, span)
    }

    /// Compile a loop body, returning its unpatched `break`/`continue` jumps.
    fn compile_loop_body(&mut self, body: &Block) -> Result<LoopContext, CompileError> {
        self.loops.push(LoopContext {
            body_entry: self.stack_index,
            ..LoopContext::default()
        });
        self.compile_block(body)?;
        Ok(self.loops.pop().unwrap_or_default())
    }

    /// Drop the body's locals, then jump to a target patched once the loop
    /// is laid out.
    fn compile_loop_exit(&mut self, exit: LoopExit, span: Span) -> Result<(), CompileError> {
        let Some(body_entry) = self.loops.last().map(|l| l.body_entry) else {
            return Err(CompileError::Unsupported {
                what: "`break` or `continue` in a function body outside of its own loops",
                span,
            });
        };
        self.truncate_to(body_entry, span)?;
        let jump = self.emit(OpCode::Jump, Operand::None, span);
        if let Some(context) = self.loops.last_mut() {
            match exit {
                LoopExit::Break => context.breaks.push(jump),
                LoopExit::Continue => context.continues.push(jump),
            }
        }
        Ok(())
    }
}
