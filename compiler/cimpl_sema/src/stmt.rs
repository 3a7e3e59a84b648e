//! Statement checking and scope management.

use cimpl_diagnostic::ErrorKind;
use cimpl_ir::ast::{Assign, AssignOp, Block, Decl, DeclOutcome, ExprKind, FnDecl, Stmt, StmtKind};
use cimpl_ir::{types_match, Span, Type};
use cimpl_stack::ensure_sufficient_stack;

use crate::analyzer::{describe, Analyzer};

impl Analyzer<'_> {
    pub(crate) fn check_stmt(&mut self, stmt: &mut Stmt) {
        ensure_sufficient_stack(|| {
            let span = stmt.span;
            match &mut stmt.kind {
                StmtKind::Block(block) => self.check_block(block),
                StmtKind::Decl(decl) => self.check_decl(decl),
                StmtKind::Assign(assign) => self.check_assign(assign),
                StmtKind::Expr(expr) => {
                    self.check_expr(expr);
                    if let ExprKind::Call(call) = &expr.kind {
                        if let Some(ty) = expr.ty.as_ref().filter(|ty| !ty.is_void()) {
                            let message = format!(
                                "call statement must not produce a value: `{}` returns {ty}",
                                self.name(call.callee.name)
                            );
                            self.report(ErrorKind::TypeError, message, span);
                        }
                    }
                }
                StmtKind::Print(value) => {
                    self.check_expr(value);
                    if let Some(ty @ (Type::Void | Type::Function(_))) = &value.ty {
                        let message = format!("cannot print a value of type {ty}");
                        self.report(ErrorKind::TypeError, message, value.span);
                    }
                }
                StmtKind::If(if_stmt) => {
                    self.check_condition(&mut if_stmt.cond);
                    self.check_block(&mut if_stmt.then_branch);
                    if let Some(else_branch) = &mut if_stmt.else_branch {
                        self.check_block(else_branch);
                    }
                }
                StmtKind::While(while_stmt) => {
                    self.check_condition(&mut while_stmt.cond);
                    self.check_loop_body(&mut while_stmt.body);
                }
                StmtKind::For(for_stmt) => self.in_frame(|this| {
                    this.check_stmt(&mut for_stmt.init);
                    this.check_condition(&mut for_stmt.cond);
                    this.check_stmt(&mut for_stmt.step);
                    this.check_loop_body(&mut for_stmt.body);
                }),
                StmtKind::Fn(decl) => self.check_fn(decl),
                StmtKind::Break => self.check_jump("break", span),
                StmtKind::Continue => self.check_jump("continue", span),
                StmtKind::Return(value) => self.check_return(value.as_mut(), span),
            }
        });
    }

    fn check_jump(&mut self, keyword: &str, span: Span) {
        if self.loop_depth == 0 {
            let message = format!("{keyword} statement outside of a loop");
            self.report(ErrorKind::SyntaxError, message, span);
        }
    }

    /// A block gets its own frame.
    pub(crate) fn check_block(&mut self, block: &mut Block) {
        self.in_frame(|this| {
            for stmt in &mut block.stmts {
                this.check_stmt(stmt);
            }
        });
    }

    fn check_loop_body(&mut self, body: &mut Block) {
        self.loop_depth += 1;
        self.check_block(body);
        self.loop_depth -= 1;
    }

    fn check_condition(&mut self, cond: &mut cimpl_ir::ast::Expr) {
        self.check_expr(cond);
        if !types_match(cond.ty.as_ref(), Some(&Type::Bool)) {
            let message = format!(
                "condition must be a boolean expression, found {}",
                describe(cond.ty.as_ref())
            );
            self.report(ErrorKind::TypeError, message, cond.span);
        }
    }

    /// `x := e` and `x: T = e`.
    ///
    /// A name already bound in the innermost frame is not rebound: the
    /// declaration is marked ignored and the earlier binding stays.
    fn check_decl(&mut self, decl: &mut Decl) {
        self.check_expr(&mut decl.value);
        let name = self.name(decl.target.name);
        let value_ty = decl.value.ty.clone();

        let is_void = matches!(value_ty, Some(Type::Void));
        if is_void {
            let message = format!("cannot bind a void value to `{name}`");
            self.report(ErrorKind::TypeError, message, decl.value.span);
        }

        let bound = match &decl.annotation {
            Some(annotation) => {
                if !is_void && !types_match(Some(annotation), value_ty.as_ref()) {
                    let message = format!(
                        "invalid type: `{name}` is declared {annotation} but initialized with {}",
                        describe(value_ty.as_ref())
                    );
                    self.report(ErrorKind::TypeError, message, decl.value.span);
                }
                Some(annotation.clone())
            }
            None => value_ty.filter(|ty| !ty.is_void()),
        };

        let depth = self.env.current_index();
        decl.target.locus = Some(self.locus(depth));
        if self.env.is_bound_locally(decl.target.name) {
            tracing::trace!(binding = name, "redeclaration ignored");
            decl.outcome = Some(DeclOutcome::Ignored);
        } else {
            self.env.define(decl.target.name, bound);
            decl.outcome = Some(DeclOutcome::Bound);
        }
    }

    fn check_assign(&mut self, assign: &mut Assign) {
        let target = self.resolve(&mut assign.target);
        if let Some(value) = &mut assign.value {
            self.check_expr(value);
        }
        let name = self.name(assign.target.name);

        let Some(target_ty) = target else {
            let message = format!("undefined variable `{name}`");
            self.report(ErrorKind::ReferenceError, message, assign.target.span);
            return;
        };

        let value_ty = assign.value.as_ref().and_then(|value| value.ty.as_ref());
        let value_span = assign.value.as_ref().map_or(assign.target.span, |v| v.span);

        if assign.op == AssignOp::Set {
            if !types_match(target_ty.as_ref(), value_ty) {
                let message = format!(
                    "invalid type: cannot assign {} to `{name}` of type {}",
                    describe(value_ty),
                    describe(target_ty.as_ref())
                );
                self.report(ErrorKind::TypeError, message, value_span);
            }
            return;
        }

        if !types_match(target_ty.as_ref(), Some(&Type::Int)) {
            let message = format!(
                "invalid operation for given type: `{name}` has type {}, expected int",
                describe(target_ty.as_ref())
            );
            self.report(ErrorKind::TypeError, message, assign.target.span);
        }
        if assign.value.is_some() && !types_match(value_ty, Some(&Type::Int)) {
            let message = format!(
                "invalid operation for given type: expected int, found {}",
                describe(value_ty)
            );
            self.report(ErrorKind::TypeError, message, value_span);
        }
    }

    /// Bind the function in the enclosing frame, then check the body in a
    /// frame holding the parameters.
    fn check_fn(&mut self, decl: &mut FnDecl) {
        let name = self.name(decl.name.name);
        let signature = decl.declared_type();

        let depth = self.env.current_index();
        decl.name.locus = Some(self.locus(depth));
        if self.env.lookup(decl.name.name).is_some() {
            let message = format!("variable redefinition is not allowed: `{name}` is already defined");
            self.report(ErrorKind::ReferenceError, message, decl.name.span);
        } else {
            self.env
                .define(decl.name.name, Some(Type::Function(Box::new(signature.clone()))));
        }
        decl.signature = Some(signature.clone());

        let enclosing = self.current_fn.replace(signature);
        self.in_frame(|this| {
            for param in &decl.params {
                if this.env.is_bound_locally(param.name) {
                    let message = format!(
                        "parameter with the same name already exists: `{}`",
                        this.name(param.name)
                    );
                    this.report(ErrorKind::ReferenceError, message, param.span);
                } else {
                    this.env.define(param.name, Some(param.ty.clone()));
                }
            }
            for stmt in &mut decl.body.stmts {
                this.check_stmt(stmt);
            }
        });
        self.current_fn = enclosing;
    }

    fn check_return(&mut self, value: Option<&mut cimpl_ir::ast::Expr>, span: Span) {
        let expected = self.current_fn.as_ref().map(|sig| sig.ret.clone());
        if let Some(value) = value {
            self.check_expr(value);
            if let Some(expected) = &expected {
                if !types_match(Some(expected), value.ty.as_ref()) {
                    let message = format!(
                        "returning wrong type: expected {expected}, found {}",
                        describe(value.ty.as_ref())
                    );
                    self.report(ErrorKind::TypeError, message, value.span);
                }
            }
        } else if let Some(expected) = expected.as_ref().filter(|ty| !ty.is_void()) {
            let message = format!("missing return value: expected {expected}");
            self.report(ErrorKind::TypeError, message, span);
        }

        if expected.is_none() {
            self.report(
                ErrorKind::SyntaxError,
                "return statement outside of a function body".to_owned(),
                span,
            );
        }
    }
}
