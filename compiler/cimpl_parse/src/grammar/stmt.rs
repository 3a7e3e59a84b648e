//! Statements and blocks.

use cimpl_ir::ast::{
    Assign, AssignOp, Block, Decl, FnDecl, For, Ident, If, Param, Stmt, StmtKind, While,
};
use cimpl_ir::{Name, TokenKind};
use cimpl_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    Some(match kind {
        TokenKind::Eq => AssignOp::Set,
        TokenKind::PlusEq => AssignOp::Add,
        TokenKind::MinusEq => AssignOp::Sub,
        TokenKind::StarEq => AssignOp::Mul,
        TokenKind::SlashEq => AssignOp::Div,
        TokenKind::PercentEq => AssignOp::Mod,
        TokenKind::PlusPlus => AssignOp::Inc,
        TokenKind::MinusMinus => AssignOp::Dec,
        _ => return None,
    })
}

impl Parser<'_> {
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| {
            let start = self.cursor.current_span();
            match self.cursor.current_kind() {
                TokenKind::LBrace => {
                    let block = self.parse_block()?;
                    let span = block.span;
                    Ok(Stmt {
                        kind: StmtKind::Block(block),
                        span,
                    })
                }
                TokenKind::If => self.parse_if(),
                TokenKind::While => self.parse_while(),
                TokenKind::For => self.parse_for(),
                TokenKind::Fn => self.parse_fn(),
                TokenKind::Break => self.parse_jump(StmtKind::Break),
                TokenKind::Continue => self.parse_jump(StmtKind::Continue),
                TokenKind::Return => {
                    self.cursor.advance();
                    let value = if self.cursor.check(TokenKind::Semicolon) {
                        None
                    } else {
                        Some(self.parse_expr()?)
                    };
                    let end = self.cursor.expect(TokenKind::Semicolon)?;
                    Ok(Stmt {
                        kind: StmtKind::Return(value),
                        span: start.merge(end),
                    })
                }
                TokenKind::Println => {
                    self.cursor.advance();
                    self.cursor.expect(TokenKind::LParen)?;
                    let value = self.parse_expr()?;
                    self.cursor.expect(TokenKind::RParen)?;
                    let end = self.cursor.expect(TokenKind::Semicolon)?;
                    Ok(Stmt {
                        kind: StmtKind::Print(value),
                        span: start.merge(end),
                    })
                }
                TokenKind::Ident(name)
                    if matches!(
                        self.cursor.peek_next_kind(),
                        TokenKind::ColonEq | TokenKind::Colon
                    ) || assign_op(self.cursor.peek_next_kind()).is_some() =>
                {
                    let mut stmt = self.parse_simple(name)?;
                    let end = self.cursor.expect(TokenKind::Semicolon)?;
                    stmt.span = stmt.span.merge(end);
                    Ok(stmt)
                }
                _ => {
                    let expr = self.parse_expr()?;
                    let end = self.cursor.expect(TokenKind::Semicolon)?;
                    Ok(Stmt {
                        span: expr.span.merge(end),
                        kind: StmtKind::Expr(expr),
                    })
                }
            }
        })
    }

    /// `{ stmt* }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.cursor.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.cursor.check(TokenKind::RBrace) {
            if self.cursor.is_at_end() {
                return Err(ParseError::new("unclosed block: expected `}`", open));
            }
            stmts.push(self.parse_stmt()?);
        }
        let close = self.cursor.expect(TokenKind::RBrace)?;
        Ok(Block {
            stmts,
            span: open.merge(close),
        })
    }

    fn parse_jump(&mut self, kind: StmtKind) -> Result<Stmt, ParseError> {
        let start = self.cursor.advance().span;
        let end = self.cursor.expect(TokenKind::Semicolon)?;
        Ok(Stmt {
            kind,
            span: start.merge(end),
        })
    }

    /// Declaration or assignment without the trailing `;`, cursor on the
    /// identifier. Shared by statement position and `for` headers.
    fn parse_simple(&mut self, name: Name) -> Result<Stmt, ParseError> {
        let target_span = self.cursor.advance().span;
        let target = Ident::new(name, target_span);

        match self.cursor.current_kind() {
            TokenKind::ColonEq => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                let span = target_span.merge(value.span);
                Ok(Stmt {
                    kind: StmtKind::Decl(Decl {
                        target,
                        annotation: None,
                        value,
                        outcome: None,
                    }),
                    span,
                })
            }
            TokenKind::Colon => {
                self.cursor.advance();
                let annotation = self.parse_type()?;
                self.cursor.expect(TokenKind::Eq)?;
                let value = self.parse_expr()?;
                let span = target_span.merge(value.span);
                Ok(Stmt {
                    kind: StmtKind::Decl(Decl {
                        target,
                        annotation: Some(annotation),
                        value,
                        outcome: None,
                    }),
                    span,
                })
            }
            kind => {
                let Some(op) = assign_op(kind) else {
                    return Err(self.cursor.unexpected("`:=`, `:` or an assignment operator"));
                };
                let op_span = self.cursor.advance().span;
                let (value, span) = if matches!(op, AssignOp::Inc | AssignOp::Dec) {
                    (None, target_span.merge(op_span))
                } else {
                    let value = self.parse_expr()?;
                    let span = target_span.merge(value.span);
                    (Some(value), span)
                };
                Ok(Stmt {
                    kind: StmtKind::Assign(Assign { target, op, value }),
                    span,
                })
            }
        }
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(TokenKind::If)?;
        let cond = self.parse_expr()?;
        let then_branch = self.parse_block()?;
        let mut end = then_branch.span;

        let else_branch = if self.cursor.eat(TokenKind::Else) {
            let block = if self.cursor.check(TokenKind::If) {
                let nested = self.parse_stmt()?;
                let span = nested.span;
                Block {
                    stmts: vec![nested],
                    span,
                }
            } else {
                self.parse_block()?
            };
            end = block.span;
            Some(block)
        } else {
            None
        };

        Ok(Stmt {
            kind: StmtKind::If(If {
                cond,
                then_branch,
                else_branch,
            }),
            span: start.merge(end),
        })
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(TokenKind::While)?;
        let cond = self.parse_expr()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(Stmt {
            kind: StmtKind::While(While { cond, body }),
            span,
        })
    }

    /// `for init; cond; step { body }`
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(TokenKind::For)?;
        let init = self.parse_for_clause()?;
        self.cursor.expect(TokenKind::Semicolon)?;
        let cond = self.parse_expr()?;
        self.cursor.expect(TokenKind::Semicolon)?;
        let step = self.parse_for_clause()?;
        if matches!(step.kind, StmtKind::Decl(_)) {
            return Err(ParseError::new(
                "the step of a `for` loop must be an assignment",
                step.span,
            ));
        }
        let body = self.parse_block()?;
        let span = start.merge(body.span);
        Ok(Stmt {
            kind: StmtKind::For(Box::new(For {
                init,
                cond,
                step,
                body,
            })),
            span,
        })
    }

    fn parse_for_clause(&mut self) -> Result<Stmt, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Ident(name) => self.parse_simple(name),
            _ => Err(self.cursor.unexpected("a declaration or assignment")),
        }
    }

    /// `fn name(p: T, ...) [: R] { body }`
    fn parse_fn(&mut self) -> Result<Stmt, ParseError> {
        let start = self.cursor.expect(TokenKind::Fn)?;
        let (name, name_span) = self.cursor.expect_ident()?;
        self.cursor.expect(TokenKind::LParen)?;

        let mut params = Vec::new();
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                let (param, span) = self.cursor.expect_ident()?;
                self.cursor.expect(TokenKind::Colon)?;
                let ty = self.parse_type()?;
                params.push(Param {
                    name: param,
                    span,
                    ty,
                });
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.cursor.expect(TokenKind::RParen)?;
        let ret = self.parse_return_type()?;
        let body = self.parse_block()?;
        let span = start.merge(body.span);

        Ok(Stmt {
            kind: StmtKind::Fn(FnDecl {
                name: Ident::new(name, name_span),
                params,
                ret,
                body,
                signature: None,
            }),
            span,
        })
    }
}
