//! Expressions: precedence climbing over binary operators.

use cimpl_ir::ast::{BinaryOp, Call, Expr, ExprKind, Ident};
use cimpl_ir::{literal, Name, Span, TokenKind, Type};
use cimpl_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::LtEq => BinaryOp::LtEq,
        TokenKind::GtEq => BinaryOp::GtEq,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::NotEq => BinaryOp::NotEq,
        TokenKind::AmpAmp => BinaryOp::And,
        TokenKind::PipePipe => BinaryOp::Or,
        _ => return None,
    })
}

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(0)
    }

    /// Parse operators binding at least as tightly as `min_prec`.
    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let mut left = self.parse_prefix()?;
            while let Some(op) = binary_op(self.cursor.current_kind()) {
                let prec = op.precedence();
                if prec < min_prec {
                    break;
                }
                self.cursor.advance();
                let right = self.parse_binary(prec + 1)?;
                let span = left.span.merge(right.span);
                left = Expr::new(
                    ExprKind::Binary {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                    span,
                    Some(op.result_type()),
                );
            }
            Ok(left)
        })
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| {
            let token = self.cursor.current();
            match token.kind {
                TokenKind::Int => {
                    self.cursor.advance();
                    let text = token.span.slice(self.source).unwrap_or_default();
                    if literal::parse_int(text).is_none() {
                        return Err(ParseError::new(
                            format!("integer literal `{text}` is out of range"),
                            token.span,
                        ));
                    }
                    Ok(Expr::new(ExprKind::Int, token.span, Some(Type::Int)))
                }
                TokenKind::Str => {
                    self.cursor.advance();
                    let text = token.span.slice(self.source).unwrap_or_default();
                    if literal::unescape_string(text).is_none() {
                        return Err(ParseError::new(
                            "invalid escape sequence in string literal",
                            token.span,
                        ));
                    }
                    Ok(Expr::new(ExprKind::Str, token.span, Some(Type::String)))
                }
                TokenKind::True | TokenKind::False => {
                    self.cursor.advance();
                    let value = token.kind == TokenKind::True;
                    Ok(Expr::new(ExprKind::Bool(value), token.span, Some(Type::Bool)))
                }
                TokenKind::Bang => {
                    self.cursor.advance();
                    let operand = self.parse_prefix()?;
                    let span = token.span.merge(operand.span);
                    Ok(Expr::new(
                        ExprKind::Not(Box::new(operand)),
                        span,
                        Some(Type::Bool),
                    ))
                }
                TokenKind::Ident(name) => {
                    self.cursor.advance();
                    if self.cursor.check(TokenKind::LParen) {
                        self.parse_call(name, token.span)
                    } else {
                        Ok(Expr::new(
                            ExprKind::Ident(Ident::new(name, token.span)),
                            token.span,
                            None,
                        ))
                    }
                }
                TokenKind::LParen => {
                    self.cursor.advance();
                    let inner = self.parse_expr()?;
                    self.cursor.expect(TokenKind::RParen)?;
                    Ok(inner)
                }
                _ => Err(self.cursor.unexpected("expression")),
            }
        })
    }

    /// `name(args)` with the cursor on `(`.
    pub(crate) fn parse_call(&mut self, name: Name, name_span: Span) -> Result<Expr, ParseError> {
        self.cursor.expect(TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.cursor.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.cursor.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let close = self.cursor.expect(TokenKind::RParen)?;
        Ok(Expr::new(
            ExprKind::Call(Call {
                callee: Ident::new(name, name_span),
                args,
            }),
            name_span.merge(close),
            None,
        ))
    }
}
