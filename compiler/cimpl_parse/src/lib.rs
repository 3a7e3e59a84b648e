//! Recursive descent parser for cimpl.
//!
//! Statements are parsed by recursive descent, expressions by precedence
//! climbing over [`BinaryOp::precedence`]. Parsing stops at the first
//! error: the result is either a complete [`Program`] or one [`ParseError`].
//!
//! Annotation slots in the produced tree are empty, except that literal and
//! operator expressions already carry their result type.
//!
//! [`BinaryOp::precedence`]: cimpl_ir::ast::BinaryOp::precedence

mod cursor;
mod grammar;

use cimpl_diagnostic::{Diagnostic, ErrorKind};
use cimpl_ir::ast::Program;
use cimpl_ir::{Span, TokenList};
use cursor::Cursor;

/// A parse failure.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    #[cold]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(ErrorKind::ParseError)
            .with_message(&self.message)
            .with_span(self.span)
    }
}

/// Parser state: the token cursor plus the source text, which is needed to
/// validate literal tokens.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            source,
        }
    }

    /// Parse statements until end of input.
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let mut stmts = Vec::new();
        while !self.cursor.is_at_end() {
            stmts.push(self.parse_stmt()?);
        }
        Ok(Program { stmts })
    }
}

/// Parse a token list into a [`Program`].
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse(tokens: &TokenList, source: &str) -> Result<Program, ParseError> {
    let result = Parser::new(tokens, source).parse_program();
    if let Err(err) = &result {
        tracing::debug!(message = %err.message, "parse failed");
    }
    result
}
