//! Token cursor for navigating the token stream.

use super::ParseError;
use cimpl_ir::{Name, Span, Token, TokenKind, TokenList};

/// Position in a token stream.
///
/// The stream always ends in `Eof` and the cursor never moves past it, so
/// `current()` is total.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    eof: Token,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        let slice = tokens.as_slice();
        let eof = slice
            .last()
            .copied()
            .unwrap_or(Token::new(TokenKind::Eof, Span::DUMMY));
        Cursor {
            tokens: slice,
            eof,
            pos: 0,
        }
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens.get(self.pos).copied().unwrap_or(self.eof)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// One-token lookahead.
    pub fn peek_next_kind(&self) -> TokenKind {
        self.tokens
            .get(self.pos + 1)
            .map_or(TokenKind::Eof, |t| t.kind)
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Whether the current token has the same kind as `kind`
    /// (identifier payloads are ignored).
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    /// Consume and return the current token. `Eof` is never consumed.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it has `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with "expected ..., found ...".
    pub fn expect(&mut self, kind: TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.unexpected(kind.describe()))
        }
    }

    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Error for the current token when `expected` was required.
    #[cold]
    pub fn unexpected(&self, expected: &str) -> ParseError {
        let found = self.current();
        let message = match found.kind {
            TokenKind::Error => "illegal character".to_owned(),
            TokenKind::UnterminatedStr => "unterminated string literal".to_owned(),
            other => format!("expected {expected}, found {}", other.describe()),
        };
        ParseError::new(message, found.span)
    }
}
