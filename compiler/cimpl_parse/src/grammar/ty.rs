//! Type annotations: `int`, `bool`, `string`, `fn(T, ...): R`.

use cimpl_ir::{TokenKind, Type};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> Result<Type, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::IntType => {
                self.cursor.advance();
                Ok(Type::Int)
            }
            TokenKind::BoolType => {
                self.cursor.advance();
                Ok(Type::Bool)
            }
            TokenKind::StringType => {
                self.cursor.advance();
                Ok(Type::String)
            }
            TokenKind::Fn => {
                self.cursor.advance();
                self.cursor.expect(TokenKind::LParen)?;
                let mut params = Vec::new();
                if !self.cursor.check(TokenKind::RParen) {
                    loop {
                        params.push(self.parse_type()?);
                        if !self.cursor.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.cursor.expect(TokenKind::RParen)?;
                let ret = self.parse_return_type()?;
                Ok(Type::function(params, ret))
            }
            _ => Err(self.cursor.unexpected("type")),
        }
    }

    /// `: T` after a parameter list; absent means `void`.
    pub(crate) fn parse_return_type(&mut self) -> Result<Type, ParseError> {
        if self.cursor.eat(TokenKind::Colon) {
            self.parse_type()
        } else {
            Ok(Type::Void)
        }
    }
}
