//! Lexer for cimpl using logos with string interning.
//!
//! Produces a [`TokenList`] terminated by a single `Eof` token. Lexing never
//! fails: unrecognized input becomes `TokenKind::Error` (or
//! `TokenKind::UnterminatedStr`) and the parser reports it.

mod raw_token;

use cimpl_ir::{Span, StringInterner, Token, TokenKind, TokenList};
use logos::Logos;
use raw_token::RawToken;

/// Lex source code into a [`TokenList`].
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str, interner: &StringInterner) -> TokenList {
    let mut tokens = TokenList::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let kind = match result {
            Ok(raw) => convert(raw, lexer.slice(), interner),
            Err(()) => TokenKind::Error,
        };
        tokens.push(Token::new(kind, span));
    }

    let eof = Span::from_range(source.len()..source.len());
    tokens.push(Token::new(TokenKind::Eof, eof));
    tracing::debug!(count = tokens.len(), "lexed");
    tokens
}

fn convert(raw: RawToken, slice: &str, interner: &StringInterner) -> TokenKind {
    match raw {
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Fn => TokenKind::Fn,
        RawToken::Return => TokenKind::Return,
        RawToken::IntType => TokenKind::IntType,
        RawToken::BoolType => TokenKind::BoolType,
        RawToken::StringType => TokenKind::StringType,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Println => TokenKind::Println,

        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
        RawToken::Int => TokenKind::Int,
        RawToken::Str => TokenKind::Str,
        RawToken::UnterminatedStr => TokenKind::UnterminatedStr,

        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::PlusPlus => TokenKind::PlusPlus,
        RawToken::MinusMinus => TokenKind::MinusMinus,
        RawToken::Eq => TokenKind::Eq,
        RawToken::ColonEq => TokenKind::ColonEq,
        RawToken::PlusEq => TokenKind::PlusEq,
        RawToken::MinusEq => TokenKind::MinusEq,
        RawToken::StarEq => TokenKind::StarEq,
        RawToken::SlashEq => TokenKind::SlashEq,
        RawToken::PercentEq => TokenKind::PercentEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::Lt => TokenKind::Lt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
    }
}

#[cfg(test)]
mod tests;
