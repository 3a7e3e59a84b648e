//! Lexer output: tokens and the token list.

use std::fmt;

use crate::{Name, Span};

/// Token kind.
///
/// Literals carry no payload: their value is materialized from the
/// source text through the token's span when it is needed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    // Literals and identifiers
    Int,
    Str,
    Ident(Name),

    // Keywords
    If,
    Else,
    While,
    For,
    Break,
    Continue,
    Fn,
    Return,
    IntType,
    BoolType,
    StringType,
    True,
    False,
    Println,

    // Punctuation
    Comma,
    Semicolon,
    Colon,
    LBrace,
    RBrace,
    LParen,
    RParen,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Eq,
    ColonEq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    PercentEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
    EqEq,
    NotEq,
    Bang,
    AmpAmp,
    PipePipe,

    /// A character sequence the lexer could not classify.
    Error,
    /// An opening `"` with no closing quote on the same line.
    UnterminatedStr,
    Eof,
}

impl TokenKind {
    /// Human-readable description used in parse errors.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Int => "integer literal",
            TokenKind::Str => "string literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::For => "`for`",
            TokenKind::Break => "`break`",
            TokenKind::Continue => "`continue`",
            TokenKind::Fn => "`fn`",
            TokenKind::Return => "`return`",
            TokenKind::IntType => "`int`",
            TokenKind::BoolType => "`bool`",
            TokenKind::StringType => "`string`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Println => "`println`",
            TokenKind::Comma => "`,`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::PlusPlus => "`++`",
            TokenKind::MinusMinus => "`--`",
            TokenKind::Eq => "`=`",
            TokenKind::ColonEq => "`:=`",
            TokenKind::PlusEq => "`+=`",
            TokenKind::MinusEq => "`-=`",
            TokenKind::StarEq => "`*=`",
            TokenKind::SlashEq => "`/=`",
            TokenKind::PercentEq => "`%=`",
            TokenKind::Gt => "`>`",
            TokenKind::Lt => "`<`",
            TokenKind::GtEq => "`>=`",
            TokenKind::LtEq => "`<=`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Bang => "`!`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Error => "illegal character",
            TokenKind::UnterminatedStr => "unterminated string",
            TokenKind::Eof => "end of file",
        }
    }

    /// Whether two kinds are the same variant, ignoring identifier payloads.
    #[inline]
    pub fn same_kind(self, other: TokenKind) -> bool {
        std::mem::discriminant(&self) == std::mem::discriminant(&other)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

/// Lexer output. Always terminated by exactly one [`TokenKind::Eof`].
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
