use super::*;
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    let interner = StringInterner::new();
    lex(source, &interner).iter().map(|t| t.kind).collect()
}

#[test]
fn test_declaration() {
    let interner = StringInterner::new();
    let tokens = lex("total := 0;", &interner);
    let total = interner.intern("total");
    let got: Vec<_> = tokens.iter().map(|t| (t.kind, t.span)).collect();
    assert_eq!(
        got,
        vec![
            (TokenKind::Ident(total), Span::new(0, 5)),
            (TokenKind::ColonEq, Span::new(6, 8)),
            (TokenKind::Int, Span::new(9, 10)),
            (TokenKind::Semicolon, Span::new(10, 11)),
            (TokenKind::Eof, Span::new(11, 11)),
        ]
    );
}

#[test]
fn test_keywords_win_over_identifiers() {
    let interner = StringInterner::new();
    let tokens = lex("fn fnord while", &interner);
    let fnord = interner.intern("fnord");
    let got: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        got,
        vec![
            TokenKind::Fn,
            TokenKind::Ident(fnord),
            TokenKind::While,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_compound_operators_use_longest_match() {
    assert_eq!(
        kinds("+= ++ + -- -= <= < == = != ! && ||"),
        vec![
            TokenKind::PlusEq,
            TokenKind::PlusPlus,
            TokenKind::Plus,
            TokenKind::MinusMinus,
            TokenKind::MinusEq,
            TokenKind::LtEq,
            TokenKind::Lt,
            TokenKind::EqEq,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Bang,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_comments_and_newlines_are_skipped() {
    assert_eq!(
        kinds("# leading comment\nx := 1; # trailing\n"),
        kinds("x := 1;")
    );
}

#[test]
fn test_strings() {
    assert_eq!(
        kinds(r#""hello \"world\"" "open"#),
        vec![TokenKind::Str, TokenKind::UnterminatedStr, TokenKind::Eof]
    );
}

#[test]
fn test_illegal_character() {
    assert_eq!(
        kinds("x := 1 @ 2;")[3],
        TokenKind::Error,
        "`@` is not part of the language"
    );
}

#[test]
fn test_empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}
