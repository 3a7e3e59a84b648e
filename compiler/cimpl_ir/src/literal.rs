//! Literal materialization from source text.
//!
//! Tokens and AST literals only record spans. The parser validates literal
//! text with these helpers and the bytecode compiler uses the same helpers
//! to produce constant operands, so both agree on what a literal means.

/// Parse a decimal integer literal.
///
/// Returns `None` for non-digit input or values outside `i64`.
pub fn parse_int(text: &str) -> Option<i64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Decode a quoted string literal, including its surrounding quotes.
///
/// Supported escapes: `\n`, `\t`, `\\`, `\"`. Returns `None` for anything
/// else, including a missing closing quote.
pub fn unescape_string(quoted: &str) -> Option<String> {
    let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            _ => return None,
        }
    }
    Some(out)
}
