//! Byte offset to line/column conversion.

use cimpl_ir::Span;

/// Line start table for one source text.
pub struct LineIndex<'src> {
    source: &'src str,
    line_starts: Vec<u32>,
}

/// 1-based line and column of a byte offset.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

impl<'src> LineIndex<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(u32::try_from(offset + 1).unwrap_or(u32::MAX));
            }
        }
        LineIndex {
            source,
            line_starts,
        }
    }

    /// Line and column of `offset`. Columns count chars, not bytes.
    pub fn line_col(&self, offset: u32) -> LineCol {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line_index).copied().unwrap_or(0);
        let prefix = self
            .source
            .get(line_start as usize..offset as usize)
            .unwrap_or("");
        LineCol {
            line: u32::try_from(line_index + 1).unwrap_or(u32::MAX),
            col: u32::try_from(prefix.chars().count() + 1).unwrap_or(u32::MAX),
        }
    }

    /// Text of a 1-based line, without its newline.
    pub fn line_text(&self, line: u32) -> &'src str {
        let index = line.saturating_sub(1) as usize;
        let Some(&start) = self.line_starts.get(index) else {
            return "";
        };
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.source.len(), |next| (*next as usize).saturating_sub(1));
        self.source
            .get(start as usize..end)
            .unwrap_or("")
            .trim_end_matches('\r')
    }

    /// `line:col` of the start of a span.
    pub fn position(&self, span: Span) -> String {
        let LineCol { line, col } = self.line_col(span.start);
        format!("{line}:{col}")
    }
}
