//! The [`Diagnostic`] type and its kind tag.

use cimpl_ir::Span;
use std::fmt;

/// Category of a reported problem.
///
/// The kind is the only machine-readable classification a diagnostic has.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    /// Malformed token stream (produced by the lexer/parser).
    ParseError,
    /// Well-formed syntax in an illegal position, e.g. `break` outside a loop.
    SyntaxError,
    TypeError,
    /// A name that does not resolve, or one that may not be redefined.
    ReferenceError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ParseError => "ParseError",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ReferenceError => "ReferenceError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reported problem: kind, message, and the source span it points at.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
    /// Text shown under the span in the source snippet.
    pub label: Option<String>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Start building a diagnostic of the given kind.
    #[cold]
    pub fn error(kind: ErrorKind) -> Self {
        Diagnostic {
            kind,
            message: String::new(),
            span: Span::DUMMY,
            label: None,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Point at `span` with a short label.
    #[must_use]
    pub fn with_label(mut self, span: Span, label: impl Into<String>) -> Self {
        self.span = span;
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests;
