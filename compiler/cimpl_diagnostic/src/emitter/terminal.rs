//! Terminal emitter with optional ANSI colors and source snippets.

use cimpl_ir::Span;
use std::io::{self, Write};

use crate::span_utils::{LineCol, LineIndex};
use crate::Diagnostic;

use super::DiagnosticEmitter;

mod colors {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const GUTTER: &str = "\x1b[1;34m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when the output is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Parse the value of a `--color=` flag.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    /// `is_tty` only matters for [`ColorMode::Auto`].
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Writes diagnostics as
///
/// ```text
/// TypeError: expected int, found bool
///   --> 2:6
///    |
///  2 | x := 1 + true;
///    |      ^^^^^^^^ right operand is bool
/// ```
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    lines: Option<LineIndex<'src>>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            lines: None,
        }
    }

    /// Attach the source text so positions and snippets can be shown.
    #[must_use]
    pub fn with_source(mut self, source: &'src str) -> Self {
        self.lines = Some(LineIndex::new(source));
        self
    }

    /// Consume the emitter and return its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn paint(&mut self, text: &str, color: &str) {
        if self.colors {
            let _ = write!(self.writer, "{color}{text}{}", colors::RESET);
        } else {
            let _ = write!(self.writer, "{text}");
        }
    }

    fn write_snippet(&mut self, diagnostic: &Diagnostic) {
        let Some(lines) = &self.lines else {
            let _ = writeln!(self.writer, "  --> {:?}", diagnostic.span);
            return;
        };
        let LineCol { line, col } = lines.line_col(diagnostic.span.start);
        let text = lines.line_text(line).to_owned();

        let number = line.to_string();
        let pad = " ".repeat(number.len());
        let underline_len = underline_width(diagnostic.span, text.len(), col);
        let marker = format!(
            "{}{}",
            " ".repeat(col.saturating_sub(1) as usize),
            "^".repeat(underline_len)
        );

        let _ = writeln!(self.writer, "{pad}--> {line}:{col}");
        self.paint(&format!("{pad} |"), colors::GUTTER);
        let _ = writeln!(self.writer);
        self.paint(&format!("{number} |"), colors::GUTTER);
        let _ = writeln!(self.writer, " {text}");
        self.paint(&format!("{pad} |"), colors::GUTTER);
        let _ = write!(self.writer, " ");
        self.paint(&marker, colors::ERROR);
        if let Some(label) = &diagnostic.label {
            let _ = write!(self.writer, " ");
            self.paint(label, colors::ERROR);
        }
        let _ = writeln!(self.writer);
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.paint(diagnostic.kind.as_str(), colors::ERROR);
        if self.colors {
            let _ = writeln!(
                self.writer,
                "{}: {}{}",
                colors::BOLD,
                diagnostic.message,
                colors::RESET
            );
        } else {
            let _ = writeln!(self.writer, ": {}", diagnostic.message);
        }

        self.write_snippet(diagnostic);

        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.paint("note", colors::NOTE);
            let _ = writeln!(self.writer, ": {note}");
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize) {
        match error_count {
            0 => {}
            1 => {
                self.paint("error", colors::ERROR);
                let _ = writeln!(self.writer, ": aborting due to previous error");
            }
            n => {
                self.paint("error", colors::ERROR);
                let _ = writeln!(self.writer, ": aborting due to {n} previous errors");
            }
        }
    }
}

impl TerminalEmitter<'_, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        Self::with_color_mode(io::stderr(), mode, is_tty)
    }
}

/// Width of the caret underline: the span clamped to the rest of its line.
fn underline_width(span: Span, line_len: usize, col: u32) -> usize {
    let start = col.saturating_sub(1) as usize;
    let room = line_len.saturating_sub(start);
    (span.len() as usize).min(room).max(1)
}
