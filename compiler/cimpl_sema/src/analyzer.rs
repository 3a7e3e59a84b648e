//! Analyzer state and scope bookkeeping.

use cimpl_diagnostic::{Diagnostic, ErrorKind};
use cimpl_ir::ast::{BindingLocus, Ident, Program};
use cimpl_ir::{Environment, FunctionType, Name, Span, StringInterner, Type};

/// Outcome of analyzing a program.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub diagnostics: Vec<Diagnostic>,
    /// Frames pushed and popped during the walk. Always equal.
    pub frames_pushed: usize,
    pub frames_popped: usize,
}

impl Analysis {
    /// No diagnostics: the annotated tree may be compiled.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Analyze `program` in place.
#[tracing::instrument(level = "debug", skip_all)]
pub fn analyze(program: &mut Program, interner: &StringInterner) -> Analysis {
    let mut analyzer = Analyzer::new(interner);
    for stmt in &mut program.stmts {
        analyzer.check_stmt(stmt);
    }
    let (frames_pushed, frames_popped) = analyzer.env.frame_activity();
    tracing::debug!(
        diagnostics = analyzer.diagnostics.len(),
        frames_pushed,
        "analysis finished"
    );
    Analysis {
        diagnostics: analyzer.diagnostics,
        frames_pushed,
        frames_popped,
    }
}

pub(crate) struct Analyzer<'a> {
    interner: &'a StringInterner,
    /// Name to type; `None` marks a binding whose type failed to resolve.
    pub(crate) env: Environment<Option<Type>>,
    diagnostics: Vec<Diagnostic>,
    /// Signature of the innermost function body being analyzed.
    pub(crate) current_fn: Option<FunctionType>,
    /// Enclosing loop bodies. Not reset when a function body is entered.
    pub(crate) loop_depth: u32,
}

impl<'a> Analyzer<'a> {
    pub(crate) fn new(interner: &'a StringInterner) -> Self {
        Analyzer {
            interner,
            env: Environment::new(),
            diagnostics: Vec::new(),
            current_fn: None,
            loop_depth: 0,
        }
    }

    pub(crate) fn name(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    #[cold]
    pub(crate) fn report(&mut self, kind: ErrorKind, message: String, span: Span) {
        tracing::trace!(%kind, %message, "diagnostic");
        self.diagnostics
            .push(Diagnostic::error(kind).with_message(message).with_span(span));
    }

    /// How a binding found in frame `depth` is addressed from here.
    pub(crate) fn locus(&self, depth: usize) -> BindingLocus {
        if self.current_fn.is_some() {
            BindingLocus::FrameRelative
        } else {
            BindingLocus::Depth(depth)
        }
    }

    /// Resolve `ident`, recording its locus.
    ///
    /// The outer `Option` is "is the name bound at all", the inner one is
    /// the binding's (possibly unknown) type.
    pub(crate) fn resolve(&mut self, ident: &mut Ident) -> Option<Option<Type>> {
        let (ty, depth) = self.env.lookup(ident.name)?;
        let ty = ty.clone();
        ident.locus = Some(self.locus(depth));
        Some(ty)
    }

    /// Run `f` inside a fresh lexical frame.
    pub(crate) fn in_frame<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.env.push_frame();
        let result = f(self);
        self.env.pop_frame();
        result
    }
}

/// `found` rendered for messages; unknown types print as `unknown`.
pub(crate) fn describe(ty: Option<&Type>) -> String {
    ty.map_or_else(|| "unknown".to_owned(), ToString::to_string)
}
