//! Source-to-output pipeline shared by the commands and the integration tests.

use cimpl_diagnostic::Diagnostic;
use cimpl_ir::ast::Program;
use cimpl_ir::{Span, StringInterner};
use cimpl_vm::{RuntimeError, SharedPrintHandler, Vm};

/// Why [`run_source`] produced no outcome.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("cannot read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{} problem(s) found", .0.len())]
    Diagnostics(Vec<Diagnostic>),

    #[error(transparent)]
    Compile(#[from] cimpl_codegen::CompileError),

    /// `span` is the source range of the failing instruction.
    #[error("runtime error: {error}")]
    Runtime {
        #[source]
        error: RuntimeError,
        span: Span,
    },
}

/// Front-end result: the annotated program, or nothing if parsing failed,
/// plus every problem found.
pub struct Checked {
    pub interner: StringInterner,
    pub program: Option<Program>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Checked {
    pub fn is_clean(&self) -> bool {
        self.program.is_some() && self.diagnostics.is_empty()
    }
}

/// Final values of the module-level variables, rendered the way `println`
/// would print them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub globals: Vec<(String, String)>,
}

impl RunOutcome {
    pub fn global(&self, name: &str) -> Option<&str> {
        self.globals
            .iter()
            .find(|(global, _)| global == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Lex, parse and analyze `source`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn check_source(source: &str) -> Checked {
    let interner = StringInterner::new();
    let tokens = cimpl_lexer::lex(source, &interner);
    match cimpl_parse::parse(&tokens, source) {
        Ok(mut program) => {
            let analysis = cimpl_sema::analyze(&mut program, &interner);
            tracing::debug!(
                diagnostics = analysis.diagnostics.len(),
                frames = analysis.frames_pushed,
                "analyzed"
            );
            Checked {
                interner,
                program: Some(program),
                diagnostics: analysis.diagnostics,
            }
        }
        Err(err) => Checked {
            interner,
            program: None,
            diagnostics: vec![err.to_diagnostic()],
        },
    }
}

/// Check, compile and execute `source`, sending output to `print`.
///
/// Any diagnostic stops the pipeline before compilation.
#[tracing::instrument(level = "debug", skip_all)]
pub fn run_source(source: &str, print: SharedPrintHandler) -> Result<RunOutcome, PipelineError> {
    let Checked {
        interner,
        program,
        diagnostics,
    } = check_source(source);
    let Some(program) = program.filter(|_| diagnostics.is_empty()) else {
        return Err(PipelineError::Diagnostics(diagnostics));
    };

    let chunk = cimpl_codegen::compile(&program, source, &interner)?;
    tracing::debug!(instructions = chunk.len(), "compiled");

    let mut vm = Vm::new(&chunk, print);
    vm.run().map_err(|error| PipelineError::Runtime {
        span: chunk.span(error.at()),
        error,
    })?;

    let globals = chunk
        .globals()
        .iter()
        .filter_map(|&(name, _)| {
            let value = vm.global(name)?;
            Some((interner.lookup(name).to_owned(), chunk.render(value)))
        })
        .collect();
    Ok(RunOutcome { globals })
}
