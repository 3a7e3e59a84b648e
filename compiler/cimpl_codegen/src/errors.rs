//! Fatal code generation errors.

use cimpl_ir::Span;

/// The first construct the compiler could not lower. Compilation stops there.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CompileError {
    #[error("{what} is not supported")]
    Unsupported { what: &'static str, span: Span },

    #[error("`{name}` has no binding at this point")]
    Unbound { name: String, span: Span },

    /// Analyzer and compiler resolved a name or declaration differently.
    #[error("internal error: scope of `{name}` disagrees with analysis")]
    ScopeDrift { name: String, span: Span },

    #[error("internal error: simulated stack dropped below the frame base")]
    StackImbalance { span: Span },

    #[error("internal error: program was not analyzed")]
    Unannotated { span: Span },

    #[error("malformed literal `{text}`")]
    InvalidLiteral { text: String, span: Span },

    #[error("{what} does not fit in an instruction operand")]
    Overflow { what: &'static str, span: Span },
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            CompileError::Unsupported { span, .. }
            | CompileError::Unbound { span, .. }
            | CompileError::ScopeDrift { span, .. }
            | CompileError::StackImbalance { span }
            | CompileError::Unannotated { span }
            | CompileError::InvalidLiteral { span, .. }
            | CompileError::Overflow { span, .. } => *span,
        }
    }
}
