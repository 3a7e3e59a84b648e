//! Semantic analysis for cimpl.
//!
//! A single walk over the parsed [`Program`] that resolves every name
//! against a stack of lexical frames and checks every expression and
//! statement against the type rules. Results are written back into the
//! tree's annotation slots:
//!
//! - `Expr::ty`: resolved type, or `None` after a reported error
//! - `Ident::locus`: frame depth at module level, frame-relative in functions
//! - `Decl::outcome`: whether the declaration bound a new name
//! - `FnDecl::signature`: the accepted function type
//!
//! Analysis never stops early. Every statement is visited once and every
//! problem found is returned as a [`Diagnostic`]; an unknown (`None`) type
//! never produces a second diagnostic for the same root cause.
//!
//! [`Program`]: cimpl_ir::ast::Program
//! [`Diagnostic`]: cimpl_diagnostic::Diagnostic

mod analyzer;
mod expr;
mod stmt;

pub use analyzer::{analyze, Analysis};
