//! cimpl IR - shared data structures for the cimpl toolchain.
//!
//! Every pass of the pipeline speaks in terms of the types defined here:
//! - [`Span`] for byte ranges into the source text
//! - [`Name`] and [`StringInterner`] for identifiers
//! - [`Token`] / [`TokenList`] for lexer output
//! - [`ast`] for the (annotated) syntax tree
//! - [`Type`] for the static type system
//! - [`Environment`] for scoped name tables
//! - [`bytecode`] for the compiled program the VM executes
//!
//! ```text
//! source ──► TokenList ──► ast::Program ──► (annotated) ast::Program ──► Chunk
//! ```

pub mod ast;
pub mod bytecode;
mod environment;
mod interner;
pub mod literal;
mod name;
mod span;
mod token;
mod types;

pub use environment::Environment;
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use span::Span;
pub use token::{Token, TokenKind, TokenList};
pub use types::{types_match, FunctionType, Type};
