//! Grammar productions, one module per syntactic category.

mod expr;
mod stmt;
mod ty;
