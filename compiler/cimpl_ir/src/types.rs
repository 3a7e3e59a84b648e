//! Static types.

use std::fmt;

/// A static type.
///
/// Equality is structural: function types compare by arity, parameter types
/// in order, and return type. The "unknown" type is not a variant; passes use
/// `Option<Type>` and compare with [`types_match`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    Int,
    Bool,
    String,
    Void,
    Function(Box<FunctionType>),
}

/// Signature of a function: ordered parameter types and one return type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FunctionType {
    pub params: Vec<Type>,
    pub ret: Type,
}

impl Type {
    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::Function(Box::new(FunctionType { params, ret }))
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            Type::Function(sig) => Some(sig),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => f.write_str("int"),
            Type::Bool => f.write_str("bool"),
            Type::String => f.write_str("string"),
            Type::Void => f.write_str("void"),
            Type::Function(sig) => write!(f, "{sig}"),
        }
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("fn(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")?;
        if !self.ret.is_void() {
            write!(f, ": {}", self.ret)?;
        }
        Ok(())
    }
}

/// Type compatibility with unknown-type absorption.
///
/// An absent type stands for "already reported": it matches anything so a
/// single root cause never produces a cascade of follow-up diagnostics.
pub fn types_match(a: Option<&Type>, b: Option<&Type>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    }
}

#[cfg(test)]
mod tests;
