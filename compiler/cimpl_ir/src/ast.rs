//! Syntax tree with analysis annotations.
//!
//! The parser builds the tree with every annotation slot empty (apart from
//! operator and literal result types, which are fixed by syntax). The
//! semantic analyzer fills the remaining slots in place; the bytecode
//! compiler only reads them.

use crate::{FunctionType, Name, Span, Type};

/// Where a variable reference resolves.
///
/// Module-level scope depths are static across the whole run, so references
/// outside any function record the frame depth directly. Inside a function
/// the activation depth depends on the call site, so those references are
/// resolved relative to the active call frame.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BindingLocus {
    Depth(usize),
    FrameRelative,
}

/// What a declaration did to its scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclOutcome {
    /// The name was bound in the current frame.
    Bound,
    /// The current frame already bound the name; nothing was rebound.
    Ignored,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

/// An identifier occurrence, annotated with its resolution.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Ident {
    pub name: Name,
    pub span: Span,
    pub locus: Option<BindingLocus>,
}

impl Ident {
    pub fn new(name: Name, span: Span) -> Self {
        Ident {
            name,
            span,
            locus: None,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum StmtKind {
    Block(Block),
    /// `x := e` or `x: T = e`
    Decl(Decl),
    /// `x = e`, `x += e`, `x++`, ...
    Assign(Assign),
    /// An expression evaluated for its effect, typically a call.
    Expr(Expr),
    /// `println(e)`
    Print(Expr),
    If(If),
    While(While),
    For(Box<For>),
    Fn(FnDecl),
    Break,
    Continue,
    Return(Option<Expr>),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Decl {
    pub target: Ident,
    /// Explicit type from `x: T = e`; `None` for `:=`.
    pub annotation: Option<Type>,
    pub value: Expr,
    pub outcome: Option<DeclOutcome>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Inc,
    Dec,
}

impl AssignOp {
    /// The arithmetic operator a compound form applies, if any.
    pub fn arithmetic(self) -> Option<BinaryOp> {
        match self {
            AssignOp::Set => None,
            AssignOp::Add | AssignOp::Inc => Some(BinaryOp::Add),
            AssignOp::Sub | AssignOp::Dec => Some(BinaryOp::Sub),
            AssignOp::Mul => Some(BinaryOp::Mul),
            AssignOp::Div => Some(BinaryOp::Div),
            AssignOp::Mod => Some(BinaryOp::Mod),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Assign {
    pub target: Ident,
    pub op: AssignOp,
    /// Right-hand side; `None` for `++` and `--`.
    pub value: Option<Expr>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct If {
    pub cond: Expr,
    pub then_branch: Block,
    /// `else if` is represented as an else block holding a single `if`.
    pub else_branch: Option<Block>,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct While {
    pub cond: Expr,
    pub body: Block,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct For {
    /// A declaration or assignment.
    pub init: Stmt,
    pub cond: Expr,
    /// An assignment run after every iteration.
    pub step: Stmt,
    pub body: Block,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Param {
    pub name: Name,
    pub span: Span,
    pub ty: Type,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FnDecl {
    pub name: Ident,
    pub params: Vec<Param>,
    pub ret: Type,
    pub body: Block,
    /// Signature as accepted by the analyzer.
    pub signature: Option<FunctionType>,
}

impl FnDecl {
    /// Signature as written, independent of analysis.
    pub fn declared_type(&self) -> FunctionType {
        FunctionType {
            params: self.params.iter().map(|p| p.ty.clone()).collect(),
            ret: self.ret.clone(),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Resolved type; `None` before analysis or after a reported error.
    pub ty: Option<Type>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span, ty: Option<Type>) -> Self {
        Expr { kind, span, ty }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum ExprKind {
    /// Integer literal; the value lives in the source text at the span.
    Int,
    /// String literal; the quoted text lives in the source at the span.
    Str,
    Bool(bool),
    Ident(Ident),
    Not(Box<Expr>),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Call(Call),
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Call {
    pub callee: Ident,
    pub args: Vec<Expr>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    NotEq,
    And,
    Or,
}

/// What a binary operator demands of its operands.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperandRule {
    BothInt,
    BothBool,
    SameType,
}

impl BinaryOp {
    /// Binding power; higher binds tighter. All operators are left-associative.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 2,
            BinaryOp::And => 3,
            BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::LtEq
            | BinaryOp::GtEq
            | BinaryOp::Eq
            | BinaryOp::NotEq => 4,
            BinaryOp::Add | BinaryOp::Sub => 5,
            BinaryOp::Mul | BinaryOp::Div => 6,
            BinaryOp::Mod => 7,
        }
    }

    pub fn operand_rule(self) -> OperandRule {
        match self {
            BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::Mod
            | BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::LtEq
            | BinaryOp::GtEq => OperandRule::BothInt,
            BinaryOp::And | BinaryOp::Or => OperandRule::BothBool,
            BinaryOp::Eq | BinaryOp::NotEq => OperandRule::SameType,
        }
    }

    /// Result type, fixed by the operator alone.
    pub fn result_type(self) -> Type {
        match self {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
                Type::Int
            }
            _ => Type::Bool,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}
