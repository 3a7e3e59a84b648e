//! Compiler state: the simulated stack, the name table and jump patching.

use cimpl_ir::ast::{BindingLocus, Ident, Program};
use cimpl_ir::bytecode::{CallConvention, Chunk, OpCode, Operand};
use cimpl_ir::{Environment, Name, Span, StringInterner};
use rustc_hash::FxHashMap;

use crate::CompileError;

/// What a name means to the compiler.
///
/// Variables and functions share one table, so a function is just a name
/// whose payload is an address instead of a stack slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Binding {
    /// Stack index recorded right after the variable's value was pushed.
    Slot(u32),
    /// Index of the function's first body instruction.
    FunctionEntry(u32),
}

/// A name resolved to the instruction form that reaches it.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Resolved {
    /// Slot in the active call frame, addressed relative to the stack top.
    Local(u32),
    /// Absolute module-level slot.
    Global(u32),
    Function(u32),
}

/// A function body being compiled.
pub(crate) struct FnContext {
    /// Environment index of the parameter frame.
    pub(crate) floor: usize,
    pub(crate) convention: CallConvention,
}

/// An enclosing loop in the current function body.
#[derive(Default)]
pub(crate) struct LoopContext {
    /// Stack index when the body was entered.
    pub(crate) body_entry: u32,
    pub(crate) breaks: Vec<usize>,
    pub(crate) continues: Vec<usize>,
}

/// Compile an analyzed program.
///
/// `source` must be the text the program was parsed from; literal values
/// are read back out of it.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile(
    program: &Program,
    source: &str,
    interner: &StringInterner,
) -> Result<Chunk, CompileError> {
    let mut compiler = Compiler::new(source, interner);
    for stmt in &program.stmts {
        compiler.compile_stmt(stmt)?;
    }
    let end = Span::from_range(source.len()..source.len());
    compiler.emit(OpCode::Halt, Operand::None, end);
    compiler.export_globals();
    tracing::debug!(instructions = compiler.chunk.len(), "compiled");
    Ok(compiler.chunk)
}

pub(crate) struct Compiler<'a> {
    source: &'a str,
    interner: &'a StringInterner,
    pub(crate) chunk: Chunk,
    pub(crate) env: Environment<Binding>,
    /// Values the VM will hold in the active call frame at this point,
    /// counting a function's arguments.
    pub(crate) stack_index: u32,
    /// Calling convention of each function, by entry address.
    pub(crate) functions: FxHashMap<u32, CallConvention>,
    pub(crate) fn_stack: Vec<FnContext>,
    /// Loops of the current function body only.
    pub(crate) loops: Vec<LoopContext>,
}

impl<'a> Compiler<'a> {
    fn new(source: &'a str, interner: &'a StringInterner) -> Self {
        Compiler {
            source,
            interner,
            chunk: Chunk::new(),
            env: Environment::new(),
            stack_index: 0,
            functions: FxHashMap::default(),
            fn_stack: Vec::new(),
            loops: Vec::new(),
        }
    }

    pub(crate) fn name(&self, name: Name) -> String {
        self.interner.lookup(name).to_owned()
    }

    pub(crate) fn literal_text(&self, span: Span) -> Result<&'a str, CompileError> {
        span.slice(self.source)
            .ok_or_else(|| CompileError::InvalidLiteral {
                text: String::new(),
                span,
            })
    }

    #[inline]
    pub(crate) fn emit(&mut self, op: OpCode, operand: Operand, span: Span) -> usize {
        self.chunk.emit(op, operand, span)
    }

    /// Address of the next instruction to be emitted.
    pub(crate) fn here(&self, span: Span) -> Result<u32, CompileError> {
        u32::try_from(self.chunk.len()).map_err(|_| CompileError::Overflow {
            what: "instruction address",
            span,
        })
    }

    /// Point the jump at `index` to the next instruction.
    pub(crate) fn patch_to_here(&mut self, index: usize, span: Span) -> Result<(), CompileError> {
        let target = self.here(span)?;
        self.patch(index, target);
        Ok(())
    }

    pub(crate) fn patch(&mut self, index: usize, target: u32) {
        tracing::trace!(index, target, "backpatch");
        self.chunk.patch(index, Operand::Address(target));
    }

    /// Record that `count` values were consumed.
    pub(crate) fn release(&mut self, count: u32, span: Span) -> Result<(), CompileError> {
        self.stack_index = self
            .stack_index
            .checked_sub(count)
            .ok_or(CompileError::StackImbalance { span })?;
        Ok(())
    }

    /// Stack values below the active frame's base.
    fn frame_origin(&self) -> u32 {
        self.fn_stack.last().map_or(0, |f| f.convention.params)
    }

    /// Emit a `Truncate` back to stack index `size`.
    pub(crate) fn truncate_to(&mut self, size: u32, span: Span) -> Result<(), CompileError> {
        let relative = size
            .checked_sub(self.frame_origin())
            .ok_or(CompileError::StackImbalance { span })?;
        self.emit(OpCode::Truncate, Operand::Size(relative), span);
        Ok(())
    }

    /// Open a lexical frame, returning the stack index at entry.
    pub(crate) fn enter_frame(&mut self) -> u32 {
        self.env.push_frame();
        self.stack_index
    }

    /// Close a lexical frame, discarding everything pushed since `entry`.
    pub(crate) fn leave_frame(&mut self, entry: u32, span: Span) -> Result<(), CompileError> {
        self.env.pop_frame();
        self.truncate_to(entry, span)?;
        self.stack_index = entry;
        Ok(())
    }

    /// Check a binding site's analysis against the compiler's frame stack.
    pub(crate) fn check_locus(&self, ident: &Ident, depth: usize) -> Result<(), CompileError> {
        let locus = ident.locus.ok_or(CompileError::Unannotated { span: ident.span })?;
        let agrees = match locus {
            BindingLocus::Depth(expected) => self.fn_stack.is_empty() && expected == depth,
            BindingLocus::FrameRelative => !self.fn_stack.is_empty(),
        };
        if agrees {
            Ok(())
        } else {
            Err(self.drift(ident))
        }
    }

    #[cold]
    pub(crate) fn drift(&self, ident: &Ident) -> CompileError {
        CompileError::ScopeDrift {
            name: self.name(ident.name),
            span: ident.span,
        }
    }

    /// Resolve a reference.
    ///
    /// Inside a function body, a module-level variable is reached by its
    /// absolute slot; a local of an enclosing function cannot be reached.
    pub(crate) fn resolve(&self, ident: &Ident) -> Result<Resolved, CompileError> {
        let Some((&binding, depth)) = self.env.lookup(ident.name) else {
            return Err(CompileError::Unbound {
                name: self.name(ident.name),
                span: ident.span,
            });
        };
        self.check_locus(ident, depth)?;

        let slot = match binding {
            Binding::FunctionEntry(address) => return Ok(Resolved::Function(address)),
            Binding::Slot(slot) => slot,
        };
        match (self.fn_stack.first(), self.fn_stack.last()) {
            (Some(outermost), Some(innermost)) if depth < innermost.floor => {
                if depth >= outermost.floor {
                    return Err(CompileError::Unsupported {
                        what: "using a local of an enclosing function",
                        span: ident.span,
                    });
                }
                slot.checked_sub(1)
                    .map(Resolved::Global)
                    .ok_or_else(|| self.drift(ident))
            }
            _ => Ok(Resolved::Local(slot)),
        }
    }

    /// Push the value bound to `ident`.
    pub(crate) fn load(&mut self, ident: &Ident) -> Result<(), CompileError> {
        match self.resolve(ident)? {
            Resolved::Local(slot) => {
                let offset = self
                    .stack_index
                    .checked_sub(slot)
                    .ok_or_else(|| self.drift(ident))?;
                self.emit(OpCode::Load, Operand::Offset(offset), ident.span);
            }
            Resolved::Global(slot) => {
                self.emit(OpCode::LoadGlobal, Operand::Slot(slot), ident.span);
            }
            Resolved::Function(_) => {
                return Err(CompileError::Unsupported {
                    what: "using a function as a value",
                    span: ident.span,
                })
            }
        }
        self.stack_index += 1;
        Ok(())
    }

    /// Pop the top of the stack into the variable bound to `ident`.
    pub(crate) fn store(&mut self, ident: &Ident) -> Result<(), CompileError> {
        match self.resolve(ident)? {
            Resolved::Local(slot) => {
                let offset = self
                    .stack_index
                    .checked_sub(slot)
                    .filter(|&offset| offset > 0)
                    .ok_or_else(|| self.drift(ident))?;
                self.emit(OpCode::Store, Operand::Offset(offset), ident.span);
            }
            Resolved::Global(slot) => {
                self.emit(OpCode::StoreGlobal, Operand::Slot(slot), ident.span);
            }
            Resolved::Function(_) => {
                return Err(CompileError::Unsupported {
                    what: "assigning to a function",
                    span: ident.span,
                })
            }
        }
        self.release(1, ident.span)
    }

    /// Export the outermost frame's variables as `(name, absolute slot)`.
    fn export_globals(&mut self) {
        let mut globals: Vec<(Name, u32)> = self
            .env
            .frame_bindings(0)
            .filter_map(|(name, binding)| match *binding {
                Binding::Slot(slot) => slot.checked_sub(1).map(|slot| (name, slot)),
                Binding::FunctionEntry(_) => None,
            })
            .collect();
        globals.sort_by_key(|&(_, slot)| slot);
        for (name, slot) in globals {
            self.chunk.export_global(name, slot);
        }
    }
}
