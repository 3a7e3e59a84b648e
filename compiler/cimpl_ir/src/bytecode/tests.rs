use super::*;
use crate::Type;
use pretty_assertions::assert_eq;

#[test]
fn test_emit_returns_positions() {
    let mut chunk = Chunk::new();
    let first = chunk.emit(OpCode::Push, Operand::Const(Value::Int(1)), Span::new(0, 1));
    let second = chunk.emit(OpCode::Halt, Operand::None, Span::DUMMY);
    assert_eq!((first, second), (0, 1));
    assert_eq!(chunk.len(), 2);
    assert_eq!(chunk.span(0), Span::new(0, 1));
}

#[test]
fn test_patch_backfills_jump_target() {
    let mut chunk = Chunk::new();
    let jump = chunk.emit(OpCode::Jump, Operand::Address(0), Span::DUMMY);
    chunk.emit(OpCode::Halt, Operand::None, Span::DUMMY);
    assert!(chunk.patch(jump, Operand::Address(2)));
    assert_eq!(
        chunk.instruction(jump),
        Some((OpCode::Jump, Operand::Address(2)))
    );
    assert!(!chunk.patch(10, Operand::Address(0)));
}

#[test]
fn test_string_pool_dedups() {
    let mut chunk = Chunk::new();
    let a = chunk.intern_str("hi");
    let b = chunk.intern_str("hi");
    let c = chunk.intern_str("bye");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.and_then(|id| chunk.string(id)), Some("hi"));
}

#[test]
fn test_render_values() {
    let mut chunk = Chunk::new();
    let id = chunk.intern_str("text");
    assert_eq!(chunk.render(Value::Int(-3)), "-3");
    assert_eq!(chunk.render(Value::Bool(true)), "true");
    if let Some(id) = id {
        assert_eq!(chunk.render(Value::Str(id)), "text");
    }
}

#[test]
fn test_call_convention_from_signature() {
    let add = FunctionType {
        params: vec![Type::Int, Type::Int],
        ret: Type::Int,
    };
    let log = FunctionType {
        params: vec![Type::String],
        ret: Type::Void,
    };

    let add_cc = CallConvention::of(&add);
    assert_eq!(
        add_cc.map(CallConvention::exit),
        Some((OpCode::Return, Operand::Shift(2)))
    );
    let log_cc = CallConvention::of(&log);
    assert_eq!(
        log_cc.map(CallConvention::exit),
        Some((OpCode::Resume, Operand::Shift(1)))
    );
}

#[test]
fn test_operand_display() {
    assert_eq!(Operand::Offset(2).to_string(), "-2");
    assert_eq!(Operand::Address(7).to_string(), "@7");
    assert_eq!(Operand::None.to_string(), "");
}
