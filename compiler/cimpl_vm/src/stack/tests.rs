use super::*;
use proptest::prelude::*;

#[test]
fn test_push_pop_order() {
    let mut stack = GrowableStack::new(2, 4, 2);
    stack.push(1);
    stack.push(2);
    stack.push(3);
    assert_eq!(stack.pop(), Some(3));
    assert_eq!(stack.pop(), Some(2));
    assert_eq!(stack.pop(), Some(1));
    assert_eq!(stack.pop(), None);
}

#[test]
fn test_grows_geometrically() {
    let mut stack = GrowableStack::new(4, 4, 2);
    for i in 0..5 {
        stack.push(i);
    }
    assert!(stack.capacity() >= 8);
}

#[test]
fn test_grows_from_zero_capacity() {
    let mut stack = GrowableStack::new(0, 0, 1);
    stack.push(7);
    assert_eq!(stack.last(), Some(7));
}

#[test]
fn test_shrinks_after_sustained_low_use() {
    let mut stack = GrowableStack::new(4, 4, 3);
    for i in 0..64 {
        stack.push(i);
    }
    let peak = stack.capacity();
    assert!(stack.truncate(1));
    for _ in 0..8 {
        stack.push(0);
        stack.pop();
    }
    assert!(stack.capacity() < peak, "{} >= {peak}", stack.capacity());
    assert!(stack.capacity() >= 4);
}

#[test]
fn test_never_shrinks_below_floor() {
    let mut stack = GrowableStack::new(16, 16, 1);
    stack.push(1);
    for _ in 0..10 {
        stack.pop();
        stack.push(1);
    }
    assert!(stack.capacity() >= 16);
}

#[test]
fn test_truncate_and_set() {
    let mut stack = GrowableStack::new(4, 4, 4);
    for i in 0..4 {
        stack.push(i);
    }
    assert!(stack.set(1, 10));
    assert!(!stack.set(4, 10));
    assert!(!stack.truncate(5));
    assert!(stack.truncate(2));
    assert_eq!(stack.as_slice(), &[0, 10]);
}

proptest! {
    #[test]
    fn behaves_like_vec(ops in proptest::collection::vec(proptest::option::of(any::<i32>()), 0..300)) {
        let mut stack = GrowableStack::new(1, 2, 2);
        let mut model = Vec::new();
        for op in ops {
            match op {
                Some(v) => {
                    stack.push(v);
                    model.push(v);
                }
                None => prop_assert_eq!(stack.pop(), model.pop()),
            }
            prop_assert_eq!(stack.as_slice(), model.as_slice());
            prop_assert!(stack.capacity() >= stack.len());
        }
    }
}
