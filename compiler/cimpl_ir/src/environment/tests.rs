use super::*;
use crate::StringInterner;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_define_lookup() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Environment::new();
    assert_eq!(env.define(x, 42), None);
    assert_eq!(env.lookup(x), Some((&42, 0)));
}

#[test]
fn test_shadowing_reports_inner_depth() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.define(x, 1);
    env.push_frame();
    env.define(x, 2);
    assert_eq!(env.lookup(x), Some((&2, 1)));

    env.pop_frame();
    assert_eq!(env.lookup(x), Some((&1, 0)));
}

#[test]
fn test_redefine_in_same_frame_returns_previous() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.define(x, "first");
    assert_eq!(env.define(x, "second"), Some("first"));
}

#[test]
fn test_is_bound_locally_ignores_outer_frames() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Environment::new();
    env.define(x, ());
    env.push_frame();
    assert!(!env.is_bound_locally(x));
    assert!(env.lookup(x).is_some());
}

#[test]
fn test_define_replaces_only_in_innermost_frame() {
    let interner = StringInterner::new();
    let f = interner.intern("f");

    let mut env = Environment::new();
    assert_eq!(env.define(f, 'a'), None);
    env.push_frame();
    assert_eq!(env.define(f, 'b'), None);
    assert_eq!(env.define(f, 'c'), Some('b'));
    assert_eq!(env.lookup(f), Some((&'c', 1)));

    env.pop_frame();
    assert_eq!(env.lookup(f), Some((&'a', 0)));
}

#[test]
fn test_outermost_frame_survives_pop() {
    let mut env: Environment<u8> = Environment::new();
    assert!(!env.pop_frame());
    assert_eq!(env.depth(), 1);
    assert_eq!(env.frame_activity(), (0, 0));
}

proptest! {
    /// A binding is visible exactly while its frame is live.
    #[test]
    fn prop_binding_lives_with_its_frame(extra in 0usize..8) {
        let interner = StringInterner::new();
        let x = interner.intern("x");
        let mut env = Environment::new();
        for _ in 0..extra {
            env.push_frame();
        }
        env.define(x, extra);
        prop_assert_eq!(env.lookup(x), Some((&extra, extra)));
        for _ in 0..extra {
            env.pop_frame();
        }
        let (pushes, pops) = env.frame_activity();
        prop_assert_eq!(pushes, pops);
        if extra > 0 {
            prop_assert_eq!(env.lookup(x), None);
        }
    }
}
