use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn arb_type() -> impl Strategy<Value = Type> {
    let leaf = prop_oneof![
        Just(Type::Int),
        Just(Type::Bool),
        Just(Type::String),
        Just(Type::Void),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        (prop::collection::vec(inner.clone(), 0..4), inner)
            .prop_map(|(params, ret)| Type::function(params, ret))
    })
}

#[test]
fn test_display() {
    assert_eq!(Type::Int.to_string(), "int");
    assert_eq!(
        Type::function(vec![Type::Int, Type::Bool], Type::String).to_string(),
        "fn(int, bool): string"
    );
    assert_eq!(Type::function(vec![], Type::Void).to_string(), "fn()");
}

#[test]
fn test_function_types_compare_structurally() {
    let a = Type::function(vec![Type::Int, Type::Int], Type::Int);
    let b = Type::function(vec![Type::Int, Type::Int], Type::Int);
    let fewer = Type::function(vec![Type::Int], Type::Int);
    let other_ret = Type::function(vec![Type::Int, Type::Int], Type::Bool);
    assert!(types_match(Some(&a), Some(&b)));
    assert!(!types_match(Some(&a), Some(&fewer)));
    assert!(!types_match(Some(&a), Some(&other_ret)));
}

#[test]
fn test_unknown_matches_everything() {
    assert!(types_match(None, None));
    assert!(types_match(Some(&Type::Void), None));
    assert!(types_match(None, Some(&Type::Bool)));
}

proptest! {
    #[test]
    fn prop_types_match_is_reflexive(t in arb_type()) {
        prop_assert!(types_match(Some(&t), Some(&t)));
    }

    #[test]
    fn prop_types_match_is_symmetric(a in arb_type(), b in arb_type()) {
        prop_assert_eq!(
            types_match(Some(&a), Some(&b)),
            types_match(Some(&b), Some(&a))
        );
    }

    #[test]
    fn prop_unknown_is_universal(t in arb_type()) {
        prop_assert!(types_match(Some(&t), None));
        prop_assert!(types_match(None, Some(&t)));
    }
}
