use super::*;

use crate::parser::parse_type;

fn ty(input: &str) -> Type {
    parse_type(input).unwrap()
}

fn unify_success_test_helper(left: &str, right: &str, expected: &[(&str, &str)]) {
    let mut unifier = Unifier::new();
    let (left, right) = (ty(left), ty(right));

    assert_eq!(Ok(()), unifier.unify(&left, &right));
    assert_eq!(unifier.resolve(&left), unifier.resolve(&right));

    for (var, resolved) in expected {
        assert_eq!(unifier.resolve(&Type::var(var)), ty(resolved), "resolving {}", var);
    }
}

fn unify_error_test_helper(left: &str, right: &str, err: &str) {
    let mut unifier = Unifier::new();

    let result = unifier.unify(&ty(left), &ty(right));

    assert_eq!(Err(err.to_string()), result.map_err(|e| e.to_string()));
    assert!(unifier.substitution().is_empty());
}

#[test]
fn test_type_names() {
    assert_eq!(type_name(0), "a");
    assert_eq!(type_name(1), "b");
    assert_eq!(type_name(25), "z");
    assert_eq!(type_name(26), "aa");
    assert_eq!(type_name(27), "ab");
    assert_eq!(type_name(51), "az");
    assert_eq!(type_name(52), "ba");
    assert_eq!(type_name(701), "zz");
    assert_eq!(type_name(702), "aaa");
}

#[test]
fn test_fresh_names_are_deterministic() {
    let mut first = Unifier::new();
    let mut second = Unifier::new();

    for _ in 0..30 {
        assert_eq!(first.fresh_var(), second.fresh_var());
    }

    assert_eq!(first.fresh_var(), Type::var("ae"));
}

#[test]
fn test_fresh_arrow_uses_two_names() {
    let mut unifier = Unifier::new();

    assert_eq!(unifier.fresh_var(), Type::var("a"));
    assert_eq!(unifier.fresh_arrow(), ty("b -> c"));
    assert_eq!(unifier.fresh_var(), Type::var("d"));
}

#[test]
fn test_fresh_names_survive_failed_unification() {
    let mut unifier = Unifier::new();
    let arrow = unifier.fresh_arrow();

    assert!(unifier.unify(&arrow, &Type::constant("Int")).is_err());
    assert_eq!(unifier.fresh_var(), Type::var("c"));
}

#[test]
fn test_equal_constants() {
    let mut unifier = Unifier::new();

    assert_eq!(
        Ok(()),
        unifier.unify(&Type::constant("Int"), &Type::constant("Int"))
    );
    assert!(unifier.substitution().is_empty());
}

#[test]
fn test_different_constants() {
    unify_error_test_helper("Int", "Bool", "Unification error: Int and Bool");
}

#[test]
fn test_variable_instantiation() {
    unify_success_test_helper("t0", "Int", &[("t0", "Int")]);
}

#[test]
fn test_variable_on_the_right() {
    unify_success_test_helper("Int -> Bool", "t0", &[("t0", "Int -> Bool")]);
}

#[test]
fn test_left_variable_is_bound() {
    let mut unifier = Unifier::new();

    assert_eq!(Ok(()), unifier.unify(&Type::var("a"), &Type::var("b")));

    assert_eq!(unifier.resolve(&Type::var("a")), Type::var("b"));
    assert_eq!(unifier.resolve(&Type::var("b")), Type::var("b"));
    assert_eq!(unifier.substitution().get(&Id::from("a")), Some(&Type::var("b")));
    assert_eq!(unifier.substitution().get(&Id::from("b")), None);
}

#[test]
fn test_self_binding_is_noop() {
    let mut subst = Subst::default();
    subst.bind(Id::from("a"), Type::var("a"));
    assert!(subst.is_empty());

    let mut unifier = Unifier::new();
    assert_eq!(Ok(()), unifier.unify(&Type::var("a"), &Type::var("a")));
    assert!(unifier.substitution().is_empty());
}

#[test]
fn test_bind_overwrites() {
    let mut subst = Subst::default();

    subst.bind(Id::from("a"), Type::constant("Int"));
    subst.bind(Id::from("a"), Type::constant("Bool"));

    assert_eq!(subst.len(), 1);
    assert_eq!(subst.resolve(&Type::var("a")), Type::constant("Bool"));
}

#[test]
fn test_bound_variables_unify_through_chain() {
    let mut unifier = Unifier::new();

    unifier.unify(&Type::var("a"), &Type::var("b")).unwrap();
    unifier.unify(&Type::var("b"), &Type::var("c")).unwrap();

    // "a" is resolved through "b", so "c" is the one bound here.
    unifier.unify(&Type::var("a"), &Type::constant("Int")).unwrap();

    assert_eq!(unifier.substitution().len(), 3);
    for var in ["a", "b", "c"] {
        assert_eq!(unifier.resolve(&Type::var(var)), Type::constant("Int"));
    }
}

#[test]
fn test_chase_stops_at_arrow() {
    let mut unifier = Unifier::new();

    unifier.unify(&ty("a"), &ty("b -> c")).unwrap();
    unifier.unify(&ty("b"), &ty("Int")).unwrap();

    assert_eq!(unifier.subst.chase(&ty("a")), (ty("b -> c"), None));
    assert_eq!(unifier.subst.chase(&ty("d")), (ty("d"), Some(Id::from("d"))));
    assert_eq!(unifier.resolve(&ty("a")), ty("Int -> c"));
}

#[test]
fn test_arrow_decomposition() {
    unify_success_test_helper(
        "a -> b",
        "Int -> Bool",
        &[("a", "Int"), ("b", "Bool")],
    );
}

#[test]
fn test_nested_arrows() {
    unify_success_test_helper(
        "(a -> b) -> a",
        "(Int -> c) -> c",
        &[("a", "Int"), ("b", "Int"), ("c", "Int")],
    );
}

#[test]
fn test_shared_variable_across_sides() {
    unify_success_test_helper("a -> a", "b -> Int", &[("a", "Int"), ("b", "Int")]);
}

#[test]
fn test_arrow_against_constant() {
    unify_error_test_helper(
        "a -> b",
        "Int",
        "Unification error: a -> b and Int",
    );
}

#[test]
fn test_failure_discards_domain_bindings() {
    unify_error_test_helper(
        "a -> Int",
        "Bool -> Bool",
        "Unification error: Int and Bool",
    );
}

#[test]
fn test_failure_keeps_earlier_unifications() {
    let mut unifier = Unifier::new();

    unifier.unify(&ty("c"), &ty("Char")).unwrap();
    assert!(unifier.unify(&ty("a -> c"), &ty("Int -> Bool")).is_err());

    assert_eq!(unifier.substitution().len(), 1);
    assert_eq!(unifier.resolve(&ty("a")), ty("a"));
    assert_eq!(unifier.resolve(&ty("c")), ty("Char"));
}

#[test]
fn test_occurs_check() {
    unify_error_test_helper(
        "a",
        "a -> b",
        "Occur check cannot construct infinite type: a = a -> b",
    );
}

#[test]
fn test_occurs_check_through_bindings() {
    let mut unifier = Unifier::new();

    unifier.unify(&ty("b"), &ty("Int -> a")).unwrap();

    assert_eq!(
        Err(UnificationError::InfiniteType(
            Id::from("a"),
            ty("(Int -> a) -> Int -> a")
        )),
        unifier.unify(&ty("a"), &ty("b -> b"))
    );
    assert_eq!(unifier.substitution().len(), 1);
}

#[test]
fn test_idempotent_resolution() {
    let mut unifier = Unifier::new();
    unifier.unify(&ty("a -> b"), &ty("Int -> c")).unwrap();

    for input in ["Int", "x", "(Int -> c) -> Bool", "b -> c"] {
        let resolved = unifier.resolve(&ty(input));
        assert_eq!(unifier.resolve(&resolved), resolved);
    }

    assert_eq!(unifier.resolve(&ty("x -> Int")), ty("x -> Int"));
}

#[test]
fn test_independent_unifiers() {
    let mut first = Unifier::new();
    let mut second = Unifier::new();

    first.unify(&ty("a"), &ty("Int")).unwrap();
    second.unify(&ty("a"), &ty("Bool")).unwrap();

    assert_eq!(first.resolve(&ty("a")), ty("Int"));
    assert_eq!(second.resolve(&ty("a")), ty("Bool"));
}

#[test]
fn test_constructor_signature_instantiation() {
    let mut unifier = Unifier::new();

    // Cons :: Int -> List -> List, applied to one argument.
    let cons = Type::function(
        vec![Type::constant("Int"), Type::constant("List")],
        Type::constant("List"),
    );
    let application = unifier.fresh_arrow();

    unifier.unify(&cons, &application).unwrap();

    assert_eq!(unifier.resolve(&application), cons);
    assert_eq!(unifier.resolve(&Type::var("b")), ty("List -> List"));
}
