// Verse calculus rewriting engine
//
// Based on "The Verse Calculus: A Core Calculus for Deterministic Functional
// Logic Programming" by Lennart Augustsson, Joachim Breitner, Koen Claessen,
// Ranjit Jhala, Simon Peyton Jones, Olin Shivers, Guy L. Steele Jr.,
// and Tim Sweeney
// https://dl.acm.org/doi/abs/10.1145/3607845
//
// Licensed under Creative Commons Attribution 4.0 International License
// https://creativecommons.org/licenses/by/4.0/

// tests/elimination_test.rs
// Tests the elimination rewrites

use verse_core::*;

#[test]
fn test_val_elim() {
    // 3; 42 → 42
    let expr = Expr::then(Expr::int(3), Expr::int(42));

    assert_eq!(
        rewrite_elimination(&expr),
        Some((Rule::ValElim, Expr::int(42)))
    );
}

#[test]
fn test_val_elim_not_for_pending_work() {
    // add⟨1, 2⟩; 42 keeps its left side until it is a value
    let expr = Expr::then(
        Expr::app(
            Value::op(PrimOp::Add),
            Value::tuple(vec![Value::int(1), Value::int(2)]),
        ),
        Expr::int(42),
    );

    assert_eq!(rewrite_elimination(&expr), None);
}

#[test]
fn test_exi_elim_unused_binder() {
    // ∃x. 42 → 42
    let expr = Expr::exists(Var::new("x"), Expr::int(42));

    assert_eq!(
        rewrite_elimination(&expr),
        Some((Rule::ExiElim, Expr::int(42)))
    );
}

#[test]
fn test_exi_elim_keeps_used_binder() {
    // ∃x. x stays
    let expr = Expr::exists(Var::new("x"), Expr::var("x"));

    assert_eq!(rewrite_elimination(&expr), None);
}

#[test]
fn test_eqn_elim_spent_equation() {
    // ∃x. x = 3; 42 → 42
    let expr = Expr::exists(
        Var::new("x"),
        Expr::seq(Expr::eqn(Value::var("x"), Expr::int(3)), Expr::int(42)),
    );

    assert_eq!(
        rewrite_elimination(&expr),
        Some((Rule::EqnElim, Expr::int(42)))
    );
}

#[test]
fn test_eqn_elim_through_exists_chain() {
    // ∃x. ∃y. (x = 3; y = 4; y) → ∃y. (y = 4; y) once x is spent
    let expr = Expr::exists(
        Var::new("x"),
        Expr::exists(
            Var::new("y"),
            Expr::seq(
                Expr::eqn(Value::var("x"), Expr::int(3)),
                Expr::seq(Expr::eqn(Value::var("y"), Expr::int(4)), Expr::var("y")),
            ),
        ),
    );

    let expected = Expr::exists(
        Var::new("y"),
        Expr::seq(Expr::eqn(Value::var("y"), Expr::int(4)), Expr::var("y")),
    );
    assert_eq!(
        rewrite_elimination(&expr),
        Some((Rule::EqnElim, expected))
    );
}

#[test]
fn test_eqn_elim_blocked_by_remaining_use() {
    // ∃x. x = 3; x still needs the substitution step first
    let expr = Expr::exists(
        Var::new("x"),
        Expr::seq(Expr::eqn(Value::var("x"), Expr::int(3)), Expr::var("x")),
    );

    assert_eq!(rewrite_elimination(&expr), None);
}

#[test]
fn test_eqn_elim_skips_shadowed_equation() {
    // ∃x. ∃x. (x = 3; 42): the equation belongs to the inner binder, so the
    // outer ∃x is eliminated by exi-elim instead.
    let expr = Expr::exists(
        Var::new("x"),
        Expr::exists(
            Var::new("x"),
            Expr::seq(Expr::eqn(Value::var("x"), Expr::int(3)), Expr::int(42)),
        ),
    );

    let inner = Expr::exists(
        Var::new("x"),
        Expr::seq(Expr::eqn(Value::var("x"), Expr::int(3)), Expr::int(42)),
    );
    assert_eq!(rewrite_elimination(&expr), Some((Rule::ExiElim, inner)));
}

#[test]
fn test_fail_elim_in_sequence() {
    // fail; 42 → fail
    let expr = Expr::then(Expr::Fail, Expr::int(42));

    assert_eq!(
        rewrite_elimination(&expr),
        Some((Rule::FailElim, Expr::Fail))
    );
}

#[test]
fn test_fail_elim_in_continuation() {
    // x = 3; fail → fail
    let expr = Expr::seq(Expr::eqn(Value::var("x"), Expr::int(3)), Expr::Fail);

    assert_eq!(
        rewrite_elimination(&expr),
        Some((Rule::FailElim, Expr::Fail))
    );
}

#[test]
fn test_fail_elim_under_exists() {
    // ∃x. fail → fail
    let expr = Expr::exists(Var::new("x"), Expr::Fail);

    assert_eq!(
        rewrite_elimination(&expr),
        Some((Rule::FailElim, Expr::Fail))
    );
}

#[test]
fn test_fail_does_not_cross_choice() {
    // fail ⊕ 1 is the choice rules' business, not elimination's
    let expr = Expr::choice(Expr::Fail, Expr::int(1));

    assert_eq!(rewrite_elimination(&expr), None);
}

#[test]
fn test_fail_does_not_escape_one() {
    // one{fail}; 42: the fail is guarded by its wrapper
    let expr = Expr::then(Expr::one(Expr::Fail), Expr::int(42));

    assert_eq!(rewrite_elimination(&expr), None);
}
