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

// tests/choice_test.rs
// Tests the choice rewrites

use verse_core::*;

#[test]
fn test_one_fail() {
    // one{fail} → fail
    let expr = Expr::one(Expr::Fail);

    assert_eq!(rewrite_choice(&expr), Some((Rule::OneFail, Expr::Fail)));
}

#[test]
fn test_one_value() {
    // one{42} → 42
    let expr = Expr::one(Expr::int(42));

    assert_eq!(rewrite_choice(&expr), Some((Rule::OneValue, Expr::int(42))));
}

#[test]
fn test_one_choice_takes_leftmost() {
    // one{1 ⊕ 2} → 1
    let expr = Expr::one(Expr::choice(Expr::int(1), Expr::int(2)));

    assert_eq!(
        rewrite_choice(&expr),
        Some((Rule::OneChoice, Expr::int(1)))
    );
}

#[test]
fn test_one_choice_waits_for_left_branch() {
    // one{(fail; 1) ⊕ 2}: the left branch has not settled yet
    let expr = Expr::one(Expr::choice(
        Expr::then(Expr::Fail, Expr::int(1)),
        Expr::int(2),
    ));

    assert_eq!(rewrite_choice(&expr), None);
}

#[test]
fn test_all_fail() {
    // all{fail} → ⟨⟩
    let expr = Expr::all(Expr::Fail);

    assert_eq!(
        rewrite_choice(&expr),
        Some((Rule::AllFail, Expr::empty_tuple()))
    );
}

#[test]
fn test_all_value() {
    // all{7} → ⟨7⟩
    let expr = Expr::all(Expr::int(7));

    assert_eq!(
        rewrite_choice(&expr),
        Some((Rule::AllValue, Expr::tuple(vec![Value::int(7)])))
    );
}

#[test]
fn test_all_choice_collects_values() {
    // all{1 ⊕ 2 ⊕ 3} → ⟨1, 2, 3⟩
    let expr = Expr::all(Expr::choice(
        Expr::int(1),
        Expr::choice(Expr::int(2), Expr::int(3)),
    ));

    assert_eq!(
        rewrite_choice(&expr),
        Some((
            Rule::AllChoice,
            Expr::tuple(vec![Value::int(1), Value::int(2), Value::int(3)])
        ))
    );
}

#[test]
fn test_all_choice_waits_for_all_branches() {
    // all{1 ⊕ add⟨1, 1⟩}: the right branch is still pending
    let expr = Expr::all(Expr::choice(
        Expr::int(1),
        Expr::app(
            Value::op(PrimOp::Add),
            Value::tuple(vec![Value::int(1), Value::int(1)]),
        ),
    ));

    assert_eq!(rewrite_choice(&expr), None);
}

#[test]
fn test_choose_r_prunes_failed_left() {
    // fail ⊕ 2 → 2
    let expr = Expr::choice(Expr::Fail, Expr::int(2));

    assert_eq!(rewrite_choice(&expr), Some((Rule::ChooseR, Expr::int(2))));
}

#[test]
fn test_choose_l_prunes_failed_right() {
    // 1 ⊕ fail → 1
    let expr = Expr::choice(Expr::int(1), Expr::Fail);

    assert_eq!(rewrite_choice(&expr), Some((Rule::ChooseL, Expr::int(1))));
}

#[test]
fn test_choose_assoc() {
    // (1 ⊕ 2) ⊕ 3 → 1 ⊕ (2 ⊕ 3)
    let expr = Expr::choice(
        Expr::choice(Expr::int(1), Expr::int(2)),
        Expr::int(3),
    );

    let expected = Expr::choice(
        Expr::int(1),
        Expr::choice(Expr::int(2), Expr::int(3)),
    );
    assert_eq!(
        rewrite_choice(&expr),
        Some((Rule::ChooseAssoc, expected))
    );
}

#[test]
fn test_choose_distributes_buried_choice() {
    // one{(1 ⊕ 2); 9} → one{(1; 9) ⊕ (2; 9)}
    let expr = Expr::one(Expr::then(
        Expr::choice(Expr::int(1), Expr::int(2)),
        Expr::int(9),
    ));

    let expected = Expr::one(Expr::choice(
        Expr::then(Expr::int(1), Expr::int(9)),
        Expr::then(Expr::int(2), Expr::int(9)),
    ));
    assert_eq!(rewrite_choice(&expr), Some((Rule::Choose, expected)));
}

#[test]
fn test_choose_distributes_through_exists() {
    // all{∃x. (x = 1 ⊕ x = 2); x} duplicates the binder into both branches
    let body = Expr::exists(
        Var::new("x"),
        Expr::then(
            Expr::choice(
                Expr::seq(Expr::eqn(Value::var("x"), Expr::int(1)), Expr::var("x")),
                Expr::seq(Expr::eqn(Value::var("x"), Expr::int(2)), Expr::var("x")),
            ),
            Expr::var("x"),
        ),
    );
    let expr = Expr::all(body);

    let branch = |n| {
        Expr::exists(
            Var::new("x"),
            Expr::then(
                Expr::seq(Expr::eqn(Value::var("x"), Expr::int(n)), Expr::var("x")),
                Expr::var("x"),
            ),
        )
    };
    let expected = Expr::all(Expr::choice(branch(1), branch(2)));
    assert_eq!(rewrite_choice(&expr), Some((Rule::Choose, expected)));
}

#[test]
fn test_choose_reaches_through_choice_spine() {
    // all{((1 ⊕ 2); 9) ⊕ 7}: the left spine branch still holds a buried
    // choice after an earlier distribution; it is found and distributed in
    // place.
    let expr = Expr::all(Expr::choice(
        Expr::then(Expr::choice(Expr::int(1), Expr::int(2)), Expr::int(9)),
        Expr::int(7),
    ));

    let expected = Expr::all(Expr::choice(
        Expr::choice(
            Expr::then(Expr::int(1), Expr::int(9)),
            Expr::then(Expr::int(2), Expr::int(9)),
        ),
        Expr::int(7),
    ));
    assert_eq!(rewrite_choice(&expr), Some((Rule::Choose, expected)));
}

#[test]
fn test_bare_choice_tree_stays_put() {
    // (x = 1 ⊕ x = 2); x outside any wrapper is not distributed
    let expr = Expr::then(
        Expr::choice(
            Expr::seq(Expr::eqn(Value::var("x"), Expr::int(1)), Expr::var("x")),
            Expr::seq(Expr::eqn(Value::var("x"), Expr::int(2)), Expr::var("x")),
        ),
        Expr::var("x"),
    );

    assert_eq!(rewrite_choice(&expr), None);
}

#[test]
fn test_choice_at_wrapper_hole_not_distributed() {
    // one{1 ⊕ 2}: the choice at the top of the body is one-choice's job,
    // never choose's.
    let expr = Expr::one(Expr::choice(Expr::int(1), Expr::int(2)));

    let (rule, _) = rewrite_choice(&expr).unwrap();
    assert_eq!(rule, Rule::OneChoice);
}
