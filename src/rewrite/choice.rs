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

// src/rewrite/choice.rs
// Choice rules: one/all elimination, failure pruning, re-association, and
// choice distribution under the wrappers.

use super::Rule;
use crate::ast::*;
use crate::core::context::{distribute, find_choice};

/// Apply one choice rule at this node, if any matches.
pub fn rewrite_choice(expr: &Expr) -> Option<(Rule, Expr)> {
    one_rules(expr)
        .or_else(|| all_rules(expr))
        .or_else(|| choose_prune(expr))
        .or_else(|| choose_assoc(expr))
        .or_else(|| choose(expr))
}

// ============================================================================
// one
// ============================================================================

/// one-fail: `one{fail} → fail`
/// one-value: `one{v} → v`
/// one-choice: `one{v ⊕ e} → v`; the leftmost settled branch wins.
fn one_rules(expr: &Expr) -> Option<(Rule, Expr)> {
    let body = match expr {
        Expr::One(body) => body,
        _ => return None,
    };

    match &**body {
        Expr::Fail => Some((Rule::OneFail, Expr::Fail)),

        Expr::Value(v) => Some((Rule::OneValue, Expr::Value(v.clone()))),

        Expr::Choice(e1, _) => {
            if let Expr::Value(v) = &**e1 {
                Some((Rule::OneChoice, Expr::Value(v.clone())))
            } else {
                None
            }
        }

        _ => None,
    }
}

// ============================================================================
// all
// ============================================================================

/// all-fail: `all{fail} → ⟨⟩`
/// all-value: `all{v} → ⟨v⟩`
/// all-choice: `all{v₁ ⊕ ... ⊕ vₙ} → ⟨v₁, ..., vₙ⟩` once every branch has
/// settled to a value.
fn all_rules(expr: &Expr) -> Option<(Rule, Expr)> {
    let body = match expr {
        Expr::All(body) => body,
        _ => return None,
    };

    match &**body {
        Expr::Fail => Some((Rule::AllFail, Expr::empty_tuple())),

        Expr::Value(v) => Some((Rule::AllValue, Expr::tuple(vec![v.clone()]))),

        Expr::Choice(_, _) => {
            let mut vals = Vec::new();
            if collect_choice_values(body, &mut vals) {
                Some((Rule::AllChoice, Expr::tuple(vals)))
            } else {
                None
            }
        }

        _ => None,
    }
}

/// Collect the leaves of a choice tree, left to right. True only when every
/// leaf is a value.
fn collect_choice_values(expr: &Expr, vals: &mut Vec<Value>) -> bool {
    match expr {
        Expr::Choice(e1, e2) => {
            collect_choice_values(e1, vals) && collect_choice_values(e2, vals)
        }
        Expr::Value(v) => {
            vals.push(v.clone());
            true
        }
        _ => false,
    }
}

// ============================================================================
// choice trees
// ============================================================================

/// choose-r: `fail ⊕ e → e`; choose-l: `e ⊕ fail → e`.
fn choose_prune(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Choice(e1, e2) => {
            if e1.is_fail() {
                Some((Rule::ChooseR, (**e2).clone()))
            } else if e2.is_fail() {
                Some((Rule::ChooseL, (**e1).clone()))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// choose-assoc: `(e₁ ⊕ e₂) ⊕ e₃ → e₁ ⊕ (e₂ ⊕ e₃)`; choice trees settle
/// into right-spine form.
fn choose_assoc(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Choice(e1, e3) => {
            if let Expr::Choice(e1_inner, e2) = &**e1 {
                Some((
                    Rule::ChooseAssoc,
                    Expr::Choice(
                        e1_inner.clone(),
                        Box::new(Expr::Choice(e2.clone(), e3.clone())),
                    ),
                ))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// choose: `one/all{CX[e₁ ⊕ e₂]} → one/all{CX[e₁] ⊕ CX[e₂]}` for the first
/// buried choice reachable from the wrapper: the search walks the body's
/// choice spine (earlier distributions leave one behind) and distributes the
/// first non-hole choice context found under it. The wrappers are the only
/// place where distribution happens, so a bare choice tree outside them
/// stays put.
fn choose(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::One(body) => choose_in(body).map(|new| (Rule::Choose, Expr::One(Box::new(new)))),
        Expr::All(body) => choose_in(body).map(|new| (Rule::Choose, Expr::All(Box::new(new)))),
        _ => None,
    }
}

fn choose_in(expr: &Expr) -> Option<Expr> {
    if let Some((ctx, e1, e2)) = find_choice(expr) {
        return Some(distribute(&ctx, e1, e2));
    }
    match expr {
        Expr::Choice(l, r) => {
            if let Some(new_l) = choose_in(l) {
                Some(Expr::Choice(Box::new(new_l), r.clone()))
            } else {
                choose_in(r).map(|new_r| Expr::Choice(l.clone(), Box::new(new_r)))
            }
        }
        _ => None,
    }
}
