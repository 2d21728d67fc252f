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

// src/rewrite/elimination.rs
// Elimination rules: discarded values, dead binders, spent equations,
// failure propagation.

use super::Rule;
use crate::ast::*;
use crate::core::context::{find_equations, has_failing_position};

/// Apply one elimination rule at this node, if any matches.
pub fn rewrite_elimination(expr: &Expr) -> Option<(Rule, Expr)> {
    val_elim(expr)
        .or_else(|| exi_elim(expr))
        .or_else(|| eqn_elim(expr))
        .or_else(|| fail_elim(expr))
}

/// val-elim: `v; e → e`, discarding a value in sequence position.
fn val_elim(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Expr(lhs), rest) => {
            if matches!(&**lhs, Expr::Value(_)) {
                Some((Rule::ValElim, (**rest).clone()))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// exi-elim: `∃x. e → e` when `x` is not free in `e`.
fn exi_elim(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Exists(x, e) => {
            if !e.free_vars().contains(x) {
                Some((Rule::ExiElim, (**e).clone()))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// eqn-elim: `∃x. X[x = v; e] → X[e]` when `x` is free in neither `v` nor
/// the result: a fully-substituted defining equation disappears together
/// with its binder.
fn eqn_elim(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Exists(x, body) => {
            for redex in find_equations(body) {
                if redex.var != *x {
                    continue;
                }
                if redex.value.free_vars().contains(x) {
                    continue;
                }
                let inner = redex.ctx.fill(redex.rest);
                if !inner.free_vars().contains(x) {
                    return Some((Rule::EqnElim, inner));
                }
            }
            None
        }
        _ => None,
    }
}

/// fail-elim: `X[fail] → fail` when `X ≠ □`. Failure floats up through
/// sequences, equations and `∃`, never through `⊕`/`one`/`all`.
fn fail_elim(expr: &Expr) -> Option<(Rule, Expr)> {
    if has_failing_position(expr) {
        Some((Rule::FailElim, Expr::Fail))
    } else {
        None
    }
}
