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

// src/core/subst.rs
// Capture-avoiding substitution and alpha-conversion.

use crate::ast::*;
use crate::names::NameSupply;
use std::collections::HashSet;

// ============================================================================
// Substitution
// ============================================================================

/// Capture-avoiding substitution `e{v/x}`: replace all free occurrences of
/// `x` with a copy of `v`. Stops at shadowing binders; binders that would
/// capture a free variable of `v` are alpha-renamed with a fresh name first.
pub fn substitute(expr: &Expr, x: &Var, v: &Value, names: &mut NameSupply) -> Expr {
    subst_expr(expr, x, v, names)
}

fn subst_expr(expr: &Expr, x: &Var, v: &Value, names: &mut NameSupply) -> Expr {
    match expr {
        Expr::Value(val) => Expr::Value(subst_value(val, x, v, names)),

        Expr::Fail => Expr::Fail,

        Expr::Seq(eq, e) => {
            let eq_new = subst_expr_or_eqn(eq, x, v, names);
            let e_new = subst_expr(e, x, v, names);
            Expr::Seq(eq_new, Box::new(e_new))
        }

        Expr::Exists(y, e) => {
            if x == y {
                // Shadowed: the binder owns every inner occurrence.
                Expr::Exists(y.clone(), e.clone())
            } else if v.free_vars().contains(y) {
                // Would capture y; rename the binder first.
                let y_fresh = names.fresh(&y.0);
                let e_renamed = subst_expr(e, y, &Value::Var(y_fresh.clone()), names);
                let e_subst = subst_expr(&e_renamed, x, v, names);
                Expr::Exists(y_fresh, Box::new(e_subst))
            } else {
                Expr::Exists(y.clone(), Box::new(subst_expr(e, x, v, names)))
            }
        }

        Expr::Choice(e1, e2) => Expr::Choice(
            Box::new(subst_expr(e1, x, v, names)),
            Box::new(subst_expr(e2, x, v, names)),
        ),

        Expr::App(v1, v2) => Expr::App(
            subst_value(v1, x, v, names),
            subst_value(v2, x, v, names),
        ),

        Expr::One(e) => Expr::One(Box::new(subst_expr(e, x, v, names))),

        Expr::All(e) => Expr::All(Box::new(subst_expr(e, x, v, names))),
    }
}

pub(crate) fn subst_expr_or_eqn(
    eq: &ExprOrEqn,
    x: &Var,
    v: &Value,
    names: &mut NameSupply,
) -> ExprOrEqn {
    match eq {
        ExprOrEqn::Expr(e) => ExprOrEqn::Expr(Box::new(subst_expr(e, x, v, names))),
        ExprOrEqn::Eqn(lhs, rhs) => ExprOrEqn::Eqn(
            subst_value(lhs, x, v, names),
            Box::new(subst_expr(rhs, x, v, names)),
        ),
    }
}

pub(crate) fn subst_value(val: &Value, x: &Var, v: &Value, names: &mut NameSupply) -> Value {
    match val {
        Value::Var(y) => {
            if x == y {
                v.clone()
            } else {
                Value::Var(y.clone())
            }
        }
        Value::Hnf(hnf) => Value::Hnf(subst_hnf(hnf, x, v, names)),
    }
}

fn subst_hnf(hnf: &HeadNormalForm, x: &Var, v: &Value, names: &mut NameSupply) -> HeadNormalForm {
    match hnf {
        HeadNormalForm::Int(n) => HeadNormalForm::Int(*n),
        HeadNormalForm::Str(s) => HeadNormalForm::Str(s.clone()),
        HeadNormalForm::Op(op) => HeadNormalForm::Op(*op),
        HeadNormalForm::Tuple(vals) => HeadNormalForm::Tuple(
            vals.iter().map(|val| subst_value(val, x, v, names)).collect(),
        ),
        HeadNormalForm::Lambda(y, e) => {
            if x == y {
                HeadNormalForm::Lambda(y.clone(), e.clone())
            } else if v.free_vars().contains(y) {
                let y_fresh = names.fresh(&y.0);
                let e_renamed = subst_expr(e, y, &Value::Var(y_fresh.clone()), names);
                let e_subst = subst_expr(&e_renamed, x, v, names);
                HeadNormalForm::Lambda(y_fresh, Box::new(e_subst))
            } else {
                HeadNormalForm::Lambda(y.clone(), Box::new(subst_expr(e, x, v, names)))
            }
        }
    }
}

// ============================================================================
// Alpha-conversion
// ============================================================================

/// Rename the root binder of `expr` (an `Exists`, or a `Lambda` value) from
/// `old_var` to `new_var`, together with every non-shadowed occurrence in its
/// scope. Descent stops the moment a rebinding of `old_var` is met.
pub fn alpha_convert(expr: &Expr, old_var: &Var, new_var: &Var, names: &mut NameSupply) -> Expr {
    let replacement = Value::Var(new_var.clone());
    match expr {
        Expr::Exists(x, e) if x == old_var => {
            let e_renamed = subst_expr(e, old_var, &replacement, names);
            Expr::Exists(new_var.clone(), Box::new(e_renamed))
        }

        Expr::Value(Value::Hnf(HeadNormalForm::Lambda(x, e))) if x == old_var => {
            let e_renamed = subst_expr(e, old_var, &replacement, names);
            Expr::Value(Value::Hnf(HeadNormalForm::Lambda(
                new_var.clone(),
                Box::new(e_renamed),
            )))
        }

        _ => expr.clone(),
    }
}

// ============================================================================
// Capture check
// ============================================================================

/// Would substituting `v` for `x` in `expr` run into a binder that captures
/// a free variable of `v`? (`substitute` renames such binders on the fly;
/// this predicate reports whether it would have to.)
pub fn would_capture(expr: &Expr, x: &Var, v: &Value) -> bool {
    check_capture(expr, x, &v.free_vars())
}

fn check_capture(expr: &Expr, x: &Var, v_free_vars: &HashSet<Var>) -> bool {
    match expr {
        Expr::Value(val) => check_capture_value(val, x, v_free_vars),

        Expr::Fail => false,

        Expr::Seq(eq, e) => {
            let eq_hit = match eq {
                ExprOrEqn::Expr(lhs) => check_capture(lhs, x, v_free_vars),
                ExprOrEqn::Eqn(lhs, rhs) => {
                    check_capture_value(lhs, x, v_free_vars) || check_capture(rhs, x, v_free_vars)
                }
            };
            eq_hit || check_capture(e, x, v_free_vars)
        }

        Expr::Exists(y, e) => {
            if x == y {
                // Shadowed, substitution stops here.
                false
            } else if v_free_vars.contains(y) && e.free_vars().contains(x) {
                true
            } else {
                check_capture(e, x, v_free_vars)
            }
        }

        Expr::Choice(e1, e2) => {
            check_capture(e1, x, v_free_vars) || check_capture(e2, x, v_free_vars)
        }

        Expr::App(v1, v2) => {
            check_capture_value(v1, x, v_free_vars) || check_capture_value(v2, x, v_free_vars)
        }

        Expr::One(e) | Expr::All(e) => check_capture(e, x, v_free_vars),
    }
}

fn check_capture_value(val: &Value, x: &Var, v_free_vars: &HashSet<Var>) -> bool {
    match val {
        Value::Var(_) => false,
        Value::Hnf(HeadNormalForm::Int(_))
        | Value::Hnf(HeadNormalForm::Str(_))
        | Value::Hnf(HeadNormalForm::Op(_)) => false,
        Value::Hnf(HeadNormalForm::Tuple(vs)) => {
            vs.iter().any(|v2| check_capture_value(v2, x, v_free_vars))
        }
        Value::Hnf(HeadNormalForm::Lambda(y, e)) => {
            if x == y {
                false
            } else if v_free_vars.contains(y) && e.free_vars().contains(x) {
                true
            } else {
                check_capture(e, x, v_free_vars)
            }
        }
    }
}
