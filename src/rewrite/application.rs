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

// src/rewrite/application.rs
// Application rules: primitive operators, beta reduction, tuple indexing.

use super::Rule;
use crate::ast::*;
use crate::core::subst::substitute;
use crate::names::NameSupply;

/// Apply one application rule at this node, if any matches.
pub fn rewrite_application(expr: &Expr, names: &mut NameSupply) -> Option<(Rule, Expr)> {
    match expr {
        Expr::App(v1, v2) => app_prim(v1, v2)
            .or_else(|| app_beta(v1, v2, names))
            .or_else(|| app_tup(v1, v2, names))
            .or_else(|| app_tup_0(v1, v2)),
        _ => None,
    }
}

// ============================================================================
// Primitive Operations
// ============================================================================

/// Operators are applied to a two-element tuple of scalar HNFs. Arithmetic
/// is wrapping two's-complement on i64; a division with no representable
/// result (zero divisor, or `i64::MIN / -1`) fails. A comparison reduces to
/// its left operand when it holds and to `fail` when it does not. Strings
/// support `add` (concatenation) and lexicographic `gt`/`lt`.
fn app_prim(v1: &Value, v2: &Value) -> Option<(Rule, Expr)> {
    let op = match v1 {
        Value::Hnf(HeadNormalForm::Op(op)) => *op,
        _ => return None,
    };
    let args = match v2 {
        Value::Hnf(HeadNormalForm::Tuple(args)) if args.len() == 2 => args,
        _ => return None,
    };

    match (&args[0], &args[1]) {
        (Value::Hnf(HeadNormalForm::Int(k1)), Value::Hnf(HeadNormalForm::Int(k2))) => match op {
            PrimOp::Add => Some((Rule::AppAddInt, Expr::int(k1.wrapping_add(*k2)))),
            PrimOp::Sub => Some((Rule::AppSub, Expr::int(k1.wrapping_sub(*k2)))),
            PrimOp::Mult => Some((Rule::AppMult, Expr::int(k1.wrapping_mul(*k2)))),
            PrimOp::Div => match k1.checked_div(*k2) {
                Some(q) => Some((Rule::AppDiv, Expr::int(q))),
                None => Some((Rule::AppDivZero, Expr::Fail)),
            },
            PrimOp::Gt => {
                if k1 > k2 {
                    Some((Rule::AppGt, Expr::int(*k1)))
                } else {
                    Some((Rule::AppGtFail, Expr::Fail))
                }
            }
            PrimOp::Lt => {
                if k1 < k2 {
                    Some((Rule::AppLt, Expr::int(*k1)))
                } else {
                    Some((Rule::AppLtFail, Expr::Fail))
                }
            }
        },

        (Value::Hnf(HeadNormalForm::Str(s1)), Value::Hnf(HeadNormalForm::Str(s2))) => match op {
            PrimOp::Add => Some((Rule::AppAddStr, Expr::string(format!("{}{}", s1, s2)))),
            PrimOp::Gt => {
                if s1 > s2 {
                    Some((Rule::AppGt, Expr::string(s1.clone())))
                } else {
                    Some((Rule::AppGtFail, Expr::Fail))
                }
            }
            PrimOp::Lt => {
                if s1 < s2 {
                    Some((Rule::AppLt, Expr::string(s1.clone())))
                } else {
                    Some((Rule::AppLtFail, Expr::Fail))
                }
            }
            _ => None,
        },

        _ => None,
    }
}

// ============================================================================
// Beta Reduction
// ============================================================================

/// app-beta: `(λx. e)(v) → ∃x. x = v; e`
/// When `x` is free in `v`, the parameter is alpha-renamed first so the
/// unfolded equation cannot capture it.
fn app_beta(v1: &Value, v2: &Value, names: &mut NameSupply) -> Option<(Rule, Expr)> {
    match v1 {
        Value::Hnf(HeadNormalForm::Lambda(x, e)) => {
            let (x, e) = if v2.free_vars().contains(x) {
                let x_fresh = names.fresh(&x.0);
                let body = substitute(e, x, &Value::Var(x_fresh.clone()), names);
                (x_fresh, Box::new(body))
            } else {
                (x.clone(), e.clone())
            };

            Some((
                Rule::AppBeta,
                Expr::Exists(
                    x.clone(),
                    Box::new(Expr::Seq(
                        ExprOrEqn::Eqn(Value::Var(x), Box::new(Expr::Value(v2.clone()))),
                        e,
                    )),
                ),
            ))
        }
        _ => None,
    }
}

// ============================================================================
// Tuple Indexing
// ============================================================================

/// app-tup: `⟨v₀, ..., vₙ⟩(v) → ∃i. i = v; (i = 0; v₀) ⊕ ... ⊕ (i = n; vₙ)`
/// with `i` fresh.
fn app_tup(v1: &Value, v2: &Value, names: &mut NameSupply) -> Option<(Rule, Expr)> {
    match v1 {
        Value::Hnf(HeadNormalForm::Tuple(vals)) if !vals.is_empty() => {
            let i = names.fresh("i");

            // Right-associated choice over the indexed elements.
            let mut choice = Expr::Seq(
                ExprOrEqn::Eqn(
                    Value::Var(i.clone()),
                    Box::new(Expr::int(vals.len() as i64 - 1)),
                ),
                Box::new(Expr::Value(vals[vals.len() - 1].clone())),
            );

            for (k, val) in vals.iter().enumerate().rev().skip(1) {
                let branch = Expr::Seq(
                    ExprOrEqn::Eqn(Value::Var(i.clone()), Box::new(Expr::int(k as i64))),
                    Box::new(Expr::Value(val.clone())),
                );
                choice = Expr::Choice(Box::new(branch), Box::new(choice));
            }

            Some((
                Rule::AppTup,
                Expr::Exists(
                    i.clone(),
                    Box::new(Expr::Seq(
                        ExprOrEqn::Eqn(Value::Var(i), Box::new(Expr::Value(v2.clone()))),
                        Box::new(choice),
                    )),
                ),
            ))
        }
        _ => None,
    }
}

/// app-tup-0: `⟨⟩(v) → fail`
fn app_tup_0(v1: &Value, _v2: &Value) -> Option<(Rule, Expr)> {
    match v1 {
        Value::Hnf(HeadNormalForm::Tuple(vals)) if vals.is_empty() => {
            Some((Rule::AppTup0, Expr::Fail))
        }
        _ => None,
    }
}
