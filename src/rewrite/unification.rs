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

// src/rewrite/unification.rs
// Unification rules: u-lit, u-tup, u-fail, u-occurs, subst, hnf-swap,
// var-swap, seq-swap.

use super::Rule;
use crate::ast::*;
use crate::core::analysis::BinderOrder;
use crate::core::context::{find_equations, occurs_in};
use crate::core::subst::substitute;
use crate::names::NameSupply;

/// Apply one unification rule at this node, if any matches.
pub fn rewrite_unification(
    expr: &Expr,
    names: &mut NameSupply,
    order: &BinderOrder,
) -> Option<(Rule, Expr)> {
    u_lit(expr)
        .or_else(|| u_tup(expr))
        .or_else(|| u_fail(expr))
        .or_else(|| u_occurs(expr))
        .or_else(|| subst_rule(expr, names))
        .or_else(|| hnf_swap(expr))
        .or_else(|| var_swap(expr, order))
        .or_else(|| seq_swap(expr, order))
}

// ============================================================================
// Basic Unification Rules
// ============================================================================

/// u-lit: `k = k; e → e` for equal integer or string literals.
fn u_lit(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Eqn(v1, rhs), rest) => {
            let matched = match (v1, &**rhs) {
                (
                    Value::Hnf(HeadNormalForm::Int(k1)),
                    Expr::Value(Value::Hnf(HeadNormalForm::Int(k2))),
                ) => k1 == k2,
                (
                    Value::Hnf(HeadNormalForm::Str(s1)),
                    Expr::Value(Value::Hnf(HeadNormalForm::Str(s2))),
                ) => s1 == s2,
                _ => false,
            };
            if matched {
                Some((Rule::ULit, (**rest).clone()))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// u-tup: `⟨v₁, ..., vₙ⟩ = ⟨v'₁, ..., v'ₙ⟩; e → v₁ = v'₁; ...; vₙ = v'ₙ; e`
fn u_tup(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Eqn(v1, rhs), rest) => {
            if let (
                Value::Hnf(HeadNormalForm::Tuple(vals1)),
                Expr::Value(Value::Hnf(HeadNormalForm::Tuple(vals2))),
            ) = (v1, &**rhs)
            {
                if vals1.len() == vals2.len() {
                    let mut result = (**rest).clone();
                    for (v, v_prime) in vals1.iter().zip(vals2.iter()).rev() {
                        result = Expr::Seq(
                            ExprOrEqn::Eqn(v.clone(), Box::new(Expr::Value(v_prime.clone()))),
                            Box::new(result),
                        );
                    }
                    return Some((Rule::UTup, result));
                }
            }
            None
        }
        _ => None,
    }
}

/// u-fail: `hnf₁ = hnf₂; e → fail` when the two head normal forms cannot
/// unify: different scalar values, different tuple arities, different head
/// constructors, or any operator. Lambdas never fail here, equations between
/// them are simply stuck.
fn u_fail(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Eqn(v1, rhs), _rest) => {
            if let (Value::Hnf(hnf1), Expr::Value(Value::Hnf(hnf2))) = (v1, &**rhs) {
                use HeadNormalForm::*;
                let should_fail = match (hnf1, hnf2) {
                    // Equal scalars are u-lit's business.
                    (Int(k1), Int(k2)) => k1 != k2,
                    (Str(s1), Str(s2)) => s1 != s2,

                    // Same-arity tuples are u-tup's business.
                    (Tuple(v1), Tuple(v2)) => v1.len() != v2.len(),

                    // Lambdas are stuck, never failed.
                    (Lambda(_, _), _) | (_, Lambda(_, _)) => false,

                    // Operators and mixed head constructors never unify.
                    _ => true,
                };

                if should_fail {
                    return Some((Rule::UFail, Expr::Fail));
                }
            }
            None
        }
        _ => None,
    }
}

/// u-occurs: `x = V[x]; e → fail` when `V ≠ □`.
fn u_occurs(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Eqn(Value::Var(x), rhs), _rest) => {
            if let Expr::Value(v2) = &**rhs {
                if occurs_in(x, v2) {
                    return Some((Rule::UOccurs, Expr::Fail));
                }
            }
            None
        }
        _ => None,
    }
}

// ============================================================================
// Substitution and Orientation
// ============================================================================

/// subst: `X[x = v; e] → X{v/x}[x = v; e{v/x}]` for the first equation redex
/// that actually changes the term. The defining equation itself is left
/// untouched; everything on either side of it is substituted
/// capture-avoidingly.
fn subst_rule(expr: &Expr, names: &mut NameSupply) -> Option<(Rule, Expr)> {
    for redex in find_equations(expr) {
        let value_fvs = redex.value.free_vars();

        // Occurs check is u-occurs's business; x = x is inert.
        if value_fvs.contains(&redex.var) {
            continue;
        }

        // A binder on the path over a free variable of v scopes the value
        // below itself. Substituting across that binder would let the
        // variable escape, so the redex is left for the driver's descent to
        // the binder's own node.
        if value_fvs.iter().any(|y| redex.ctx.binds(y)) {
            continue;
        }

        let rest_subst = substitute(&redex.rest, &redex.var, &redex.value, names);
        let ctx_subst = redex.ctx.substitute(&redex.var, &redex.value, names);

        let result = ctx_subst.fill(Expr::Seq(
            ExprOrEqn::Eqn(
                Value::Var(redex.var.clone()),
                Box::new(Expr::Value(redex.value.clone())),
            ),
            Box::new(rest_subst),
        ));

        if result != *expr {
            return Some((Rule::Subst, result));
        }
    }
    None
}

/// hnf-swap: `hnf = x; e → x = hnf; e` so the variable takes the defining
/// side.
fn hnf_swap(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Eqn(lhs @ Value::Hnf(_), rhs), rest) => {
            if let Expr::Value(v @ Value::Var(_)) = &**rhs {
                return Some((
                    Rule::HnfSwap,
                    Expr::Seq(
                        ExprOrEqn::Eqn(v.clone(), Box::new(Expr::Value(lhs.clone()))),
                        rest.clone(),
                    ),
                ));
            }
            None
        }
        _ => None,
    }
}

/// var-swap: `y = x; e → x = y; e` when `x` was bound before `y`: the
/// earlier-bound variable takes the defining side, so repeated substitution
/// cannot ping-pong between the two orientations.
fn var_swap(expr: &Expr, order: &BinderOrder) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Eqn(Value::Var(y), rhs), rest) => {
            if let Expr::Value(Value::Var(x)) = &**rhs {
                if order.bound_before(x, y) {
                    return Some((
                        Rule::VarSwap,
                        Expr::Seq(
                            ExprOrEqn::Eqn(
                                Value::Var(x.clone()),
                                Box::new(Expr::var(y.0.clone())),
                            ),
                            rest.clone(),
                        ),
                    ));
                }
            }
            None
        }
        _ => None,
    }
}

/// seq-swap: `x = v; (y = w; e) → y = w; (x = v; e)` when `y` was bound
/// before `x`. Adjacent resolved equations settle into binder order; only
/// value right-hand sides may cross each other, so choice enumeration order
/// is preserved.
fn seq_swap(expr: &Expr, order: &BinderOrder) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Eqn(Value::Var(x), rhs1), rest) => {
            if !matches!(&**rhs1, Expr::Value(_)) {
                return None;
            }
            if let Expr::Seq(ExprOrEqn::Eqn(Value::Var(y), rhs2), e) = &**rest {
                if matches!(&**rhs2, Expr::Value(_)) && order.bound_before(y, x) {
                    return Some((
                        Rule::SeqSwap,
                        Expr::Seq(
                            ExprOrEqn::Eqn(Value::Var(y.clone()), rhs2.clone()),
                            Box::new(Expr::Seq(
                                ExprOrEqn::Eqn(Value::Var(x.clone()), rhs1.clone()),
                                e.clone(),
                            )),
                        ),
                    ));
                }
            }
            None
        }
        _ => None,
    }
}
