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

// src/rewrite/normalization.rs
// Normalisation rules: floating binders outward, re-associating sequences.

use super::Rule;
use crate::ast::*;
use crate::core::subst::substitute;
use crate::names::NameSupply;
use std::collections::HashSet;

/// Apply one normalisation rule at this node, if any matches.
pub fn rewrite_normalization(expr: &Expr, names: &mut NameSupply) -> Option<(Rule, Expr)> {
    exi_float(expr, names)
        .or_else(|| seq_assoc(expr))
        .or_else(|| eqn_float(expr))
}

/// Rename the floated binder away from the free variables of the material it
/// is about to scope over.
fn avoid(
    x: &Var,
    e: &Expr,
    siblings: &HashSet<Var>,
    names: &mut NameSupply,
) -> (Var, Expr) {
    if siblings.contains(x) {
        let x_fresh = names.fresh(&x.0);
        let e = substitute(e, x, &Value::Var(x_fresh.clone()), names);
        (x_fresh, e)
    } else {
        (x.clone(), e.clone())
    }
}

/// exi-float: one step of floating an `∃` out of a sequence slot, an
/// equation right-hand side, or a choice branch. Never floats past `one` or
/// `all`.
///
/// - `(∃x. e₁); e₂ → ∃x. (e₁; e₂)`
/// - `eq; ∃x. e → ∃x. (eq; e)`
/// - `v = (∃x. e₁); e₂ → ∃x. (v = e₁; e₂)`
/// - `(∃x. e₁) ⊕ e₂ → ∃x. (e₁ ⊕ e₂)` and symmetrically
fn exi_float(expr: &Expr, names: &mut NameSupply) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Expr(lhs), rest) => {
            if let Expr::Exists(x, e1) = &**lhs {
                let (x, e1) = avoid(x, e1, &rest.free_vars(), names);
                return Some((
                    Rule::ExiFloat,
                    Expr::Exists(
                        x,
                        Box::new(Expr::Seq(ExprOrEqn::Expr(Box::new(e1)), rest.clone())),
                    ),
                ));
            }

            if let Expr::Exists(x, e) = &**rest {
                let (x, e) = avoid(x, e, &lhs.free_vars(), names);
                return Some((
                    Rule::ExiFloat,
                    Expr::Exists(
                        x,
                        Box::new(Expr::Seq(ExprOrEqn::Expr(lhs.clone()), Box::new(e))),
                    ),
                ));
            }

            None
        }

        Expr::Seq(ExprOrEqn::Eqn(v, rhs), rest) => {
            if let Expr::Exists(x, e1) = &**rhs {
                let mut siblings = v.free_vars();
                siblings.extend(rest.free_vars());
                let (x, e1) = avoid(x, e1, &siblings, names);
                return Some((
                    Rule::ExiFloat,
                    Expr::Exists(
                        x,
                        Box::new(Expr::Seq(
                            ExprOrEqn::Eqn(v.clone(), Box::new(e1)),
                            rest.clone(),
                        )),
                    ),
                ));
            }

            if let Expr::Exists(x, e) = &**rest {
                let mut siblings = v.free_vars();
                siblings.extend(rhs.free_vars());
                let (x, e) = avoid(x, e, &siblings, names);
                return Some((
                    Rule::ExiFloat,
                    Expr::Exists(
                        x,
                        Box::new(Expr::Seq(
                            ExprOrEqn::Eqn(v.clone(), rhs.clone()),
                            Box::new(e),
                        )),
                    ),
                ));
            }

            None
        }

        Expr::Choice(e1, e2) => {
            if let Expr::Exists(x, inner) = &**e1 {
                let (x, inner) = avoid(x, inner, &e2.free_vars(), names);
                return Some((
                    Rule::ExiFloat,
                    Expr::Exists(x, Box::new(Expr::Choice(Box::new(inner), e2.clone()))),
                ));
            }

            if let Expr::Exists(x, inner) = &**e2 {
                let (x, inner) = avoid(x, inner, &e1.free_vars(), names);
                return Some((
                    Rule::ExiFloat,
                    Expr::Exists(x, Box::new(Expr::Choice(e1.clone(), Box::new(inner)))),
                ));
            }

            None
        }

        _ => None,
    }
}

/// seq-assoc: `(eq; e₁); e₂ → eq; (e₁; e₂)`
fn seq_assoc(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Expr(lhs), e2) => {
            if let Expr::Seq(eq, e1) = &**lhs {
                return Some((
                    Rule::SeqAssoc,
                    Expr::Seq(
                        eq.clone(),
                        Box::new(Expr::Seq(ExprOrEqn::Expr(e1.clone()), e2.clone())),
                    ),
                ));
            }
            None
        }
        _ => None,
    }
}

/// eqn-float: `v = (eq; e₁); e₂ → eq; (v = e₁; e₂)`
fn eqn_float(expr: &Expr) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Seq(ExprOrEqn::Eqn(v, rhs), e2) => {
            if let Expr::Seq(eq, e1) = &**rhs {
                return Some((
                    Rule::EqnFloat,
                    Expr::Seq(
                        eq.clone(),
                        Box::new(Expr::Seq(
                            ExprOrEqn::Eqn(v.clone(), e1.clone()),
                            e2.clone(),
                        )),
                    ),
                ));
            }
            None
        }
        _ => None,
    }
}
