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

// src/core/analysis.rs
// Bound-variable traversal and binder ordering.
//
// Free variables live on the term model (`Expr::free_vars`); this module
// answers the remaining analysis questions: which names are bound where in
// the fixed left-to-right traversal, and which of two variables was bound
// first in the whole current program. The latter is the tie-break that
// orients `VAR-SWAP`/`SEQ-SWAP`.

use crate::ast::{Expr, ExprOrEqn, HeadNormalForm, Value, Var};
use std::collections::{HashMap, HashSet};

/// Binder positions of the current program, indexed by name. Recomputed from
/// the root whenever the orientation rules need it; binder names are assumed
/// unique among live binders (the desugarer and the alpha-renaming in this
/// crate both maintain that).
#[derive(Debug, Clone, Default)]
pub struct BinderOrder {
    index: HashMap<Var, usize>,
}

impl BinderOrder {
    pub fn of(expr: &Expr) -> Self {
        let mut order = BinderOrder::default();
        let mut next = 0;
        collect_binders(expr, &mut |x| {
            order.index.entry(x.clone()).or_insert_with(|| {
                let i = next;
                next += 1;
                i
            });
        });
        order
    }

    /// Was `a` bound before `b`? False when either has no binding site.
    pub fn bound_before(&self, a: &Var, b: &Var) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(ia), Some(ib)) => ia < ib,
            _ => false,
        }
    }
}

/// Every binder-introduced name, in no particular order.
pub fn bound_vars(expr: &Expr) -> HashSet<Var> {
    let mut set = HashSet::new();
    collect_binders(expr, &mut |x| {
        set.insert(x.clone());
    });
    set
}

/// Binder names in left-to-right binding-site order (first site wins).
pub fn binding_order(expr: &Expr) -> Vec<Var> {
    let mut seen = HashSet::new();
    let mut order = Vec::new();
    collect_binders(expr, &mut |x| {
        if seen.insert(x.clone()) {
            order.push(x.clone());
        }
    });
    order
}

/// Every name occurring in the term, bound or free; used to seed the
/// fresh-name registry.
pub fn all_names(expr: &Expr) -> HashSet<String> {
    let mut names = HashSet::new();
    collect_names(expr, &mut names);
    names
}

fn collect_binders(expr: &Expr, visit: &mut impl FnMut(&Var)) {
    match expr {
        Expr::Value(v) => collect_binders_value(v, visit),
        Expr::Fail => {}
        Expr::Seq(eq, e) => {
            match eq {
                ExprOrEqn::Expr(lhs) => collect_binders(lhs, visit),
                ExprOrEqn::Eqn(v, rhs) => {
                    collect_binders_value(v, visit);
                    collect_binders(rhs, visit);
                }
            }
            collect_binders(e, visit);
        }
        Expr::Exists(x, e) => {
            visit(x);
            collect_binders(e, visit);
        }
        Expr::Choice(e1, e2) => {
            collect_binders(e1, visit);
            collect_binders(e2, visit);
        }
        Expr::App(v1, v2) => {
            collect_binders_value(v1, visit);
            collect_binders_value(v2, visit);
        }
        Expr::One(e) | Expr::All(e) => collect_binders(e, visit),
    }
}

fn collect_binders_value(val: &Value, visit: &mut impl FnMut(&Var)) {
    match val {
        Value::Var(_) => {}
        Value::Hnf(HeadNormalForm::Int(_))
        | Value::Hnf(HeadNormalForm::Str(_))
        | Value::Hnf(HeadNormalForm::Op(_)) => {}
        Value::Hnf(HeadNormalForm::Tuple(vs)) => {
            for v in vs {
                collect_binders_value(v, visit);
            }
        }
        Value::Hnf(HeadNormalForm::Lambda(x, e)) => {
            visit(x);
            collect_binders(e, visit);
        }
    }
}

fn collect_names(expr: &Expr, names: &mut HashSet<String>) {
    match expr {
        Expr::Value(v) => collect_names_value(v, names),
        Expr::Fail => {}
        Expr::Seq(eq, e) => {
            match eq {
                ExprOrEqn::Expr(lhs) => collect_names(lhs, names),
                ExprOrEqn::Eqn(v, rhs) => {
                    collect_names_value(v, names);
                    collect_names(rhs, names);
                }
            }
            collect_names(e, names);
        }
        Expr::Exists(x, e) => {
            names.insert(x.0.clone());
            collect_names(e, names);
        }
        Expr::Choice(e1, e2) => {
            collect_names(e1, names);
            collect_names(e2, names);
        }
        Expr::App(v1, v2) => {
            collect_names_value(v1, names);
            collect_names_value(v2, names);
        }
        Expr::One(e) | Expr::All(e) => collect_names(e, names),
    }
}

fn collect_names_value(val: &Value, names: &mut HashSet<String>) {
    match val {
        Value::Var(x) => {
            names.insert(x.0.clone());
        }
        Value::Hnf(HeadNormalForm::Int(_))
        | Value::Hnf(HeadNormalForm::Str(_))
        | Value::Hnf(HeadNormalForm::Op(_)) => {}
        Value::Hnf(HeadNormalForm::Tuple(vs)) => {
            for v in vs {
                collect_names_value(v, names);
            }
        }
        Value::Hnf(HeadNormalForm::Lambda(x, e)) => {
            names.insert(x.0.clone());
            collect_names(e, names);
        }
    }
}
