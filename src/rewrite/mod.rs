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

// src/rewrite/mod.rs
// Rewrite rules, grouped by family and tried in a fixed priority order.

pub mod application;
pub mod choice;
pub mod elimination;
pub mod normalization;
pub mod unification;

pub use application::rewrite_application;
pub use choice::rewrite_choice;
pub use elimination::rewrite_elimination;
pub use normalization::rewrite_normalization;
pub use unification::rewrite_unification;

use crate::ast::{Expr, ExprOrEqn};
use crate::core::analysis::BinderOrder;
use crate::names::NameSupply;
use std::fmt;

/// The closed set of rewrite rules. `Display` gives the fixed names reported
/// to step observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    // Application
    AppAddInt,
    AppAddStr,
    AppSub,
    AppMult,
    AppDiv,
    AppDivZero,
    AppGt,
    AppGtFail,
    AppLt,
    AppLtFail,
    AppBeta,
    AppTup,
    AppTup0,
    // Unification
    ULit,
    UTup,
    UFail,
    UOccurs,
    Subst,
    HnfSwap,
    VarSwap,
    SeqSwap,
    // Elimination
    ValElim,
    ExiElim,
    EqnElim,
    FailElim,
    // Normalisation
    ExiFloat,
    SeqAssoc,
    EqnFloat,
    // Choice
    OneFail,
    OneValue,
    OneChoice,
    AllFail,
    AllValue,
    AllChoice,
    ChooseR,
    ChooseL,
    ChooseAssoc,
    Choose,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::AppAddInt => "APP-ADD-INT",
            Rule::AppAddStr => "APP-ADD-STR",
            Rule::AppSub => "APP-SUB",
            Rule::AppMult => "APP-MULT",
            Rule::AppDiv => "APP-DIV",
            Rule::AppDivZero => "APP-DIV-ZERO",
            Rule::AppGt => "APP-GT",
            Rule::AppGtFail => "APP-GT-FAIL",
            Rule::AppLt => "APP-LT",
            Rule::AppLtFail => "APP-LT-FAIL",
            Rule::AppBeta => "APP-BETA",
            Rule::AppTup => "APP-TUP",
            Rule::AppTup0 => "APP-TUP-0",
            Rule::ULit => "U-LIT",
            Rule::UTup => "U-TUP",
            Rule::UFail => "U-FAIL",
            Rule::UOccurs => "U-OCCURS",
            Rule::Subst => "SUBST",
            Rule::HnfSwap => "HNF-SWAP",
            Rule::VarSwap => "VAR-SWAP",
            Rule::SeqSwap => "SEQ-SWAP",
            Rule::ValElim => "VAL-ELIM",
            Rule::ExiElim => "EXI-ELIM",
            Rule::EqnElim => "EQN-ELIM",
            Rule::FailElim => "FAIL-ELIM",
            Rule::ExiFloat => "EXI-FLOAT",
            Rule::SeqAssoc => "SEQ-ASSOC",
            Rule::EqnFloat => "EQN-FLOAT",
            Rule::OneFail => "ONE-FAIL",
            Rule::OneValue => "ONE-VALUE",
            Rule::OneChoice => "ONE-CHOICE",
            Rule::AllFail => "ALL-FAIL",
            Rule::AllValue => "ALL-VALUE",
            Rule::AllChoice => "ALL-CHOICE",
            Rule::ChooseR => "CHOOSE-R",
            Rule::ChooseL => "CHOOSE-L",
            Rule::ChooseAssoc => "CHOOSE-ASSOC",
            Rule::Choose => "CHOOSE",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One rewrite step: all rules at this node in family order, otherwise the
/// same procedure on each immediate rewritable child left-to-right. The
/// first success anywhere ends the step.
pub fn rewrite_step(
    expr: &Expr,
    names: &mut NameSupply,
    order: &BinderOrder,
) -> Option<(Rule, Expr)> {
    if let Some(result) = rewrite_at(expr, names, order) {
        return Some(result);
    }
    rewrite_subexpr(expr, names, order)
}

/// All rule families at this node only.
fn rewrite_at(expr: &Expr, names: &mut NameSupply, order: &BinderOrder) -> Option<(Rule, Expr)> {
    rewrite_application(expr, names)
        .or_else(|| rewrite_unification(expr, names, order))
        .or_else(|| rewrite_elimination(expr))
        .or_else(|| rewrite_normalization(expr, names))
        .or_else(|| rewrite_choice(expr))
}

fn rewrite_subexpr(
    expr: &Expr,
    names: &mut NameSupply,
    order: &BinderOrder,
) -> Option<(Rule, Expr)> {
    match expr {
        Expr::Value(_) | Expr::Fail => None,

        Expr::Seq(eq, e) => {
            match eq {
                ExprOrEqn::Expr(eq_expr) => {
                    if let Some((rule, new_eq)) = rewrite_step(eq_expr, names, order) {
                        return Some((
                            rule,
                            Expr::Seq(ExprOrEqn::Expr(Box::new(new_eq)), e.clone()),
                        ));
                    }
                }
                ExprOrEqn::Eqn(v, rhs) => {
                    if let Some((rule, new_rhs)) = rewrite_step(rhs, names, order) {
                        return Some((
                            rule,
                            Expr::Seq(ExprOrEqn::Eqn(v.clone(), Box::new(new_rhs)), e.clone()),
                        ));
                    }
                }
            }

            if let Some((rule, new_e)) = rewrite_step(e, names, order) {
                return Some((rule, Expr::Seq(eq.clone(), Box::new(new_e))));
            }

            None
        }

        Expr::Exists(x, e) => rewrite_step(e, names, order)
            .map(|(rule, new_e)| (rule, Expr::Exists(x.clone(), Box::new(new_e)))),

        Expr::Choice(e1, e2) => {
            if let Some((rule, new_e1)) = rewrite_step(e1, names, order) {
                Some((rule, Expr::Choice(Box::new(new_e1), e2.clone())))
            } else {
                rewrite_step(e2, names, order)
                    .map(|(rule, new_e2)| (rule, Expr::Choice(e1.clone(), Box::new(new_e2))))
            }
        }

        // Application operands are values; the rules at this node are all
        // there is to try.
        Expr::App(_, _) => None,

        Expr::One(e) => rewrite_step(e, names, order)
            .map(|(rule, new_e)| (rule, Expr::One(Box::new(new_e)))),

        Expr::All(e) => rewrite_step(e, names, order)
            .map(|(rule, new_e)| (rule, Expr::All(Box::new(new_e)))),
    }
}
