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

// src/core/context.rs
// Context grammars and redex search.
//
// A context is a term with one hole, addressed explicitly so rewrite rules
// never have to compare node identities: searches return a context handle,
// rules rebuild through `fill`. Decomposition is a fixed left-to-right
// traversal, so the first match is always the same "next redex".

use crate::ast::*;
use crate::core::subst::{subst_expr_or_eqn, subst_value, substitute};
use crate::names::NameSupply;
use std::collections::HashSet;

// ============================================================================
// Execution contexts
// ============================================================================

/// Execution context:
/// `X ::= □ | v = X; e | X; e | eq; X | ∃x. X`
/// The substrate of `SUBST`, `EQN-ELIM` and `FAIL-ELIM`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecContext {
    Hole,
    /// `v = X; e`, the hole in an equation's expression operand
    EqnRight(Value, Box<ExecContext>, Box<Expr>),
    /// `X; e`
    SeqLeft(Box<ExecContext>, Box<Expr>),
    /// `eq; X`
    SeqRight(ExprOrEqn, Box<ExecContext>),
    /// `∃x. X`
    Exists(Var, Box<ExecContext>),
}

impl ExecContext {
    pub fn hole() -> Self {
        ExecContext::Hole
    }

    /// Plug an expression into the hole.
    pub fn fill(&self, expr: Expr) -> Expr {
        match self {
            ExecContext::Hole => expr,

            ExecContext::EqnRight(v, ctx, e) => {
                let inner = ctx.fill(expr);
                Expr::Seq(ExprOrEqn::Eqn(v.clone(), Box::new(inner)), e.clone())
            }

            ExecContext::SeqLeft(ctx, e) => {
                let inner = ctx.fill(expr);
                Expr::Seq(ExprOrEqn::Expr(Box::new(inner)), e.clone())
            }

            ExecContext::SeqRight(eq, ctx) => {
                let inner = ctx.fill(expr);
                Expr::Seq(eq.clone(), Box::new(inner))
            }

            ExecContext::Exists(x, ctx) => {
                let inner = ctx.fill(expr);
                Expr::Exists(x.clone(), Box::new(inner))
            }
        }
    }

    /// All decompositions of `expr` into a context and a focused sub-term,
    /// hole first, then the left branch of each sequence/equation before the
    /// continuation.
    pub fn decompose(expr: &Expr) -> Vec<(ExecContext, Expr)> {
        let mut results = Vec::new();
        results.push((ExecContext::Hole, expr.clone()));

        match expr {
            Expr::Seq(eq, e) => {
                match eq {
                    ExprOrEqn::Eqn(v, rhs) => {
                        for (inner_ctx, focused) in ExecContext::decompose(rhs) {
                            results.push((
                                ExecContext::EqnRight(v.clone(), Box::new(inner_ctx), e.clone()),
                                focused,
                            ));
                        }
                    }
                    ExprOrEqn::Expr(lhs) => {
                        for (inner_ctx, focused) in ExecContext::decompose(lhs) {
                            results.push((
                                ExecContext::SeqLeft(Box::new(inner_ctx), e.clone()),
                                focused,
                            ));
                        }
                    }
                }

                for (inner_ctx, focused) in ExecContext::decompose(e) {
                    results.push((
                        ExecContext::SeqRight(eq.clone(), Box::new(inner_ctx)),
                        focused,
                    ));
                }
            }

            Expr::Exists(x, e) => {
                for (inner_ctx, focused) in ExecContext::decompose(e) {
                    results.push((ExecContext::Exists(x.clone(), Box::new(inner_ctx)), focused));
                }
            }

            _ => {}
        }

        results
    }

    /// Does any frame of this context bind `x`?
    pub fn binds(&self, x: &Var) -> bool {
        match self {
            ExecContext::Hole => false,
            ExecContext::EqnRight(_, ctx, _) => ctx.binds(x),
            ExecContext::SeqLeft(ctx, _) => ctx.binds(x),
            ExecContext::SeqRight(_, ctx) => ctx.binds(x),
            ExecContext::Exists(y, ctx) => y == x || ctx.binds(x),
        }
    }

    /// Free variables of the context itself (`fail` has none, so filling the
    /// hole with it leaves exactly the context's contribution).
    pub fn free_vars(&self) -> HashSet<Var> {
        self.fill(Expr::Fail).free_vars()
    }

    /// `X{v/x}`: capture-avoiding substitution over every frame component.
    /// Binders on the path scope over the hole as well, so they are kept
    /// as-is; the caller guards against paths that rebind `x`.
    pub fn substitute(&self, x: &Var, v: &Value, names: &mut NameSupply) -> ExecContext {
        match self {
            ExecContext::Hole => ExecContext::Hole,

            ExecContext::EqnRight(lhs, ctx, e) => ExecContext::EqnRight(
                subst_value(lhs, x, v, names),
                Box::new(ctx.substitute(x, v, names)),
                Box::new(substitute(e, x, v, names)),
            ),

            ExecContext::SeqLeft(ctx, e) => ExecContext::SeqLeft(
                Box::new(ctx.substitute(x, v, names)),
                Box::new(substitute(e, x, v, names)),
            ),

            ExecContext::SeqRight(eq, ctx) => ExecContext::SeqRight(
                subst_expr_or_eqn(eq, x, v, names),
                Box::new(ctx.substitute(x, v, names)),
            ),

            ExecContext::Exists(y, ctx) => {
                if y == x {
                    // Rebinding on the path shadows the hole; nothing below
                    // refers to the outer x.
                    ExecContext::Exists(y.clone(), ctx.clone())
                } else {
                    ExecContext::Exists(y.clone(), Box::new(ctx.substitute(x, v, names)))
                }
            }
        }
    }
}

// ============================================================================
// Equation search
// ============================================================================

/// An addressed equation redex: `X[x = v; rest]`.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationRedex {
    pub ctx: ExecContext,
    pub var: Var,
    pub value: Value,
    pub rest: Expr,
}

/// Every `x = v; e` position reachable through execution contexts, in
/// traversal order. Positions whose path rebinds the equation variable are
/// skipped: that equation belongs to the inner binder and is found again
/// when the driver descends past it.
pub fn find_equations(expr: &Expr) -> Vec<EquationRedex> {
    let mut redexes = Vec::new();
    for (ctx, focused) in ExecContext::decompose(expr) {
        if let Expr::Seq(ExprOrEqn::Eqn(Value::Var(x), rhs), rest) = &focused {
            if let Expr::Value(v) = &**rhs {
                if !ctx.binds(x) {
                    redexes.push(EquationRedex {
                        ctx,
                        var: x.clone(),
                        value: v.clone(),
                        rest: (**rest).clone(),
                    });
                }
            }
        }
    }
    redexes
}

/// Failing-context search: is some strictly-inner position (the hole of the
/// top call excluded) a `fail`? Failure does not cross `Choice`/`One`/`All`;
/// those have dedicated rules.
pub fn has_failing_position(expr: &Expr) -> bool {
    ExecContext::decompose(expr)
        .into_iter()
        .any(|(ctx, focused)| ctx != ExecContext::Hole && focused.is_fail())
}

// ============================================================================
// Value contexts (occurs check)
// ============================================================================

/// Value context: `V ::= □ | ⟨v₁, ..., V, ..., vₙ⟩`
#[derive(Debug, Clone, PartialEq)]
pub enum ValueContext {
    Hole,
    Tuple(Vec<Value>, Box<ValueContext>, Vec<Value>),
}

impl ValueContext {
    pub fn hole() -> Self {
        ValueContext::Hole
    }

    pub fn fill(&self, val: Value) -> Value {
        match self {
            ValueContext::Hole => val,
            ValueContext::Tuple(before, ctx, after) => {
                let mut vals = before.clone();
                vals.push(ctx.fill(val));
                vals.extend(after.clone());
                Value::Hnf(HeadNormalForm::Tuple(vals))
            }
        }
    }

    /// First occurrence of `target` inside `val`, as a value context.
    pub fn find_var_in_value(val: &Value, target: &Var) -> Option<ValueContext> {
        match val {
            Value::Var(x) if x == target => Some(ValueContext::Hole),

            Value::Hnf(HeadNormalForm::Tuple(vals)) => {
                for (i, v) in vals.iter().enumerate() {
                    if let Some(inner_ctx) = Self::find_var_in_value(v, target) {
                        let before = vals[..i].to_vec();
                        let after = vals[i + 1..].to_vec();
                        return Some(ValueContext::Tuple(before, Box::new(inner_ctx), after));
                    }
                }
                None
            }

            _ => None,
        }
    }
}

/// Occurs check: does `x` appear strictly inside `v` (below the hole)?
pub fn occurs_in(x: &Var, v: &Value) -> bool {
    matches!(ValueContext::find_var_in_value(v, x), Some(ctx) if ctx != ValueContext::Hole)
}

// ============================================================================
// Choice contexts
// ============================================================================

/// Choice context:
/// `CX ::= □ | v = CX; e | CX; e | eq; CX | ∃x. CX`
/// Wrapper-free (never descends into `one`/`all`/`⊕`); the hole designates a
/// `Choice`. The substrate of `CHOOSE`.
#[derive(Debug, Clone, PartialEq)]
pub enum ChoiceContext {
    Hole,
    EqnRight(Value, Box<ChoiceContext>, Box<Expr>),
    SeqLeft(Box<ChoiceContext>, Box<Expr>),
    SeqRight(ExprOrEqn, Box<ChoiceContext>),
    Exists(Var, Box<ChoiceContext>),
}

impl ChoiceContext {
    pub fn hole() -> Self {
        ChoiceContext::Hole
    }

    pub fn fill(&self, expr: Expr) -> Expr {
        match self {
            ChoiceContext::Hole => expr,

            ChoiceContext::EqnRight(v, ctx, e) => {
                let inner = ctx.fill(expr);
                Expr::Seq(ExprOrEqn::Eqn(v.clone(), Box::new(inner)), e.clone())
            }

            ChoiceContext::SeqLeft(ctx, e) => {
                let inner = ctx.fill(expr);
                Expr::Seq(ExprOrEqn::Expr(Box::new(inner)), e.clone())
            }

            ChoiceContext::SeqRight(eq, ctx) => {
                let inner = ctx.fill(expr);
                Expr::Seq(eq.clone(), Box::new(inner))
            }

            ChoiceContext::Exists(x, ctx) => {
                let inner = ctx.fill(expr);
                Expr::Exists(x.clone(), Box::new(inner))
            }
        }
    }

    pub fn decompose(expr: &Expr) -> Vec<(ChoiceContext, Expr)> {
        let mut results = Vec::new();
        results.push((ChoiceContext::Hole, expr.clone()));

        match expr {
            Expr::Seq(eq, e) => {
                match eq {
                    ExprOrEqn::Eqn(v, rhs) => {
                        for (inner_ctx, focused) in ChoiceContext::decompose(rhs) {
                            results.push((
                                ChoiceContext::EqnRight(v.clone(), Box::new(inner_ctx), e.clone()),
                                focused,
                            ));
                        }
                    }
                    ExprOrEqn::Expr(lhs) => {
                        for (inner_ctx, focused) in ChoiceContext::decompose(lhs) {
                            results.push((
                                ChoiceContext::SeqLeft(Box::new(inner_ctx), e.clone()),
                                focused,
                            ));
                        }
                    }
                }

                for (inner_ctx, focused) in ChoiceContext::decompose(e) {
                    results.push((
                        ChoiceContext::SeqRight(eq.clone(), Box::new(inner_ctx)),
                        focused,
                    ));
                }
            }

            Expr::Exists(x, e) => {
                for (inner_ctx, focused) in ChoiceContext::decompose(e) {
                    results.push((ChoiceContext::Exists(x.clone(), Box::new(inner_ctx)), focused));
                }
            }

            _ => {}
        }

        results
    }
}

/// The next distributable choice under a wrapper body: the first `Choice`
/// under a non-hole choice context in traversal order. A choice at the hole
/// itself is the business of the `one`/`all`/`⊕` simplification rules.
pub fn find_choice(expr: &Expr) -> Option<(ChoiceContext, Expr, Expr)> {
    for (ctx, focused) in ChoiceContext::decompose(expr) {
        if ctx == ChoiceContext::Hole {
            continue;
        }
        if let Expr::Choice(e1, e2) = focused {
            return Some((ctx, *e1, *e2));
        }
    }
    None
}

/// Duplicate a choice context over the two branches of its hole: the caller
/// gets `CX[l] ⊕ CX[r]`, two fully independent trees (each `fill` clones the
/// context skeleton, and names rather than node identities carry meaning).
pub fn distribute(ctx: &ChoiceContext, l: Expr, r: Expr) -> Expr {
    Expr::Choice(Box::new(ctx.fill(l)), Box::new(ctx.fill(r)))
}
