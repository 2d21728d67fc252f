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

// src/driver.rs
// The rewrite-to-fixpoint driver.

use crate::ast::{Expr, Program};
use crate::core::analysis::BinderOrder;
use crate::error::Error;
use crate::names::NameSupply;
use crate::rewrite::{rewrite_step, Rule};
use log::{debug, trace};

/// Callback invoked after every rewrite step with the rule that fired and
/// the whole term it produced.
pub trait StepObserver {
    fn on_step(&mut self, rule: Rule, term: &Expr);
}

/// Observer that ignores every step.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl StepObserver for NullObserver {
    fn on_step(&mut self, _rule: Rule, _term: &Expr) {}
}

/// Observer that records the sequence of rule names.
#[derive(Debug, Default, Clone)]
pub struct TraceObserver {
    pub rules: Vec<&'static str>,
}

impl TraceObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepObserver for TraceObserver {
    fn on_step(&mut self, rule: Rule, _term: &Expr) {
        self.rules.push(rule.name());
    }
}

/// Rewrite a validated program to fixpoint. Each step restarts the rule
/// search from the root with a freshly computed binder order, so the result
/// depends only on the input term. Divergent programs loop here; bounding
/// execution is the caller's business.
pub fn interpret(
    program: &Program,
    names: &mut NameSupply,
    observer: &mut impl StepObserver,
) -> Expr {
    let mut term = program.expr.clone();
    names.reserve_program(&term);
    debug!("interpret: start {}", term);

    let mut steps = 0usize;
    loop {
        let order = BinderOrder::of(&term);
        match rewrite_step(&term, names, &order) {
            Some((rule, next)) => {
                steps += 1;
                trace!("step {}: {} ⊢ {}", steps, rule, next);
                observer.on_step(rule, &next);
                term = next;
            }
            None => break,
        }
    }

    debug!("interpret: done after {} steps: {}", steps, term);
    term
}

/// Checked entry point: validates the top-level wrapper and closedness of a
/// raw expression before rewriting it.
pub fn interpret_expr(
    expr: Expr,
    names: &mut NameSupply,
    observer: &mut impl StepObserver,
) -> Result<Expr, Error> {
    let program = Program::new(expr)?;
    Ok(interpret(&program, names, observer))
}
