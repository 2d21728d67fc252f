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

// src/lib.rs
// Verse calculus rewriting engine library

pub mod ast;
pub mod core;
pub mod driver;
pub mod error;
pub mod names;
pub mod pretty;
pub mod rewrite;

// Re-export commonly used items
pub use ast::{Expr, ExprOrEqn, HeadNormalForm, PrimOp, Program, Value, Var};
pub use crate::core::analysis::BinderOrder;
pub use crate::core::context::{ChoiceContext, ExecContext, ValueContext};
pub use crate::core::subst::substitute;
pub use driver::{interpret, interpret_expr, NullObserver, StepObserver, TraceObserver};
pub use error::Error;
pub use names::NameSupply;
pub use rewrite::{
    rewrite_application, rewrite_choice, rewrite_elimination, rewrite_normalization,
    rewrite_step, rewrite_unification, Rule,
};
