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

// src/names.rs
// Fresh-name supply: monotonic counter plus a registry of reserved names.
//
// One supply per interpretation run, threaded explicitly through the rules
// that need it; independent runs never share state.

use crate::ast::{Expr, Var};
use crate::core::analysis::all_names;
use crate::error::Error;
use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct NameSupply {
    counter: usize,
    used: HashSet<String>,
}

impl NameSupply {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next globally-unique variable for this run. The counter is monotonic;
    /// candidates colliding with a reserved name are skipped.
    pub fn fresh(&mut self, prefix: &str) -> Var {
        loop {
            let candidate = format!("{}_{}", prefix, self.counter);
            self.counter += 1;
            if self.used.insert(candidate.clone()) {
                return Var(candidate);
            }
        }
    }

    /// Reserve a name the desugaring phase already emitted, so `fresh` never
    /// reissues it. Reserving the same name twice means two pipeline stages
    /// disagree about who owns it, which is fatal.
    pub fn register(&mut self, name: impl Into<String>) -> Result<(), Error> {
        let name = name.into();
        if !self.used.insert(name.clone()) {
            return Err(Error::NameReserved(name));
        }
        Ok(())
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Reserve every distinct name occurring in a term (bound or free).
    pub fn reserve_program(&mut self, expr: &Expr) {
        for name in all_names(expr) {
            self.used.insert(name);
        }
    }
}
