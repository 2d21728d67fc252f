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

// src/error.rs
// Common error type.
//
// These errors are precondition/invariant violations, not computational
// failure: a failing program reduces to the `fail` term and is a legitimate
// result, never an `Err`.

use crate::ast::Var;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The program term has free variables; rewriting never starts.
    OpenProgram(Vec<Var>),
    /// The program term is not wrapped in a top-level `one`/`all`.
    MissingWrapper,
    /// A name was registered with the fresh-name supply twice.
    NameReserved(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenProgram(vars) => {
                write!(f, "program must be closed, but has free variables:")?;
                for v in vars {
                    write!(f, " {}", v)?;
                }
                Ok(())
            }
            Error::MissingWrapper => {
                write!(f, "program must carry a top-level one{{..}} or all{{..}} wrapper")
            }
            Error::NameReserved(name) => {
                write!(f, "name {:?} is already reserved in the fresh-name supply", name)
            }
        }
    }
}

impl std::error::Error for Error {}
