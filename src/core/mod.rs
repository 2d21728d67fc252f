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

// src/core/mod.rs

pub mod analysis;
pub mod context;
pub mod subst;
