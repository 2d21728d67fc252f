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

// src/pretty.rs
// Display impls for terms, used by step traces and test diagnostics.

use crate::ast::*;
use std::fmt;

// ============================================================================
// Display Implementations
// ============================================================================

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", PrettyExpr(self, 0))
    }
}

impl fmt::Display for ExprOrEqn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExprOrEqn::Expr(e) => write!(f, "{}", e),
            ExprOrEqn::Eqn(v, e) => write!(f, "{} = {}", v, e),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Var(x) => write!(f, "{}", x),
            Value::Hnf(hnf) => write!(f, "{}", hnf),
        }
    }
}

impl fmt::Display for HeadNormalForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HeadNormalForm::Int(n) => write!(f, "{}", n),
            HeadNormalForm::Str(s) => write!(f, "{:?}", s),
            HeadNormalForm::Op(op) => write!(f, "{}", op),
            HeadNormalForm::Tuple(vs) => {
                write!(f, "⟨")?;
                for (i, v) in vs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "⟩")
            }
            HeadNormalForm::Lambda(x, e) => {
                write!(f, "λ{}. {}", x, e)
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

// ============================================================================
// Pretty Printer with Precedence
// ============================================================================

struct PrettyExpr<'a>(&'a Expr, u8);

// Precedence levels (higher = binds tighter)
const PREC_CHOICE: u8 = 1;
const PREC_SEQ: u8 = 2;
const PREC_EXISTS: u8 = 3;
const PREC_APP: u8 = 4;
const PREC_ATOM: u8 = 5;

impl<'a> fmt::Display for PrettyExpr<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let PrettyExpr(expr, parent_prec) = self;

        match expr {
            Expr::Value(v) => write!(f, "{}", v),

            Expr::Fail => write!(f, "fail"),

            Expr::One(e) => {
                if *parent_prec > PREC_ATOM {
                    write!(f, "(one{{{}}})", e)
                } else {
                    write!(f, "one{{{}}}", e)
                }
            }

            Expr::All(e) => {
                if *parent_prec > PREC_ATOM {
                    write!(f, "(all{{{}}})", e)
                } else {
                    write!(f, "all{{{}}}", e)
                }
            }

            Expr::App(v1, v2) => {
                let s = format!("{} {}", v1, format_value_in_app(v2));
                if *parent_prec > PREC_APP {
                    write!(f, "({})", s)
                } else {
                    write!(f, "{}", s)
                }
            }

            Expr::Choice(_, _) => {
                let s = format_choice(expr);
                if *parent_prec > PREC_CHOICE {
                    write!(f, "({})", s)
                } else {
                    write!(f, "{}", s)
                }
            }

            Expr::Seq(_, _) => {
                let s = format_seq(expr);
                if *parent_prec > PREC_SEQ {
                    write!(f, "({})", s)
                } else {
                    write!(f, "{}", s)
                }
            }

            Expr::Exists(_, _) => {
                let s = format_exists(expr);
                if *parent_prec > PREC_EXISTS {
                    write!(f, "({})", s)
                } else {
                    write!(f, "{}", s)
                }
            }
        }
    }
}

fn format_value_in_app(v: &Value) -> String {
    match v {
        Value::Hnf(HeadNormalForm::Tuple(_)) => format!("({})", v),
        _ => format!("{}", v),
    }
}

fn format_choice(expr: &Expr) -> String {
    let mut parts = Vec::new();
    collect_choices(expr, &mut parts);
    parts.join(" ⊕ ")
}

fn collect_choices(expr: &Expr, parts: &mut Vec<String>) {
    match expr {
        Expr::Choice(e1, e2) => {
            collect_choices(e1, parts);
            collect_choices(e2, parts);
        }
        _ => parts.push(format!("{}", PrettyExpr(expr, PREC_CHOICE + 1))),
    }
}

fn format_seq(expr: &Expr) -> String {
    let mut parts = Vec::new();
    collect_seqs(expr, &mut parts);
    parts.join("; ")
}

fn collect_seqs(expr: &Expr, parts: &mut Vec<String>) {
    match expr {
        Expr::Seq(eq, e) => {
            parts.push(format!("{}", eq));
            collect_seqs(e, parts);
        }
        _ => parts.push(format!("{}", PrettyExpr(expr, PREC_SEQ + 1))),
    }
}

fn format_exists(expr: &Expr) -> String {
    let mut vars = Vec::new();
    let body = collect_exists(expr, &mut vars);
    format!("∃{}. {}", vars.join(" "), body)
}

fn collect_exists<'a>(expr: &'a Expr, vars: &mut Vec<String>) -> &'a Expr {
    match expr {
        Expr::Exists(x, e) => {
            vars.push(format!("{}", x));
            collect_exists(e, vars)
        }
        _ => expr,
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;

    #[test]
    fn seq_chains_flatten() {
        let e = Expr::seq(
            Expr::eqn(Value::var("x"), Expr::int(3)),
            Expr::then(Expr::var("x"), Expr::var("x")),
        );
        assert_eq!(format!("{}", e), "x = 3; x; x");
    }

    #[test]
    fn choice_inside_one() {
        let e = Expr::one(Expr::choice(Expr::int(1), Expr::int(2)));
        assert_eq!(format!("{}", e), "one{1 ⊕ 2}");
    }

    #[test]
    fn exists_prefix_groups() {
        let e = Expr::exists(
            Var::new("x"),
            Expr::exists(Var::new("y"), Expr::var("x")),
        );
        assert_eq!(format!("{}", e), "∃x y. x");
    }

    #[test]
    fn strings_are_quoted() {
        assert_eq!(format!("{}", Expr::string("hi")), "\"hi\"");
    }
}
