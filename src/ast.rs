//! Abstract syntax tree for the source language: expressions and
//! function definitions. Every node is a plain, immutable value —
//! no behavior lives here beyond construction, equality, and display.

use std::fmt;

/// A numeric value. The language has exactly one scalar type, which
/// behaves like a signed number that may carry a fractional part.
pub type Number = f64;

/// An expression that can be evaluated to produce a [`Number`].
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(Number),
    Add1(Box<Expr>),
    Sub1(Box<Expr>),
    Plus(Box<Expr>, Box<Expr>),
    Minus(Box<Expr>, Box<Expr>),
    Times(Box<Expr>, Box<Expr>),
    Equals(Box<Expr>, Box<Expr>),
    If(Box<Expr>, Box<Expr>, Box<Expr>),
    Let(String, Box<Expr>, Box<Expr>),
    App(String, Vec<Expr>),
    Name(String),
}

impl Expr {
    pub fn num(value: Number) -> Expr {
        Expr::Num(value)
    }

    pub fn add1(operand: Expr) -> Expr {
        Expr::Add1(Box::new(operand))
    }

    pub fn sub1(operand: Expr) -> Expr {
        Expr::Sub1(Box::new(operand))
    }

    pub fn plus(left: Expr, right: Expr) -> Expr {
        Expr::Plus(Box::new(left), Box::new(right))
    }

    pub fn minus(left: Expr, right: Expr) -> Expr {
        Expr::Minus(Box::new(left), Box::new(right))
    }

    pub fn times(left: Expr, right: Expr) -> Expr {
        Expr::Times(Box::new(left), Box::new(right))
    }

    pub fn equals(left: Expr, right: Expr) -> Expr {
        Expr::Equals(Box::new(left), Box::new(right))
    }

    pub fn if_(cond: Expr, thn: Expr, els: Expr) -> Expr {
        Expr::If(Box::new(cond), Box::new(thn), Box::new(els))
    }

    pub fn let_(name: impl Into<String>, value: Expr, body: Expr) -> Expr {
        Expr::Let(name.into(), Box::new(value), Box::new(body))
    }

    pub fn app(fname: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::App(fname.into(), args)
    }

    pub fn name(name: impl Into<String>) -> Expr {
        Expr::Name(name.into())
    }
}

/// Formats a number the way the surface syntax spells it: no trailing
/// `.0` on integral values, ordinary decimal otherwise.
fn fmt_number(value: Number, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.fract() == 0.0 && value.is_finite() {
        write!(f, "{}", value as i64)
    } else {
        write!(f, "{}", value)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(value) => fmt_number(*value, f),
            Expr::Add1(e) => write!(f, "(add1 {})", e),
            Expr::Sub1(e) => write!(f, "(sub1 {})", e),
            Expr::Plus(l, r) => write!(f, "(+ {} {})", l, r),
            Expr::Minus(l, r) => write!(f, "(- {} {})", l, r),
            Expr::Times(l, r) => write!(f, "(* {} {})", l, r),
            Expr::Equals(l, r) => write!(f, "(= {} {})", l, r),
            Expr::If(c, t, e) => write!(f, "(if {} {} {})", c, t, e),
            Expr::Let(name, value, body) => write!(f, "(let ({} {}) {})", name, value, body),
            Expr::App(fname, args) => {
                write!(f, "({}", fname)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
            Expr::Name(name) => write!(f, "{}", name),
        }
    }
}

/// A function definition: a name, an ordered list of distinct
/// parameter names, and a body expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Defn {
    pub name: String,
    pub params: Vec<String>,
    pub body: Expr,
}

impl Defn {
    pub fn new(name: impl Into<String>, params: Vec<String>, body: Expr) -> Defn {
        Defn {
            name: name.into(),
            params,
            body,
        }
    }
}

impl fmt::Display for Defn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(def ({}", self.name)?;
        for p in &self.params {
            write!(f, " {}", p)?;
        }
        write!(f, ")\n\t{})", self.body)
    }
}

/// A full program: its function definitions and an optional body
/// expression to evaluate against them.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub defns: Vec<Defn>,
    pub body: Option<Expr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_surface_syntax() {
        let e = Expr::let_(
            "x",
            Expr::num(5.0),
            Expr::plus(Expr::name("x"), Expr::num(1.0)),
        );
        assert_eq!(e.to_string(), "(let (x 5) (+ x 1))");
    }

    #[test]
    fn display_preserves_fraction() {
        assert_eq!(Expr::num(-8.3342).to_string(), "-8.3342");
        assert_eq!(Expr::num(170.0).to_string(), "170");
    }

    #[test]
    fn app_display_with_no_args() {
        let e = Expr::app("loop", vec![]);
        assert_eq!(e.to_string(), "(loop)");
    }

    #[test]
    fn defn_display() {
        let d = Defn::new(
            "fact",
            vec!["n".to_string()],
            Expr::if_(
                Expr::equals(Expr::name("n"), Expr::num(0.0)),
                Expr::num(1.0),
                Expr::times(
                    Expr::name("n"),
                    Expr::app("fact", vec![Expr::sub1(Expr::name("n"))]),
                ),
            ),
        );
        assert_eq!(
            d.to_string(),
            "(def (fact n)\n\t(if (= n 0) 1 (* n (fact (sub1 n)))))"
        );
    }
}
