//! Walks the pest parse tree into [`tinyfn`] AST values.

use std::collections::HashSet;

use pest::iterators::Pair;
use tinyfn::{Defn, Expr, Program};

use crate::{ParseError, Rule};

pub fn process_program(pair: Pair<Rule>) -> Result<Program, ParseError> {
    let mut defns = Vec::new();
    let mut body = None;

    for child in pair.into_inner() {
        match child.as_rule() {
            Rule::defn => defns.push(process_defn(child)),
            Rule::expr => body = Some(process_expr(child)),
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }

    let mut seen = HashSet::new();
    for defn in &defns {
        if !seen.insert(defn.name.clone()) {
            return Err(ParseError::DuplicateDefinition(defn.name.clone()));
        }
    }

    Ok(Program { defns, body })
}

fn process_defn(pair: Pair<Rule>) -> Defn {
    let mut pairs = pair.into_inner();
    let name = pairs.next().unwrap().as_str().to_string();

    let mut params = Vec::new();
    let mut next = pairs.next().unwrap();
    while next.as_rule() == Rule::symbol {
        params.push(next.as_str().to_string());
        next = pairs.next().unwrap();
    }
    // `next` is now the body expr.
    let body = process_expr(next);

    Defn::new(name, params, body)
}

fn process_expr(pair: Pair<Rule>) -> Expr {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::number => Expr::num(inner.as_str().parse().unwrap()),
        Rule::symbol => Expr::name(inner.as_str()),
        Rule::add1_expr => Expr::add1(process_expr(inner.into_inner().next().unwrap())),
        Rule::sub1_expr => Expr::sub1(process_expr(inner.into_inner().next().unwrap())),
        Rule::plus_expr => {
            let (l, r) = two_exprs(inner);
            Expr::plus(l, r)
        }
        Rule::minus_expr => {
            let (l, r) = two_exprs(inner);
            Expr::minus(l, r)
        }
        Rule::times_expr => {
            let (l, r) = two_exprs(inner);
            Expr::times(l, r)
        }
        Rule::equals_expr => {
            let (l, r) = two_exprs(inner);
            Expr::equals(l, r)
        }
        Rule::if_expr => {
            let mut pairs = inner.into_inner();
            let cond = process_expr(pairs.next().unwrap());
            let thn = process_expr(pairs.next().unwrap());
            let els = process_expr(pairs.next().unwrap());
            Expr::if_(cond, thn, els)
        }
        Rule::let_expr => {
            let mut pairs = inner.into_inner();
            let name = pairs.next().unwrap().as_str().to_string();
            let value = process_expr(pairs.next().unwrap());
            let body = process_expr(pairs.next().unwrap());
            Expr::let_(name, value, body)
        }
        Rule::app_expr => {
            let mut pairs = inner.into_inner();
            let name = pairs.next().unwrap().as_str().to_string();
            let args = pairs.map(process_expr).collect();
            Expr::app(name, args)
        }
        _ => unreachable!(),
    }
}

fn two_exprs(pair: Pair<Rule>) -> (Expr, Expr) {
    let mut pairs = pair.into_inner();
    let l = process_expr(pairs.next().unwrap());
    let r = process_expr(pairs.next().unwrap());
    (l, r)
}
