use crate::parse;
use tinyfn::{Defn, Expr};

#[test]
fn parses_empty_program() {
    let program = parse("").unwrap();
    assert_eq!(program.defns, vec![]);
    assert_eq!(program.body, None);
}

#[test]
fn parses_bare_number() {
    let program = parse("170").unwrap();
    assert_eq!(program.body, Some(Expr::num(170.0)));
}

#[test]
fn parses_negative_fraction() {
    let program = parse("-8.3342").unwrap();
    assert_eq!(program.body, Some(Expr::num(-8.3342)));
}

#[test]
fn parses_nested_add1() {
    let program = parse("(add1 (add1 (add1 40)))").unwrap();
    assert_eq!(
        program.body,
        Some(Expr::add1(Expr::add1(Expr::add1(Expr::num(40.0)))))
    );
}

#[test]
fn parses_let_and_plus() {
    let program = parse("(let (x 5) (let (y 15) (let (z -1) (+ x (+ y z)))))").unwrap();
    assert_eq!(
        program.body,
        Some(Expr::let_(
            "x",
            Expr::num(5.0),
            Expr::let_(
                "y",
                Expr::num(15.0),
                Expr::let_(
                    "z",
                    Expr::num(-1.0),
                    Expr::plus(Expr::name("x"), Expr::plus(Expr::name("y"), Expr::name("z"))),
                ),
            ),
        ))
    );
}

#[test]
fn parses_function_definition_and_call() {
    let program = parse(
        "(def (fact n) (if (= n 0) 1 (* n (fact (sub1 n))))) (fact 5)",
    )
    .unwrap();
    assert_eq!(
        program.defns,
        vec![Defn::new(
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
        )]
    );
    assert_eq!(program.body, Some(Expr::app("fact", vec![Expr::num(5.0)])));
}

#[test]
fn duplicate_function_name_is_an_error() {
    let input = "(def (f x) x) (def (f y) y) (f 1)";
    assert!(parse(input).is_err());
}

#[test]
fn ignores_line_comments() {
    let program = parse("# a comment\n170 # trailing").unwrap();
    assert_eq!(program.body, Some(Expr::num(170.0)));
}

#[test]
fn application_with_no_args() {
    let program = parse("(def (loop) (loop)) (loop)").unwrap();
    assert_eq!(program.body, Some(Expr::app("loop", vec![])));
}

#[test]
fn rejects_unbalanced_input() {
    assert!(parse("(+ 1 2").is_err());
}

#[test]
fn minus_directly_against_a_negative_literal_does_not_parse() {
    // "-5" reads as one negative number, leaving `app_expr` to see a
    // number where it expects a symbol.
    assert!(parse("(-5 3)").is_err());
}

#[test]
fn minus_separated_from_its_operand_parses() {
    let program = parse("(- 5 3)").unwrap();
    assert_eq!(program.body, Some(Expr::minus(Expr::num(5.0), Expr::num(3.0))));
}
