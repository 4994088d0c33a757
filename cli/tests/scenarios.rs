//! End-to-end scenarios: surface syntax source in, final answer (or
//! error) out, through both parsing crates and the core library.

fn run_source(source: &str) -> Result<tinyfn::Number, cli::Error> {
    let program = lang_parser::parse(source)?;
    let instrs = tinyfn::compile(&program.defns, program.body.as_ref())?;
    let mut vm = tinyfn::Vm::new();
    Ok(vm.execute(&instrs)?)
}

#[test]
fn bare_integer_literal() {
    assert_eq!(run_source("170").unwrap(), 170.0);
}

#[test]
fn bare_fractional_literal() {
    assert_eq!(run_source("-8.3342").unwrap(), -8.3342);
}

#[test]
fn nested_add1() {
    assert_eq!(run_source("(add1 (add1 (add1 40)))").unwrap(), 43.0);
}

#[test]
fn nested_minus() {
    assert_eq!(run_source("(- (- 9 3) (- 3 2))").unwrap(), 5.0);
}

#[test]
fn if_with_false_condition() {
    assert_eq!(run_source("(if (= 4 5) (+ 2 3) (+ 4 5))").unwrap(), 9.0);
}

#[test]
fn nested_lets() {
    let src = "(let (x 5) (let (y 15) (let (z -1) (+ x (+ y z)))))";
    assert_eq!(run_source(src).unwrap(), 19.0);
}

#[test]
fn factorial_of_five() {
    let src = "(def (fact n) (if (= n 0) 1 (* n (fact (sub1 n))))) (fact 5)";
    assert_eq!(run_source(src).unwrap(), 120.0);
}

#[test]
fn mutual_recursion_even_of_sixteen() {
    let src = "
        (def (odd n) (if (= n 0) 0 (even (sub1 n))))
        (def (even n) (if (= n 0) 1 (odd (sub1 n))))
        (even 16)
    ";
    assert_eq!(run_source(src).unwrap(), 1.0);
}

#[test]
fn unbounded_recursion_raises_invalid_rsp() {
    let src = "(def (loop) (loop)) (loop)";
    assert!(matches!(run_source(src), Err(cli::Error::Vm(tinyfn::VmError::InvalidRsp { .. }))));
}

#[test]
fn empty_program_yields_zero() {
    assert_eq!(run_source("").unwrap(), 0.0);
}

#[test]
fn arity_mismatch_is_reported() {
    let src = "(def (f x y) (* x y)) (f 10)";
    assert!(matches!(
        run_source(src),
        Err(cli::Error::Compile(tinyfn::CompileError::ArityMismatch { .. }))
    ));
}

#[test]
fn unknown_name_is_reported() {
    assert!(matches!(
        run_source("x"),
        Err(cli::Error::Compile(tinyfn::CompileError::UnboundName(_)))
    ));
}
