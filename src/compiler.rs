//! Stack-discipline compiler from the AST to rasm (spec §4.3).

use crate::ast::{Defn, Expr};
use crate::env::Env;
use crate::error::CompileError;
use crate::instr::Instr;
use crate::labels::{self, Labels};
use crate::operand::Operand::{self, Imm, Rans, Rsp, StackOff};

/// Compiles a whole program: every definition, then the `entry` label,
/// then the body (compiled at `si = 1` in the empty environment). An
/// absent body still yields a valid program that halts with `rans = 0`.
pub fn compile(defns: &[Defn], body: Option<&Expr>) -> Result<Vec<Instr>, CompileError> {
    let mut labels = Labels::new();
    let mut out = Vec::new();

    for defn in defns {
        out.extend(compile_defn(defns, defn, &mut labels)?);
    }

    out.push(Instr::Label("entry".to_string()));
    if let Some(body) = body {
        out.extend(compile_expr(defns, body, 1, &Env::new(), &mut labels)?);
    }

    Ok(out)
}

fn compile_defn(
    defns: &[Defn],
    defn: &Defn,
    labels: &mut Labels,
) -> Result<Vec<Instr>, CompileError> {
    let mut env = Env::new();
    for (i, param) in defn.params.iter().enumerate() {
        env = env.extend(param.clone(), (i + 1) as u32);
    }

    let next_si = 1 + defn.params.len() as u32;

    let mut out = vec![Instr::Label(labels::function_label(&defn.name))];
    out.extend(compile_expr(defns, &defn.body, next_si, &env, labels)?);
    out.push(Instr::Ret);
    Ok(out)
}

fn compile_expr(
    defns: &[Defn],
    expr: &Expr,
    si: u32,
    env: &Env,
    labels: &mut Labels,
) -> Result<Vec<Instr>, CompileError> {
    match expr {
        Expr::Num(value) => Ok(vec![Instr::Mov(Imm(*value), Rans)]),

        Expr::Add1(operand) => {
            let mut out = compile_expr(defns, operand, si, env, labels)?;
            out.push(Instr::Add(Imm(1.0), Rans));
            Ok(out)
        }

        Expr::Sub1(operand) => {
            let mut out = compile_expr(defns, operand, si, env, labels)?;
            out.push(Instr::Sub(Imm(1.0), Rans));
            Ok(out)
        }

        Expr::Plus(left, right) => {
            let mut out = compile_expr(defns, left, si, env, labels)?;
            out.push(Instr::Mov(Rans, StackOff(si)));
            out.extend(compile_expr(defns, right, si + 1, env, labels)?);
            out.push(Instr::Add(StackOff(si), Rans));
            Ok(out)
        }

        Expr::Minus(left, right) => {
            let mut out = compile_expr(defns, left, si, env, labels)?;
            out.push(Instr::Mov(Rans, StackOff(si)));
            out.extend(compile_expr(defns, right, si + 1, env, labels)?);
            out.push(Instr::Sub(Rans, StackOff(si)));
            out.push(Instr::Mov(StackOff(si), Rans));
            Ok(out)
        }

        Expr::Times(left, right) => {
            let mut out = compile_expr(defns, left, si, env, labels)?;
            out.push(Instr::Mov(Rans, StackOff(si)));
            out.extend(compile_expr(defns, right, si + 1, env, labels)?);
            out.push(Instr::Mul(StackOff(si), Rans));
            Ok(out)
        }

        Expr::Equals(left, right) => {
            let not_equal = labels.gensym("not_equal");
            let cont = labels.gensym("continue");

            let mut out = compile_expr(defns, left, si, env, labels)?;
            out.push(Instr::Mov(Rans, StackOff(si)));
            out.extend(compile_expr(defns, right, si + 1, env, labels)?);
            out.push(Instr::Cmp(StackOff(si), Rans));
            out.push(Instr::Jne(not_equal.clone()));
            out.push(Instr::Mov(Imm(1.0), Rans));
            out.push(Instr::Jmp(cont.clone()));
            out.push(Instr::Label(not_equal));
            out.push(Instr::Mov(Imm(0.0), Rans));
            out.push(Instr::Label(cont));
            Ok(out)
        }

        Expr::If(cond, thn, els) => {
            let else_label = labels.gensym("else");
            let cont = labels.gensym("continue");

            let cond_instrs = compile_expr(defns, cond, si, env, labels)?;
            let thn_instrs = compile_expr(defns, thn, si, env, labels)?;
            let els_instrs = compile_expr(defns, els, si, env, labels)?;

            let mut out = cond_instrs;
            out.push(Instr::Cmp(Imm(0.0), Rans));
            out.push(Instr::Je(else_label.clone()));
            out.extend(thn_instrs);
            out.push(Instr::Jmp(cont.clone()));
            out.push(Instr::Label(else_label));
            out.extend(els_instrs);
            out.push(Instr::Label(cont));
            Ok(out)
        }

        Expr::Let(name, value, body) => {
            let mut out = compile_expr(defns, value, si, env, labels)?;
            out.push(Instr::Mov(Rans, StackOff(si)));
            let ext_env = env.extend(name.clone(), si);
            out.extend(compile_expr(defns, body, si + 1, &ext_env, labels)?);
            Ok(out)
        }

        Expr::App(fname, args) => {
            let defn = defns
                .iter()
                .find(|d| &d.name == fname)
                .ok_or_else(|| CompileError::UndefinedFunction(fname.clone()))?;

            if args.len() != defn.params.len() {
                return Err(CompileError::ArityMismatch {
                    name: fname.clone(),
                    expected: defn.params.len(),
                    got: args.len(),
                });
            }

            // base = highest stack index currently in use by the caller.
            let base = si - 1;
            let fn_label = labels::function_label(&defn.name);

            let mut out = Vec::new();
            for (i, arg) in args.iter().enumerate() {
                let arg_si = base + 2 + i as u32;
                out.extend(compile_expr(defns, arg, arg_si, env, labels)?);
                out.push(Instr::Mov(Rans, StackOff(arg_si)));
            }

            out.push(Instr::Add(Imm(base as f64), Rsp));
            out.push(Instr::Call(fn_label));
            out.push(Instr::Sub(Imm(base as f64), Rsp));
            Ok(out)
        }

        Expr::Name(name) => {
            let slot = env
                .lookup(name)
                .ok_or_else(|| CompileError::UnboundName(name.clone()))?;
            Ok(vec![Instr::Mov(StackOff(slot), Rans)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instr::Instr::*;
    use crate::operand::Operand::*;

    #[test]
    fn compiles_num_literal() {
        let instrs = compile(&[], Some(&Expr::num(170.0))).unwrap();
        assert_eq!(
            instrs,
            vec![Label("entry".into()), Mov(Imm(170.0), Rans)]
        );
    }

    #[test]
    fn compiles_add1_chain() {
        let e = Expr::add1(Expr::add1(Expr::add1(Expr::num(40.0))));
        let instrs = compile(&[], Some(&e)).unwrap();
        assert_eq!(
            instrs,
            vec![
                Label("entry".into()),
                Mov(Imm(40.0), Rans),
                Add(Imm(1.0), Rans),
                Add(Imm(1.0), Rans),
                Add(Imm(1.0), Rans),
            ]
        );
    }

    #[test]
    fn compiles_minus_asymmetrically() {
        let e = Expr::minus(Expr::num(9.0), Expr::num(3.0));
        let instrs = compile(&[], Some(&e)).unwrap();
        assert_eq!(
            instrs,
            vec![
                Label("entry".into()),
                Mov(Imm(9.0), Rans),
                Mov(Rans, StackOff(1)),
                Mov(Imm(3.0), Rans),
                Sub(Rans, StackOff(1)),
                Mov(StackOff(1), Rans),
            ]
        );
    }

    #[test]
    fn undefined_function_is_an_error() {
        let e = Expr::app("ghost", vec![]);
        assert_eq!(
            compile(&[], Some(&e)),
            Err(CompileError::UndefinedFunction("ghost".to_string()))
        );
    }

    #[test]
    fn arity_mismatch_is_an_error() {
        let defn = Defn::new("f", vec!["x".into(), "y".into()], Expr::name("x"));
        let e = Expr::app("f", vec![Expr::num(10.0)]);
        assert_eq!(
            compile(&[defn], Some(&e)),
            Err(CompileError::ArityMismatch {
                name: "f".to_string(),
                expected: 2,
                got: 1,
            })
        );
    }

    #[test]
    fn unbound_name_is_an_error() {
        let e = Expr::name("x");
        assert_eq!(
            compile(&[], Some(&e)),
            Err(CompileError::UnboundName("x".to_string()))
        );
    }

    #[test]
    fn empty_program_compiles_to_just_entry() {
        let instrs = compile(&[], None).unwrap();
        assert_eq!(instrs, vec![Label("entry".into())]);
    }

    #[test]
    fn app_shifts_and_restores_rsp() {
        let defn = Defn::new("f", vec!["x".into()], Expr::name("x"));
        let e = Expr::app("f", vec![Expr::num(10.0)]);
        let instrs = compile(&[defn], Some(&e)).unwrap();
        // base = si - 1 = 0 at the top-level body (si = 1).
        assert!(instrs.contains(&Add(Imm(0.0), Rsp)));
        assert!(instrs.contains(&Sub(Imm(0.0), Rsp)));
    }
}
