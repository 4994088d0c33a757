//! Walks the pest parse tree into [`tinyfn::Instr`] values.

use pest::iterators::Pair;
use tinyfn::{Instr, Operand};

use crate::{ParseError, Rule};

pub fn process_program(pair: Pair<Rule>) -> Result<Vec<Instr>, ParseError> {
    let mut out = Vec::new();
    for instr_pair in pair.into_inner() {
        match instr_pair.as_rule() {
            Rule::instr => out.push(process_instr(instr_pair)?),
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }
    Ok(out)
}

fn process_instr(pair: Pair<Rule>) -> Result<Instr, ParseError> {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::label_def => {
            let name = inner.into_inner().next().unwrap().as_str().to_string();
            Ok(Instr::Label(name))
        }
        Rule::mnemonic_2op => process_2op(inner),
        Rule::mnemonic_jump => process_jump(inner),
        Rule::mnemonic_ret => Ok(Instr::Ret),
        _ => unreachable!(),
    }
}

fn process_2op(pair: Pair<Rule>) -> Result<Instr, ParseError> {
    let mut pairs = pair.into_inner();
    let kw = pairs.next().unwrap().as_str();
    let src = process_operand(pairs.next().unwrap());
    let dst = process_operand(pairs.next().unwrap());
    match kw {
        "mov" => Ok(Instr::Mov(src, dst)),
        "add" => Ok(Instr::Add(src, dst)),
        "sub" => Ok(Instr::Sub(src, dst)),
        "mul" => Ok(Instr::Mul(src, dst)),
        "cmp" => Ok(Instr::Cmp(src, dst)),
        other => Err(ParseError::UnknownMnemonic(other.to_string())),
    }
}

fn process_jump(pair: Pair<Rule>) -> Result<Instr, ParseError> {
    let mut pairs = pair.into_inner();
    let kw = pairs.next().unwrap().as_str();
    let target = pairs.next().unwrap().as_str().to_string();
    match kw {
        "jmp" => Ok(Instr::Jmp(target)),
        "je" => Ok(Instr::Je(target)),
        "jne" => Ok(Instr::Jne(target)),
        "call" => Ok(Instr::Call(target)),
        other => Err(ParseError::UnknownMnemonic(other.to_string())),
    }
}

fn process_operand(pair: Pair<Rule>) -> Operand {
    let inner = pair.into_inner().next().unwrap();
    match inner.as_rule() {
        Rule::number => Operand::Imm(inner.as_str().parse().unwrap()),
        Rule::rans_reg => Operand::Rans,
        Rule::rsp_reg => Operand::Rsp,
        Rule::stack_off => {
            let k: u32 = inner.into_inner().next().unwrap().as_str().parse().unwrap();
            Operand::stack_off(k)
        }
        _ => unreachable!(),
    }
}
