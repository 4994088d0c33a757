//! rasm instructions: the flat, label-addressed assembly the
//! compiler emits and the virtual machine executes.

use crate::operand::Operand;
use std::fmt;

/// One instruction in a rasm program. Every variant is an immutable
/// record; structural equality holds, which the compiler's test
/// suite leans on heavily to assert exact emitted sequences.
#[derive(Clone, Debug, PartialEq)]
pub enum Instr {
    Mov(Operand, Operand),
    Add(Operand, Operand),
    Sub(Operand, Operand),
    Mul(Operand, Operand),
    Cmp(Operand, Operand),
    Label(String),
    Jmp(String),
    Je(String),
    Jne(String),
    Call(String),
    Ret,
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Mov(src, dst) => write!(f, "mov {}, {}", src, dst),
            Instr::Add(src, dst) => write!(f, "add {}, {}", src, dst),
            Instr::Sub(src, dst) => write!(f, "sub {}, {}", src, dst),
            Instr::Mul(src, dst) => write!(f, "mul {}, {}", src, dst),
            Instr::Cmp(l, r) => write!(f, "cmp {}, {}", l, r),
            Instr::Label(name) => write!(f, "{}:", name),
            Instr::Jmp(t) => write!(f, "jmp {}", t),
            Instr::Je(t) => write!(f, "je {}", t),
            Instr::Jne(t) => write!(f, "jne {}", t),
            Instr::Call(t) => write!(f, "call {}", t),
            Instr::Ret => write!(f, "ret"),
        }
    }
}

impl Instr {
    /// Whether this instruction is a `Label`, i.e. takes up no
    /// address of its own and is indented flush-left when printed
    /// (spec §6.3's rasm text layout rule).
    pub fn is_label(&self) -> bool {
        matches!(self, Instr::Label(_))
    }
}
