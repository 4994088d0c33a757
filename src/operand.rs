//! Operands addressable by rasm instructions.

use std::fmt;

/// A value an instruction can read from, and sometimes write to.
///
/// [`Operand::Imm`] is read-only: storing into it is a VM error
/// ([`crate::error::VmError::BadDestination`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operand {
    /// An immediate constant.
    Imm(f64),
    /// The answer / scratch register.
    Rans,
    /// The stack-pointer register.
    Rsp,
    /// `stack[rsp + k]`, for `k >= 0`.
    StackOff(u32),
}

impl Operand {
    pub fn stack_off(k: u32) -> Operand {
        Operand::StackOff(k)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Imm(v) => {
                if v.fract() == 0.0 && v.is_finite() {
                    write!(f, "{}", *v as i64)
                } else {
                    write!(f, "{}", v)
                }
            }
            Operand::Rans => write!(f, "rans"),
            Operand::Rsp => write!(f, "rsp"),
            Operand::StackOff(k) => write!(f, "[rsp+{}]", k),
        }
    }
}
