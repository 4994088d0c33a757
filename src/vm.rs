//! The virtual machine: a register file, a bounded stack, and a
//! fetch/execute loop over rasm (spec §4.4).

use std::collections::HashMap;
use std::fmt;

use crate::error::VmError;
use crate::instr::Instr;
use crate::operand::Operand;

/// Every execution starts from a stack this large, freshly zeroed.
pub const STACK_SIZE: usize = 10_000;

/// How many stack slots a [`State`] snapshot keeps, mirroring the
/// original VM's `stack[:15]` truncation in its own state dump.
const STATE_STACK_PREVIEW: usize = 15;

/// A snapshot of machine state, cheap to clone and embedded verbatim
/// in [`VmError`] so a caller never has to re-derive "what was the
/// machine doing" from a bare error variant.
#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub rip: usize,
    pub rans: f64,
    pub rsp: usize,
    pub fequal: bool,
    pub fless: bool,
    /// The first `STATE_STACK_PREVIEW` stack slots at the time of the
    /// snapshot, not the whole (10 000-slot) stack.
    pub stack: Vec<f64>,
    /// Text of the instruction at `rip`, or a placeholder if `rip`
    /// has run past the end of the program.
    pub current_instr: String,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rip={} rans={} rsp={} fequal={} fless={} stack(first {})={:?} current_instr=\"{}\"",
            self.rip,
            self.rans,
            self.rsp,
            self.fequal,
            self.fless,
            STATE_STACK_PREVIEW,
            self.stack,
            self.current_instr
        )
    }
}

/// The machine: register file plus stack. Reused across `execute`
/// calls (a REPL keeps one instance alive for its whole session) but
/// every field is reset at the start of each call, per spec §5.
pub struct Vm {
    rip: usize,
    rans: f64,
    rsp: usize,
    fequal: bool,
    fless: bool,
    stack: Vec<f64>,
}

impl Vm {
    pub fn new() -> Vm {
        Vm {
            rip: 0,
            rans: 0.0,
            rsp: 0,
            fequal: false,
            fless: false,
            stack: vec![0.0; STACK_SIZE],
        }
    }

    fn reset(&mut self) {
        self.rip = 0;
        self.rans = 0.0;
        self.rsp = 0;
        self.fequal = false;
        self.fless = false;
        for slot in self.stack.iter_mut() {
            *slot = 0.0;
        }
    }

    fn state(&self, instrs: &[Instr]) -> State {
        let preview = STATE_STACK_PREVIEW.min(self.stack.len());
        State {
            rip: self.rip,
            rans: self.rans,
            rsp: self.rsp,
            fequal: self.fequal,
            fless: self.fless,
            stack: self.stack[..preview].to_vec(),
            current_instr: instrs
                .get(self.rip)
                .map(|i| i.to_string())
                .unwrap_or_else(|| "<end of program>".to_string()),
        }
    }

    /// Runs `instrs` to completion from a freshly reset state and
    /// returns the final value of `rans`.
    pub fn execute(&mut self, instrs: &[Instr]) -> Result<f64, VmError> {
        self.reset();
        let label_addrs = build_label_map(instrs)?;

        while self.rip != instrs.len() {
            if self.rip > instrs.len() {
                return Err(VmError::InvalidRip {
                    state: self.state(instrs),
                });
            }
            self.step(&instrs[self.rip], &label_addrs, instrs)?;
        }
        Ok(self.rans)
    }

    fn step(
        &mut self,
        instr: &Instr,
        label_addrs: &HashMap<String, usize>,
        instrs: &[Instr],
    ) -> Result<(), VmError> {
        let mut advance = true;
        match instr {
            Instr::Mov(src, dst) => {
                let v = self.load(src, instrs)?;
                self.store(dst, v, instrs)?;
            }
            Instr::Add(src, dst) => {
                let v = self.load(dst, instrs)? + self.load(src, instrs)?;
                self.store(dst, v, instrs)?;
            }
            Instr::Sub(src, dst) => {
                let v = self.load(dst, instrs)? - self.load(src, instrs)?;
                self.store(dst, v, instrs)?;
            }
            Instr::Mul(src, dst) => {
                let v = self.load(dst, instrs)? * self.load(src, instrs)?;
                self.store(dst, v, instrs)?;
            }
            Instr::Cmp(l, r) => {
                let lv = self.load(l, instrs)?;
                let rv = self.load(r, instrs)?;
                self.fequal = lv == rv;
                self.fless = lv < rv;
            }
            Instr::Label(_) => {}
            Instr::Jmp(target) => {
                self.rip = self.resolve(label_addrs, target, instrs)?;
                advance = false;
            }
            Instr::Je(target) => {
                if self.fequal {
                    self.rip = self.resolve(label_addrs, target, instrs)?;
                    advance = false;
                }
            }
            Instr::Jne(target) => {
                if !self.fequal {
                    self.rip = self.resolve(label_addrs, target, instrs)?;
                    advance = false;
                }
            }
            Instr::Call(target) => {
                let dest = self.resolve(label_addrs, target, instrs)?;
                self.rsp = self.bump_rsp(1, instrs)?;
                let return_addr = self.rip + 1;
                self.stack[self.rsp] = return_addr as f64;
                self.rip = dest;
                advance = false;
            }
            Instr::Ret => {
                if self.rsp >= self.stack.len() {
                    return Err(VmError::InvalidRsp {
                        state: self.state(instrs),
                    });
                }
                let addr = self.stack[self.rsp];
                self.rsp = self.bump_rsp(-1, instrs)?;
                self.rip = addr as usize;
                advance = false;
            }
        }
        if advance {
            self.rip += 1;
        }
        Ok(())
    }

    fn bump_rsp(&self, delta: i64, instrs: &[Instr]) -> Result<usize, VmError> {
        let next = self.rsp as i64 + delta;
        if next < 0 || next as usize >= self.stack.len() {
            return Err(VmError::InvalidRsp {
                state: self.state(instrs),
            });
        }
        Ok(next as usize)
    }

    fn resolve(
        &self,
        label_addrs: &HashMap<String, usize>,
        target: &str,
        instrs: &[Instr],
    ) -> Result<usize, VmError> {
        label_addrs
            .get(target)
            .copied()
            .ok_or_else(|| VmError::InvalidTarget {
                label: target.to_string(),
                state: self.state(instrs),
            })
    }

    fn load(&self, op: &Operand, instrs: &[Instr]) -> Result<f64, VmError> {
        match *op {
            Operand::Imm(v) => Ok(v),
            Operand::Rans => Ok(self.rans),
            Operand::Rsp => Ok(self.rsp as f64),
            Operand::StackOff(k) => self.stack_at(k, instrs),
        }
    }

    fn store(&mut self, op: &Operand, value: f64, instrs: &[Instr]) -> Result<(), VmError> {
        match *op {
            Operand::Imm(_) => Err(VmError::BadDestination {
                state: self.state(instrs),
            }),
            Operand::Rans => {
                self.rans = value;
                Ok(())
            }
            Operand::Rsp => {
                if value < 0.0 || value as usize >= self.stack.len() {
                    return Err(VmError::InvalidRsp {
                        state: self.state(instrs),
                    });
                }
                self.rsp = value as usize;
                Ok(())
            }
            Operand::StackOff(k) => {
                let idx = self.stack_index(k, instrs)?;
                self.stack[idx] = value;
                Ok(())
            }
        }
    }

    fn stack_index(&self, offset: u32, instrs: &[Instr]) -> Result<usize, VmError> {
        let idx = self.rsp + offset as usize;
        if idx >= self.stack.len() {
            return Err(VmError::BadStackAccess {
                offset,
                state: self.state(instrs),
            });
        }
        Ok(idx)
    }

    fn stack_at(&self, offset: u32, instrs: &[Instr]) -> Result<f64, VmError> {
        let idx = self.stack_index(offset, instrs)?;
        Ok(self.stack[idx])
    }
}

impl Default for Vm {
    fn default() -> Vm {
        Vm::new()
    }
}

fn build_label_map(instrs: &[Instr]) -> Result<HashMap<String, usize>, VmError> {
    let mut map = HashMap::new();
    for (pos, instr) in instrs.iter().enumerate() {
        if let Instr::Label(name) = instr {
            if map.insert(name.clone(), pos + 1).is_some() {
                return Err(VmError::DuplicateLabel(name.clone()));
            }
        }
    }
    if !map.contains_key("entry") {
        return Err(VmError::NoEntry);
    }
    Ok(map)
}
