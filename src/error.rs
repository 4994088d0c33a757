//! Compile-time and run-time error taxonomies (spec §7). Each variant
//! carries enough context to produce a human-readable message on its
//! own; [`VmError`] additionally snapshots machine state.

use thiserror::Error;

use crate::vm::State;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CompileError {
    #[error("undefined function `{0}`")]
    UndefinedFunction(String),

    #[error("`{name}` expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("unbound name `{0}`")]
    UnboundName(String),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum VmError {
    #[error("cannot store into an immediate operand ({state})")]
    BadDestination { state: State },

    #[error("stack access out of bounds at rsp+{offset} ({state})")]
    BadStackAccess { offset: u32, state: State },

    #[error("invalid instruction at rip={rip} ({state})")]
    InvalidInstruction { rip: usize, state: State },

    #[error("jump/call target `{label}` does not exist ({state})")]
    InvalidTarget { label: String, state: State },

    #[error("rip out of bounds ({state})")]
    InvalidRip { state: State },

    #[error("rsp out of bounds ({state})")]
    InvalidRsp { state: State },

    #[error("duplicate label `{0}`")]
    DuplicateLabel(String),

    #[error("program has no `entry` label")]
    NoEntry,
}
