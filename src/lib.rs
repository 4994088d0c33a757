pub mod ast;
pub mod compiler;
pub mod env;
pub mod error;
pub mod instr;
pub mod labels;
pub mod operand;
pub mod vm;

pub use ast::{Defn, Expr, Number, Program};
pub use compiler::compile;
pub use error::{CompileError, VmError};
pub use instr::Instr;
pub use operand::Operand;
pub use vm::Vm;

/// Compiles and runs a whole program in one step: the common path for
/// both CLI drivers.
pub fn run(program: &Program) -> Result<Number, RunError> {
    let instrs = compile(&program.defns, program.body.as_ref())?;
    let mut vm = Vm::new();
    Ok(vm.execute(&instrs)?)
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Vm(#[from] VmError),
}
