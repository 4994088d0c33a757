use std::fs;
use std::path::PathBuf;

use clap::Parser;
use cli::{format_answer, io_error, Error, IoContext};

/// Parses a rasm file and executes it on the virtual machine.
#[derive(Parser, Debug)]
#[command(name = "run_rasm")]
struct Args {
    /// rasm file to run.
    file: PathBuf,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run_rasm(&args) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run_rasm(args: &Args) -> Result<(), Error> {
    let source = fs::read_to_string(&args.file)
        .map_err(|e| io_error(e, IoContext::ReadInput, args.file.clone()))?;

    let instrs = rasm_parser::parse(&source)?;
    let mut vm = tinyfn::Vm::new();
    let answer = vm.execute(&instrs)?;
    println!("{}", format_answer(answer));
    Ok(())
}
