use std::fs;
use std::path::PathBuf;

use clap::Parser;
use cli::{format_answer, io_error, Error, IoContext};

/// Parses and compiles a source file, optionally writing its rasm and
/// running it.
#[derive(Parser, Debug)]
#[command(name = "compile_file")]
struct Args {
    /// Source file to compile.
    file: PathBuf,

    /// Run the compiled program on the virtual machine and print its answer.
    #[arg(short, long)]
    run: bool,

    /// Write the emitted rasm text to this path.
    #[arg(short = 's', long = "rasm", value_name = "OUT")]
    rasm: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = compile_file(&args) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn compile_file(args: &Args) -> Result<(), Error> {
    let source = fs::read_to_string(&args.file)
        .map_err(|e| io_error(e, IoContext::ReadInput, args.file.clone()))?;

    let program = lang_parser::parse(&source)?;
    let instrs = tinyfn::compile(&program.defns, program.body.as_ref())?;

    if let Some(out_path) = &args.rasm {
        let text = rasm_parser::write_program(&instrs);
        fs::write(out_path, text).map_err(|e| io_error(e, IoContext::WriteOutput, out_path.clone()))?;
    }

    if args.run {
        let mut vm = tinyfn::Vm::new();
        let answer = vm.execute(&instrs)?;
        println!("{}", format_answer(answer));
    }

    Ok(())
}
