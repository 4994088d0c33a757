//! Parser and pretty-printer for the rasm textual assembly format
//! that [`tinyfn`]'s compiler emits and its virtual machine executes.

use pest::Parser;
use pest_derive::Parser;

mod error;
mod printer;
mod processor;


pub use error::ParseError;
pub use printer::write_program;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct RasmParser;

/// Parses a whole rasm program into its instruction sequence.
pub fn parse(input: &str) -> Result<Vec<tinyfn::Instr>, ParseError> {
    let mut pairs = RasmParser::parse(Rule::program, input)?;
    let program = pairs.next().unwrap();
    processor::process_program(program)
}
