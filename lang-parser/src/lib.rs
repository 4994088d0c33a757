//! Parser for the s-expression surface syntax: produces the
//! [`tinyfn`] AST consumed by the compiler.

use pest::Parser;
use pest_derive::Parser;

mod error;
mod processor;

#[cfg(test)]
mod test;

pub use error::ParseError;

#[derive(Parser)]
#[grammar = "grammar.pest"]
struct LangParser;

/// Parses a whole program: any number of function definitions
/// followed by an optional body expression. A wholly empty input
/// produces the empty program.
pub fn parse(input: &str) -> Result<tinyfn::Program, ParseError> {
    let mut pairs = LangParser::parse(Rule::program, input)?;
    let program = pairs.next().unwrap();
    processor::process_program(program)
}
