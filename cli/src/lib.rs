//! Shared plumbing for the three driver binaries: answer formatting
//! and the top-level error type each one surfaces to its `main`.

use std::fmt;
use std::path::PathBuf;

/// Formats the final answer the way spec §6.3 requires: no decimal
/// point for integral values, ordinary decimal otherwise.
pub fn format_answer(value: tinyfn::Number) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug)]
pub enum IoContext {
    ReadInput,
    WriteOutput,
}

impl fmt::Display for IoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoContext::ReadInput => write!(f, "Reading input"),
            IoContext::WriteOutput => write!(f, "Writing output"),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error, IoContext, PathBuf),
    Lang(lang_parser::ParseError),
    Rasm(rasm_parser::ParseError),
    Compile(tinyfn::CompileError),
    Vm(tinyfn::VmError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err, context, path) => {
                write!(f, "{} file \"{}\" failed: {}", context, path.display(), err)
            }
            Error::Lang(err) => write!(f, "parsing program failed: {}", err),
            Error::Rasm(err) => write!(f, "parsing rasm failed: {}", err),
            Error::Compile(err) => write!(f, "compiling program failed: {}", err),
            Error::Vm(err) => write!(f, "running program failed: {}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<lang_parser::ParseError> for Error {
    fn from(err: lang_parser::ParseError) -> Error {
        Error::Lang(err)
    }
}

impl From<rasm_parser::ParseError> for Error {
    fn from(err: rasm_parser::ParseError) -> Error {
        Error::Rasm(err)
    }
}

impl From<tinyfn::CompileError> for Error {
    fn from(err: tinyfn::CompileError) -> Error {
        Error::Compile(err)
    }
}

impl From<tinyfn::VmError> for Error {
    fn from(err: tinyfn::VmError) -> Error {
        Error::Vm(err)
    }
}

pub fn io_error(source: std::io::Error, context: IoContext, path: PathBuf) -> Error {
    Error::Io(source, context, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_integral_without_decimal() {
        assert_eq!(format_answer(120.0), "120");
    }

    #[test]
    fn formats_fraction_with_decimal() {
        assert_eq!(format_answer(-8.3342), "-8.3342");
    }
}
