use crate::Rule;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Grammar(#[from] pest::error::Error<Rule>),

    #[error("function `{0}` defined more than once")]
    DuplicateDefinition(String),
}
