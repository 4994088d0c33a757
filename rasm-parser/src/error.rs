use crate::Rule;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Grammar(#[from] pest::error::Error<Rule>),

    #[error("unknown mnemonic `{0}`")]
    UnknownMnemonic(String),
}
