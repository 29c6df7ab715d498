//! Error type shared by the library and the `codes` binary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HuffmanError {
    /// The input text has no symbols, so no probability can be computed.
    #[error("input is empty: at least one symbol is required")]
    EmptyInput,

    /// The frequency table handed to the tree builder holds no symbols.
    #[error("insufficient alphabet: cannot build a tree from {symbols} symbols")]
    InsufficientAlphabet { symbols: usize },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl HuffmanError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        HuffmanError::InvalidArgument {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
