use std::path::PathBuf;

use crate::error::{HuffmanError, Result};

/// Where the text to encode comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Prompt on stdout and read one line from stdin.
    Prompt,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: InputSource,
    pub stats: bool,
}

impl Config {
    /// Parses `args` as passed to the binary, program name first:
    /// `codes [input_file] [--stats]`.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut input = InputSource::Prompt;
        let mut stats = false;

        for arg in args.iter().skip(1) {
            if arg == "--stats" {
                stats = true;
            } else if arg.starts_with("--") {
                return Err(HuffmanError::invalid_argument(format!(
                    "unknown option {}",
                    arg
                )));
            } else if input == InputSource::Prompt {
                input = InputSource::File(PathBuf::from(arg));
            } else {
                return Err(HuffmanError::invalid_argument(format!(
                    "unexpected argument {}",
                    arg
                )));
            }
        }

        Ok(Config { input, stats })
    }
}
