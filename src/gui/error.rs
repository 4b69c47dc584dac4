use std::{error::Error, fmt::Display};

/// Errors from driving the terminal.
#[derive(Debug)]
pub enum GuiError {
    #[allow(missing_docs)]
    IOError(std::io::Error),
}

impl Display for GuiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GuiError::IOError(e) => write!(f, "terminal error: {}", e),
        }
    }
}

impl Error for GuiError {}

impl From<std::io::Error> for GuiError {
    fn from(value: std::io::Error) -> Self {
        Self::IOError(value)
    }
}
