use std::{error, fmt};

/// Raised when a required token or sub-expression is missing. The parser
/// never recovers from one of these; no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub line: u32,
    pub offset: u32,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error on line {}, offset {}: {}",
            self.line, self.offset, self.message
        )
    }
}

impl error::Error for SyntaxError {}

pub type PResult<T> = Result<T, SyntaxError>;
