use std::{fmt, io};

/// Crate-wide error taxonomy. Configuration is validated eagerly at
/// construction; input problems surface before any ticket is computed, so a
/// failed batch never produces partial output.
#[derive(Debug)]
pub enum ShuffleError {
    /// Ticket count must be at least 1; the hash is reduced modulo this value.
    InvalidTicketCount,
    /// An input line was not valid UTF-8. Line numbers are 1-based.
    Encoding { line: usize },
    /// Underlying reader failure.
    Io(io::Error),
}

impl fmt::Display for ShuffleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShuffleError::InvalidTicketCount => {
                write!(f, "number of tickets must be a positive integer")
            }
            ShuffleError::Encoding { line } => {
                write!(f, "input line {line} is not valid UTF-8")
            }
            ShuffleError::Io(e) => write!(f, "input error: {e}"),
        }
    }
}

impl std::error::Error for ShuffleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShuffleError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ShuffleError {
    fn from(e: io::Error) -> Self {
        ShuffleError::Io(e)
    }
}
