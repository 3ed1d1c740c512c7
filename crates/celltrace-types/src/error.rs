use std::fmt;

/// Result type for celltrace-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types raised while building or analyzing telemetry
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Chemistry id is not part of the policy table
    UnknownChemistry(String),

    /// Sample rejected at ingestion
    MalformedReading { cell: String, reason: String },

    /// Operation requires readings but none were available
    EmptyInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownChemistry(id) => write!(f, "Unknown chemistry: {}", id),
            Error::MalformedReading { cell, reason } => {
                write!(f, "Malformed reading for {}: {}", cell, reason)
            }
            Error::EmptyInput(msg) => write!(f, "Insufficient data: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
