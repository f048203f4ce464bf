//! Error types for instance loading and driver configuration.

use thiserror::Error;

/// Errors surfaced by the library.
///
/// Budget exhaustion is not an error: drivers terminate normally and
/// leave a final row in their anytime log.
#[derive(Debug, Error)]
pub enum Error {
    /// The instance file is missing a header, holds a non-numeric token,
    /// or holds an out-of-range value. The message names the offending
    /// token.
    #[error("malformed instance: {0}")]
    MalformedInstance(String),

    /// A driver configuration value is out of its legal range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An underlying I/O failure while reading an instance file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
