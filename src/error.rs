//! Error types for tracestep.
//!
//! All fallible operations return `Result<T, TraceError>` instead of panicking.
//! Stepping a cursor past the end of its trace is not an error; it is the
//! normal terminal state and is reported as a no-op.

use thiserror::Error;

use crate::trace::hanoi::Peg;

/// Result type alias for tracestep operations.
pub type TraceResult<T> = Result<T, TraceError>;

/// Unified error type for all tracestep operations.
#[derive(Debug, Error)]
pub enum TraceError {
    // ===== Construction Errors =====
    /// Problem size rejected by a trace builder.
    #[error("invalid problem size {size} for {problem}: must be between {min} and {max}")]
    InvalidProblemSize {
        /// Problem name ("hanoi" or "nqueens").
        problem: &'static str,
        /// Requested size.
        size: usize,
        /// Smallest size the builder accepts.
        min: usize,
        /// Largest size the builder accepts.
        max: usize,
    },

    /// Problem size outside the range configured for a session.
    #[error("{problem} size {size} outside configured range {min}..={max}")]
    SizeOutOfRange {
        /// Problem name.
        problem: &'static str,
        /// Requested size.
        size: usize,
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },

    // ===== Replay Errors =====
    /// A Hanoi move that cannot be applied to the current peg state.
    #[error("illegal move at step {step}: disk {disk} {from} → {to} ({reason})")]
    IllegalMove {
        /// 1-based step number of the offending move.
        step: usize,
        /// Disk named by the move.
        disk: usize,
        /// Source peg.
        from: Peg,
        /// Destination peg.
        to: Peg,
        /// Why the move is illegal.
        reason: String,
    },

    /// A Hanoi trace that replays legally but does not end with every disk on C.
    #[error("trace of {moves} moves leaves the {disks}-disk tower unsolved")]
    IncompleteSolution {
        /// Number of disks.
        disks: usize,
        /// Number of moves replayed.
        moves: usize,
    },

    /// Two builds of the same trace differ.
    #[error("{problem} size {size} is not reproducible: checksum {expected} then {actual}")]
    NonDeterministic {
        /// Problem name.
        problem: &'static str,
        /// Problem size.
        size: usize,
        /// Checksum of the first build.
        expected: String,
        /// Checksum of the differing build.
        actual: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TraceError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error came from rejected input size.
    #[must_use]
    pub const fn is_size_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidProblemSize { .. } | Self::SizeOutOfRange { .. }
        )
    }
}

impl From<serde_json::Error> for TraceError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
