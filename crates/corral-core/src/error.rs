/// All errors that can occur within corral.
///
/// This enum captures every failure mode: invalid batching configuration,
/// a dataset too small to complete a round-robin refill, usage errors, and
/// source-side I/O or parse failures. Using a single error type across the
/// library simplifies error propagation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structurally invalid configuration, rejected before any I/O
    /// (zero batch size, wrong-rank input shape, a zero dimension).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A round-robin refill exhausted the source before completing one
    /// batch: the dataset holds fewer samples than the batch size.
    #[error("insufficient data: batch of {needed} requested but the source ran out after {got} samples")]
    InsufficientData { needed: usize, got: usize },

    /// The current batch was requested before any successful advance.
    #[error("no batch available: advance the batcher before reading a batch")]
    BatchNotReady,

    /// A source handed over a sample whose row length does not match the
    /// configured geometry.
    #[error("sample shape mismatch at slot {slot}: expected {expected} values, got {got}")]
    SampleShape {
        slot: usize,
        expected: usize,
        got: usize,
    },

    /// Dimension index out of range for a shape's rank.
    #[error("dimension out of range: dim {dim} for shape of rank {rank}")]
    DimOutOfRange { dim: usize, rank: usize },

    /// I/O failure while reading a file-backed source.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A field of a file-backed source failed to parse as a number.
    #[error("parse error at line {line}, column {col}: {msg}")]
    Parse {
        line: usize,
        col: usize,
        msg: String,
    },

    /// Generic message for cases not covered above.
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an error from any string message.
    pub fn msg(s: impl Into<String>) -> Self {
        Error::Msg(s.into())
    }
}

/// Convenience Result type used throughout corral.
pub type Result<T> = std::result::Result<T, Error>;

/// Macro for early return with a formatted error message.
/// Usage: `bail!("something went wrong: {}", detail)`
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::Msg(format!($($arg)*)))
    };
}
