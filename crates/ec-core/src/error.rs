use thiserror::Error;

/// Failures surfaced by the frame pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Null, undersized, or otherwise unusable pixel buffer.
    #[error("invalid buffer: expected at least {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// Negative or overflowing dimensions received across the host boundary.
    #[error("invalid buffer: unusable dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },

    /// Input and output frames disagree on width/height or channel layout.
    #[error(
        "invalid buffer: input is {in_width}x{in_height}x{in_channels}, \
         output is {out_width}x{out_height}x{out_channels}"
    )]
    DimensionMismatch {
        in_width: usize,
        in_height: usize,
        in_channels: usize,
        out_width: usize,
        out_height: usize,
        out_channels: usize,
    },

    #[error("unsupported channel count {0} (expected 1, 3 or 4)")]
    UnsupportedChannelCount(usize),

    #[error("invalid kernel size {0} (must be a positive odd integer)")]
    InvalidKernelSize(usize),

    /// Internal fault contained at the host boundary.
    #[error("processing failure: {0}")]
    ProcessingFailure(String),
}

impl Error {
    /// Whether this error belongs to the invalid-buffer class of the host
    /// contract (bad size, null pointer, mismatched dimensions).
    pub fn is_invalid_buffer(&self) -> bool {
        matches!(
            self,
            Self::InvalidBuffer { .. }
                | Self::InvalidDimensions { .. }
                | Self::DimensionMismatch { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, Error>;
