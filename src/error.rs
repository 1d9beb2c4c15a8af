//! Pipeline error taxonomy
//!
//! Every boundary operation returns these as values; nothing unwinds past
//! the pipeline.

use thiserror::Error;

/// Coarse failure category reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad dimensions, short buffer or invalid configuration
    InvalidInput,
    /// An output or scratch buffer could not be obtained
    AllocationError,
    /// Internal fault while running a stage
    ProcessingError,
    /// The self-test failed
    InitializationFailure,
}

/// Errors produced by the frame pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Width or height is not strictly positive.
    #[error("invalid frame dimensions {width}x{height}")]
    InvalidDimensions {
        /// Width as supplied by the caller
        width: i64,
        /// Height as supplied by the caller
        height: i64,
    },

    /// Input buffer cannot hold the NV21 layout for the given dimensions.
    #[error("frame buffer too short: need {required} bytes, got {actual}")]
    BufferTooShort {
        /// Minimum byte length for the declared dimensions
        required: usize,
        /// Byte length actually supplied
        actual: usize,
    },

    /// Configuration values are out of range.
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),

    /// A buffer allocation was refused.
    #[error("failed to allocate {bytes} bytes")]
    Allocation {
        /// Requested size in bytes
        bytes: usize,
    },

    /// A stage failed internally.
    #[error("processing failed: {0}")]
    Processing(String),

    /// The readiness self-test did not pass.
    #[error("initialization failed: {0}")]
    Initialization(String),
}

impl PipelineError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDimensions { .. } | Self::BufferTooShort { .. } | Self::InvalidConfig(_) => {
                ErrorKind::InvalidInput
            }
            Self::Allocation { .. } => ErrorKind::AllocationError,
            Self::Processing(_) => ErrorKind::ProcessingError,
            Self::Initialization(_) => ErrorKind::InitializationFailure,
        }
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, PipelineError>;
