//! Fallible buffer allocation
//!
//! Every scratch and output buffer in the pipeline goes through here so an
//! allocator refusal surfaces as [`PipelineError::Allocation`] instead of an
//! abort. Buffers are owned by the calling stage and dropped with it.

use crate::error::PipelineError;

/// Allocate a vector of `len` copies of `value`, reporting allocation failure.
pub fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>, PipelineError> {
    let mut buf = try_with_capacity(len)?;
    buf.resize(len, value);
    Ok(buf)
}

/// Empty vector able to hold `capacity` items without reallocating.
pub fn try_with_capacity<T>(capacity: usize) -> Result<Vec<T>, PipelineError> {
    let bytes = capacity.saturating_mul(std::mem::size_of::<T>());
    let mut buf = Vec::new();
    buf.try_reserve_exact(capacity)
        .map_err(|_| PipelineError::Allocation { bytes })?;
    Ok(buf)
}

/// Allocate a zeroed byte buffer.
pub fn try_alloc_bytes(len: usize) -> Result<Vec<u8>, PipelineError> {
    try_alloc(len, 0u8)
}
