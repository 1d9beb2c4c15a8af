use crate::error::PipelineError;

/// Borrowed view of an NV21 camera frame.
///
/// Layout: a full-resolution luma plane (`width * height` bytes) followed by a
/// half-resolution chroma plane where each 2x2 luma block shares one V,U byte
/// pair. Odd dimensions round the chroma plane up, so the chroma row stride is
/// `2 * ceil(width / 2)`.
///
/// The frame never outlives the caller's buffer and is never mutated.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

/// Minimum NV21 buffer length for the given dimensions, or `None` on overflow.
pub fn required_len(width: usize, height: usize) -> Option<usize> {
    let luma = width.checked_mul(height)?;
    let chroma = width.div_ceil(2).checked_mul(height.div_ceil(2))?.checked_mul(2)?;
    luma.checked_add(chroma)
}

impl<'a> Frame<'a> {
    /// Validate dimensions and buffer length and wrap the buffer.
    ///
    /// Dimensions are checked before the buffer is looked at.
    pub fn new(data: &'a [u8], width: i32, height: i32) -> Result<Self, PipelineError> {
        check_dimensions(width, height)?;
        let (width, height) = (width as usize, height as usize);
        let required = required_len(width, height).ok_or(PipelineError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        })?;
        if data.len() < required {
            return Err(PipelineError::BufferTooShort {
                required,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Frame width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of luma samples (`width * height`)
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// The luma plane, one byte per pixel, row-major
    pub fn luma(&self) -> &'a [u8] {
        &self.data[..self.pixel_count()]
    }

    /// The interleaved V,U plane
    pub fn chroma(&self) -> &'a [u8] {
        let start = self.pixel_count();
        let len = self.chroma_stride() * self.height.div_ceil(2);
        &self.data[start..start + len]
    }

    /// Bytes per chroma row
    pub fn chroma_stride(&self) -> usize {
        self.width.div_ceil(2) * 2
    }
}

/// Reject non-positive dimensions.
pub(crate) fn check_dimensions(width: i32, height: i32) -> Result<(), PipelineError> {
    if width <= 0 || height <= 0 {
        return Err(PipelineError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }
    Ok(())
}
