use std::time::Duration;

use crate::config::StrategyKind;
use crate::error::PipelineError;
use crate::utils::buffer::try_alloc_bytes;

/// Single-channel 8-bit image used between pipeline stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayImage {
    /// Allocate a zeroed image, reporting allocation failure
    pub fn try_new(width: usize, height: usize) -> Result<Self, PipelineError> {
        let data = try_alloc_bytes(width * height)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Panics
    /// If `data.len() != width * height`.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width * height,
            "buffer length does not match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at (x, y), or 0 outside the image
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y * self.width + x]
    }

    /// Set pixel at (x, y); writes outside the image are ignored
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.data[y * self.width + x] = value;
    }

    /// Raw row-major pixels
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw pixels
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copy into an `image` crate luma buffer
    pub fn to_luma_image(&self) -> Option<::image::GrayImage> {
        ::image::GrayImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
    }
}

/// Display-ready pipeline output: three bytes per pixel, row-major.
///
/// Ownership belongs to the caller once returned; the pipeline keeps no
/// reference to it.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
    strategy: StrategyKind,
    elapsed: Duration,
}

impl ProcessedImage {
    pub(crate) fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        strategy: StrategyKind,
        elapsed: Duration,
    ) -> Self {
        debug_assert_eq!(data.len(), width * height * 3);
        Self {
            data,
            width,
            height,
            strategy,
            elapsed,
        }
    }

    /// Image width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Byte length (`width * height * 3`)
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-sized image (never produced by the pipeline)
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Which edge strategy produced this image
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    /// Wall-clock time spent in the pipeline
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// RGB triplet at (x, y)
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 3;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Raw RGB bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the raw RGB bytes
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Copy into an `image` crate RGB buffer for display or export
    pub fn to_rgb_image(&self) -> Option<::image::RgbImage> {
        ::image::RgbImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
    }
}
