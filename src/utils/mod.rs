//! Utility functions for image processing
//!
//! This module provides the pixel-level stages of the frame pipeline:
//! - NV21 to RGB conversion and luma extraction
//! - Grayscale conversion (RGB to luminance) and RGB expansion
//! - Separable smoothing
//! - Threshold binarization (degraded edge mode)
//! - Fallible buffer allocation

/// Fixed-threshold binarization
pub mod binarization;
/// Binomial smoothing
pub mod blur;
/// Fallible allocation helpers
pub mod buffer;
/// RGB to grayscale and back
pub mod grayscale;
/// NV21 decoding
pub mod yuv;
