//! Edge detection modules
//!
//! This module contains the Canny edge detector, split by stage:
//! - Gradient computation (Sobel 3x3, L1 magnitude)
//! - Non-maximum suppression (thin ridges along the gradient direction)
//! - Hysteresis (two thresholds, 8-connected tracking)

/// Full detector composed from the stages below
pub mod canny;
/// Sobel gradients
pub mod gradient;
/// Double-threshold edge tracking
pub mod hysteresis;
/// Non-maximum suppression
pub mod nms;

pub use canny::canny;
