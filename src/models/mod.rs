//! Core data structures: input frame view, intermediate and output images,
//! viewer statistics

/// Borrowed NV21 frame view
pub mod frame;
/// Grayscale scratch image and RGB output image
pub mod image;
/// FPS / timing tracker for viewers
pub mod stats;

pub use frame::Frame;
pub use image::{GrayImage, ProcessedImage};
pub use stats::{FrameStats, FrameStatsTracker};
