//! edge_viewer - native edge detection for live camera frames
//!
//! Takes an NV21 camera frame and returns an RGB image (3 bytes per pixel)
//! where edges are white and everything else is black. Usable from Rust
//! directly or from a host application through the C ABI in [`ffi`].

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Pipeline tunables and strategy selection values
pub mod config;
/// Canny stages (gradients, non-maximum suppression, hysteresis)
pub mod detector;
/// Error types
pub mod error;
/// C ABI entry points
pub mod ffi;
/// Log subscriber setup
pub mod logging;
/// Core data structures (Frame, GrayImage, ProcessedImage, FrameStats)
pub mod models;
/// Edge strategies and the stage runner
pub mod pipeline;
/// Developer helpers: image files in, image files out
pub mod tools;
/// Pixel-level stages (YUV, grayscale, blur, threshold, buffers)
pub mod utils;

pub use config::{PipelineConfig, StrategyKind};
pub use error::{ErrorKind, PipelineError, Result};
pub use models::{Frame, FrameStats, FrameStatsTracker, GrayImage, ProcessedImage};
pub use pipeline::EdgeStrategy;

use std::fmt;
use std::sync::OnceLock;

use tracing::{error, info, warn};

/// Probe string returned by [`identify`]
pub const IDENTITY: &str = "EdgeDetectionViewer Native Library Ready!";

/// Edge processor with a strategy resolved at construction
///
/// Holds no per-frame state, so one instance can serve frames from any
/// thread.
///
/// # Example
/// ```
/// use edge_viewer::EdgeProcessor;
///
/// let processor = EdgeProcessor::new();
/// let frame = vec![128u8; 4 * 4 + 8];
/// let image = processor.process(&frame, 4, 4).unwrap();
/// assert_eq!(image.len(), 4 * 4 * 3);
/// ```
pub struct EdgeProcessor {
    config: PipelineConfig,
    strategy: Box<dyn EdgeStrategy>,
}

impl EdgeProcessor {
    /// Processor with the default configuration
    pub fn new() -> Self {
        Self::from_valid(PipelineConfig::default())
    }

    /// Processor with a custom configuration.
    ///
    /// The configuration is validated and the strategy is picked here, once.
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: PipelineConfig) -> Self {
        let strategy = pipeline::select_strategy(&config);
        info!(strategy = %strategy.kind(), "edge processor ready");
        Self { config, strategy }
    }

    /// Strategy in use
    pub fn strategy(&self) -> StrategyKind {
        self.strategy.kind()
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a raw NV21 buffer.
    ///
    /// Dimensions are checked before `data` is looked at.
    pub fn process(&self, data: &[u8], width: i32, height: i32) -> Result<ProcessedImage> {
        info!(width, height, len = data.len(), "processing frame");
        let frame = Frame::new(data, width, height).inspect_err(|e| {
            error!(error = %e, "rejected frame");
        })?;
        self.process_frame(&frame)
    }

    /// Process an already validated frame
    pub fn process_frame(&self, frame: &Frame<'_>) -> Result<ProcessedImage> {
        match pipeline::run(frame, self.strategy.as_ref(), &self.config) {
            Ok(image) => {
                info!(
                    width = image.width(),
                    height = image.height(),
                    strategy = %image.strategy(),
                    elapsed_us = image.elapsed().as_micros() as u64,
                    "frame processed"
                );
                Ok(image)
            }
            Err(e) => {
                error!(error = %e, kind = ?e.kind(), "frame processing failed");
                Err(e)
            }
        }
    }

    /// Run the self-test for the selected strategy
    pub fn check_ready(&self) -> bool {
        match pipeline::self_test(self.strategy.kind(), &self.config) {
            Ok(()) => true,
            Err(e) => {
                error!(error = %e, "self-test failed");
                false
            }
        }
    }
}

impl Default for EdgeProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EdgeProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeProcessor")
            .field("config", &self.config)
            .field("strategy", &self.strategy.kind())
            .finish()
    }
}

static DEFAULT_PROCESSOR: OnceLock<EdgeProcessor> = OnceLock::new();

/// Shared processor configured from the environment
pub fn default_processor() -> &'static EdgeProcessor {
    DEFAULT_PROCESSOR.get_or_init(|| {
        let config = PipelineConfig::from_env();
        EdgeProcessor::with_config(config).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring environment configuration");
            EdgeProcessor::new()
        })
    })
}

/// Process an NV21 frame with the shared processor.
///
/// # Arguments
/// * `data` - Y plane followed by interleaved V/U plane
/// * `width` - Frame width in pixels
/// * `height` - Frame height in pixels
///
/// # Returns
/// RGB bytes, `width * height * 3` long, every byte 0 or 255
pub fn process(data: &[u8], width: i32, height: i32) -> Result<ProcessedImage> {
    default_processor().process(data, width, height)
}

/// Readiness self-test. Never panics.
pub fn check_ready() -> bool {
    std::panic::catch_unwind(|| default_processor().check_ready()).unwrap_or(false)
}

/// Liveness probe
pub fn identify() -> &'static str {
    IDENTITY
}
