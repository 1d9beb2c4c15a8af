use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::{PipelineConfig, StrategyKind};
use crate::detector::canny;
use crate::error::PipelineError;
use crate::models::{Frame, GrayImage, ProcessedImage};
use crate::utils::binarization::{is_binary, threshold_binarize};
use crate::utils::grayscale::grayscale_to_rgb;
use crate::utils::yuv::luma_plane;

#[cfg(not(feature = "parallel"))]
use crate::utils::{blur::gaussian_blur, grayscale::rgb_to_grayscale, yuv::nv21_to_rgb};
#[cfg(feature = "parallel")]
use crate::utils::{
    blur::gaussian_blur_parallel as gaussian_blur,
    grayscale::rgb_to_grayscale_parallel as rgb_to_grayscale,
    yuv::nv21_to_rgb_parallel as nv21_to_rgb,
};

/// Edge extraction: turns a frame into a single-channel 0/255 image of the
/// same dimensions.
pub trait EdgeStrategy: Send + Sync {
    /// Which strategy this is
    fn kind(&self) -> StrategyKind;

    /// Run the strategy's stages over `frame`.
    fn edges(&self, frame: &Frame<'_>, config: &PipelineConfig) -> Result<GrayImage, PipelineError>;
}

/// Color conversion, grayscale, smoothing and Canny
#[derive(Debug, Default, Clone, Copy)]
pub struct CannyStrategy;

/// Midpoint threshold of the luma plane; no smoothing, lower fidelity
#[derive(Debug, Default, Clone, Copy)]
pub struct ThresholdStrategy;

impl EdgeStrategy for CannyStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Canny
    }

    fn edges(&self, frame: &Frame<'_>, config: &PipelineConfig) -> Result<GrayImage, PipelineError> {
        let intensity = intensity(frame, config)?;

        let smooth = gaussian_blur(&intensity, config.blur_kernel_size)?;
        debug!(kernel = config.blur_kernel_size, "blur done");

        let edges = canny(&smooth, config.low_threshold, config.high_threshold)?;
        debug!(
            low = config.low_threshold,
            high = config.high_threshold,
            "edge extraction done"
        );
        Ok(edges)
    }
}

impl EdgeStrategy for ThresholdStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Threshold
    }

    fn edges(&self, frame: &Frame<'_>, config: &PipelineConfig) -> Result<GrayImage, PipelineError> {
        let edges = threshold_binarize(
            frame.luma(),
            frame.width(),
            frame.height(),
            config.fallback_threshold,
        )?;
        debug!(threshold = config.fallback_threshold, "threshold done");
        Ok(edges)
    }
}

/// Stages 1 and 2: intensity image from the frame
fn intensity(frame: &Frame<'_>, config: &PipelineConfig) -> Result<GrayImage, PipelineError> {
    if config.color_conversion {
        let rgb = nv21_to_rgb(frame)?;
        debug!("color conversion done");
        rgb_to_grayscale(&rgb, frame.width(), frame.height())
    } else {
        luma_plane(frame)
    }
}

/// Strategy object for a kind
pub fn strategy_for(kind: StrategyKind) -> Box<dyn EdgeStrategy> {
    match kind {
        StrategyKind::Canny => Box::new(CannyStrategy),
        StrategyKind::Threshold => Box::new(ThresholdStrategy),
    }
}

pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run `strategy` over a validated frame and expand the result to RGB.
///
/// Panics inside the stages are contained and reported as
/// [`PipelineError::Processing`].
pub fn run(
    frame: &Frame<'_>,
    strategy: &dyn EdgeStrategy,
    config: &PipelineConfig,
) -> Result<ProcessedImage, PipelineError> {
    let start = Instant::now();
    let (width, height) = (frame.width(), frame.height());

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let edges = strategy.edges(frame, config)?;
        if edges.width() != width || edges.height() != height {
            return Err(PipelineError::Processing(format!(
                "edge image is {}x{}, frame is {}x{}",
                edges.width(),
                edges.height(),
                width,
                height
            )));
        }
        grayscale_to_rgb(&edges)
    }));

    let rgb = match outcome {
        Ok(result) => result?,
        Err(payload) => return Err(PipelineError::Processing(panic_message(payload))),
    };

    Ok(ProcessedImage::new(
        rgb,
        width,
        height,
        strategy.kind(),
        start.elapsed(),
    ))
}

const SELF_TEST_SIZE: usize = 16;

/// 16x16 NV21 frame: dark left half, bright right half, neutral chroma
fn self_test_frame() -> Vec<u8> {
    let n = SELF_TEST_SIZE;
    let mut data = vec![128u8; n * n + n * n / 2];
    for y in 0..n {
        for x in 0..n {
            data[y * n + x] = if x < n / 2 { 16 } else { 235 };
        }
    }
    data
}

/// Check that `kind` runs end to end and produces a plausible result.
pub fn self_test(kind: StrategyKind, config: &PipelineConfig) -> Result<(), PipelineError> {
    let n = SELF_TEST_SIZE;

    let outcome = panic::catch_unwind(|| {
        // Scratch allocation and release
        let scratch = GrayImage::try_new(n, n)?;
        drop(scratch);

        let data = self_test_frame();
        let frame = Frame::new(&data, n as i32, n as i32)?;
        let strategy = strategy_for(kind);
        run(&frame, strategy.as_ref(), config)
    });

    let image = match outcome {
        Ok(result) => result.map_err(|e| PipelineError::Initialization(e.to_string()))?,
        Err(payload) => return Err(PipelineError::Initialization(panic_message(payload))),
    };

    if image.len() != n * n * 3 {
        return Err(PipelineError::Initialization(format!(
            "self-test output has {} bytes, expected {}",
            image.len(),
            n * n * 3
        )));
    }
    if !is_binary(image.as_bytes()) {
        return Err(PipelineError::Initialization(
            "self-test output is not binary".to_string(),
        ));
    }
    if !image.as_bytes().contains(&255) {
        return Err(PipelineError::Initialization(
            "self-test found no edges".to_string(),
        ));
    }
    Ok(())
}

/// Resolve the strategy once, at initialization.
///
/// A preferred Canny strategy that fails its self-test is replaced by the
/// threshold strategy.
pub fn select_strategy(config: &PipelineConfig) -> Box<dyn EdgeStrategy> {
    match config.strategy {
        StrategyKind::Canny => match self_test(StrategyKind::Canny, config) {
            Ok(()) => strategy_for(StrategyKind::Canny),
            Err(e) => {
                warn!(error = %e, "edge detector unavailable, using degraded threshold mode");
                strategy_for(StrategyKind::Threshold)
            }
        },
        StrategyKind::Threshold => {
            warn!("threshold mode selected by configuration, edge output is degraded");
            strategy_for(StrategyKind::Threshold)
        }
    }
}
