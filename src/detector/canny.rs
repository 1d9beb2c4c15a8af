use super::gradient::sobel;
use super::hysteresis::hysteresis;
use super::nms::suppress;
use crate::error::PipelineError;
use crate::models::GrayImage;

/// Canny edge detection on an already smoothed intensity image.
///
/// Thresholds apply to the L1 gradient magnitude. Output is 0/255.
pub fn canny(src: &GrayImage, low: u32, high: u32) -> Result<GrayImage, PipelineError> {
    let grad = sobel(src)?;
    let thin = suppress(&grad)?;
    hysteresis(&thin, src.width(), src.height(), low, high)
}
