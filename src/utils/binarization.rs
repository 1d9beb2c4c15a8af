//! Threshold binarization, the degraded edge mode

use crate::error::PipelineError;
use crate::models::GrayImage;

/// Binary "on" value
pub const EDGE: u8 = 255;
/// Binary "off" value
pub const NO_EDGE: u8 = 0;

/// Simple global threshold binarization
///
/// Pixels strictly above `threshold` become 255, everything else 0.
pub fn threshold_binarize(
    gray: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
) -> Result<GrayImage, PipelineError> {
    let mut binary = GrayImage::try_new(width, height)?;

    for (out, &v) in binary.as_bytes_mut().iter_mut().zip(gray) {
        *out = if v > threshold { EDGE } else { NO_EDGE };
    }

    Ok(binary)
}

/// True when every pixel is 0 or 255
pub fn is_binary(pixels: &[u8]) -> bool {
    pixels.iter().all(|&v| v == EDGE || v == NO_EDGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_binarize() {
        let gray = vec![100, 150, 200, 50]; // 2x2 image
        let binary = threshold_binarize(&gray, 2, 2, 128).unwrap();

        assert_eq!(binary.get(0, 0), NO_EDGE); // 100 <= 128
        assert_eq!(binary.get(1, 0), EDGE); // 150 > 128
        assert_eq!(binary.get(0, 1), EDGE); // 200 > 128
        assert_eq!(binary.get(1, 1), NO_EDGE); // 50 <= 128
    }

    #[test]
    fn test_threshold_is_strict() {
        let gray = vec![127, 128, 129];
        let binary = threshold_binarize(&gray, 3, 1, 128).unwrap();
        assert_eq!(binary.as_bytes(), &[0, 0, 255]);
    }

    #[test]
    fn test_is_binary() {
        assert!(is_binary(&[0, 255, 255, 0]));
        assert!(!is_binary(&[0, 254]));
        assert!(is_binary(&[]));
    }
}
