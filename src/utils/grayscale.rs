//! Convert RGB image to grayscale
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8

use crate::error::PipelineError;
use crate::models::GrayImage;
use crate::utils::buffer::try_alloc_bytes;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: u32 = 76;
const COEF_G: u32 = 150;
const COEF_B: u32 = 29;

#[inline]
fn luminance(px: &[u8]) -> u8 {
    let lum = (COEF_R * px[0] as u32 + COEF_G * px[1] as u32 + COEF_B * px[2] as u32) >> 8;
    lum.min(255) as u8
}

/// Convert packed RGB to a grayscale image
pub fn rgb_to_grayscale(
    rgb: &[u8],
    width: usize,
    height: usize,
) -> Result<GrayImage, PipelineError> {
    let mut gray = GrayImage::try_new(width, height)?;
    rgb_to_grayscale_with_buffer(rgb, width, height, gray.as_bytes_mut());
    Ok(gray)
}

/// Convert RGB to grayscale using a pre-allocated buffer (no allocation)
///
/// # Arguments
/// * `rgb` - Input RGB image data
/// * `width` - Image width
/// * `height` - Image height
/// * `output` - Pre-allocated output buffer (must have len >= width * height)
///
/// # Returns
/// Number of pixels written (width * height)
pub fn rgb_to_grayscale_with_buffer(
    rgb: &[u8],
    width: usize,
    height: usize,
    output: &mut [u8],
) -> usize {
    let pixel_count = width * height;
    assert!(output.len() >= pixel_count, "Output buffer too small");
    assert!(rgb.len() >= pixel_count * 3, "Input buffer too small");

    for (out, px) in output[..pixel_count]
        .iter_mut()
        .zip(rgb.chunks_exact(3))
    {
        *out = luminance(px);
    }

    pixel_count
}

/// Replicate each gray value into an RGB triplet (display-format expansion)
pub fn grayscale_to_rgb(gray: &GrayImage) -> Result<Vec<u8>, PipelineError> {
    let mut rgb = try_alloc_bytes(gray.as_bytes().len() * 3)?;
    for (px, &v) in rgb.chunks_exact_mut(3).zip(gray.as_bytes()) {
        px.fill(v);
    }
    Ok(rgb)
}

// ============== Parallel Processing with Rayon ==============

/// Convert RGB to grayscale using parallel processing
/// Processes rows in parallel for multi-core speedup
#[cfg(feature = "parallel")]
pub fn rgb_to_grayscale_parallel(
    rgb: &[u8],
    width: usize,
    height: usize,
) -> Result<GrayImage, PipelineError> {
    use rayon::prelude::*;

    assert!(rgb.len() >= width * height * 3, "Input buffer too small");
    let mut gray = GrayImage::try_new(width, height)?;

    gray.as_bytes_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let row_start = y * width * 3;
            let src = &rgb[row_start..row_start + width * 3];
            for (out, px) in row.iter_mut().zip(src.chunks_exact(3)) {
                *out = luminance(px);
            }
        });

    Ok(gray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_grayscale() {
        // Pure white
        let white = vec![255, 255, 255];
        let gray = rgb_to_grayscale(&white, 1, 1).unwrap();
        assert!(gray.as_bytes()[0] >= 254);

        // Pure black
        let black = vec![0, 0, 0];
        let gray = rgb_to_grayscale(&black, 1, 1).unwrap();
        assert_eq!(gray.as_bytes()[0], 0);

        // Pure red
        let red = vec![255, 0, 0];
        let gray = rgb_to_grayscale(&red, 1, 1).unwrap();
        assert!(gray.as_bytes()[0] < 255);
        assert!(gray.as_bytes()[0] > 0);

        // Pure green
        let green = vec![0, 255, 0];
        let gray = rgb_to_grayscale(&green, 1, 1).unwrap();
        assert!(gray.as_bytes()[0] > 100);

        // 2x2 image
        let img = vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let gray = rgb_to_grayscale(&img, 2, 2).unwrap();
        assert_eq!(gray.as_bytes().len(), 4);
    }

    #[test]
    fn test_equal_channels_keep_value() {
        // 76 + 150 + 29 = 255, so gray triplets lose at most one level
        for v in [0u8, 1, 64, 127, 128, 200, 255] {
            let gray = rgb_to_grayscale(&[v, v, v], 1, 1).unwrap();
            let out = gray.as_bytes()[0];
            assert!(out == v || out + 1 == v, "{} -> {}", v, out);
        }
    }

    #[test]
    fn test_with_buffer_count() {
        let rgb = vec![10u8; 6 * 3];
        let mut out = vec![0u8; 8];
        let written = rgb_to_grayscale_with_buffer(&rgb, 3, 2, &mut out);
        assert_eq!(written, 6);
        assert_eq!(out[6], 0);
        assert_eq!(out[7], 0);
    }

    #[test]
    fn test_grayscale_to_rgb() {
        let gray = GrayImage::from_vec(3, 1, vec![0, 255, 77]);
        let rgb = grayscale_to_rgb(&gray).unwrap();
        assert_eq!(rgb, vec![0, 0, 0, 255, 255, 255, 77, 77, 77]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_scalar() {
        let rgb: Vec<u8> = (0..(17 * 9 * 3)).map(|i| (i * 31 % 256) as u8).collect();
        let scalar = rgb_to_grayscale(&rgb, 17, 9).unwrap();
        let parallel = rgb_to_grayscale_parallel(&rgb, 17, 9).unwrap();
        assert_eq!(scalar, parallel);
    }
}
