use crate::models::ProcessedImage;
use crate::models::frame::required_len;
use image::GenericImageView;
use image::error::{ImageError, ParameterError, ParameterErrorKind};
use std::env;
use std::path::Path;

fn parse_max_dim(raw: Option<&str>) -> Option<u32> {
    match raw.map(|v| v.trim().parse::<u32>()) {
        Some(Ok(0)) => None,
        Some(Ok(v)) => Some(v),
        _ => None,
    }
}

fn max_dim_from_env() -> Option<u32> {
    parse_max_dim(env::var("EDGE_MAX_DIM").ok().as_deref())
}

/// Load an image as RGB bytes along with its dimensions.
///
/// `EDGE_MAX_DIM` (if set and non-zero) caps the longer side.
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), ImageError> {
    load_rgb_capped(path, max_dim_from_env())
}

/// Load an image as RGB bytes, shrinking it so neither side exceeds `max_dim`.
pub fn load_rgb_capped<P: AsRef<Path>>(
    path: P,
    max_dim: Option<u32>,
) -> Result<(Vec<u8>, usize, usize), ImageError> {
    let img = image::open(path)?;
    let rgb = match max_dim {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => img
            .resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
            .to_rgb8(),
        _ => img.to_rgb8(),
    };
    let (width, height) = rgb.dimensions();
    Ok((rgb.into_raw(), width as usize, height as usize))
}

/// Load an image file and encode it the way a camera would deliver it.
pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), ImageError> {
    let (rgb, width, height) = load_rgb(path)?;
    Ok((rgb_to_nv21(&rgb, width, height), width, height))
}

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Encode packed RGB as NV21, BT.601 limited range.
///
/// Each chroma pair is the average of its (up to) 2x2 pixel block.
///
/// # Panics
/// If `rgb` is shorter than `width * height * 3`.
pub fn rgb_to_nv21(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    assert!(rgb.len() >= width * height * 3, "RGB buffer too small");
    let mut out = vec![0u8; required_len(width, height).unwrap_or(0)];
    if out.is_empty() {
        return out;
    }
    let (luma, chroma) = out.split_at_mut(width * height);

    for (i, px) in rgb.chunks_exact(3).take(width * height).enumerate() {
        let (r, g, b) = (px[0] as i32, px[1] as i32, px[2] as i32);
        luma[i] = clamp_u8(((66 * r + 129 * g + 25 * b + 128) >> 8) + 16);
    }

    let stride = width.div_ceil(2) * 2;
    for cy in 0..height.div_ceil(2) {
        for cx in 0..width.div_ceil(2) {
            let (mut r, mut g, mut b, mut n) = (0i32, 0i32, 0i32, 0i32);
            for y in cy * 2..(cy * 2 + 2).min(height) {
                for x in cx * 2..(cx * 2 + 2).min(width) {
                    let p = (y * width + x) * 3;
                    r += rgb[p] as i32;
                    g += rgb[p + 1] as i32;
                    b += rgb[p + 2] as i32;
                    n += 1;
                }
            }
            let (r, g, b) = (r / n, g / n, b / n);
            let c = cy * stride + cx * 2;
            chroma[c] = clamp_u8(((112 * r - 94 * g - 18 * b + 128) >> 8) + 128);
            chroma[c + 1] = clamp_u8(((-38 * r - 74 * g + 112 * b + 128) >> 8) + 128);
        }
    }

    out
}

/// Write a processed image to disk; format follows the file extension.
pub fn save_processed<P: AsRef<Path>>(path: P, image: &ProcessedImage) -> Result<(), ImageError> {
    let rgb = image.to_rgb_image().ok_or_else(|| {
        ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))
    })?;
    rgb.save(path)
}

/// Summary statistics for an edge image.
#[derive(Debug, Clone, Copy)]
pub struct EdgeStats {
    /// Pixels marked as edge.
    pub edge_pixels: usize,
    /// Total pixels in the image.
    pub total_pixels: usize,
    /// Ratio of edge pixels to total pixels.
    pub edge_ratio: f64,
}

/// Count edge pixels in a processed image.
pub fn edge_stats(image: &ProcessedImage) -> EdgeStats {
    let edge = image
        .as_bytes()
        .chunks_exact(3)
        .filter(|px| px[0] == 255)
        .count();
    let total = image.width() * image.height();
    let ratio = if total == 0 {
        0.0
    } else {
        edge as f64 / total as f64
    };
    EdgeStats {
        edge_pixels: edge,
        total_pixels: total,
        edge_ratio: ratio,
    }
}
