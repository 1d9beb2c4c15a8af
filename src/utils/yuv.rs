//! NV21 (Y plane + interleaved V,U plane) to RGB, ITU-R BT.601 limited range
//!
//! Fixed point, 8 fractional bits:
//!   R = (298*(Y-16)             + 409*(V-128) + 128) >> 8
//!   G = (298*(Y-16) - 100*(U-128) - 208*(V-128) + 128) >> 8
//!   B = (298*(Y-16) + 516*(U-128)              + 128) >> 8

use crate::error::PipelineError;
use crate::models::{Frame, GrayImage};
use crate::utils::buffer::try_alloc_bytes;

const COEF_Y: i32 = 298;
const COEF_RV: i32 = 409;
const COEF_GU: i32 = 100;
const COEF_GV: i32 = 208;
const COEF_BU: i32 = 516;

#[inline]
fn clamp_u8(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}

/// Convert one YUV sample to RGB
#[inline]
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> [u8; 3] {
    let c = COEF_Y * (y as i32 - 16);
    let d = u as i32 - 128;
    let e = v as i32 - 128;
    [
        clamp_u8((c + COEF_RV * e + 128) >> 8),
        clamp_u8((c - COEF_GU * d - COEF_GV * e + 128) >> 8),
        clamp_u8((c + COEF_BU * d + 128) >> 8),
    ]
}

/// Convert an NV21 frame to packed RGB (3 bytes per pixel)
pub fn nv21_to_rgb(frame: &Frame<'_>) -> Result<Vec<u8>, PipelineError> {
    let mut rgb = try_alloc_bytes(frame.pixel_count() * 3)?;
    nv21_to_rgb_into(frame, &mut rgb);
    Ok(rgb)
}

/// Convert an NV21 frame into a caller-provided RGB buffer.
///
/// # Panics
/// If `rgb` is shorter than `width * height * 3`.
pub fn nv21_to_rgb_into(frame: &Frame<'_>, rgb: &mut [u8]) {
    let width = frame.width();
    assert!(rgb.len() >= frame.pixel_count() * 3, "Output buffer too small");

    for (y, row) in rgb[..frame.pixel_count() * 3].chunks_exact_mut(width * 3).enumerate() {
        convert_row(frame, y, row);
    }
}

/// Row-parallel variant of [`nv21_to_rgb`]
#[cfg(feature = "parallel")]
pub fn nv21_to_rgb_parallel(frame: &Frame<'_>) -> Result<Vec<u8>, PipelineError> {
    use rayon::prelude::*;

    let width = frame.width();
    let mut rgb = try_alloc_bytes(frame.pixel_count() * 3)?;
    rgb.par_chunks_mut(width * 3)
        .enumerate()
        .for_each(|(y, row)| convert_row(frame, y, row));
    Ok(rgb)
}

fn convert_row(frame: &Frame<'_>, y: usize, row: &mut [u8]) {
    let width = frame.width();
    let luma = &frame.luma()[y * width..(y + 1) * width];
    let chroma = frame.chroma();
    let chroma_row = (y / 2) * frame.chroma_stride();

    for x in 0..width {
        let c = chroma_row + (x / 2) * 2;
        let v = chroma[c];
        let u = chroma[c + 1];
        let px = yuv_to_rgb(luma[x], u, v);
        row[x * 3..x * 3 + 3].copy_from_slice(&px);
    }
}

/// Copy the luma plane out as a grayscale image
pub fn luma_plane(frame: &Frame<'_>) -> Result<GrayImage, PipelineError> {
    let mut gray = GrayImage::try_new(frame.width(), frame.height())?;
    gray.as_bytes_mut().copy_from_slice(frame.luma());
    Ok(gray)
}
