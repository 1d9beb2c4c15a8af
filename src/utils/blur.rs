//! Separable Gaussian-shaped smoothing
//!
//! Kernels are binomial rows (the Gaussian a 5-tap kernel gets when sigma is
//! left at its default). Both passes accumulate in integers, so the result is
//! bit-exact across runs and between the sequential and parallel variants.
//!
//! BORDER HANDLING: clamp (replicate edge pixels). Window indices that fall
//! outside the image are clamped to the nearest edge row/column; no read ever
//! leaves the buffer.

use crate::error::PipelineError;
use crate::models::GrayImage;
use crate::utils::buffer::try_alloc;

const KERNEL_1: [u32; 1] = [1];
const KERNEL_3: [u32; 3] = [1, 2, 1];
const KERNEL_5: [u32; 5] = [1, 4, 6, 4, 1];
const KERNEL_7: [u32; 7] = [1, 6, 15, 20, 15, 6, 1];

/// Binomial weights for an odd kernel size, or `None` if unsupported.
///
/// Weights of a size-k kernel sum to 2^(k-1).
pub fn binomial_kernel(size: usize) -> Option<&'static [u32]> {
    match size {
        1 => Some(&KERNEL_1),
        3 => Some(&KERNEL_3),
        5 => Some(&KERNEL_5),
        7 => Some(&KERNEL_7),
        _ => None,
    }
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

/// Horizontal pass for one row: unnormalized sums
fn blur_row(src: &[u8], kernel: &[u32], dst: &mut [u32]) {
    let w = src.len();
    let half = (kernel.len() / 2) as isize;
    for (x, out) in dst.iter_mut().enumerate() {
        let mut acc = 0u32;
        for (k, &kv) in kernel.iter().enumerate() {
            let sx = clamp_index(x as isize + k as isize - half, w);
            acc += kv * src[sx] as u32;
        }
        *out = acc;
    }
}

/// Vertical pass producing output row `y`, normalized with rounding
fn blur_col(tmp: &[u32], width: usize, height: usize, y: usize, kernel: &[u32], shift: u32, dst: &mut [u8]) {
    let half = (kernel.len() / 2) as isize;
    let round = (1u32 << shift) >> 1;
    for (x, out) in dst.iter_mut().enumerate() {
        let mut acc = 0u32;
        for (k, &kv) in kernel.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - half, height);
            acc += kv * tmp[sy * width + x];
        }
        *out = ((acc + round) >> shift).min(255) as u8;
    }
}

fn kernel_for(size: usize) -> Result<&'static [u32], PipelineError> {
    binomial_kernel(size)
        .ok_or_else(|| PipelineError::InvalidConfig(format!("unsupported blur kernel size {}", size)))
}

/// Smooth `src` with a `kernel_size` x `kernel_size` binomial kernel.
pub fn gaussian_blur(src: &GrayImage, kernel_size: usize) -> Result<GrayImage, PipelineError> {
    let kernel = kernel_for(kernel_size)?;
    let (w, h) = (src.width(), src.height());
    let shift = 2 * (kernel.len() as u32 - 1);

    let mut tmp = try_alloc(w * h, 0u32)?;
    for (row, out) in src.as_bytes().chunks_exact(w).zip(tmp.chunks_exact_mut(w)) {
        blur_row(row, kernel, out);
    }

    let mut dst = GrayImage::try_new(w, h)?;
    for (y, out) in dst.as_bytes_mut().chunks_exact_mut(w).enumerate() {
        blur_col(&tmp, w, h, y, kernel, shift, out);
    }
    Ok(dst)
}

/// Row-parallel variant of [`gaussian_blur`]; output is identical
#[cfg(feature = "parallel")]
pub fn gaussian_blur_parallel(src: &GrayImage, kernel_size: usize) -> Result<GrayImage, PipelineError> {
    use rayon::prelude::*;

    let kernel = kernel_for(kernel_size)?;
    let (w, h) = (src.width(), src.height());
    let shift = 2 * (kernel.len() as u32 - 1);

    let mut tmp = try_alloc(w * h, 0u32)?;
    tmp.par_chunks_mut(w)
        .zip(src.as_bytes().par_chunks(w))
        .for_each(|(out, row)| blur_row(row, kernel, out));

    let mut dst = GrayImage::try_new(w, h)?;
    dst.as_bytes_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, out)| blur_col(&tmp, w, h, y, kernel, shift, out));
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_sums() {
        for size in [1usize, 3, 5, 7] {
            let k = binomial_kernel(size).unwrap();
            assert_eq!(k.len(), size);
            assert_eq!(k.iter().sum::<u32>(), 1 << (size - 1));
        }
        assert!(binomial_kernel(4).is_none());
        assert!(binomial_kernel(9).is_none());
    }

    #[test]
    fn test_constant_image_unchanged() {
        let src = GrayImage::from_vec(7, 5, vec![93; 35]);
        let out = gaussian_blur(&src, 5).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn test_kernel_one_is_identity() {
        let data: Vec<u8> = (0..20).map(|i| (i * 13) as u8).collect();
        let src = GrayImage::from_vec(5, 4, data);
        assert_eq!(gaussian_blur(&src, 1).unwrap(), src);
    }

    #[test]
    fn test_impulse_spreads_symmetrically() {
        let mut src = GrayImage::try_new(9, 9).unwrap();
        src.set(4, 4, 255);
        let out = gaussian_blur(&src, 5).unwrap();

        // Center weight is 36/256
        assert_eq!(out.get(4, 4), ((255 * 36 + 128) >> 8) as u8);
        assert_eq!(out.get(3, 4), out.get(5, 4));
        assert_eq!(out.get(4, 3), out.get(4, 5));
        assert_eq!(out.get(2, 2), out.get(6, 6));
        // Outside the 5x5 footprint nothing changes
        assert_eq!(out.get(1, 4), 0);
        assert_eq!(out.get(4, 7), 0);
    }

    #[test]
    fn test_tiny_images_stay_in_bounds() {
        // Kernel wider than the image: every tap clamps onto the edge
        for (w, h) in [(1usize, 1usize), (2, 1), (1, 3), (2, 2)] {
            let data: Vec<u8> = (0..w * h).map(|i| (i * 100) as u8).collect();
            let src = GrayImage::from_vec(w, h, data);
            let out = gaussian_blur(&src, 7).unwrap();
            assert_eq!(out.width(), w);
            assert_eq!(out.height(), h);
        }
    }

    #[test]
    fn test_unsupported_kernel() {
        let src = GrayImage::try_new(4, 4).unwrap();
        assert!(gaussian_blur(&src, 6).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let data: Vec<u8> = (0..(31 * 17)).map(|i| (i * 7 % 251) as u8).collect();
        let src = GrayImage::from_vec(31, 17, data);
        assert_eq!(
            gaussian_blur(&src, 5).unwrap(),
            gaussian_blur_parallel(&src, 5).unwrap()
        );
    }
}
