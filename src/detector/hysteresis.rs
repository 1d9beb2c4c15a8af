// Double-threshold edge tracking.
//
// magnitude > high        → strong, always an edge
// low < magnitude <= high → weak, an edge only if 8-connected (through other
//                           weak pixels) to a strong one
// otherwise               → background
//
// Tracking uses an explicit stack, so recursion depth never depends on the
// edge length.

use crate::error::PipelineError;
use crate::models::GrayImage;
use crate::utils::buffer::try_with_capacity;
use crate::utils::binarization::EDGE;

const BACKGROUND: u8 = 0;
const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Resolve a thinned magnitude map into a 0/255 edge image.
pub fn hysteresis(
    thin: &[u16],
    width: usize,
    height: usize,
    low: u32,
    high: u32,
) -> Result<GrayImage, PipelineError> {
    if low > high {
        return Err(PipelineError::InvalidConfig(format!(
            "low threshold {} exceeds high threshold {}",
            low, high
        )));
    }
    if thin.len() != width * height {
        return Err(PipelineError::Processing(format!(
            "magnitude map has {} entries, expected {}",
            thin.len(),
            width * height
        )));
    }

    let mut edges = GrayImage::try_new(width, height)?;
    let class = edges.as_bytes_mut();
    // Each pixel is pushed at most once
    let mut stack: Vec<usize> = try_with_capacity(thin.len())?;

    for (i, &m) in thin.iter().enumerate() {
        let m = m as u32;
        if m > high {
            class[i] = STRONG;
            stack.push(i);
        } else if m > low {
            class[i] = WEAK;
        }
    }

    while let Some(i) = stack.pop() {
        let (x, y) = ((i % width) as isize, (i / width) as isize);
        for dy in -1..=1isize {
            for dx in -1..=1isize {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if class[n] == WEAK {
                    class[n] = STRONG;
                    stack.push(n);
                }
            }
        }
    }

    for v in class.iter_mut() {
        *v = if *v == STRONG { EDGE } else { BACKGROUND };
    }

    Ok(edges)
}
