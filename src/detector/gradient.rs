// Sobel 3x3 gradients:
//
//   Gx = [-1 0 1]      Gy = [-1 -2 -1]
//        [-2 0 2]           [ 0  0  0]
//        [-1 0 1]           [ 1  2  1]
//
// Positive Gx means intensity increases to the right, positive Gy downward.
// Border: clamp, same policy as the blur stage. Magnitude is the L1 norm
// |Gx| + |Gy|, at most 2040 for 8-bit input.

use crate::error::PipelineError;
use crate::models::GrayImage;
use crate::utils::buffer::try_alloc;

/// Per-pixel gradient components and L1 magnitude
#[derive(Debug, Clone)]
pub struct Gradients {
    width: usize,
    height: usize,
    gx: Vec<i16>,
    gy: Vec<i16>,
    magnitude: Vec<u16>,
}

impl Gradients {
    /// Width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Horizontal derivative at (x, y)
    pub fn gx(&self, x: usize, y: usize) -> i16 {
        self.gx[y * self.width + x]
    }

    /// Vertical derivative at (x, y)
    pub fn gy(&self, x: usize, y: usize) -> i16 {
        self.gy[y * self.width + x]
    }

    /// L1 magnitude at (x, y), or 0 outside the image
    pub fn magnitude(&self, x: isize, y: isize) -> u16 {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return 0;
        }
        self.magnitude[y as usize * self.width + x as usize]
    }
}

/// Compute Sobel gradients of `src`.
pub fn sobel(src: &GrayImage) -> Result<Gradients, PipelineError> {
    let (w, h) = (src.width(), src.height());
    let pixels = src.as_bytes();
    let len = w * h;

    let mut gx = try_alloc(len, 0i16)?;
    let mut gy = try_alloc(len, 0i16)?;
    let mut magnitude = try_alloc(len, 0u16)?;

    for y in 0..h {
        let rows = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        for x in 0..w {
            let cols = [x.saturating_sub(1), x, (x + 1).min(w - 1)];
            let p = |r: usize, c: usize| pixels[rows[r] * w + cols[c]] as i32;

            let dx = (p(0, 2) + 2 * p(1, 2) + p(2, 2)) - (p(0, 0) + 2 * p(1, 0) + p(2, 0));
            let dy = (p(2, 0) + 2 * p(2, 1) + p(2, 2)) - (p(0, 0) + 2 * p(0, 1) + p(0, 2));

            let idx = y * w + x;
            gx[idx] = dx as i16;
            gy[idx] = dy as i16;
            magnitude[idx] = (dx.abs() + dy.abs()) as u16;
        }
    }

    Ok(Gradients {
        width: w,
        height: h,
        gx,
        gy,
        magnitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_step(w: usize, h: usize, at: usize, value: u8) -> GrayImage {
        let mut img = GrayImage::try_new(w, h).unwrap();
        for y in 0..h {
            for x in at..w {
                img.set(x, y, value);
            }
        }
        img
    }

    #[test]
    fn test_horizontal_gradient() {
        // Vertical step edge: left half = 0, right half = 100
        let img = vertical_step(10, 6, 5, 100);
        let g = sobel(&img).unwrap();

        // Columns either side of the step see the full 4 * 100 response
        assert_eq!(g.gx(4, 3), 400);
        assert_eq!(g.gx(5, 3), 400);
        assert_eq!(g.gy(4, 3), 0);
        assert_eq!(g.magnitude(4, 3), 400);

        // Far from the edge nothing
        assert_eq!(g.gx(1, 3), 0);
        assert_eq!(g.magnitude(8, 3), 0);
    }

    #[test]
    fn test_vertical_gradient_sign() {
        // Bright top, dark bottom: intensity decreases downward
        let mut img = GrayImage::try_new(6, 6).unwrap();
        for y in 0..3 {
            for x in 0..6 {
                img.set(x, y, 200);
            }
        }
        let g = sobel(&img).unwrap();
        assert!(g.gy(3, 2) < 0);
        assert_eq!(g.gx(3, 2), 0);
    }

    #[test]
    fn test_flat_image_has_no_gradient() {
        let img = GrayImage::from_vec(5, 5, vec![77; 25]);
        let g = sobel(&img).unwrap();
        for y in 0..5 {
            for x in 0..5 {
                assert_eq!(g.magnitude(x, y), 0);
            }
        }
    }

    #[test]
    fn test_max_response_fits() {
        let img = vertical_step(3, 3, 1, 255);
        let g = sobel(&img).unwrap();
        assert_eq!(g.magnitude(1, 1), 1020);
        assert_eq!(g.magnitude(-1, 0), 0);
        assert_eq!(g.magnitude(0, 3), 0);
    }

    #[test]
    fn test_single_pixel_image() {
        let img = GrayImage::from_vec(1, 1, vec![255]);
        let g = sobel(&img).unwrap();
        assert_eq!(g.magnitude(0, 0), 0);
    }
}
