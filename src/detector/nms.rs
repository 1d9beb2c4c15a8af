// Non-maximum suppression along the gradient direction.
//
// The direction is quantized into four sectors without trigonometry by
// comparing |gy| against |gx| * tan(22.5°) and |gx| * tan(67.5°) in Q15 fixed
// point:
//   |gy| < tan22.5 * |gx|          → horizontal gradient, compare left/right
//   |gy| > tan67.5 * |gx|          → vertical gradient, compare up/down
//   otherwise                      → diagonal, compare the two corners the
//                                    gradient points through
//
// Ties: along the axis the pixel must be strictly greater than the "previous"
// neighbour and at least equal to the "next" one, so a plateau two pixels wide
// keeps exactly one. Neighbours outside the image count as 0.

use super::gradient::Gradients;
use crate::error::PipelineError;
use crate::utils::buffer::try_alloc;

/// tan(22.5°) in Q15
const TG22: i64 = 13573;

/// Thin the gradient magnitude to ridge maxima.
///
/// Returns a magnitude map where non-maximal pixels are zeroed.
pub fn suppress(grad: &Gradients) -> Result<Vec<u16>, PipelineError> {
    let (w, h) = (grad.width(), grad.height());
    let mut thin = try_alloc(w * h, 0u16)?;

    for y in 0..h {
        for x in 0..w {
            let (xi, yi) = (x as isize, y as isize);
            let m = grad.magnitude(xi, yi);
            if m == 0 {
                continue;
            }

            let gx = grad.gx(x, y) as i64;
            let gy = grad.gy(x, y) as i64;
            let ax = gx.abs();
            let ay = gy.abs() << 15;
            let tg22x = ax * TG22;

            let keep = if ay < tg22x {
                m > grad.magnitude(xi - 1, yi) && m >= grad.magnitude(xi + 1, yi)
            } else {
                let tg67x = tg22x + (ax << 16);
                if ay > tg67x {
                    m > grad.magnitude(xi, yi - 1) && m >= grad.magnitude(xi, yi + 1)
                } else {
                    let s: isize = if (gx ^ gy) < 0 { -1 } else { 1 };
                    m > grad.magnitude(xi - s, yi - 1) && m > grad.magnitude(xi + s, yi + 1)
                }
            };

            if keep {
                thin[y * w + x] = m;
            }
        }
    }

    Ok(thin)
}
