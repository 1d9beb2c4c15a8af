use edge_viewer::models::frame::required_len;

/// NV21 frame with a bright disc on a horizontal luma ramp and mild chroma.
#[allow(dead_code)]
pub fn synthetic_frame(width: usize, height: usize) -> Vec<u8> {
    let mut data = vec![128u8; required_len(width, height).unwrap()];
    let (cx, cy) = (width as i64 / 2, height as i64 / 2);
    let r2 = (width.min(height) as i64 / 4).pow(2);

    for y in 0..height {
        for x in 0..width {
            let (dx, dy) = (x as i64 - cx, y as i64 - cy);
            data[y * width + x] = if dx * dx + dy * dy < r2 {
                220
            } else {
                (16 + x * 100 / width) as u8
            };
        }
    }
    for (i, v) in data[width * height..].iter_mut().enumerate() {
        *v = if i % 2 == 0 { 140 } else { 110 };
    }
    data
}
