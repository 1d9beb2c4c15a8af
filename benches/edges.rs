use criterion::{Criterion, black_box, criterion_group, criterion_main};
use edge_viewer::detector::canny;
use edge_viewer::detector::gradient::sobel;
use edge_viewer::detector::nms::suppress;
use edge_viewer::models::{Frame, GrayImage};
use edge_viewer::utils::binarization::threshold_binarize;
use edge_viewer::utils::blur::gaussian_blur;
use edge_viewer::utils::yuv::luma_plane;

mod common;
use common::synthetic_frame;

fn gray_640x480() -> GrayImage {
    let data = synthetic_frame(640, 480);
    let frame = Frame::new(&data, 640, 480).unwrap();
    luma_plane(&frame).unwrap()
}

fn bench_blur_kernels(c: &mut Criterion) {
    let gray = gray_640x480();
    for size in [3usize, 5, 7] {
        c.bench_function(&format!("gaussian_blur_{size}_640x480"), |b| {
            b.iter(|| gaussian_blur(black_box(&gray), black_box(size)))
        });
    }
}

fn bench_sobel(c: &mut Criterion) {
    let gray = gaussian_blur(&gray_640x480(), 5).unwrap();
    c.bench_function("sobel_640x480", |b| b.iter(|| sobel(black_box(&gray))));
}

fn bench_suppress(c: &mut Criterion) {
    let gray = gaussian_blur(&gray_640x480(), 5).unwrap();
    let grad = sobel(&gray).unwrap();
    c.bench_function("nms_640x480", |b| b.iter(|| suppress(black_box(&grad))));
}

fn bench_canny(c: &mut Criterion) {
    let gray = gaussian_blur(&gray_640x480(), 5).unwrap();
    c.bench_function("canny_50_150_640x480", |b| {
        b.iter(|| canny(black_box(&gray), black_box(50), black_box(150)))
    });
}

fn bench_threshold(c: &mut Criterion) {
    let gray = gray_640x480();
    c.bench_function("threshold_128_640x480", |b| {
        b.iter(|| threshold_binarize(black_box(gray.as_bytes()), 640, 480, black_box(128)))
    });
}

criterion_group!(
    benches,
    bench_blur_kernels,
    bench_sobel,
    bench_suppress,
    bench_canny,
    bench_threshold
);
criterion_main!(benches);
