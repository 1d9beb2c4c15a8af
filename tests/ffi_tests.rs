//! C ABI behaviour as seen by a host application

use edge_viewer::ffi::{edge_check_ready, edge_free_buffer, edge_identify, edge_process};
use std::ffi::CStr;
use std::ptr;

fn frame(width: usize, height: usize, luma: u8) -> Vec<u8> {
    let mut data = vec![luma; width * height];
    data.resize(width * height + width.div_ceil(2) * height.div_ceil(2) * 2, 128);
    data
}

#[test]
fn test_ready_and_identify() {
    assert!(edge_check_ready());
    let id = unsafe { CStr::from_ptr(edge_identify()) };
    assert_eq!(id.to_str().unwrap(), "EdgeDetectionViewer Native Library Ready!");
    // Same static pointer every time
    assert_eq!(edge_identify(), edge_identify());
}

#[test]
fn test_process_and_free() {
    let data = frame(20, 10, 90);
    let mut out_len = 0usize;
    let out = unsafe { edge_process(data.as_ptr(), data.len(), 20, 10, &mut out_len) };
    assert!(!out.is_null());
    assert_eq!(out_len, 20 * 10 * 3);

    let bytes = unsafe { std::slice::from_raw_parts(out, out_len) };
    assert!(bytes.iter().all(|&v| v == 0));
    unsafe { edge_free_buffer(out, out_len) };
}

#[test]
fn test_invalid_dimensions_do_not_touch_buffer() {
    let mut out_len = 1234usize;
    for &(w, h) in &[(0, 10), (10, 0), (-5, 10), (10, -5)] {
        let out = unsafe { edge_process(ptr::null(), usize::MAX, w, h, &mut out_len) };
        assert!(out.is_null());
        assert_eq!(out_len, 0);
    }
}

#[test]
fn test_short_buffer_returns_null() {
    let data = frame(8, 8, 200);
    let mut out_len = 0usize;
    let out = unsafe { edge_process(data.as_ptr(), data.len() - 1, 8, 8, &mut out_len) };
    assert!(out.is_null());
    assert_eq!(out_len, 0);
}

#[test]
fn test_odd_dimensions() {
    let data = frame(7, 5, 60);
    let mut out_len = 0usize;
    let out = unsafe { edge_process(data.as_ptr(), data.len(), 7, 5, &mut out_len) };
    assert!(!out.is_null());
    assert_eq!(out_len, 7 * 5 * 3);
    unsafe { edge_free_buffer(out, out_len) };
}

#[test]
fn test_many_frames() {
    let data = frame(32, 24, 128);
    for _ in 0..50 {
        let mut out_len = 0usize;
        let out = unsafe { edge_process(data.as_ptr(), data.len(), 32, 24, &mut out_len) };
        assert!(!out.is_null());
        unsafe { edge_free_buffer(out, out_len) };
    }
}
