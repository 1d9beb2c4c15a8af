//! C ABI for host applications
//!
//! Ownership rules:
//! - the input buffer is borrowed for the duration of [`edge_process`] only
//! - a non-null buffer returned by [`edge_process`] belongs to the caller and
//!   must be released with [`edge_free_buffer`], passing the length written to
//!   `out_len`
//!
//! No entry point unwinds into the caller. Failures are logged and reported as
//! null / false.

use std::ffi::{CStr, c_char};
use std::panic::{self, AssertUnwindSafe};
use std::ptr;

use tracing::{error, info};

use crate::error::PipelineError;
use crate::models::frame::{check_dimensions, required_len};
use crate::pipeline::panic_message;
use crate::{check_ready, default_processor, logging};

const IDENTITY_C: &CStr = c"EdgeDetectionViewer Native Library Ready!";

/// Readiness self-test. Also installs the log subscriber on first use.
#[unsafe(no_mangle)]
pub extern "C" fn edge_check_ready() -> bool {
    panic::catch_unwind(|| {
        logging::init();
        check_ready()
    })
    .unwrap_or(false)
}

/// Process one NV21 frame.
///
/// Returns an RGB buffer of `width * height * 3` bytes and stores its length
/// in `*out_len`, or returns null (and stores 0) on any failure.
///
/// # Safety
/// - `data` must be valid for reads of `len` bytes, or null
/// - `out_len` must be valid for a write, or null
///
/// When `width` or `height` is not positive, `data` is never read.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn edge_process(
    data: *const u8,
    len: usize,
    width: i32,
    height: i32,
    out_len: *mut usize,
) -> *mut u8 {
    info!(width, height, len, "edge_process called");
    if !out_len.is_null() {
        unsafe { *out_len = 0 };
    }

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        check_dimensions(width, height)?;
        if data.is_null() {
            let required = required_len(width as usize, height as usize).unwrap_or(usize::MAX);
            return Err(PipelineError::BufferTooShort {
                required,
                actual: 0,
            });
        }
        let input = unsafe { std::slice::from_raw_parts(data, len) };
        default_processor().process(input, width, height)
    }));

    let image = match outcome {
        Ok(Ok(image)) => image,
        Ok(Err(e)) => {
            error!(error = %e, "edge_process failed");
            return ptr::null_mut();
        }
        Err(payload) => {
            error!(panic = %panic_message(payload), "edge_process panicked");
            return ptr::null_mut();
        }
    };

    let output = image.into_vec().into_boxed_slice();
    let written = output.len();
    if !out_len.is_null() {
        unsafe { *out_len = written };
    }
    Box::into_raw(output) as *mut u8
}

/// Release a buffer returned by [`edge_process`]. Null is ignored.
///
/// # Safety
/// `buffer` must come from [`edge_process`] with `len` equal to the reported
/// length, and must not be freed twice.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn edge_free_buffer(buffer: *mut u8, len: usize) {
    if buffer.is_null() {
        return;
    }
    let slice = ptr::slice_from_raw_parts_mut(buffer, len);
    drop(unsafe { Box::from_raw(slice) });
}

/// Static, NUL-terminated identity string. Never freed by the caller.
#[unsafe(no_mangle)]
pub extern "C" fn edge_identify() -> *const c_char {
    IDENTITY_C.as_ptr()
}
