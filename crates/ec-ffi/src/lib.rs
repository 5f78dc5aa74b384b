//! C ABI for hosts that own camera frames as raw RGBA byte arrays.
//!
//! Buffers are borrowed for the duration of a single call and never retained.
//! Each call returns a status code:
//!
//! | code | meaning |
//! |------|---------|
//! | [`EC_OK`] | output written |
//! | [`EC_INVALID_BUFFER`] | null, undersized, overlapping, or badly sized buffers |
//! | [`EC_UNSUPPORTED_CHANNELS`] | reserved; the RGBA entry points never return it |
//! | [`EC_PROCESSING_FAILURE`] | internal fault, output untouched |
//!
//! On any non-zero code the output buffer is left as it was.

use std::ffi::c_char;

use ec_pipeline::Error;
use ec_pipeline::host;

pub const EC_OK: i32 = 0;
pub const EC_INVALID_BUFFER: i32 = 1;
/// Reserved for entry points that accept non-RGBA layouts.
pub const EC_UNSUPPORTED_CHANNELS: i32 = 2;
pub const EC_PROCESSING_FAILURE: i32 = 3;

fn status(result: Result<(), Error>) -> i32 {
    match result {
        Ok(()) => EC_OK,
        Err(Error::UnsupportedChannelCount(_)) => EC_UNSUPPORTED_CHANNELS,
        Err(Error::ProcessingFailure(_)) => EC_PROCESSING_FAILURE,
        Err(err) if err.is_invalid_buffer() => EC_INVALID_BUFFER,
        Err(_) => EC_PROCESSING_FAILURE,
    }
}

/// Borrows the two host regions, rejecting null and overlapping pointers.
///
/// # Safety
/// Non-null pointers must be valid for their stated lengths for the whole
/// call, and nothing else may access the output region meanwhile.
unsafe fn borrow_buffers<'a>(
    input: *const u8,
    input_len: usize,
    output: *mut u8,
    output_len: usize,
) -> Option<(&'a [u8], &'a mut [u8])> {
    if input.is_null() || output.is_null() {
        log::error!("null frame buffer from host");
        return None;
    }

    let in_start = input as usize;
    let out_start = output as usize;
    let overlap = in_start < out_start.saturating_add(output_len)
        && out_start < in_start.saturating_add(input_len);
    if overlap && input_len > 0 && output_len > 0 {
        log::error!("input and output frame buffers overlap");
        return None;
    }

    // SAFETY: Both pointers are non-null, the caller guarantees validity for
    // the given lengths, and the regions were checked to be disjoint.
    unsafe {
        Some((
            std::slice::from_raw_parts(input, input_len),
            std::slice::from_raw_parts_mut(output, output_len),
        ))
    }
}

/// Processes one RGBA frame; `mode` 0 passthrough, 1 grayscale, 2 edge
/// detect, anything else passthrough.
///
/// # Safety
/// `input` must be readable for `input_len` bytes and `output` writable for
/// `output_len` bytes for the duration of the call. The regions must not
/// overlap.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ec_process_frame(
    input: *const u8,
    input_len: usize,
    width: i32,
    height: i32,
    output: *mut u8,
    output_len: usize,
    mode: i32,
) -> i32 {
    // SAFETY: Forwarded caller contract.
    let Some((input, output)) = (unsafe { borrow_buffers(input, input_len, output, output_len) })
    else {
        return EC_INVALID_BUFFER;
    };

    status(host::process_frame(input, width, height, output, mode))
}

/// Edge detection with explicit hysteresis thresholds.
///
/// # Safety
/// Same contract as [`ec_process_frame`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ec_apply_edge_detection(
    input: *const u8,
    input_len: usize,
    width: i32,
    height: i32,
    output: *mut u8,
    output_len: usize,
    low_threshold: f64,
    high_threshold: f64,
) -> i32 {
    // SAFETY: Forwarded caller contract.
    let Some((input, output)) = (unsafe { borrow_buffers(input, input_len, output, output_len) })
    else {
        return EC_INVALID_BUFFER;
    };

    status(host::apply_edge_detection(
        input,
        width,
        height,
        output,
        low_threshold,
        high_threshold,
    ))
}

/// Static, nul-terminated library version. Never free the returned pointer.
#[unsafe(no_mangle)]
pub extern "C" fn ec_version() -> *const c_char {
    host::VERSION_CSTR.as_ptr()
}
