//! RGBA byte-array contract for camera front-ends.
//!
//! Both buffers are borrowed for the duration of one call and must hold at
//! least `width * height * 4` bytes. Every failure is logged here and
//! returned; panics inside the pipeline are caught and reported as
//! [`Error::ProcessingFailure`]. The output is never partially written.

use std::any::Any;
use std::ffi::CStr;
use std::panic::{self, AssertUnwindSafe};

use ec_core::{Error, FrameView, FrameViewMut};
use ec_edge::ThresholdPair;

use crate::mode::ProcessingMode;
use crate::processor::FrameProcessor;

const RGBA: usize = 4;

const VERSION_NUL: &str = concat!("edgecam/", env!("CARGO_PKG_VERSION"), "\0");

/// Nul-terminated form of [`version`] for C hosts.
pub const VERSION_CSTR: &CStr = match CStr::from_bytes_with_nul(VERSION_NUL.as_bytes()) {
    Ok(s) => s,
    Err(_) => panic!("version string must contain a single trailing nul"),
};

/// Identifies the pixel-processing library, e.g. `edgecam/0.1.0`.
pub fn version() -> &'static str {
    &VERSION_NUL[..VERSION_NUL.len() - 1]
}

/// Processes one RGBA frame. `mode`: 0 passthrough, 1 grayscale, 2 edge
/// detect; anything else is passthrough.
pub fn process_frame(
    input: &[u8],
    width: i32,
    height: i32,
    output: &mut [u8],
    mode: i32,
) -> Result<(), Error> {
    let mode = ProcessingMode::from_code(mode);
    guarded("process_frame", || {
        let (input, mut output) = rgba_frames(input, width, height, output)?;
        FrameProcessor::default().process(mode, &input, &mut output)
    })
}

/// Edge detection with caller thresholds.
pub fn apply_edge_detection(
    input: &[u8],
    width: i32,
    height: i32,
    output: &mut [u8],
    low_threshold: f64,
    high_threshold: f64,
) -> Result<(), Error> {
    let thresholds = ThresholdPair::new(low_threshold as f32, high_threshold as f32);
    guarded("apply_edge_detection", || {
        let (input, mut output) = rgba_frames(input, width, height, output)?;
        FrameProcessor::default().detect_edges(&input, &mut output, thresholds)
    })
}

fn rgba_frames<'i, 'o>(
    input: &'i [u8],
    width: i32,
    height: i32,
    output: &'o mut [u8],
) -> Result<(FrameView<'i>, FrameViewMut<'o>), Error> {
    let (Ok(w), Ok(h)) = (usize::try_from(width), usize::try_from(height)) else {
        return Err(Error::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        });
    };

    let input = FrameView::from_slice(w, h, RGBA, input)?;
    let output = FrameViewMut::from_slice_mut(w, h, RGBA, output)?;
    Ok((input, output))
}

fn guarded<F>(op: &str, f: F) -> Result<(), Error>
where
    F: FnOnce() -> Result<(), Error>,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => {
            log::error!("{op} failed: {err}");
            Err(err)
        }
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            log::error!("{op} aborted: {msg}");
            Err(Error::ProcessingFailure(msg))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
