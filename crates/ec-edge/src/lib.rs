//! Binary edge maps from smoothed 8-bit luminance.
//!
//! Pipeline per call: 3x3 Sobel gradients (clamped borders), L1 or L2
//! magnitude, non-maximum suppression along the gradient direction quantized
//! to 4 orientations, then double-threshold hysteresis with 8-connectivity.
//!
//! Output pixels are either `0` or [`EDGE`]. Gradients are integer and
//! magnitudes are computed from exactly representable values, so results are
//! bit-identical across runs and platforms.
//!
//! Threshold ordering is not validated by callers: see
//! [`ThresholdPair::normalized`] for how degenerate pairs are handled.

pub mod canny;

pub use canny::{CannyConfig, EDGE, ThresholdPair, canny, gradient_magnitude};
