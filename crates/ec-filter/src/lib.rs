//! Per-pixel and separable filters feeding edge extraction.
//!
//! - [`to_gray`] reduces RGB/RGBA frames to a luminance plane with fixed
//!   BT.601 weights; 1-channel frames are duplicated unchanged.
//! - [`gaussian_blur`] applies a separable Gaussian, rows first then columns,
//!   with a configurable border policy (clamp by default). Kernels of up to
//!   7 taps with a derived sigma use exact binomial weights, so the default
//!   5-tap blur is bit-identical across platforms.
//!
//! All filters allocate their outputs and never touch their inputs.

pub mod blur;
pub mod conv1d;
pub mod gray;
pub mod kernels1d;

pub use blur::{BlurConfig, gaussian_blur};
pub use gray::{luma, to_gray};
pub use kernels1d::{GaussianKernel1D, KernelSize, sigma_for_size};
