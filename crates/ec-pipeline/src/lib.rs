//! Frame dispatcher for the edgecam pipeline.
//!
//! A host hands over one input frame, one pre-allocated output frame, and a
//! [`ProcessingMode`]; the dispatcher writes the result into the output and
//! nothing else. Three paths exist:
//!
//! - `Passthrough`: byte copy, channel layouts must match.
//! - `Grayscale`: luminance replicated into every color channel, alpha opaque.
//! - `EdgeDetect`: luminance, 5x5 Gaussian, Canny, then the same expansion.
//!
//! Every intermediate plane is allocated and dropped inside the call and no
//! state survives between frames, so concurrent calls on disjoint buffers are
//! independent. The output is written only after all checks pass; a failed
//! call leaves it untouched.
//!
//! [`host`] adapts this to the raw RGBA byte-array contract used by camera
//! front-ends, containing panics and logging failures at the boundary.

mod config;
mod expand;
pub mod host;
mod mode;
mod processor;
pub mod stats;

pub use config::PipelineConfig;
pub use ec_core::{Error, FrameView, FrameViewMut, Result};
pub use ec_edge::ThresholdPair;
pub use expand::expand_gray;
pub use mode::{ParseModeError, ProcessingMode};
pub use processor::{FrameProcessor, process};
pub use stats::{FpsCounter, FrameStats};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
