//! Umbrella crate for the `edgecam` workspace.
//!
//! Re-exports the frame model, filters, edge extractor, and dispatcher so
//! hosts can depend on a single crate.

pub use ec_core::{BorderMode, Channels, Error, FrameView, FrameViewMut, Image, ImageView, Result};
pub use ec_edge::{CannyConfig, EDGE, ThresholdPair, canny};
pub use ec_filter::{BlurConfig, KernelSize, gaussian_blur, to_gray};
pub use ec_pipeline::{
    FpsCounter, FrameProcessor, FrameStats, PipelineConfig, ProcessingMode, host, process,
};
