//! Pixel memory model for the edgecam frame pipeline.
//!
//! ## Frames
//! A frame is a row-major grid of 8-bit pixels with 1, 3, or 4 interleaved
//! channels and no padding between rows. [`FrameView`] and [`FrameViewMut`]
//! describe that layout over caller-owned bytes without copying; they never
//! allocate and never outlive the borrow they were built from.
//!
//! ## Planes
//! Intermediate single-channel results (luminance, blurred luminance, edge
//! maps) are owned [`Image`] planes. [`ImageView`] borrows a plane.
//!
//! ## Border Modes
//! Neighborhood operations address pixels outside the grid through
//! [`map_index`]: clamp (edge replication), constant fill, or reflect-101.

mod border;
mod error;
mod frame;
mod image;

pub use border::{BorderMode, map_index};
pub use error::{Error, Result};
pub use frame::{Channels, FrameView, FrameViewMut};
pub use image::{Image, ImageView};
