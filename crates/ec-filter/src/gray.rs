//! Luminance reduction with fixed ITU-R BT.601 weights.
//!
//! `Y = 0.299 R + 0.587 G + 0.114 B`, evaluated in 14-bit fixed point so the
//! result is bit-exact on every platform. The weights sum to exactly
//! `1 << 14`, so gray pixels (`R == G == B`) map to themselves.

use ec_core::{Channels, FrameView, Image};

const SHIFT: u32 = 14;
const W_R: u32 = 4899;
const W_G: u32 = 9617;
const W_B: u32 = 1868;
const ROUND: u32 = 1 << (SHIFT - 1);

/// Luminance of one RGB triple.
#[inline]
pub const fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((W_R * r as u32 + W_G * g as u32 + W_B * b as u32 + ROUND) >> SHIFT) as u8
}

/// Reduces `src` to a single-channel plane of the same size.
///
/// Alpha is ignored. A 1-channel input is copied unchanged.
pub fn to_gray(src: &FrameView<'_>) -> Image<u8> {
    let mut out = Image::new_fill(src.width(), src.height(), 0u8);

    match src.channels() {
        Channels::Gray => out.data_mut().copy_from_slice(src.as_bytes()),
        Channels::Rgb | Channels::Rgba => {
            for (dst, px) in out.data_mut().iter_mut().zip(src.pixels()) {
                *dst = luma(px[0], px[1], px[2]);
            }
        }
    }

    out
}
