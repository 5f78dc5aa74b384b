use ec_core::{Channels, Error, FrameViewMut, ImageView};

/// Writes a luminance plane into `dst`, replicating it into every color
/// channel and setting alpha fully opaque.
pub fn expand_gray(src: &ImageView<'_, u8>, dst: &mut FrameViewMut<'_>) -> Result<(), Error> {
    if src.width() != dst.width() || src.height() != dst.height() {
        return Err(Error::DimensionMismatch {
            in_width: src.width(),
            in_height: src.height(),
            in_channels: 1,
            out_width: dst.width(),
            out_height: dst.height(),
            out_channels: dst.channels().count(),
        });
    }

    match dst.channels() {
        Channels::Gray => dst.as_bytes_mut().copy_from_slice(src.data()),
        Channels::Rgb => {
            for (px, &v) in dst.pixels_mut().zip(src.data()) {
                px.fill(v);
            }
        }
        Channels::Rgba => {
            for (px, &v) in dst.pixels_mut().zip(src.data()) {
                px.copy_from_slice(&[v, v, v, u8::MAX]);
            }
        }
    }

    Ok(())
}
