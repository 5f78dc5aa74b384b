use crate::Error;

/// Interleaved channel layouts accepted by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channels {
    Gray,
    Rgb,
    Rgba,
}

impl Channels {
    pub fn from_count(count: usize) -> Result<Self, Error> {
        match count {
            1 => Ok(Self::Gray),
            3 => Ok(Self::Rgb),
            4 => Ok(Self::Rgba),
            other => Err(Error::UnsupportedChannelCount(other)),
        }
    }

    pub fn count(self) -> usize {
        match self {
            Self::Gray => 1,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Number of bytes a `width x height` frame with `channels` occupies.
fn frame_len(
    width: usize,
    height: usize,
    channels: Channels,
    actual: usize,
) -> Result<usize, Error> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels.count()))
        .ok_or(Error::InvalidBuffer {
            expected: usize::MAX,
            actual,
        })
}

/// Read-only frame over caller-owned bytes.
///
/// Construction fails fast when the region is shorter than
/// `width * height * channels`; trailing bytes beyond that are ignored.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    width: usize,
    height: usize,
    channels: Channels,
    data: &'a [u8],
}

impl<'a> FrameView<'a> {
    pub fn from_slice(
        width: usize,
        height: usize,
        channels: usize,
        data: &'a [u8],
    ) -> Result<Self, Error> {
        let channels = Channels::from_count(channels)?;
        let min_len = frame_len(width, height, channels, data.len())?;

        if data.len() < min_len {
            return Err(Error::InvalidBuffer {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self::from_parts(width, height, channels, &data[..min_len]))
    }

    /// Caller guarantees `data.len() == width * height * channels`.
    pub(crate) fn from_parts(
        width: usize,
        height: usize,
        channels: Channels,
        data: &'a [u8],
    ) -> Self {
        debug_assert_eq!(data.len(), width * height * channels.count());
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Exactly `width * height * channels` bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.data
    }

    pub fn row(&self, y: usize) -> &'a [u8] {
        assert!(y < self.height, "row index out of bounds");
        let row_len = self.width * self.channels.count();
        let start = y * row_len;
        &self.data[start..start + row_len]
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.channels.count();
        let start = (y * self.width + x) * c;
        self.data.get(start..start + c)
    }

    /// Iterates pixels in row-major order, one `channels`-wide slice each.
    pub fn pixels(&self) -> core::slice::ChunksExact<'a, u8> {
        self.data.chunks_exact(self.channels.count())
    }
}

/// Writable frame over caller-owned bytes.
#[derive(Debug)]
pub struct FrameViewMut<'a> {
    width: usize,
    height: usize,
    channels: Channels,
    data: &'a mut [u8],
}

impl<'a> FrameViewMut<'a> {
    pub fn from_slice_mut(
        width: usize,
        height: usize,
        channels: usize,
        data: &'a mut [u8],
    ) -> Result<Self, Error> {
        let channels = Channels::from_count(channels)?;
        let min_len = frame_len(width, height, channels, data.len())?;

        if data.len() < min_len {
            return Err(Error::InvalidBuffer {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            channels,
            data: &mut data[..min_len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.channels.count();
        let start = (y * self.width + x) * c;
        self.data.get(start..start + c)
    }

    pub fn pixel_mut(&mut self, x: usize, y: usize) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.channels.count();
        let start = (y * self.width + x) * c;
        self.data.get_mut(start..start + c)
    }

    pub fn pixels_mut(&mut self) -> core::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(self.channels.count())
    }

    pub fn as_view(&self) -> FrameView<'_> {
        FrameView::from_parts(self.width, self.height, self.channels, self.data)
    }

    /// Whether `other` has the same width and height.
    pub fn same_dims(&self, other: &FrameView<'_>) -> bool {
        self.width == other.width() && self.height == other.height()
    }
}
