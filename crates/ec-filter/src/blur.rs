use ec_core::{BorderMode, Image, ImageView};
use serde::{Deserialize, Serialize};

use crate::conv1d::convolve_f32;
use crate::kernels1d::{GaussianKernel1D, KernelSize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    pub kernel: KernelSize,
    /// Derived from `kernel` when `None`.
    pub sigma: Option<f32>,
    pub border: BorderMode,
}

impl Default for BlurConfig {
    fn default() -> Self {
        Self {
            kernel: KernelSize::DEFAULT,
            sigma: None,
            border: BorderMode::Clamp,
        }
    }
}

/// Separable Gaussian smoothing of an 8-bit plane.
///
/// Rows are filtered first, then columns, in `f32`; the result is rounded
/// back to `u8` once at the end.
pub fn gaussian_blur(src: &ImageView<'_, u8>, cfg: &BlurConfig) -> Image<u8> {
    let w = src.width();
    let h = src.height();
    let mut out = Image::new_fill(w, h, 0u8);
    if w == 0 || h == 0 {
        return out;
    }

    let kernel = GaussianKernel1D::new(cfg.kernel, cfg.sigma);
    let k = &kernel.weights;
    let r = kernel.radius;

    let mut rows = vec![0.0f32; w * h];
    {
        let mut line = vec![0.0f32; w];
        for y in 0..h {
            for (dst, &px) in line.iter_mut().zip(src.row(y)) {
                *dst = f32::from(px);
            }
            convolve_f32(&line, k, r, cfg.border, &mut rows[y * w..(y + 1) * w]);
        }
    }

    let mut column = vec![0.0f32; h];
    let mut filtered = vec![0.0f32; h];
    let dst = out.data_mut();
    for x in 0..w {
        for (y, c) in column.iter_mut().enumerate() {
            *c = rows[y * w + x];
        }
        convolve_f32(&column, k, r, cfg.border, &mut filtered);
        for (y, &v) in filtered.iter().enumerate() {
            dst[y * w + x] = v.round().clamp(0.0, 255.0) as u8;
        }
    }

    out
}
