use ec_core::Error;
use serde::{Deserialize, Serialize};

/// Odd, positive smoothing footprint.
///
/// Even sizes are rounded up to the next odd size; zero and sizes above
/// [`KernelSize::MAX`] are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct KernelSize(usize);

impl KernelSize {
    pub const DEFAULT: Self = Self(5);
    pub const MAX: Self = Self(255);

    pub fn new(size: usize) -> Result<Self, Error> {
        if size == 0 || size > Self::MAX.0 {
            return Err(Error::InvalidKernelSize(size));
        }
        if size.is_multiple_of(2) {
            log::debug!("kernel size {size} is even, rounding up to {}", size + 1);
            return Ok(Self(size + 1));
        }
        Ok(Self(size))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn radius(self) -> usize {
        self.0 / 2
    }
}

impl Default for KernelSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for KernelSize {
    type Error = Error;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::new(size)
    }
}

impl From<KernelSize> for usize {
    fn from(size: KernelSize) -> Self {
        size.0
    }
}

/// Standard deviation used when only a kernel size is given:
/// `0.3 * ((k - 1) * 0.5 - 1) + 0.8`, i.e. 1.1 for `k = 5`.
pub fn sigma_for_size(size: KernelSize) -> f32 {
    let k = size.get() as f32;
    0.3 * ((k - 1.0) * 0.5 - 1.0) + 0.8
}

/// Binomial taps for derived-sigma kernels up to 7 wide. Every weight is a
/// dyadic fraction, so 8-bit inputs convolve without rounding error.
const SMALL_TAPS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Normalized 1D Gaussian of length `2 * radius + 1`.
///
/// `weights` sums to ~1 and is symmetric around `radius`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel1D {
    pub sigma: f32,
    pub radius: usize,
    pub weights: Vec<f32>,
}

impl GaussianKernel1D {
    /// Builds the kernel for `size`. A missing, non-finite, or non-positive
    /// `sigma` falls back to [`sigma_for_size`]; sizes up to 7 then use the
    /// fixed binomial taps instead of sampling `exp`.
    pub fn new(size: KernelSize, sigma: Option<f32>) -> Self {
        let radius = size.radius();
        let explicit = match sigma {
            Some(s) if s.is_finite() && s > 0.0 => Some(s),
            Some(s) => {
                log::debug!("ignoring sigma {s}, deriving from kernel size {}", size.get());
                None
            }
            None => None,
        };

        if let Some(sigma) = explicit {
            return Self::sampled(size, sigma);
        }
        match SMALL_TAPS.get(radius) {
            Some(taps) => Self {
                sigma: sigma_for_size(size),
                radius,
                weights: taps.to_vec(),
            },
            None => Self::sampled(size, sigma_for_size(size)),
        }
    }

    fn sampled(size: KernelSize, sigma: f32) -> Self {
        let radius = size.radius();
        let len = size.get();
        let sigma2 = sigma * sigma;

        let mut weights = vec![0.0f32; len];
        for (i, w) in weights.iter_mut().enumerate() {
            let x = i as f32 - radius as f32;
            *w = (-(x * x) / (2.0 * sigma2)).exp();
        }

        let sum: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Self {
            sigma,
            radius,
            weights,
        }
    }
}
