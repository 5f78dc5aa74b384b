use ec_core::{Image, ImageView};
use serde::{Deserialize, Serialize};

/// Intensity written for accepted edge pixels.
pub const EDGE: u8 = u8::MAX;

const TAN22_5: f32 = 0.414_213_57;
const TAN67_5: f32 = 2.414_213_7;

const NONE: u8 = 0;
const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Hysteresis thresholds on gradient magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub low: f32,
    pub high: f32,
}

impl ThresholdPair {
    pub const DEFAULT: Self = Self {
        low: 50.0,
        high: 150.0,
    };

    pub fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Deterministic repair of out-of-contract pairs.
    ///
    /// NaN becomes `0`, negatives are raised to `0`, and a pair with
    /// `low > high` is swapped so that `low = min`, `high = max`.
    pub fn normalized(self) -> Self {
        let fix = |v: f32| if v.is_nan() { 0.0 } else { v.max(0.0) };
        let (low, high) = (fix(self.low), fix(self.high));

        if low > high {
            log::debug!("thresholds out of order (low={low}, high={high}), swapping");
            Self {
                low: high,
                high: low,
            }
        } else {
            Self { low, high }
        }
    }
}

impl Default for ThresholdPair {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyConfig {
    pub thresholds: ThresholdPair,
    /// Use `sqrt(gx^2 + gy^2)` instead of `|gx| + |gy|`.
    pub l2_gradient: bool,
}

impl Default for CannyConfig {
    fn default() -> Self {
        Self {
            thresholds: ThresholdPair::DEFAULT,
            l2_gradient: false,
        }
    }
}

/// Runs Canny edge extraction on an already smoothed plane.
pub fn canny(src: &ImageView<'_, u8>, cfg: &CannyConfig) -> Image<u8> {
    let w = src.width();
    let h = src.height();
    let mut out = Image::new_fill(w, h, 0u8);
    if w == 0 || h == 0 {
        return out;
    }

    let mut ws = Workspace::new(w, h);
    ws.compute_sobel(src, cfg.l2_gradient);
    ws.non_max_suppression();
    let count = ws.hysteresis(cfg.thresholds.normalized());
    log::trace!("canny {w}x{h}: {count} edge pixels");

    for (dst, &s) in out.data_mut().iter_mut().zip(&ws.state) {
        if s == STRONG {
            *dst = EDGE;
        }
    }

    out
}

/// Sobel gradient magnitude before suppression, for inspection.
pub fn gradient_magnitude(src: &ImageView<'_, u8>, l2_gradient: bool) -> Image<f32> {
    let (w, h) = (src.width(), src.height());
    let mut out = Image::new_fill(w, h, 0.0f32);
    if w == 0 || h == 0 {
        return out;
    }

    let mut ws = Workspace::new(w, h);
    ws.compute_sobel(src, l2_gradient);
    out.data_mut().copy_from_slice(&ws.mag);
    out
}

/// Per-call scratch buffers; dropped when the call returns.
struct Workspace {
    w: usize,
    h: usize,
    gx: Vec<i32>,
    gy: Vec<i32>,
    mag: Vec<f32>,
    nms: Vec<f32>,
    state: Vec<u8>,
    stack: Vec<usize>,
}

impl Workspace {
    fn new(w: usize, h: usize) -> Self {
        let n = w * h;
        Self {
            w,
            h,
            gx: vec![0; n],
            gy: vec![0; n],
            mag: vec![0.0; n],
            nms: vec![0.0; n],
            state: vec![NONE; n],
            stack: Vec::new(),
        }
    }

    fn compute_sobel(&mut self, src: &ImageView<'_, u8>, l2: bool) {
        let (w, h) = (self.w, self.h);
        let px = src.data();
        let at = |x: usize, y: usize| i32::from(px[y * w + x]);

        for y in 0..h {
            let ym1 = y.saturating_sub(1);
            let yp1 = (y + 1).min(h - 1);
            for x in 0..w {
                let xm1 = x.saturating_sub(1);
                let xp1 = (x + 1).min(w - 1);

                let p00 = at(xm1, ym1);
                let p01 = at(x, ym1);
                let p02 = at(xp1, ym1);
                let p10 = at(xm1, y);
                let p12 = at(xp1, y);
                let p20 = at(xm1, yp1);
                let p21 = at(x, yp1);
                let p22 = at(xp1, yp1);

                let gxx = (p02 + 2 * p12 + p22) - (p00 + 2 * p10 + p20);
                let gyy = (p20 + 2 * p21 + p22) - (p00 + 2 * p01 + p02);

                let idx = y * w + x;
                self.gx[idx] = gxx;
                self.gy[idx] = gyy;
                self.mag[idx] = if l2 {
                    ((gxx * gxx + gyy * gyy) as f32).sqrt()
                } else {
                    (gxx.abs() + gyy.abs()) as f32
                };
            }
        }
    }

    /// Keeps a pixel only if it beats its predecessor and ties-or-beats its
    /// successor along the quantized gradient direction. Neighbors outside
    /// the grid count as zero.
    fn non_max_suppression(&mut self) {
        let (w, h) = (self.w as isize, self.h as isize);
        let mag = &self.mag;
        let at = |x: isize, y: isize| -> f32 {
            if x < 0 || y < 0 || x >= w || y >= h {
                0.0
            } else {
                mag[(y * w + x) as usize]
            }
        };

        for y in 0..h {
            for x in 0..w {
                let idx = (y * w + x) as usize;
                let m = mag[idx];
                if m <= 0.0 {
                    continue;
                }

                let gxx = self.gx[idx];
                let gyy = self.gy[idx];
                let ax = gxx.abs() as f32;
                let ay = gyy.abs() as f32;

                let ((x1, y1), (x2, y2)) = if ay <= ax * TAN22_5 {
                    ((x - 1, y), (x + 1, y))
                } else if ay >= ax * TAN67_5 {
                    ((x, y - 1), (x, y + 1))
                } else if (gxx > 0) == (gyy > 0) {
                    ((x - 1, y - 1), (x + 1, y + 1))
                } else {
                    ((x + 1, y - 1), (x - 1, y + 1))
                };

                if m > at(x1, y1) && m >= at(x2, y2) {
                    self.nms[idx] = m;
                }
            }
        }
    }

    /// Marks strong pixels, then grows them through weak 8-neighbors.
    /// Each pixel moves from weak to strong at most once, so the worklist
    /// drains in `O(w * h)`.
    fn hysteresis(&mut self, t: ThresholdPair) -> usize {
        let (w, h) = (self.w, self.h);
        self.stack.clear();

        for (idx, (&v, s)) in self.nms.iter().zip(self.state.iter_mut()).enumerate() {
            *s = if v > t.high {
                self.stack.push(idx);
                STRONG
            } else if v > t.low {
                WEAK
            } else {
                NONE
            };
        }

        let mut count = self.stack.len();

        while let Some(idx) = self.stack.pop() {
            let x = idx % w;
            let y = idx / w;

            for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    let nidx = ny * w + nx;
                    if self.state[nidx] == WEAK {
                        self.state[nidx] = STRONG;
                        self.stack.push(nidx);
                        count += 1;
                    }
                }
            }
        }

        count
    }
}
