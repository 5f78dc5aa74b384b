use ec_core::{BorderMode, map_index};

/// Convolves `signal` with a symmetric-or-not `kernel` of length
/// `2 * radius + 1`, reading out-of-range samples through `border`.
pub fn convolve_f32(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: BorderMode,
    out: &mut [f32],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert_eq!(
        kernel.len(),
        2 * radius + 1,
        "kernel len must be 2*radius+1"
    );

    let n = signal.len();
    if n == 0 {
        return;
    }

    if n > 2 * radius {
        convolve_interior(signal, kernel, radius, out);
        convolve_border(signal, kernel, radius, border, out, 0..radius);
        convolve_border(signal, kernel, radius, border, out, (n - radius)..n);
    } else {
        convolve_border(signal, kernel, radius, border, out, 0..n);
    }
}

/// Samples whose full footprint lies inside the signal.
fn convolve_interior(signal: &[f32], kernel: &[f32], radius: usize, out: &mut [f32]) {
    let n = signal.len();
    for (window, out_i) in signal
        .windows(kernel.len())
        .zip(out[radius..n - radius].iter_mut())
    {
        let mut acc = 0.0f32;
        for (&s, &kv) in window.iter().zip(kernel.iter().rev()) {
            acc += s * kv;
        }
        *out_i = acc;
    }
}

fn convolve_border(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: BorderMode,
    out: &mut [f32],
    range: core::ops::Range<usize>,
) {
    let n = signal.len();
    let fill = match border {
        BorderMode::Constant(c) => c,
        _ => 0.0,
    };

    for i in range {
        let mut acc = 0.0f32;
        for (k, &kv) in kernel.iter().enumerate().rev() {
            let idx = i as isize + radius as isize - k as isize;
            let v = match map_index(idx, n, border) {
                Some(j) => signal[j],
                None => fill,
            };
            acc += v * kv;
        }
        out[i] = acc;
    }
}
