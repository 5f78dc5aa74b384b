use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded uniform bytes in every channel, alpha included.
pub fn noise_rgba(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; width * height * 4];
    rng.fill(&mut data[..]);
    data
}

/// Blocks of alternating dark/bright squares with a little per-pixel texture.
pub fn checker_rgba(width: usize, height: usize, cell: usize) -> Vec<u8> {
    let noise = noise_rgba(width, height, 0x9e37_79b9);
    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let base: u8 = if (x / cell + y / cell) % 2 == 0 { 40 } else { 200 };
            let jitter = noise[(y * width + x) * 4] % 24;
            let v = base.saturating_add(jitter);
            data.extend_from_slice(&[v, v.saturating_sub(10), v, 255]);
        }
    }
    data
}

/// Left half black, right half white, starting at column `edge_x`.
pub fn vertical_step_rgba(width: usize, height: usize, edge_x: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(width * height * 4);
    for _y in 0..height {
        for x in 0..width {
            let v = if x >= edge_x { 255 } else { 0 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    data
}

pub fn edge_pixels(rgba: &[u8]) -> usize {
    rgba.chunks_exact(4).filter(|px| px[0] == 255).count()
}
