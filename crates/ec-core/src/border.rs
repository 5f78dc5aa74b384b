use serde::{Deserialize, Serialize};

/// How neighborhood operations read pixels that fall outside the grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode {
    /// Replicate the nearest edge pixel.
    #[default]
    Clamp,
    /// Read a fixed intensity.
    Constant(f32),
    /// Mirror around the edge pixel without repeating it.
    Reflect101,
}

/// Maps a possibly out-of-range index onto `[0, len)`.
///
/// Returns `None` for `Constant` (the caller substitutes the fill value) and
/// for empty axes.
pub fn map_index(i: isize, len: usize, mode: BorderMode) -> Option<usize> {
    if len == 0 {
        return None;
    }

    match mode {
        BorderMode::Constant(_) => {
            if i >= 0 && (i as usize) < len {
                Some(i as usize)
            } else {
                None
            }
        }
        BorderMode::Clamp => {
            if i < 0 {
                Some(0)
            } else {
                Some((i as usize).min(len - 1))
            }
        }
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len { Some(r) } else { Some(period as usize - r) }
        }
    }
}
