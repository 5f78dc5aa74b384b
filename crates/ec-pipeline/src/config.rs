use ec_edge::CannyConfig;
use ec_filter::BlurConfig;
use serde::{Deserialize, Serialize};

/// Smoothing and edge settings applied to every `EdgeDetect` frame.
///
/// Defaults: 5x5 Gaussian with clamped borders, thresholds 50/150, L1
/// gradient norm.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub blur: BlurConfig,
    pub canny: CannyConfig,
}
