use ec_core::{Error, FrameView, FrameViewMut};
use ec_edge::{CannyConfig, ThresholdPair, canny};
use ec_filter::{gaussian_blur, to_gray};

use crate::config::PipelineConfig;
use crate::expand::expand_gray;
use crate::mode::ProcessingMode;

/// Dispatches frames to the selected pipeline path.
///
/// Holds only immutable settings; one processor can serve any number of
/// frames, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct FrameProcessor {
    config: PipelineConfig,
}

impl FrameProcessor {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Runs `mode` on `input`, writing into `output`.
    ///
    /// `EdgeDetect` uses the configured thresholds.
    pub fn process(
        &self,
        mode: ProcessingMode,
        input: &FrameView<'_>,
        output: &mut FrameViewMut<'_>,
    ) -> Result<(), Error> {
        self.run(mode, input, output, self.config.canny.thresholds)
    }

    /// `EdgeDetect` with explicit thresholds.
    pub fn detect_edges(
        &self,
        input: &FrameView<'_>,
        output: &mut FrameViewMut<'_>,
        thresholds: ThresholdPair,
    ) -> Result<(), Error> {
        self.run(ProcessingMode::EdgeDetect, input, output, thresholds)
    }

    fn run(
        &self,
        mode: ProcessingMode,
        input: &FrameView<'_>,
        output: &mut FrameViewMut<'_>,
        thresholds: ThresholdPair,
    ) -> Result<(), Error> {
        let channels_match = input.channels() == output.channels();
        if !output.same_dims(input) || (mode == ProcessingMode::Passthrough && !channels_match) {
            return Err(Error::DimensionMismatch {
                in_width: input.width(),
                in_height: input.height(),
                in_channels: input.channels().count(),
                out_width: output.width(),
                out_height: output.height(),
                out_channels: output.channels().count(),
            });
        }

        match mode {
            ProcessingMode::Passthrough => {
                output.as_bytes_mut().copy_from_slice(input.as_bytes());
                Ok(())
            }
            ProcessingMode::Grayscale => {
                let gray = to_gray(input);
                expand_gray(&gray.as_view(), output)
            }
            ProcessingMode::EdgeDetect => {
                let gray = to_gray(input);
                let smoothed = gaussian_blur(&gray.as_view(), &self.config.blur);
                let cfg = CannyConfig {
                    thresholds,
                    ..self.config.canny.clone()
                };
                let edges = canny(&smoothed.as_view(), &cfg);
                expand_gray(&edges.as_view(), output)
            }
        }
    }
}

/// One-shot dispatch with default settings.
///
/// `thresholds` overrides the default 50/150 pair for `EdgeDetect`.
pub fn process(
    mode: ProcessingMode,
    input: &FrameView<'_>,
    output: &mut FrameViewMut<'_>,
    thresholds: Option<ThresholdPair>,
) -> Result<(), Error> {
    let processor = FrameProcessor::default();
    let thresholds = thresholds.unwrap_or(processor.config.canny.thresholds);
    processor.run(mode, input, output, thresholds)
}

#[cfg(test)]
mod tests {
    use ec_core::{Error, FrameView, FrameViewMut};
    use ec_edge::ThresholdPair;
    use ec_filter::KernelSize;

    use super::{FrameProcessor, process};
    use crate::config::PipelineConfig;
    use crate::mode::ProcessingMode;

    fn rgba(pixels: &[[u8; 4]]) -> Vec<u8> {
        pixels.iter().flatten().copied().collect()
    }

    #[test]
    fn passthrough_copies_bytes() {
        let src = rgba(&[[1, 2, 3, 4], [5, 6, 7, 8]]);
        let mut dst = vec![0u8; 8];
        let input = FrameView::from_slice(2, 1, 4, &src).expect("valid frame");
        let mut output = FrameViewMut::from_slice_mut(2, 1, 4, &mut dst).expect("valid frame");

        process(ProcessingMode::Passthrough, &input, &mut output, None).expect("processed");
        assert_eq!(dst, src);
    }

    #[test]
    fn passthrough_rejects_channel_mismatch() {
        let src = [9u8; 6];
        let mut dst = [0u8; 8];
        let input = FrameView::from_slice(2, 1, 3, &src).expect("valid frame");
        let mut output = FrameViewMut::from_slice_mut(2, 1, 4, &mut dst).expect("valid frame");

        let err = process(ProcessingMode::Passthrough, &input, &mut output, None)
            .expect_err("channel mismatch");
        assert!(err.is_invalid_buffer());
        assert_eq!(dst, [0u8; 8]);
    }

    #[test]
    fn grayscale_accepts_rgb_into_rgba() {
        let src = [255u8, 0, 0, 0, 0, 255];
        let mut dst = [0u8; 8];
        let input = FrameView::from_slice(2, 1, 3, &src).expect("valid frame");
        let mut output = FrameViewMut::from_slice_mut(2, 1, 4, &mut dst).expect("valid frame");

        process(ProcessingMode::Grayscale, &input, &mut output, None).expect("processed");
        assert_eq!(dst, [76, 76, 76, 255, 29, 29, 29, 255]);
    }

    #[test]
    fn dimension_mismatch_is_rejected_for_every_mode() {
        let src = [0u8; 16];
        let input = FrameView::from_slice(2, 2, 4, &src).expect("valid frame");

        for mode in [
            ProcessingMode::Passthrough,
            ProcessingMode::Grayscale,
            ProcessingMode::EdgeDetect,
        ] {
            let mut dst = [7u8; 16];
            let mut output =
                FrameViewMut::from_slice_mut(4, 1, 4, &mut dst).expect("valid frame");
            let err = process(mode, &input, &mut output, None).expect_err("dims differ");
            assert!(matches!(err, Error::DimensionMismatch { .. }), "{mode}");
            assert_eq!(dst, [7u8; 16]);
        }
    }

    #[test]
    fn configured_thresholds_apply_to_process() {
        let mut src = Vec::new();
        for _y in 0..8 {
            for x in 0..8 {
                let v = if x < 4 { 100 } else { 140 };
                src.extend_from_slice(&[v, v, v, 255]);
            }
        }
        let input = FrameView::from_slice(8, 8, 4, &src).expect("valid frame");

        let mut strict = vec![0u8; src.len()];
        let mut output = FrameViewMut::from_slice_mut(8, 8, 4, &mut strict).expect("valid frame");
        FrameProcessor::default()
            .process(ProcessingMode::EdgeDetect, &input, &mut output)
            .expect("processed");

        let mut loose = vec![0u8; src.len()];
        let mut output = FrameViewMut::from_slice_mut(8, 8, 4, &mut loose).expect("valid frame");
        let mut cfg = PipelineConfig::default();
        cfg.canny.thresholds = ThresholdPair::new(5.0, 10.0);
        FrameProcessor::new(cfg)
            .process(ProcessingMode::EdgeDetect, &input, &mut output)
            .expect("processed");

        let count = |buf: &[u8]| buf.chunks_exact(4).filter(|px| px[0] == 255).count();
        assert_eq!(count(&strict), 0);
        assert!(count(&loose) > 0);
    }

    #[test]
    fn oversized_blur_kernel_never_reaches_the_dispatcher() {
        let json = r#"{"blur": {"kernel": 18446744073709551615}}"#;
        assert!(serde_json::from_str::<PipelineConfig>(json).is_err());

        let mut cfg = PipelineConfig::default();
        cfg.blur.kernel = KernelSize::MAX;
        let src = rgba(&[[10, 20, 30, 255]; 16]);
        let input = FrameView::from_slice(4, 4, 4, &src).expect("valid frame");
        let mut dst = vec![0u8; src.len()];
        let mut output = FrameViewMut::from_slice_mut(4, 4, 4, &mut dst).expect("valid frame");

        FrameProcessor::new(cfg)
            .process(ProcessingMode::EdgeDetect, &input, &mut output)
            .expect("processed");
        assert!(dst.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }
}
