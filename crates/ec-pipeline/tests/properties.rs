mod common;

use common::synthetic::{checker_rgba, edge_pixels, noise_rgba, vertical_step_rgba};
use ec_core::{FrameView, FrameViewMut};
use ec_filter::to_gray;
use ec_pipeline::{Error, FrameProcessor, ProcessingMode, ThresholdPair, process};

fn run(
    mode: ProcessingMode,
    src: &[u8],
    w: usize,
    h: usize,
    t: Option<ThresholdPair>,
) -> Vec<u8> {
    let mut dst = vec![0u8; src.len()];
    let input = FrameView::from_slice(w, h, 4, src).expect("valid input");
    let mut output = FrameViewMut::from_slice_mut(w, h, 4, &mut dst).expect("valid output");
    process(mode, &input, &mut output, t).expect("frame processed");
    dst
}

#[test]
fn grayscale_is_idempotent() {
    let _ = env_logger::builder().is_test(true).try_init();
    let (w, h) = (17, 9);
    let src = noise_rgba(w, h, 7);

    let gray = to_gray(&FrameView::from_slice(w, h, 4, &src).expect("valid input"));
    let twice = to_gray(&gray.as_frame());
    assert_eq!(twice, gray);

    let once = run(ProcessingMode::Grayscale, &src, w, h, None);
    let again = run(ProcessingMode::Grayscale, &once, w, h, None);
    assert_eq!(again, once);
}

#[test]
fn passthrough_is_identity() {
    for (w, h, seed) in [(1, 1, 1), (5, 3, 2), (64, 48, 3)] {
        let src = noise_rgba(w, h, seed);
        assert_eq!(run(ProcessingMode::Passthrough, &src, w, h, None), src);
    }
}

#[test]
fn edge_map_is_binary() {
    let (w, h) = (48, 40);
    let src = checker_rgba(w, h, 8);
    let out = run(ProcessingMode::EdgeDetect, &src, w, h, None);

    for px in out.chunks_exact(4) {
        assert!(px[0] == 0 || px[0] == 255, "intensity {}", px[0]);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[0], px[2]);
        assert_eq!(px[3], 255);
    }
    assert!(edge_pixels(&out) > 0);
}

#[test]
fn raising_thresholds_never_adds_edges() {
    let (w, h) = (64, 64);
    let src = checker_rgba(w, h, 10);

    let mut prev = usize::MAX;
    for step in 0..12 {
        let low = 10.0 * step as f32;
        let t = ThresholdPair::new(low, low * 2.5 + 20.0);
        let count = edge_pixels(&run(ProcessingMode::EdgeDetect, &src, w, h, Some(t)));
        assert!(count <= prev, "step {step}: {count} > {prev}");
        prev = count;
    }
}

#[test]
fn identical_inputs_give_identical_outputs() {
    let (w, h) = (40, 30);
    let src = checker_rgba(w, h, 6);
    let t = Some(ThresholdPair::new(30.0, 90.0));

    let a = run(ProcessingMode::EdgeDetect, &src, w, h, t);
    let b = run(ProcessingMode::EdgeDetect, &src, w, h, t);
    assert_eq!(a, b);
}

#[test]
fn undersized_output_is_rejected_untouched() {
    let (w, h) = (4, 4);
    let src = noise_rgba(w, h, 11);
    let mut short = vec![0xAAu8; w * h * 4 - 1];

    let err = FrameViewMut::from_slice_mut(w, h, 4, &mut short).expect_err("too short");
    assert_eq!(
        err,
        Error::InvalidBuffer {
            expected: 64,
            actual: 63
        }
    );

    let err = ec_pipeline::host::process_frame(&src, 4, 4, &mut short, 2).expect_err("too short");
    assert!(err.is_invalid_buffer());
    assert!(short.iter().all(|&b| b == 0xAA));
}

#[test]
fn black_frame_has_no_edges() {
    let src = vec![0u8; 4 * 4 * 4];
    let out = run(
        ProcessingMode::EdgeDetect,
        &src,
        4,
        4,
        Some(ThresholdPair::new(50.0, 150.0)),
    );

    for px in out.chunks_exact(4) {
        assert_eq!(px, &[0, 0, 0, 255]);
    }
}

#[test]
fn vertical_boundary_yields_one_edge_column() {
    let src = vertical_step_rgba(4, 4, 2);
    let out = run(ProcessingMode::EdgeDetect, &src, 4, 4, None);

    for y in 0..4 {
        let row: Vec<u8> = (0..4).map(|x| out[(y * 4 + x) * 4]).collect();
        assert_eq!(row, vec![0, 255, 0, 0], "row {y}");
    }
}

#[test]
fn concurrent_frames_on_disjoint_buffers() {
    let (w, h) = (32, 24);
    let processor = FrameProcessor::default();
    let frames: Vec<Vec<u8>> = (0..4).map(|i| checker_rgba(w, h, 4 + i)).collect();
    let expected: Vec<Vec<u8>> = frames
        .iter()
        .map(|f| run(ProcessingMode::EdgeDetect, f, w, h, None))
        .collect();

    let mut outputs = vec![vec![0u8; w * h * 4]; frames.len()];
    std::thread::scope(|s| {
        for (src, dst) in frames.iter().zip(outputs.iter_mut()) {
            let processor = &processor;
            s.spawn(move || {
                let input = FrameView::from_slice(w, h, 4, src).expect("valid input");
                let mut output = FrameViewMut::from_slice_mut(w, h, 4, dst).expect("valid output");
                processor
                    .process(ProcessingMode::EdgeDetect, &input, &mut output)
                    .expect("frame processed");
            });
        }
    });

    assert_eq!(outputs, expected);
}
