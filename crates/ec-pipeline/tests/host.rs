mod common;

use common::synthetic::{checker_rgba, edge_pixels, noise_rgba, vertical_step_rgba};
use ec_pipeline::Error;
use ec_pipeline::host::{apply_edge_detection, process_frame, version};

#[test]
fn unknown_mode_copies_input() {
    let _ = env_logger::builder().is_test(true).try_init();
    let src = noise_rgba(6, 5, 3);
    let mut out = vec![0u8; src.len()];

    process_frame(&src, 6, 5, &mut out, 42).expect("passthrough fallback");
    assert_eq!(out, src);
}

#[test]
fn explicit_thresholds_match_default_mode() {
    let (w, h) = (24, 24);
    let src = checker_rgba(w, h, 6);

    let mut by_mode = vec![0u8; src.len()];
    process_frame(&src, w as i32, h as i32, &mut by_mode, 2).expect("edge mode");

    let mut explicit = vec![0u8; src.len()];
    apply_edge_detection(&src, w as i32, h as i32, &mut explicit, 50.0, 150.0)
        .expect("explicit thresholds");

    assert_eq!(by_mode, explicit);
}

#[test]
fn reversed_thresholds_are_swapped() {
    let src = vertical_step_rgba(10, 6, 5);
    let mut ordered = vec![0u8; src.len()];
    let mut reversed = vec![0u8; src.len()];

    apply_edge_detection(&src, 10, 6, &mut ordered, 40.0, 120.0).expect("ordered");
    apply_edge_detection(&src, 10, 6, &mut reversed, 120.0, 40.0).expect("reversed");

    assert_eq!(ordered, reversed);
    assert_eq!(edge_pixels(&ordered), 6);
}

#[test]
fn undersized_input_is_invalid_buffer() {
    let src = vec![0u8; 10];
    let mut out = vec![9u8; 16];

    let err = process_frame(&src, 2, 2, &mut out, 1).expect_err("short input");
    assert_eq!(
        err,
        Error::InvalidBuffer {
            expected: 16,
            actual: 10
        }
    );
    assert_eq!(out, vec![9u8; 16]);
}

#[test]
fn oversized_buffers_only_touch_the_frame() {
    let src = noise_rgba(2, 2, 5);
    let mut padded_src = src.clone();
    padded_src.extend_from_slice(&[1, 2, 3]);
    let mut out = vec![0x55u8; 20];

    process_frame(&padded_src, 2, 2, &mut out, 0).expect("passthrough");
    assert_eq!(&out[..16], &src[..]);
    assert_eq!(&out[16..], &[0x55; 4]);
}

#[test]
fn version_is_reported() {
    assert!(!version().is_empty());
    assert!(version().contains(ec_pipeline::VERSION));
}
