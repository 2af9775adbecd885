// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for constants module

use pocket_camera::constants::{recording, ui};

#[test]
fn test_capture_button_inner_fits_outer() {
    assert!(ui::CAPTURE_BUTTON_INNER < ui::CAPTURE_BUTTON_OUTER);
    assert_eq!(ui::CAPTURE_BUTTON_RADIUS * 2.0, ui::CAPTURE_BUTTON_INNER);
}

#[test]
fn test_overlay_alpha_in_range() {
    assert!(ui::OVERLAY_BACKGROUND_ALPHA > 0.0 && ui::OVERLAY_BACKGROUND_ALPHA <= 1.0);
}

#[test]
fn test_finalize_timeout_exceeds_poll_interval() {
    // The watcher must poll the bus several times before giving up
    assert!(recording::FINALIZE_TIMEOUT.as_millis() > u128::from(recording::BUS_POLL_MS) * 10);
}

#[test]
fn test_default_recording_is_mp4() {
    assert!(recording::DEFAULT_FILE_NAME.ends_with(".mp4"));
}
