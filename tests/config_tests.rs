// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use pocket_camera::Config;
use pocket_camera::backends::camera::CameraSelector;
use pocket_camera::config::AppTheme;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.app_theme, AppTheme::System);
    assert_eq!(
        config.default_camera,
        CameraSelector::Back,
        "World-facing camera should be selected by default"
    );
    assert!(config.mirror_photos, "Photos should be mirrored by default");
    assert!(config.record_audio, "Audio should be recorded by default");
}

#[test]
fn test_config_recording_file_name() {
    let config = Config::default();
    assert_eq!(config.recording_file_name, "my-recording.mp4");
}
