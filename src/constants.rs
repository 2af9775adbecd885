// SPDX-License-Identifier: GPL-3.0-only

//! Application-wide constants

use std::time::Duration;

/// UI Constants
pub mod ui {
    /// Capture button size (outer)
    pub const CAPTURE_BUTTON_OUTER: f32 = 64.0;

    /// Capture button size (inner)
    pub const CAPTURE_BUTTON_INNER: f32 = 52.0;

    /// Capture button border radius
    pub const CAPTURE_BUTTON_RADIUS: f32 = 26.0;

    /// Overlay button/container background transparency (0.0 = transparent, 1.0 = opaque)
    ///
    /// Used for semi-transparent backgrounds on buttons and panels overlaid on the camera preview.
    pub const OVERLAY_BACKGROUND_ALPHA: f32 = 0.6;

    /// Gallery sheet height when expanded
    pub const SHEET_HEIGHT: f32 = 260.0;

    /// Thumbnail edge length in the photo sheet
    pub const THUMBNAIL_SIZE: f32 = 96.0;

    /// Spacing between thumbnails
    pub const THUMBNAIL_SPACING: u16 = 8;

    pub const SHEET_RADIUS: f32 = 16.0;

    /// How long the capture flash stays visible
    pub const CAPTURE_FLASH_MS: u64 = 150;
}

/// GStreamer pipeline constants
pub mod pipeline {
    /// Maximum buffer queue size (keep small for low latency)
    pub const MAX_BUFFERS: u32 = 2;

    /// Frame counter modulo for periodic logging
    pub const LOG_INTERVAL: u64 = 120;

    /// Pipeline playing state timeout on start
    pub const START_TIMEOUT_SECS: u64 = 5;
}

/// Recording constants
pub mod recording {
    use super::Duration;

    /// Target H.264 bitrate
    pub const VIDEO_BITRATE_KBPS: u32 = 8_000;

    /// Target audio bitrate
    pub const AUDIO_BITRATE_BPS: u32 = 128_000;

    /// Output file used when the config does not name one
    pub const DEFAULT_FILE_NAME: &str = "my-recording.mp4";

    /// Bus poll interval of the recorder watcher
    pub const BUS_POLL_MS: u64 = 100;

    /// Time allowed between EOS and the muxer finishing the file
    pub const FINALIZE_TIMEOUT: Duration = Duration::from_secs(10);
}

/// xdg-desktop-portal names
pub mod portal {
    pub const DESTINATION: &str = "org.freedesktop.portal.Desktop";
    pub const PATH: &str = "/org/freedesktop/portal/desktop";
    pub const CAMERA_INTERFACE: &str = "org.freedesktop.portal.Camera";
    pub const NOT_ALLOWED_ERROR: &str = "org.freedesktop.portal.Error.NotAllowed";

    /// Present only inside a Flatpak sandbox
    pub const FLATPAK_INFO: &str = "/.flatpak-info";
}

/// Application information utilities
pub mod app_info {
    use std::path::Path;

    /// Get the application version
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Check if the application is running inside a Flatpak sandbox
    pub fn is_flatpak() -> bool {
        Path::new(super::portal::FLATPAK_INFO).exists()
    }

    /// Get the runtime environment string (e.g., "Flatpak" or "Native")
    pub fn runtime_environment() -> &'static str {
        if is_flatpak() { "Flatpak" } else { "Native" }
    }
}
