// SPDX-License-Identifier: GPL-3.0-only

//! Camera controller abstraction
//!
//! ```text
//! ┌─────────────────────┐
//! │   UI Layer (App)    │
//! └──────────┬──────────┘
//!            │
//!            ▼
//! ┌─────────────────────┐
//! │CameraController Trait│  ← use cases, selector, capture, record
//! └──────────┬──────────┘
//!            │
//!            ▼
//!    ┌──────────────┐
//!    │   PipeWire   │  ← GStreamer preview + recorder pipelines
//!    └──────────────┘
//! ```
//!
//! The controller is bound for the lifetime of the application window:
//! `bind` starts the preview for the selected camera and dropping the
//! controller releases the device.

pub mod pipewire;
pub mod types;

pub use pipewire::PipeWireController;
pub use types::*;

use std::path::Path;

/// Camera controller with enabled use cases and a mutable camera selector
pub trait CameraController: Send {
    /// Currently enabled use cases
    fn enabled_use_cases(&self) -> UseCases;

    /// Enable exactly the given use cases
    fn set_enabled_use_cases(&mut self, use_cases: UseCases);

    /// Camera the controller is (or will be) bound to
    fn camera_selector(&self) -> CameraSelector;

    /// Select a different camera
    ///
    /// The selector is always updated. When bound, the preview is rebuilt for
    /// the new camera and a failure to do so is returned.
    fn set_camera_selector(&mut self, selector: CameraSelector) -> BackendResult<()>;

    /// Start the preview for the selected camera
    fn bind(&mut self) -> BackendResult<()>;

    /// Stop the preview and release the device
    fn unbind(&mut self);

    /// Device currently streaming, if bound
    fn current_device(&self) -> Option<&CameraDevice>;

    /// Receiver for preview frames
    fn preview_frames(&self) -> PreviewReceiver;

    /// Grab a single frame for a still photo
    ///
    /// Requires [`UseCases::IMAGE_CAPTURE`].
    fn take_picture(&self) -> BackendResult<CameraFrame>;

    /// Begin recording video to `options.output`
    ///
    /// Requires [`UseCases::VIDEO_CAPTURE`]. Lifecycle events for the new
    /// recording are published on `events`.
    fn start_recording(
        &mut self,
        recording: RecordingId,
        options: RecordingOptions,
        events: RecordEventSender,
    ) -> BackendResult<Box<dyn Recording>>;
}

/// Exclusive handle to one in-progress recording
pub trait Recording: Send {
    fn id(&self) -> RecordingId;

    fn output(&self) -> &Path;

    /// Ask the recorder to finish the file; a `Finalize` event follows
    fn stop(self: Box<Self>);

    /// Release the recorder immediately without finalizing
    fn close(self: Box<Self>);
}

/// Pick the device that best matches `selector`
///
/// Exact facing wins. Otherwise cameras without a reported facing are used,
/// then any camera at all, so a single webcam serves both selectors.
pub fn resolve_camera(devices: &[CameraDevice], selector: CameraSelector) -> Option<usize> {
    devices
        .iter()
        .position(|d| d.facing == Some(selector))
        .or_else(|| devices.iter().position(|d| d.facing.is_none()))
        .or(if devices.is_empty() { None } else { Some(0) })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(name: &str, facing: Option<CameraSelector>) -> CameraDevice {
        CameraDevice {
            name: name.to_string(),
            path: name.to_string(),
            facing,
            rotation: SensorRotation::None,
        }
    }

    #[test]
    fn test_resolve_exact_facing() {
        let devices = vec![
            device("rear", Some(CameraSelector::Back)),
            device("selfie", Some(CameraSelector::Front)),
        ];
        assert_eq!(resolve_camera(&devices, CameraSelector::Front), Some(1));
        assert_eq!(resolve_camera(&devices, CameraSelector::Back), Some(0));
    }

    #[test]
    fn test_resolve_prefers_unknown_facing_over_wrong_facing() {
        let devices = vec![
            device("rear", Some(CameraSelector::Back)),
            device("usb", None),
        ];
        assert_eq!(resolve_camera(&devices, CameraSelector::Front), Some(1));
    }

    #[test]
    fn test_resolve_single_camera_serves_both() {
        let devices = vec![device("selfie", Some(CameraSelector::Front))];
        assert_eq!(resolve_camera(&devices, CameraSelector::Back), Some(0));
        assert_eq!(resolve_camera(&[], CameraSelector::Back), None);
    }
}
