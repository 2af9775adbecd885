// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera controller
//!
//! Preview runs through a GStreamer pipeline built from the device the
//! monitor reported. Recording opens a second source on the same device and
//! hands it to [`VideoRecorder`].

mod enumeration;
mod pipeline;

pub use enumeration::{DiscoveredCamera, discover_cameras};
pub use pipeline::PreviewPipeline;

use super::types::*;
use super::{CameraController, Recording, resolve_camera};
use crate::errors::{CameraError, PhotoError, RecordingError};
use crate::pipelines::video::VideoRecorder;
use gstreamer::prelude::*;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Controller backed by GStreamer and the PipeWire device provider
pub struct PipeWireController {
    cameras: Vec<DiscoveredCamera>,
    selector: CameraSelector,
    use_cases: UseCases,
    /// Between `bind` and `unbind`, even when the last (re)bind failed
    bound: bool,
    /// Index into `cameras` of the device being previewed
    active: Option<usize>,
    preview: Option<PreviewPipeline>,
    frames: watch::Sender<Option<Arc<CameraFrame>>>,
}

impl PipeWireController {
    /// Enumerate cameras and create an unbound controller
    pub fn new(selector: CameraSelector) -> Self {
        Self::with_cameras(discover_cameras(), selector)
    }

    fn with_cameras(cameras: Vec<DiscoveredCamera>, selector: CameraSelector) -> Self {
        let (frames, _) = watch::channel(None);
        Self {
            cameras,
            selector,
            use_cases: UseCases::NONE,
            bound: false,
            active: None,
            preview: None,
            frames,
        }
    }

    /// Devices found at construction time
    pub fn cameras(&self) -> impl Iterator<Item = &CameraDevice> {
        self.cameras.iter().map(|c| &c.info)
    }

    fn start_preview(&mut self) -> BackendResult<()> {
        self.stop_preview();

        let infos: Vec<CameraDevice> = self.cameras().cloned().collect();
        let index =
            resolve_camera(&infos, self.selector).ok_or(CameraError::NoCameraFound)?;
        let camera = &self.cameras[index];
        info!(
            selector = %self.selector,
            device = %camera.info.name,
            "Binding camera"
        );

        let preview = PreviewPipeline::new(camera, self.frames.clone())?;
        self.preview = Some(preview);
        self.active = Some(index);
        Ok(())
    }

    fn stop_preview(&mut self) {
        if self.preview.take().is_some() {
            debug!("Preview released");
        }
        self.active = None;
        self.frames.send_replace(None);
    }
}

impl CameraController for PipeWireController {
    fn enabled_use_cases(&self) -> UseCases {
        self.use_cases
    }

    fn set_enabled_use_cases(&mut self, use_cases: UseCases) {
        debug!(?use_cases, "Enabled use cases changed");
        self.use_cases = use_cases;
    }

    fn camera_selector(&self) -> CameraSelector {
        self.selector
    }

    fn set_camera_selector(&mut self, selector: CameraSelector) -> BackendResult<()> {
        self.selector = selector;
        if self.bound {
            self.start_preview()?;
        }
        Ok(())
    }

    fn bind(&mut self) -> BackendResult<()> {
        self.bound = true;
        self.start_preview()
    }

    fn unbind(&mut self) {
        self.bound = false;
        self.stop_preview();
    }

    fn current_device(&self) -> Option<&CameraDevice> {
        self.active.map(|i| &self.cameras[i].info)
    }

    fn preview_frames(&self) -> PreviewReceiver {
        self.frames.subscribe()
    }

    fn take_picture(&self) -> BackendResult<CameraFrame> {
        if !self.use_cases.contains(UseCases::IMAGE_CAPTURE) {
            return Err(CameraError::UseCaseDisabled("image capture").into());
        }
        let frame = self.frames.borrow().clone();
        frame
            .map(|f| (*f).clone())
            .ok_or_else(|| PhotoError::NoFrameAvailable.into())
    }

    fn start_recording(
        &mut self,
        recording: RecordingId,
        options: RecordingOptions,
        events: RecordEventSender,
    ) -> BackendResult<Box<dyn Recording>> {
        if !self.use_cases.contains(UseCases::VIDEO_CAPTURE) {
            return Err(CameraError::UseCaseDisabled("video capture").into());
        }
        let camera = self
            .active
            .map(|i| &self.cameras[i])
            .ok_or(CameraError::NoCameraFound)?;

        let source = camera.device.create_element(None).map_err(|e| {
            RecordingError::StartFailed(format!("Failed to open camera for recording: {}", e))
        })?;

        let recorder = VideoRecorder::new(recording, source, camera.info.rotation, options, events)
            .inspect_err(|e| warn!(%recording, error = %e, "Recorder setup failed"))?;
        recorder.start()?;
        Ok(Box::new(recorder))
    }
}

impl Drop for PipeWireController {
    fn drop(&mut self) {
        self.unbind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_bind_retries_on_switch() {
        let mut controller = PipeWireController::with_cameras(Vec::new(), CameraSelector::Back);
        assert!(controller.bind().is_err());

        // Still bound: every switch tries the selected camera again
        assert!(controller.set_camera_selector(CameraSelector::Front).is_err());
        assert!(controller.set_camera_selector(CameraSelector::Back).is_err());
        assert!(controller.current_device().is_none());
    }

    #[test]
    fn test_unbound_switch_only_updates_selector() {
        let mut controller = PipeWireController::with_cameras(Vec::new(), CameraSelector::Back);
        assert!(controller.set_camera_selector(CameraSelector::Front).is_ok());
        assert_eq!(controller.camera_selector(), CameraSelector::Front);

        controller.bind().ok();
        controller.unbind();
        assert!(controller.set_camera_selector(CameraSelector::Back).is_ok());
    }

    #[test]
    fn test_switching_twice_restores_selection() {
        let mut controller = PipeWireController::with_cameras(Vec::new(), CameraSelector::Back);
        let original = controller.camera_selector();

        let toggled = controller.camera_selector().toggled();
        controller.set_camera_selector(toggled).ok();
        assert_ne!(controller.camera_selector(), original);

        let toggled = controller.camera_selector().toggled();
        controller.set_camera_selector(toggled).ok();
        assert_eq!(controller.camera_selector(), original);
    }

    #[test]
    fn test_take_picture_requires_use_case() {
        let mut controller = PipeWireController::with_cameras(Vec::new(), CameraSelector::Back);
        assert!(matches!(
            controller.take_picture(),
            Err(BackendError::Camera(CameraError::UseCaseDisabled(_)))
        ));

        controller.set_enabled_use_cases(UseCases::IMAGE_CAPTURE);
        assert!(matches!(
            controller.take_picture(),
            Err(BackendError::Photo(PhotoError::NoFrameAvailable))
        ));
    }
}
