// SPDX-License-Identifier: GPL-3.0-only

//! Camera selection and preview handlers

use crate::app::state::{AppModel, Message, PreviewImage};
use crate::backends::camera::CameraFrame;
use cosmic::Task;
use cosmic::widget::image::Handle;
use std::sync::Arc;
use tracing::{error, info, warn};

impl AppModel {
    /// Flip between the front and back camera
    pub(crate) fn handle_switch_camera(&mut self) -> Task<cosmic::Action<Message>> {
        if self.capture.is_recording() {
            warn!("Camera switch ignored while recording");
            return Task::none();
        }

        let selector = self.controller.camera_selector().toggled();
        info!(%selector, "Switching camera");

        // Old frames belong to the previous camera
        self.preview = None;
        match self.controller.set_camera_selector(selector) {
            Ok(()) => {
                if let Some(device) = self.controller.current_device() {
                    info!(device = %device.name, "Camera switched");
                }
                self.camera_error = None;
            }
            Err(e) => {
                error!(%selector, error = %e, "Failed to switch camera");
                self.camera_error = Some(e.to_string());
            }
        }
        Task::none()
    }

    pub(crate) fn handle_camera_frame(
        &mut self,
        frame: Arc<CameraFrame>,
    ) -> Task<cosmic::Action<Message>> {
        match frame.to_rgba_image() {
            Ok(image) => {
                let (width, height) = image.dimensions();
                self.preview = Some(PreviewImage {
                    handle: Handle::from_rgba(width, height, image.into_raw()),
                    rotation_degrees: frame.rotation.degrees(),
                });
                self.camera_error = None;
            }
            Err(e) => warn!(error = %e, "Dropping malformed preview frame"),
        }
        Task::none()
    }
}
