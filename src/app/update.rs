// SPDX-License-Identifier: GPL-3.0-only

//! Message update handling
//!
//! The main `update()` function acts as a dispatcher, while specific handlers are implemented
//! in the `handlers` submodules organized by functional domain.
//!
//! # Handler Modules
//!
//! - `handlers::ui`: Context pages, photo sheet, toasts
//! - `handlers::camera`: Camera switching and preview frames
//! - `handlers::capture`: Photo capture and video recording
//! - `handlers::system`: Configuration, permissions, photo store updates

use crate::app::state::{AppModel, Message};
use cosmic::Task;

impl AppModel {
    /// Main message handler - routes messages to appropriate handler methods.
    pub fn update(&mut self, message: Message) -> Task<cosmic::Action<Message>> {
        match message {
            // ===== UI Navigation =====
            Message::LaunchUrl(url) => self.handle_launch_url(url),
            Message::ToggleContextPage(page) => self.handle_toggle_context_page(page),
            Message::ExpandPhotoSheet => self.handle_set_sheet_expanded(true),
            Message::CollapsePhotoSheet => self.handle_set_sheet_expanded(false),
            Message::CloseToast(id) => self.handle_close_toast(id),

            // ===== Configuration =====
            Message::UpdateConfig(config) => self.handle_update_config(config),

            // ===== Permissions =====
            Message::PermissionsChecked(snapshot) => self.handle_permissions_checked(snapshot),

            // ===== Camera =====
            Message::SwitchCamera => self.handle_switch_camera(),
            Message::CameraFrame(frame) => self.handle_camera_frame(frame),

            // ===== Capture =====
            Message::TakePhoto => self.handle_take_photo(),
            Message::PhotoTaken(photo) => self.handle_photo_taken(photo),
            Message::ClearCaptureAnimation => {
                self.is_capturing = false;
                Task::none()
            }
            Message::ToggleRecording => self.handle_toggle_recording(),
            Message::RecordEvent(event) => self.handle_record_event(event),

            // ===== Gallery =====
            Message::PhotosChanged(snapshot) => self.handle_photos_changed(snapshot),
        }
    }
}
