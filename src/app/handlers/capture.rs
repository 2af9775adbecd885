// SPDX-License-Identifier: GPL-3.0-only

//! Capture operations handlers
//!
//! Handles photo capture and the record toggle, and turns recorder
//! lifecycle events into toasts.

use crate::app::state::{AppModel, Message};
use crate::backends::camera::VideoRecordEvent;
use crate::capture::{Notification, RecordOutcome};
use crate::constants::ui;
use crate::fl;
use crate::gallery::CapturedPhoto;
use cosmic::Task;
use cosmic::widget::toaster::Toast;
use tracing::{debug, error, info};

impl AppModel {
    /// Create a delayed task that sends a message after the specified milliseconds
    pub(crate) fn delay_task(millis: u64, message: Message) -> Task<cosmic::Action<Message>> {
        Task::perform(
            async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(millis)).await;
                message
            },
            cosmic::Action::App,
        )
    }

    pub(crate) fn handle_take_photo(&mut self) -> Task<cosmic::Action<Message>> {
        if self.is_capturing {
            debug!("Photo capture already in progress");
            return Task::none();
        }
        self.is_capturing = true;

        let capture = Task::perform(
            self.capture.take_photo(self.controller.as_ref()),
            |photo| cosmic::Action::App(Message::PhotoTaken(photo)),
        );
        let flash = Self::delay_task(ui::CAPTURE_FLASH_MS, Message::ClearCaptureAnimation);
        Task::batch([capture, flash])
    }

    pub(crate) fn handle_photo_taken(
        &mut self,
        photo: Option<CapturedPhoto>,
    ) -> Task<cosmic::Action<Message>> {
        // Failures were logged where they happened
        if let Some(photo) = photo {
            self.photos.prepend(photo);
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_recording(&mut self) -> Task<cosmic::Action<Message>> {
        let outcome = self
            .capture
            .record_video(self.controller.as_mut(), &self.permissions);
        self.handle_record_outcome(outcome)
    }

    fn handle_record_outcome(&mut self, outcome: RecordOutcome) -> Task<cosmic::Action<Message>> {
        match outcome {
            RecordOutcome::Started(id) => {
                info!(%id, "Recording: started");
                Task::none()
            }
            RecordOutcome::Stopped(id) => {
                info!(%id, "Recording: stopped");
                Task::none()
            }
            // The press does nothing, but a later press may succeed once
            // the user grants access in system settings
            RecordOutcome::PermissionDenied => self.check_permissions_task(),
            RecordOutcome::StartQueued(id) => {
                debug!(%id, "Recording: waiting for the last file to be written");
                Task::none()
            }
            RecordOutcome::QueueCancelled => Task::none(),
            RecordOutcome::Failed(reason) => {
                error!(%reason, "Recording: failed to start");
                self.push_toast(fl!("video-capture-failed", reason = reason))
            }
        }
    }

    pub(crate) fn handle_record_event(
        &mut self,
        event: VideoRecordEvent,
    ) -> Task<cosmic::Action<Message>> {
        let toast = match self.capture.on_record_event(event) {
            Some(Notification::RecordingSucceeded { output }) => self.push_toast(fl!(
                "video-capture-succeeded",
                path = output.display().to_string()
            )),
            Some(Notification::RecordingFailed { reason }) => {
                self.push_toast(fl!("video-capture-failed", reason = reason))
            }
            None => Task::none(),
        };

        let queued = match self
            .capture
            .start_queued(self.controller.as_mut(), &self.permissions)
        {
            Some(outcome) => self.handle_record_outcome(outcome),
            None => Task::none(),
        };
        Task::batch([toast, queued])
    }

    fn push_toast(&mut self, message: String) -> Task<cosmic::Action<Message>> {
        self.toasts
            .push(Toast::new(message))
            .map(cosmic::Action::App)
    }
}
