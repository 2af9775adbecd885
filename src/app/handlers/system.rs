// SPDX-License-Identifier: GPL-3.0-only

//! System handlers
//!
//! Configuration updates, permission probing and photo store updates.

use crate::app::state::{AppModel, Message};
use crate::config::Config;
use crate::gallery::PhotoSnapshot;
use crate::permissions::{self, PermissionSnapshot};
use cosmic::Task;
use tracing::{debug, error, info};

impl AppModel {
    pub(crate) fn handle_update_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        info!("UpdateConfig received");

        let theme_changed = config.app_theme != self.config.app_theme;
        if config.recording_file_name != self.config.recording_file_name {
            self.capture.set_output_path(Self::recording_output(&config));
        }
        self.capture.set_audio(config.record_audio);
        self.capture.set_mirror(config.mirror_photos);
        self.config = config;

        if theme_changed {
            cosmic::command::set_theme(self.config.app_theme.theme())
        } else {
            Task::none()
        }
    }

    /// Check camera and microphone access off the UI thread
    pub(crate) fn check_permissions_task(&self) -> Task<cosmic::Action<Message>> {
        let provider = self.permissions.provider();
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || permissions::check(provider.as_ref()))
                    .await
                    .unwrap_or_else(|e| {
                        error!(error = %e, "Permission check task failed");
                        PermissionSnapshot::default()
                    })
            },
            |snapshot| cosmic::Action::App(Message::PermissionsChecked(snapshot)),
        )
    }

    /// Store a check result and, the first time anything is missing, ask for it
    pub(crate) fn handle_permissions_checked(
        &mut self,
        snapshot: PermissionSnapshot,
    ) -> Task<cosmic::Action<Message>> {
        self.permissions.apply(snapshot);

        let missing = self.permissions.request_missing();
        if missing.is_empty() {
            return Task::none();
        }

        info!(?missing, "Requesting permissions");
        let provider = self.permissions.provider();
        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    permissions::send_requests(provider.as_ref(), &missing);
                    permissions::check(provider.as_ref())
                })
                .await
                .unwrap_or_else(|e| {
                    error!(error = %e, "Permission request task failed");
                    PermissionSnapshot::default()
                })
            },
            |snapshot| cosmic::Action::App(Message::PermissionsChecked(snapshot)),
        )
    }

    pub(crate) fn handle_photos_changed(
        &mut self,
        snapshot: PhotoSnapshot,
    ) -> Task<cosmic::Action<Message>> {
        debug!(count = snapshot.len(), "Photo collection changed");
        self.photo_snapshot = snapshot;
        Task::none()
    }
}
