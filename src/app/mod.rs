// SPDX-License-Identifier: GPL-3.0-only

//! Main application module
//!
//! # Architecture
//!
//! - `state`: Application state types (AppModel, Message, ContextPage)
//! - `camera_preview`: Live preview rendering
//! - `controls`: Photo and record buttons
//! - `bottom_bar`: Gallery trigger, capture controls, camera switcher
//! - `photo_sheet`: Collapsible bottom sheet listing captured photos
//! - `view`: Main view composition
//! - `update`: Message dispatch to `handlers`

mod bottom_bar;
mod camera_preview;
mod controls;
mod handlers;
mod photo_sheet;
mod state;
mod update;
mod view;

use crate::backends::camera::{CameraController, PipeWireController, UseCases};
use crate::capture::CaptureOrchestrator;
use crate::config::Config;
use crate::fl;
use crate::gallery::PhotoStore;
use crate::permissions::{PermissionGate, PortalPermissions};
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About, toaster::Toasts};
use cosmic::{Element, Task};
pub use state::{AppFlags, AppModel, ContextPage, Message, PreviewImage};
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

const REPOSITORY: &str = "https://github.com/pocket-camera/pocket-camera";

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = AppFlags;

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.pocket_camera.PocketCamera";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(core: cosmic::Core, flags: Self::Flags) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_name("camera-photo-symbolic"))
            .version(crate::constants::app_info::version())
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let (config_handler, config) =
            match cosmic_config::Config::new(Self::APP_ID, Config::VERSION) {
                Ok(handler) => {
                    let config = match Config::get_entry(&handler) {
                        Ok(config) => config,
                        Err((errors, config)) => {
                            error!(?errors, "Errors loading config");
                            config
                        }
                    };
                    (Some(handler), config)
                }
                Err(err) => {
                    error!(%err, "Failed to create config handler");
                    (None, Config::default())
                }
            };

        // Required before any device monitor or pipeline is created
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        let selector = flags.camera.unwrap_or(config.default_camera);
        let mut controller: Box<dyn CameraController> =
            Box::new(PipeWireController::new(selector));
        controller.set_enabled_use_cases(UseCases::IMAGE_CAPTURE | UseCases::VIDEO_CAPTURE);
        let camera_error = match controller.bind() {
            Ok(()) => None,
            Err(e) => {
                error!(error = %e, %selector, "Failed to bind camera");
                Some(e.to_string())
            }
        };

        let output = Self::recording_output(&config);
        let mut capture = CaptureOrchestrator::new(output);
        capture.set_audio(config.record_audio);
        capture.set_mirror(config.mirror_photos);

        let permissions = PermissionGate::new(Arc::new(PortalPermissions::new()));
        let photos = PhotoStore::new();
        let photo_snapshot = photos.snapshot();

        info!(
            %selector,
            runtime = crate::constants::app_info::runtime_environment(),
            output = %capture.output_path().display(),
            "Camera app starting"
        );

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            config,
            config_handler,
            controller,
            permissions,
            capture,
            photos,
            photo_snapshot,
            sheet_expanded: false,
            preview: None,
            is_capturing: false,
            camera_error,
            toasts: Toasts::new(Message::CloseToast),
        };

        let check_task = app.check_permissions_task();
        (app, check_task)
    }

    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
        ]
    }

    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
        })
    }

    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    fn subscription(&self) -> Subscription<Self::Message> {
        use cosmic::iced::futures::SinkExt;

        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // The controller keeps one frame channel across rebinds, so this
        // stream lives as long as the app
        let mut frames = self.controller.preview_frames();
        let preview_sub = Subscription::run_with_id(
            "preview",
            cosmic::iced::stream::channel(1, move |mut output| async move {
                info!("Preview subscription started");
                while frames.changed().await.is_ok() {
                    let frame = frames.borrow_and_update().clone();
                    let Some(frame) = frame else {
                        continue;
                    };
                    if output.send(Message::CameraFrame(frame)).await.is_err() {
                        break;
                    }
                }
                info!("Preview subscription ended");
            }),
        );

        let mut photos = self.photos.subscribe();
        let photos_sub = Subscription::run_with_id(
            "photos",
            cosmic::iced::stream::channel(4, move |mut output| async move {
                while photos.changed().await.is_ok() {
                    let snapshot = photos.borrow_and_update().clone();
                    if output.send(Message::PhotosChanged(snapshot)).await.is_err() {
                        break;
                    }
                }
            }),
        );

        let mut events = self.capture.subscribe();
        let record_sub = Subscription::run_with_id(
            "record-events",
            cosmic::iced::stream::channel(8, move |mut output| async move {
                loop {
                    match events.recv().await {
                        Ok(event) => {
                            if output.send(Message::RecordEvent(event)).await.is_err() {
                                break;
                            }
                        }
                        Err(RecvError::Lagged(skipped)) => {
                            warn!(skipped, "Dropped recorder events");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }
            }),
        );

        Subscription::batch([config_sub, preview_sub, photos_sub, record_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}

impl AppModel {
    /// Recording file for `config`, falling back to the temp dir
    pub(crate) fn recording_output(config: &Config) -> std::path::PathBuf {
        use cosmic::Application;

        let name = &config.recording_file_name;
        crate::storage::recording_output_path(Self::APP_ID, name)
            .or_else(|e| {
                error!(error = %e, "No app data directory, recording to temp dir");
                crate::storage::output_path_in(&std::env::temp_dir(), Self::APP_ID, name)
            })
            .unwrap_or_else(|e| {
                error!(error = %e, "Temp dir unusable for recording");
                std::env::temp_dir().join(crate::constants::recording::DEFAULT_FILE_NAME)
            })
    }
}
