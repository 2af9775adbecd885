// SPDX-License-Identifier: GPL-3.0-only

//! Application state types

use crate::backends::camera::{CameraController, CameraFrame, CameraSelector, VideoRecordEvent};
use crate::capture::CaptureOrchestrator;
use crate::config::Config;
use crate::gallery::{CapturedPhoto, PhotoSnapshot, PhotoStore};
use crate::permissions::{PermissionGate, PermissionSnapshot};
use cosmic::cosmic_config;
use cosmic::widget::about::About;
use cosmic::widget::image::Handle;
use cosmic::widget::toaster::{ToastId, Toasts};
use std::sync::Arc;

/// Startup options passed from the command line
#[derive(Debug, Clone, Default)]
pub struct AppFlags {
    /// Overrides `Config::default_camera` when set
    pub camera: Option<CameraSelector>,
}

/// The context page to display in the context drawer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
}

/// Preview frame ready to draw
#[derive(Debug, Clone)]
pub struct PreviewImage {
    pub handle: Handle,
    /// Clockwise rotation to apply when drawing, in degrees
    pub rotation_degrees: u32,
}

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    pub core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    pub context_page: ContextPage,
    /// The about page for this app.
    pub about: About,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Configuration handler for saving settings
    pub config_handler: Option<cosmic_config::Config>,

    /// Camera bound for the lifetime of the window
    pub controller: Box<dyn CameraController>,
    pub permissions: PermissionGate,
    pub capture: CaptureOrchestrator,
    pub photos: PhotoStore,
    /// Last snapshot received from the photo store subscription
    pub photo_snapshot: PhotoSnapshot,

    /// Gallery sheet expanded (the only UI state machine)
    pub sheet_expanded: bool,
    pub preview: Option<PreviewImage>,
    /// Whether a photo capture is in progress (for the button flash)
    pub is_capturing: bool,
    pub camera_error: Option<String>,
    pub toasts: Toasts<Message>,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== UI Navigation =====
    LaunchUrl(String),
    ToggleContextPage(ContextPage),
    ExpandPhotoSheet,
    CollapsePhotoSheet,
    CloseToast(ToastId),

    // ===== Configuration =====
    UpdateConfig(Config),

    // ===== Permissions =====
    PermissionsChecked(PermissionSnapshot),

    // ===== Camera =====
    SwitchCamera,
    CameraFrame(Arc<CameraFrame>),

    // ===== Capture =====
    TakePhoto,
    PhotoTaken(Option<CapturedPhoto>),
    ClearCaptureAnimation,
    ToggleRecording,
    RecordEvent(VideoRecordEvent),

    // ===== Gallery =====
    PhotosChanged(PhotoSnapshot),
}
