// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for capture orchestration
//!
//! The camera and the permission provider are replaced by in-memory fakes so
//! the toggle logic, the photo flow and finalize handling run without
//! hardware or a desktop portal.

use pocket_camera::backends::camera::{
    BackendResult, CameraController, CameraDevice, CameraFrame, CameraSelector, PreviewReceiver,
    RecordEventSender, Recording, RecordingId, RecordingOptions, SensorRotation, UseCases,
    VideoRecordEvent,
};
use pocket_camera::capture::{CaptureOrchestrator, Notification, RecordOutcome};
use pocket_camera::errors::{CameraError, PermissionError, PhotoError, RecordingError};
use pocket_camera::gallery::PhotoStore;
use pocket_camera::permissions::{Permission, PermissionGate, PermissionProvider, PermissionStatus};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// What the fake recordings were asked to do
type CallLog = Arc<Mutex<Vec<(RecordingId, &'static str)>>>;

struct FakeRecording {
    id: RecordingId,
    output: PathBuf,
    calls: CallLog,
}

impl Recording for FakeRecording {
    fn id(&self) -> RecordingId {
        self.id
    }

    fn output(&self) -> &Path {
        &self.output
    }

    fn stop(self: Box<Self>) {
        self.calls.lock().unwrap().push((self.id, "stop"));
    }

    fn close(self: Box<Self>) {
        self.calls.lock().unwrap().push((self.id, "close"));
    }
}

struct FakeController {
    selector: CameraSelector,
    use_cases: UseCases,
    frame: Option<CameraFrame>,
    frames: watch::Sender<Option<Arc<CameraFrame>>>,
    started: Vec<RecordingId>,
    calls: CallLog,
}

impl FakeController {
    fn new(frame: Option<CameraFrame>) -> Self {
        let (frames, _) = watch::channel(None);
        Self {
            selector: CameraSelector::Back,
            use_cases: UseCases::IMAGE_CAPTURE | UseCases::VIDEO_CAPTURE,
            frame,
            frames,
            started: Vec::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Vec<(RecordingId, &'static str)> {
        self.calls.lock().unwrap().clone()
    }
}

impl CameraController for FakeController {
    fn enabled_use_cases(&self) -> UseCases {
        self.use_cases
    }

    fn set_enabled_use_cases(&mut self, use_cases: UseCases) {
        self.use_cases = use_cases;
    }

    fn camera_selector(&self) -> CameraSelector {
        self.selector
    }

    fn set_camera_selector(&mut self, selector: CameraSelector) -> BackendResult<()> {
        self.selector = selector;
        Ok(())
    }

    fn bind(&mut self) -> BackendResult<()> {
        Ok(())
    }

    fn unbind(&mut self) {}

    fn current_device(&self) -> Option<&CameraDevice> {
        None
    }

    fn preview_frames(&self) -> PreviewReceiver {
        self.frames.subscribe()
    }

    fn take_picture(&self) -> BackendResult<CameraFrame> {
        if !self.use_cases.contains(UseCases::IMAGE_CAPTURE) {
            return Err(CameraError::UseCaseDisabled("image capture").into());
        }
        self.frame
            .clone()
            .ok_or_else(|| PhotoError::NoFrameAvailable.into())
    }

    fn start_recording(
        &mut self,
        recording: RecordingId,
        options: RecordingOptions,
        _events: RecordEventSender,
    ) -> BackendResult<Box<dyn Recording>> {
        if !self.use_cases.contains(UseCases::VIDEO_CAPTURE) {
            return Err(CameraError::UseCaseDisabled("video capture").into());
        }
        // The real recorder truncates the file when the muxer opens it
        std::fs::write(&options.output, b"")
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;
        self.started.push(recording);
        Ok(Box::new(FakeRecording {
            id: recording,
            output: options.output,
            calls: Arc::clone(&self.calls),
        }))
    }
}

struct FixedPermissions {
    camera: PermissionStatus,
    microphone: PermissionStatus,
}

impl PermissionProvider for FixedPermissions {
    fn status(&self, permission: Permission) -> Result<PermissionStatus, PermissionError> {
        Ok(match permission {
            Permission::Camera => self.camera,
            Permission::Microphone => self.microphone,
        })
    }

    fn request(&self, _permission: Permission) -> Result<(), PermissionError> {
        Ok(())
    }
}

fn gate_with(camera: PermissionStatus, microphone: PermissionStatus) -> PermissionGate {
    let mut gate = PermissionGate::new(Arc::new(FixedPermissions { camera, microphone }));
    gate.refresh();
    gate
}

fn granted_gate() -> PermissionGate {
    gate_with(PermissionStatus::Granted, PermissionStatus::Granted)
}

/// Fresh output path per test, with any leftover from earlier runs removed
fn output_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pocket-camera-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn test_frame() -> CameraFrame {
    // 2x1 RGBA: red, blue
    CameraFrame {
        width: 2,
        height: 1,
        stride: 8,
        data: Arc::from(vec![255, 0, 0, 255, 0, 0, 255, 255]),
        rotation: SensorRotation::None,
    }
}

fn finalize(
    recording: RecordingId,
    output: &Path,
    error: Option<RecordingError>,
) -> VideoRecordEvent {
    VideoRecordEvent::Finalize {
        recording,
        output: output.to_path_buf(),
        error,
    }
}

#[test]
fn test_record_twice_stops_instead_of_starting_again() {
    let output = output_path("toggle.mp4");
    let mut controller = FakeController::new(None);
    let gate = granted_gate();
    let mut capture = CaptureOrchestrator::new(output);

    let first = capture.record_video(&mut controller, &gate);
    assert_eq!(first, RecordOutcome::Started(RecordingId(1)));
    assert!(capture.is_recording());

    let second = capture.record_video(&mut controller, &gate);
    assert_eq!(second, RecordOutcome::Stopped(RecordingId(1)));
    assert!(!capture.is_recording());

    assert_eq!(controller.started, vec![RecordingId(1)]);
    assert_eq!(controller.calls(), vec![(RecordingId(1), "stop")]);
}

#[test]
fn test_record_without_permission_creates_nothing() {
    let output = output_path("denied.mp4");
    let mut controller = FakeController::new(None);
    let mut capture = CaptureOrchestrator::new(output.clone());

    for gate in [
        gate_with(PermissionStatus::Denied, PermissionStatus::Granted),
        gate_with(PermissionStatus::Granted, PermissionStatus::Denied),
        gate_with(PermissionStatus::NotDetermined, PermissionStatus::NotDetermined),
    ] {
        let outcome = capture.record_video(&mut controller, &gate);
        assert_eq!(outcome, RecordOutcome::PermissionDenied);
        assert_eq!(capture.active_recording(), None);
    }

    assert!(controller.started.is_empty());
    assert!(!output.exists(), "No file should be written without permission");
}

#[tokio::test]
async fn test_capture_then_record_scenario() {
    let output = output_path("scenario.mp4");
    let mut controller = FakeController::new(Some(test_frame()));
    let gate = granted_gate();
    let mut capture = CaptureOrchestrator::new(output.clone());
    let store = PhotoStore::new();

    assert_eq!(store.len(), 0);
    let photo = capture.take_photo(&controller).await;
    store.prepend(photo.expect("photo should be captured"));
    assert_eq!(store.len(), 1);

    capture.record_video(&mut controller, &gate);
    assert!(capture.active_recording().is_some());

    capture.record_video(&mut controller, &gate);
    assert!(capture.active_recording().is_none());
    assert!(output.exists());
}

#[tokio::test]
async fn test_photo_keeps_frame_dimensions() {
    let controller = FakeController::new(Some(test_frame()));
    let capture = CaptureOrchestrator::new(output_path("unused.mp4"));

    let photo = capture.take_photo(&controller).await.unwrap();
    assert_eq!((photo.width, photo.height), (2, 1));
}

#[tokio::test]
async fn test_photo_failure_leaves_store_unchanged() {
    let controller = FakeController::new(None);
    let capture = CaptureOrchestrator::new(output_path("unused.mp4"));
    let store = PhotoStore::new();

    if let Some(photo) = capture.take_photo(&controller).await {
        store.prepend(photo);
    }
    assert!(store.is_empty());
}

#[test]
fn test_finalize_error_clears_active_handle() {
    let output = output_path("finalize-error.mp4");
    let mut controller = FakeController::new(None);
    let gate = granted_gate();
    let mut capture = CaptureOrchestrator::new(output.clone());

    capture.record_video(&mut controller, &gate);
    let id = capture.active_recording().unwrap();

    let error = RecordingError::PipelineError("disk full".to_string());
    let notification = capture.on_record_event(finalize(id, &output, Some(error)));

    assert!(matches!(
        notification,
        Some(Notification::RecordingFailed { .. })
    ));
    assert_eq!(capture.active_recording(), None);
    assert_eq!(controller.calls(), vec![(id, "close")]);

    // The next press starts a fresh recording
    let outcome = capture.record_video(&mut controller, &gate);
    assert_eq!(outcome, RecordOutcome::Started(RecordingId(2)));
}

#[test]
fn test_successful_finalize_after_stop_notifies() {
    let output = output_path("finalize-ok.mp4");
    let mut controller = FakeController::new(None);
    let gate = granted_gate();
    let mut capture = CaptureOrchestrator::new(output.clone());

    capture.record_video(&mut controller, &gate);
    capture.record_video(&mut controller, &gate);
    assert_eq!(capture.finalizing_recording(), Some(RecordingId(1)));

    let notification = capture.on_record_event(finalize(RecordingId(1), &output, None));
    assert_eq!(
        notification,
        Some(Notification::RecordingSucceeded {
            output: output.clone()
        })
    );
    assert_eq!(capture.finalizing_recording(), None);
}

#[test]
fn test_record_during_finalize_starts_after_it() {
    let output = output_path("still-finalizing.mp4");
    let mut controller = FakeController::new(None);
    let gate = granted_gate();
    let mut capture = CaptureOrchestrator::new(output.clone());

    capture.record_video(&mut controller, &gate);
    capture.record_video(&mut controller, &gate);

    let outcome = capture.record_video(&mut controller, &gate);
    assert_eq!(outcome, RecordOutcome::StartQueued(RecordingId(1)));
    assert!(capture.is_start_queued());
    assert_eq!(controller.started.len(), 1, "Two muxers must never share the file");

    // Not due until the first file is written
    assert_eq!(capture.start_queued(&mut controller, &gate), None);

    capture.on_record_event(finalize(RecordingId(1), &output, None));
    let outcome = capture.start_queued(&mut controller, &gate);
    assert_eq!(outcome, Some(RecordOutcome::Started(RecordingId(2))));
    assert_eq!(controller.started, vec![RecordingId(1), RecordingId(2)]);
    assert_eq!(capture.active_recording(), Some(RecordingId(2)));
    assert!(!capture.is_start_queued());

    // Nothing left to start
    assert_eq!(capture.start_queued(&mut controller, &gate), None);
}

#[test]
fn test_second_press_cancels_queued_start() {
    let output = output_path("queue-cancel.mp4");
    let mut controller = FakeController::new(None);
    let gate = granted_gate();
    let mut capture = CaptureOrchestrator::new(output.clone());

    capture.record_video(&mut controller, &gate);
    capture.record_video(&mut controller, &gate);
    capture.record_video(&mut controller, &gate);

    let outcome = capture.record_video(&mut controller, &gate);
    assert_eq!(outcome, RecordOutcome::QueueCancelled);

    capture.on_record_event(finalize(RecordingId(1), &output, None));
    assert_eq!(capture.start_queued(&mut controller, &gate), None);
    assert_eq!(controller.started, vec![RecordingId(1)]);
}

#[test]
fn test_clean_finalize_of_active_recording_releases_it() {
    let output = output_path("finalize-unprompted.mp4");
    let mut controller = FakeController::new(None);
    let gate = granted_gate();
    let mut capture = CaptureOrchestrator::new(output.clone());

    capture.record_video(&mut controller, &gate);
    let id = capture.active_recording().unwrap();

    // The recorder finished without a stop press
    let notification = capture.on_record_event(finalize(id, &output, None));

    assert_eq!(
        notification,
        Some(Notification::RecordingSucceeded {
            output: output.clone()
        })
    );
    assert_eq!(capture.active_recording(), None);
    assert_eq!(controller.calls(), vec![(id, "close")]);
}

#[test]
fn test_stale_finalize_keeps_active_handle() {
    let output = output_path("stale.mp4");
    let mut controller = FakeController::new(None);
    let gate = granted_gate();
    let mut capture = CaptureOrchestrator::new(output.clone());

    capture.record_video(&mut controller, &gate);
    capture.record_video(&mut controller, &gate);
    capture.on_record_event(finalize(RecordingId(1), &output, None));
    capture.record_video(&mut controller, &gate);
    assert_eq!(capture.active_recording(), Some(RecordingId(2)));

    // A late duplicate for the first recording
    let error = RecordingError::FinalizeTimedOut;
    let notification = capture.on_record_event(finalize(RecordingId(1), &output, Some(error)));

    assert_eq!(notification, None);
    assert_eq!(capture.active_recording(), Some(RecordingId(2)));
}

#[test]
fn test_start_event_does_not_notify() {
    let output = output_path("start-event.mp4");
    let mut controller = FakeController::new(None);
    let gate = granted_gate();
    let mut capture = CaptureOrchestrator::new(output.clone());

    capture.record_video(&mut controller, &gate);
    let event = VideoRecordEvent::Start {
        recording: RecordingId(1),
        output,
    };
    assert_eq!(capture.on_record_event(event), None);
    assert!(capture.is_recording());
}

#[test]
fn test_disabled_video_use_case_fails_to_start() {
    let mut controller = FakeController::new(None);
    controller.set_enabled_use_cases(UseCases::IMAGE_CAPTURE);
    let gate = granted_gate();
    let mut capture = CaptureOrchestrator::new(output_path("disabled.mp4"));

    let outcome = capture.record_video(&mut controller, &gate);
    assert!(matches!(outcome, RecordOutcome::Failed(_)));
    assert!(!capture.is_recording());
}
