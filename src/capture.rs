// SPDX-License-Identifier: GPL-3.0-only

//! Photo and video capture orchestration
//!
//! The orchestrator owns the active recording handle and decides what a press
//! of the record button means. Pixel work and file finalization happen
//! elsewhere; results come back as futures and [`VideoRecordEvent`]s.

use crate::backends::camera::{
    CameraController, RecordEventSender, Recording, RecordingId, RecordingOptions,
    VideoRecordEvent,
};
use crate::gallery::CapturedPhoto;
use crate::permissions::PermissionGate;
use crate::pipelines::photo::PhotoPipeline;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

const EVENT_CAPACITY: usize = 16;

/// What a press of the record button did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Started(RecordingId),
    /// EOS sent; a `Finalize` event follows
    Stopped(RecordingId),
    /// Camera or microphone not granted; nothing happened
    PermissionDenied,
    /// The previous recording still owns the output file; recording starts
    /// once it is finalized
    StartQueued(RecordingId),
    /// A second press withdrew the queued start
    QueueCancelled,
    Failed(String),
}

/// User-facing result of a finished recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    RecordingSucceeded { output: PathBuf },
    RecordingFailed { reason: String },
}

struct ActiveRecording {
    handle: Box<dyn Recording>,
    started_at: Instant,
}

pub struct CaptureOrchestrator {
    active: Option<ActiveRecording>,
    /// Stopped recording whose `Finalize` has not arrived yet
    finalizing: Option<RecordingId>,
    /// Record was pressed while `finalizing` was set
    start_queued: bool,
    next_id: u64,
    output: PathBuf,
    audio: bool,
    mirror: bool,
    events: RecordEventSender,
}

impl CaptureOrchestrator {
    pub fn new(output: PathBuf) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            active: None,
            finalizing: None,
            start_queued: false,
            next_id: 1,
            output,
            audio: true,
            mirror: true,
            events,
        }
    }

    pub fn set_audio(&mut self, audio: bool) {
        self.audio = audio;
    }

    pub fn set_mirror(&mut self, mirror: bool) {
        self.mirror = mirror;
    }

    /// Change the output file; applies from the next recording
    pub fn set_output_path(&mut self, output: PathBuf) {
        self.output = output;
    }

    pub fn output_path(&self) -> &Path {
        &self.output
    }

    /// Receiver for lifecycle events of every recording started here
    pub fn subscribe(&self) -> broadcast::Receiver<VideoRecordEvent> {
        self.events.subscribe()
    }

    pub fn is_recording(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_recording(&self) -> Option<RecordingId> {
        self.active.as_ref().map(|a| a.handle.id())
    }

    pub fn finalizing_recording(&self) -> Option<RecordingId> {
        self.finalizing
    }

    /// A recording will start as soon as the previous one is finalized
    pub fn is_start_queued(&self) -> bool {
        self.start_queued
    }

    /// Grab a frame now and orient it in the background
    ///
    /// Resolves to `None` when capture or processing fails; the error is
    /// only logged.
    pub fn take_photo(
        &self,
        controller: &dyn CameraController,
    ) -> impl Future<Output = Option<CapturedPhoto>> + Send + use<> {
        let frame = controller.take_picture();
        let pipeline = PhotoPipeline::new(self.mirror);

        async move {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    error!(error = %e, "Photo capture failed");
                    return None;
                }
            };
            match pipeline.process(frame).await {
                Ok(image) => {
                    info!(width = image.width(), height = image.height(), "Photo captured");
                    Some(CapturedPhoto::from_image(image))
                }
                Err(e) => {
                    error!(error = %e, "Photo processing failed");
                    None
                }
            }
        }
    }

    /// Toggle recording
    pub fn record_video(
        &mut self,
        controller: &mut dyn CameraController,
        gate: &PermissionGate,
    ) -> RecordOutcome {
        if let Some(active) = self.active.take() {
            let id = active.handle.id();
            info!(
                %id,
                elapsed_ms = active.started_at.elapsed().as_millis() as u64,
                "Stopping recording"
            );
            self.finalizing = Some(id);
            active.handle.stop();
            return RecordOutcome::Stopped(id);
        }

        if self.start_queued {
            info!("Queued recording cancelled");
            self.start_queued = false;
            return RecordOutcome::QueueCancelled;
        }

        if !gate.has_permission() {
            debug!(permissions = ?gate.snapshot(), "Recording blocked by missing permission");
            return RecordOutcome::PermissionDenied;
        }

        if let Some(pending) = self.finalizing {
            info!(id = %pending, "Previous recording is still finalizing, queueing start");
            self.start_queued = true;
            return RecordOutcome::StartQueued(pending);
        }

        self.start(controller)
    }

    /// Start the recording queued behind a finalize, if it is now due
    ///
    /// Call after [`Self::on_record_event`]. Permissions are checked again
    /// since they may have changed while waiting.
    pub fn start_queued(
        &mut self,
        controller: &mut dyn CameraController,
        gate: &PermissionGate,
    ) -> Option<RecordOutcome> {
        if !self.start_queued || self.finalizing.is_some() {
            return None;
        }
        self.start_queued = false;
        if !gate.has_permission() {
            debug!("Queued recording dropped, permission missing");
            return Some(RecordOutcome::PermissionDenied);
        }
        Some(self.start(controller))
    }

    fn start(&mut self, controller: &mut dyn CameraController) -> RecordOutcome {
        let id = RecordingId(self.next_id);
        self.next_id += 1;
        let options = RecordingOptions {
            output: self.output.clone(),
            audio: self.audio,
        };

        match controller.start_recording(id, options, self.events.clone()) {
            Ok(handle) => {
                info!(%id, output = %handle.output().display(), "Recording started");
                self.active = Some(ActiveRecording {
                    handle,
                    started_at: Instant::now(),
                });
                RecordOutcome::Started(id)
            }
            Err(e) => {
                error!(%id, error = %e, "Failed to start recording");
                RecordOutcome::Failed(e.to_string())
            }
        }
    }

    /// React to a recorder event
    ///
    /// Returns the notification to show, if any. Events for recordings this
    /// orchestrator no longer tracks are ignored.
    pub fn on_record_event(&mut self, event: VideoRecordEvent) -> Option<Notification> {
        let (recording, output, error) = match event {
            VideoRecordEvent::Start { recording, output } => {
                debug!(%recording, path = %output.display(), "Recorder is writing");
                return None;
            }
            VideoRecordEvent::Finalize {
                recording,
                output,
                error,
            } => (recording, output, error),
        };

        let was_finalizing = self.finalizing == Some(recording);
        if was_finalizing {
            self.finalizing = None;
        }

        let was_active = self.active_recording() == Some(recording);
        if was_active && let Some(active) = self.active.take() {
            // Finished on its own (device lost, disk full); release the recorder
            active.handle.close();
        }

        if !was_finalizing && !was_active {
            debug!(%recording, "Ignoring finalize for an untracked recording");
            return None;
        }

        match error {
            Some(e) => {
                error!(%recording, error = %e, "Recording failed");
                Some(Notification::RecordingFailed {
                    reason: e.to_string(),
                })
            }
            None => {
                info!(%recording, path = %output.display(), "Recording saved");
                Some(Notification::RecordingSucceeded { output })
            }
        }
    }
}

impl Drop for CaptureOrchestrator {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            warn!(id = %active.handle.id(), "Recording still active at shutdown");
            active.handle.stop();
        }
    }
}
