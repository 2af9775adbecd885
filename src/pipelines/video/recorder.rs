// SPDX-License-Identifier: GPL-3.0-only

//! MP4 recorder pipeline
//!
//! ```text
//! source ! queue ! videoconvert [! videoflip] ! h264 ! h264parse ! mp4mux ! filesink
//! audiosrc ! queue ! audioconvert ! audioresample ! aac ─────────────┘
//! ```
//!
//! Lifecycle events are published from a bus watcher thread: `Start` once
//! the pipeline reaches PLAYING, `Finalize` after end-of-stream, an error,
//! or the finalize timeout.

use super::encoders::{select_audio_encoder, select_video_encoder};
use crate::backends::camera::Recording;
use crate::backends::camera::types::{
    RecordEventSender, RecordingId, RecordingOptions, SensorRotation, VideoRecordEvent,
};
use crate::constants::recording;
use crate::errors::RecordingError;
use gstreamer as gst;
use gstreamer::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// State shared between the recorder handle and its bus watcher
#[derive(Default)]
struct WatchState {
    /// Handle closed without finalizing; the watcher exits silently
    closed: AtomicBool,
    /// Set once a `Finalize` event has been sent
    finalized: AtomicBool,
    eos_sent_at: Mutex<Option<Instant>>,
}

/// One recording to a single output file
pub struct VideoRecorder {
    id: RecordingId,
    output: PathBuf,
    pipeline: gst::Pipeline,
    events: RecordEventSender,
    state: Arc<WatchState>,
    /// EOS was sent; the watcher owns teardown from here
    stopping: bool,
}

impl VideoRecorder {
    /// Assemble the pipeline around an already-created camera `source`
    pub fn new(
        id: RecordingId,
        source: gst::Element,
        rotation: SensorRotation,
        options: RecordingOptions,
        events: RecordEventSender,
    ) -> Result<Self, RecordingError> {
        gst::init()?;
        info!(%id, output = %options.output.display(), audio = options.audio, "Creating recorder");

        let pipeline = gst::Pipeline::with_name(&format!("recorder-{}", id.0));

        let queue = make("queue")?;
        let convert = make("videoconvert")?;
        let encoder = select_video_encoder()?;
        info!(%id, encoder = encoder.name, hardware = encoder.hardware, "Video encoder selected");
        let parser = make("h264parse")?;
        let muxer = make("mp4mux")?;
        let filesink = gst::ElementFactory::make("filesink")
            .property("location", options.output.to_string_lossy().as_ref())
            .build()
            .map_err(|e| RecordingError::StartFailed(format!("filesink: {}", e)))?;

        let mut video_chain = vec![source, queue, convert];
        if let Some(direction) = flip_direction(rotation) {
            let flip = make("videoflip")?;
            flip.set_property_from_str("video-direction", direction);
            video_chain.push(flip);
        }
        video_chain.push(encoder.element.clone());
        video_chain.push(parser);

        pipeline.add_many(&video_chain)?;
        pipeline.add_many([&muxer, &filesink])?;
        gst::Element::link_many(&video_chain)?;
        if let Some(last) = video_chain.last() {
            last.link(&muxer).map_err(|_| {
                RecordingError::StartFailed("Failed to link video to muxer".to_string())
            })?;
        }
        muxer.link(&filesink).map_err(|_| {
            RecordingError::StartFailed("Failed to link muxer to filesink".to_string())
        })?;

        if options.audio {
            match build_audio_branch() {
                Ok(audio_chain) => {
                    pipeline.add_many(&audio_chain)?;
                    gst::Element::link_many(&audio_chain)?;
                    if let Some(last) = audio_chain.last() {
                        last.link(&muxer).map_err(|_| {
                            RecordingError::StartFailed(
                                "Failed to link audio to muxer".to_string(),
                            )
                        })?;
                    }
                }
                Err(e) => warn!(%id, error = %e, "Recording without audio"),
            }
        }

        Ok(Self {
            id,
            output: options.output,
            pipeline,
            events,
            state: Arc::new(WatchState::default()),
            stopping: false,
        })
    }

    /// Set the pipeline to PLAYING and start watching its bus
    pub fn start(&self) -> Result<(), RecordingError> {
        self.pipeline
            .set_state(gst::State::Playing)
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        let bus = self
            .pipeline
            .bus()
            .ok_or_else(|| RecordingError::StartFailed("No bus available".to_string()))?;

        let watcher = BusWatcher {
            id: self.id,
            output: self.output.clone(),
            pipeline: self.pipeline.clone(),
            events: self.events.clone(),
            state: Arc::clone(&self.state),
        };
        std::thread::Builder::new()
            .name(format!("recorder-bus-{}", self.id.0))
            .spawn(move || watcher.run(bus))
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;
        Ok(())
    }
}

impl Recording for VideoRecorder {
    fn id(&self) -> RecordingId {
        self.id
    }

    fn output(&self) -> &Path {
        &self.output
    }

    fn stop(mut self: Box<Self>) {
        info!(id = %self.id, "Sending EOS to recorder");
        if let Ok(mut sent) = self.state.eos_sent_at.lock() {
            *sent = Some(Instant::now());
        }
        if !self.pipeline.send_event(gst::event::Eos::new()) {
            // The watcher reports a timeout if EOS never arrives
            warn!(id = %self.id, "Recorder did not accept EOS");
        }
        self.stopping = true;
    }

    fn close(self: Box<Self>) {
        debug!(id = %self.id, "Closing recorder");
    }
}

impl Drop for VideoRecorder {
    fn drop(&mut self) {
        if self.stopping {
            return;
        }
        self.state.closed.store(true, Ordering::SeqCst);
        let _ = self.pipeline.set_state(gst::State::Null);
    }
}

struct BusWatcher {
    id: RecordingId,
    output: PathBuf,
    pipeline: gst::Pipeline,
    events: RecordEventSender,
    state: Arc<WatchState>,
}

impl BusWatcher {
    fn run(self, bus: gst::Bus) {
        let poll = gst::ClockTime::from_mseconds(recording::BUS_POLL_MS);
        let mut started = false;

        loop {
            if self.state.closed.load(Ordering::SeqCst) {
                debug!(id = %self.id, "Recorder closed, watcher exiting");
                return;
            }

            if self.finalize_deadline_passed() {
                error!(id = %self.id, "Recorder did not finish within the finalize timeout");
                self.finalize(Some(RecordingError::FinalizeTimedOut));
                break;
            }

            let Some(msg) = bus.timed_pop_filtered(
                poll,
                &[
                    gst::MessageType::Eos,
                    gst::MessageType::Error,
                    gst::MessageType::StateChanged,
                ],
            ) else {
                continue;
            };

            match msg.view() {
                gst::MessageView::Eos(_) => {
                    info!(id = %self.id, path = %self.output.display(), "Recording finalized");
                    self.finalize(None);
                    break;
                }
                gst::MessageView::Error(err) => {
                    error!(
                        id = %self.id,
                        error = %err.error(),
                        debug = ?err.debug(),
                        source = ?err.src().map(|s| s.name()),
                        "Recorder pipeline error"
                    );
                    self.finalize(Some(RecordingError::PipelineError(err.error().to_string())));
                    break;
                }
                gst::MessageView::StateChanged(change) => {
                    let from_pipeline = msg
                        .src()
                        .is_some_and(|s| s == self.pipeline.upcast_ref::<gst::Object>());
                    if !started && from_pipeline && change.current() == gst::State::Playing {
                        started = true;
                        info!(id = %self.id, "Recording started");
                        let _ = self.events.send(VideoRecordEvent::Start {
                            recording: self.id,
                            output: self.output.clone(),
                        });
                    }
                }
                _ => {}
            }
        }

        let _ = self.pipeline.set_state(gst::State::Null);
    }

    fn finalize_deadline_passed(&self) -> bool {
        self.state
            .eos_sent_at
            .lock()
            .ok()
            .and_then(|sent| *sent)
            .is_some_and(|sent| sent.elapsed() > recording::FINALIZE_TIMEOUT)
    }

    fn finalize(&self, error: Option<RecordingError>) {
        if self.state.finalized.swap(true, Ordering::SeqCst) {
            return;
        }
        // No receivers only means the app is shutting down
        let _ = self.events.send(VideoRecordEvent::Finalize {
            recording: self.id,
            output: self.output.clone(),
            error,
        });
    }
}

fn make(factory: &str) -> Result<gst::Element, RecordingError> {
    gst::ElementFactory::make(factory)
        .build()
        .map_err(|e| RecordingError::StartFailed(format!("{}: {}", factory, e)))
}

fn build_audio_branch() -> Result<Vec<gst::Element>, RecordingError> {
    let source = make("autoaudiosrc")?;
    let queue = make("queue")?;
    let convert = make("audioconvert")?;
    let resample = make("audioresample")?;
    let encoder = select_audio_encoder()?;
    info!(encoder = encoder.name, "Audio encoder selected");
    Ok(vec![source, queue, convert, resample, encoder.element])
}

/// `videoflip` direction that undoes the sensor's mounting rotation
pub fn flip_direction(rotation: SensorRotation) -> Option<&'static str> {
    match rotation {
        SensorRotation::None => None,
        SensorRotation::Rotate90 => Some("90r"),
        SensorRotation::Rotate180 => Some("180"),
        SensorRotation::Rotate270 => Some("90l"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_direction_matches_rotation() {
        assert_eq!(flip_direction(SensorRotation::None), None);
        assert_eq!(flip_direction(SensorRotation::Rotate90), Some("90r"));
        assert_eq!(flip_direction(SensorRotation::Rotate270), Some("90l"));
    }
}
