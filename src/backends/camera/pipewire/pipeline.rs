// SPDX-License-Identifier: GPL-3.0-only

//! GStreamer preview pipeline
//!
//! `source ! videoconvert ! appsink(RGBA)`; every sample replaces the latest
//! frame in a watch channel so slow consumers only ever see the newest one.

use super::super::types::*;
use super::enumeration::DiscoveredCamera;
use crate::constants::pipeline as limits;
use crate::errors::CameraError;
use gstreamer::prelude::*;
use gstreamer_app::AppSink;
use gstreamer_video::VideoInfo;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

pub type FrameSender = watch::Sender<Option<Arc<CameraFrame>>>;

/// Running preview for one camera
pub struct PreviewPipeline {
    pipeline: gstreamer::Pipeline,
    appsink: AppSink,
}

impl PreviewPipeline {
    /// Build and start the preview for `camera`
    pub fn new(camera: &DiscoveredCamera, frames: FrameSender) -> BackendResult<Self> {
        info!(device = %camera.info.name, "Creating preview pipeline");

        let init_failed = |what: &str, e: &dyn std::fmt::Display| {
            BackendError::Camera(CameraError::InitializationFailed(format!(
                "{}: {}",
                what, e
            )))
        };

        let source = camera
            .device
            .create_element(Some("source"))
            .map_err(|e| init_failed("Failed to create camera source", &e))?;
        let convert = gstreamer::ElementFactory::make("videoconvert")
            .build()
            .map_err(|e| init_failed("Failed to create videoconvert", &e))?;
        let appsink = gstreamer::ElementFactory::make("appsink")
            .name("sink")
            .build()
            .map_err(|e| init_failed("Failed to create appsink", &e))?
            .dynamic_cast::<AppSink>()
            .map_err(|_| {
                BackendError::Camera(CameraError::InitializationFailed(
                    "Failed to cast appsink".to_string(),
                ))
            })?;

        let caps = gstreamer::Caps::builder("video/x-raw")
            .field("format", "RGBA")
            .build();
        appsink.set_caps(Some(&caps));
        appsink.set_property("sync", false);
        appsink.set_property("max-buffers", limits::MAX_BUFFERS);
        appsink.set_property("drop", true);
        appsink.set_property("enable-last-sample", false);

        let pipeline = gstreamer::Pipeline::new();
        pipeline
            .add_many([&source, &convert, appsink.upcast_ref()])
            .map_err(|e| init_failed("Failed to assemble preview", &e))?;
        gstreamer::Element::link_many([&source, &convert, appsink.upcast_ref()])
            .map_err(|e| init_failed("Failed to link preview", &e))?;

        let rotation = camera.info.rotation;
        let frame_counter = AtomicU64::new(0);
        appsink.set_callbacks(
            gstreamer_app::AppSinkCallbacks::builder()
                .new_sample(move |appsink| {
                    let frame_num = frame_counter.fetch_add(1, Ordering::Relaxed);
                    let sample = appsink
                        .pull_sample()
                        .map_err(|_| gstreamer::FlowError::Eos)?;
                    let buffer = sample.buffer().ok_or(gstreamer::FlowError::Error)?;
                    let caps = sample.caps().ok_or(gstreamer::FlowError::Error)?;
                    let video_info = VideoInfo::from_caps(caps).map_err(|e| {
                        if frame_num % limits::LOG_INTERVAL == 0 {
                            error!(frame = frame_num, error = ?e, "Failed to read video info");
                        }
                        gstreamer::FlowError::Error
                    })?;
                    let map = buffer
                        .map_readable()
                        .map_err(|_| gstreamer::FlowError::Error)?;

                    let frame = CameraFrame {
                        width: video_info.width(),
                        height: video_info.height(),
                        stride: video_info.stride()[0] as u32,
                        data: Arc::from(map.as_slice()),
                        rotation,
                    };

                    if frame_num % limits::LOG_INTERVAL == 0 {
                        debug!(
                            frame = frame_num,
                            width = frame.width,
                            height = frame.height,
                            stride = frame.stride,
                            "Preview frame"
                        );
                    }

                    frames.send_replace(Some(Arc::new(frame)));
                    Ok(gstreamer::FlowSuccess::Ok)
                })
                .build(),
        );

        pipeline.set_state(gstreamer::State::Playing).map_err(|e| {
            BackendError::Camera(CameraError::InitializationFailed(format!(
                "Failed to start pipeline: {}",
                e
            )))
        })?;

        let (result, state, _) = pipeline.state(gstreamer::ClockTime::from_seconds(
            limits::START_TIMEOUT_SECS,
        ));
        if result.is_err() || state != gstreamer::State::Playing {
            warn!(?state, "Preview pipeline not yet PLAYING");
        }

        Ok(Self { pipeline, appsink })
    }
}

impl Drop for PreviewPipeline {
    fn drop(&mut self) {
        debug!("Stopping preview pipeline");
        self.appsink
            .set_callbacks(gstreamer_app::AppSinkCallbacks::builder().build());
        let _ = self.pipeline.set_state(gstreamer::State::Null);
    }
}
