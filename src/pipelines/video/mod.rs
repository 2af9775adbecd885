// SPDX-License-Identifier: GPL-3.0-only

//! Video recording pipeline
//!
//! - Selects the best available H.264 encoder (hardware preferred)
//! - Muxes optional microphone audio into an MP4 container
//! - Reports start and finalize through the recording event channel

pub mod encoders;
pub mod recorder;

pub use recorder::VideoRecorder;
