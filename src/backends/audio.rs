// SPDX-License-Identifier: GPL-3.0-only

//! Audio input enumeration
//!
//! Uses the GStreamer device monitor so the same code covers the PipeWire
//! and PulseAudio providers. Monitor sources (loopbacks of outputs) are not
//! microphones and are skipped.

use gstreamer::prelude::*;
use tracing::{debug, warn};

/// Represents an audio input device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    pub name: String,
    pub is_default: bool,
}

/// Enumerate available microphones
pub fn enumerate_audio_devices() -> Vec<AudioDevice> {
    if let Err(e) = gstreamer::init() {
        warn!(error = %e, "GStreamer init failed");
        return Vec::new();
    }

    let monitor = gstreamer::DeviceMonitor::new();
    monitor.add_filter(Some("Audio/Source"), None);
    if let Err(e) = monitor.start() {
        warn!(error = %e, "Failed to start audio device monitor");
        return Vec::new();
    }
    let devices = monitor.devices();
    monitor.stop();

    let inputs: Vec<AudioDevice> = devices
        .into_iter()
        .filter_map(|device| {
            let props = device.properties();
            let is_monitor = props
                .as_ref()
                .and_then(|p| p.get::<String>("device.class").ok())
                .is_some_and(|class| class == "monitor");
            if is_monitor {
                return None;
            }
            let is_default = props
                .as_ref()
                .and_then(|p| p.get::<bool>("is-default").ok())
                .unwrap_or(false);
            Some(AudioDevice {
                name: device.display_name().to_string(),
                is_default,
            })
        })
        .collect();

    debug!(count = inputs.len(), "Audio inputs enumerated");
    inputs
}
