// SPDX-License-Identifier: GPL-3.0-only

//! PipeWire camera enumeration
//!
//! Cameras are discovered through the GStreamer device monitor, which uses
//! the PipeWire device provider when available and V4L2 otherwise. Facing and
//! mounting rotation come from the libcamera properties PipeWire exposes.

use super::super::types::{CameraDevice, CameraSelector, SensorRotation};
use gstreamer::prelude::*;
use tracing::{debug, info, warn};

/// A camera together with the GStreamer device used to open it
#[derive(Debug, Clone)]
pub struct DiscoveredCamera {
    pub info: CameraDevice,
    pub device: gstreamer::Device,
}

/// Enumerate video sources
///
/// Returns an empty list if GStreamer cannot be initialised or the monitor
/// fails to start.
pub fn discover_cameras() -> Vec<DiscoveredCamera> {
    if let Err(e) = gstreamer::init() {
        warn!(error = %e, "GStreamer init failed");
        return Vec::new();
    }

    let monitor = gstreamer::DeviceMonitor::new();
    monitor.add_filter(Some("Video/Source"), None);
    if let Err(e) = monitor.start() {
        warn!(error = %e, "Failed to start video device monitor");
        return Vec::new();
    }
    let devices = monitor.devices();
    monitor.stop();

    let cameras: Vec<DiscoveredCamera> = devices
        .into_iter()
        .enumerate()
        .map(|(index, device)| {
            let info = describe_device(index, &device);
            debug!(
                name = %info.name,
                path = %info.path,
                facing = ?info.facing,
                rotation = %info.rotation,
                "Found video source"
            );
            DiscoveredCamera { info, device }
        })
        .collect();

    info!(count = cameras.len(), "Cameras enumerated");
    cameras
}

fn describe_device(index: usize, device: &gstreamer::Device) -> CameraDevice {
    let name = device.display_name().to_string();
    let props = device.properties();

    let facing = props
        .as_ref()
        .and_then(|p| string_property(p, "api.libcamera.location"))
        .and_then(|location| CameraSelector::from_location(&location));

    let rotation = props
        .as_ref()
        .map(rotation_property)
        .unwrap_or_default();

    let path = props
        .as_ref()
        .and_then(|p| {
            string_property(p, "object.serial")
                .map(|serial| format!("pipewire-serial-{}", serial))
                .or_else(|| string_property(p, "api.v4l2.path"))
                .or_else(|| string_property(p, "device.path"))
        })
        .unwrap_or_else(|| format!("camera-{}", index));

    CameraDevice {
        name,
        path,
        facing,
        rotation,
    }
}

/// Read a property that providers publish either as a string or a number
fn string_property(props: &gstreamer::StructureRef, key: &str) -> Option<String> {
    if let Ok(value) = props.get::<String>(key) {
        return Some(value);
    }
    if let Ok(value) = props.get::<i64>(key) {
        return Some(value.to_string());
    }
    if let Ok(value) = props.get::<u64>(key) {
        return Some(value.to_string());
    }
    props.get::<i32>(key).ok().map(|v| v.to_string())
}

fn rotation_property(props: &gstreamer::Structure) -> SensorRotation {
    match string_property(props, "api.libcamera.rotation") {
        Some(degrees) => SensorRotation::from_degrees(&degrees),
        None => SensorRotation::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_property_accepts_numbers() {
        gstreamer::init().unwrap();
        let props = gstreamer::Structure::builder("props")
            .field("api.libcamera.location", "front")
            .field("api.libcamera.rotation", 270i32)
            .field("object.serial", 42i64)
            .build();

        assert_eq!(
            string_property(&props, "api.libcamera.location").as_deref(),
            Some("front")
        );
        assert_eq!(string_property(&props, "object.serial").as_deref(), Some("42"));
        assert_eq!(rotation_property(&props), SensorRotation::Rotate270);
        assert_eq!(string_property(&props, "missing"), None);
    }
}
