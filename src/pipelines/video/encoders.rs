// SPDX-License-Identifier: GPL-3.0-only

//! Encoder selection for the MP4 recorder
//!
//! Hardware H.264 encoders are preferred, with x264/OpenH264 as software
//! fallbacks. Audio prefers AAC and falls back to Opus.

use crate::constants::recording;
use crate::errors::RecordingError;
use gstreamer as gst;
use gstreamer::prelude::*;
use tracing::debug;

/// H.264 encoders in priority order: (element, is_hardware)
pub const H264_ENCODERS: &[(&str, bool)] = &[
    ("vah264enc", true),
    ("vaapih264enc", true),
    ("nvh264enc", true),
    ("v4l2h264enc", true),
    ("x264enc", false),
    ("openh264enc", false),
];

/// Audio encoders in priority order; AAC first, Opus last
pub const AUDIO_ENCODERS: &[&str] = &["avenc_aac", "fdkaacenc", "voaacenc", "faac", "opusenc"];

/// A configured encoder element
pub struct SelectedEncoder {
    pub element: gst::Element,
    pub name: &'static str,
    pub hardware: bool,
}

/// Pick the best available H.264 encoder
pub fn select_video_encoder() -> Result<SelectedEncoder, RecordingError> {
    for &(name, hardware) in H264_ENCODERS {
        if gst::ElementFactory::find(name).is_none() {
            continue;
        }
        match gst::ElementFactory::make(name).build() {
            Ok(element) => {
                configure_video_encoder(&element, name, recording::VIDEO_BITRATE_KBPS);
                debug!(encoder = name, hardware, "Video encoder created");
                return Ok(SelectedEncoder {
                    element,
                    name,
                    hardware,
                });
            }
            Err(e) => debug!(encoder = name, error = %e, "Video encoder unusable"),
        }
    }
    Err(RecordingError::EncoderNotAvailable(
        "no H.264 encoder installed".to_string(),
    ))
}

/// Pick the best available audio encoder
pub fn select_audio_encoder() -> Result<SelectedEncoder, RecordingError> {
    for &name in AUDIO_ENCODERS {
        if gst::ElementFactory::find(name).is_none() {
            continue;
        }
        if let Ok(element) = gst::ElementFactory::make(name).build() {
            configure_audio_encoder(&element, name, recording::AUDIO_BITRATE_BPS);
            debug!(encoder = name, "Audio encoder created");
            return Ok(SelectedEncoder {
                element,
                name,
                hardware: false,
            });
        }
    }
    Err(RecordingError::EncoderNotAvailable(
        "no AAC or Opus encoder installed".to_string(),
    ))
}

fn configure_video_encoder(encoder: &gst::Element, name: &str, bitrate_kbps: u32) {
    match name {
        "x264enc" => {
            set_if_present(encoder, "speed-preset", "veryfast");
            set_if_present(encoder, "tune", "zerolatency");
            set_if_present(encoder, "bitrate", &bitrate_kbps.to_string());
        }
        "openh264enc" => {
            set_if_present(encoder, "rate-control", "bitrate");
            set_if_present(encoder, "usage-type", "camera");
            // bits per second
            set_if_present(encoder, "bitrate", &(bitrate_kbps * 1000).to_string());
        }
        "nvh264enc" => {
            set_if_present(encoder, "rc-mode", "vbr");
            set_if_present(encoder, "bitrate", &bitrate_kbps.to_string());
        }
        // V4L2 encoders expose little beyond their defaults
        "v4l2h264enc" => {}
        _ => set_if_present(encoder, "bitrate", &bitrate_kbps.to_string()),
    }
    debug!(encoder = name, bitrate_kbps, "Configured video encoder");
}

fn configure_audio_encoder(encoder: &gst::Element, name: &str, bitrate_bps: u32) {
    let value = match name {
        // faac takes kbps
        "faac" => bitrate_bps / 1000,
        _ => bitrate_bps,
    };
    set_if_present(encoder, "bitrate", &value.to_string());
}

/// Set a property by its string form, skipping encoders that lack it
fn set_if_present(element: &gst::Element, property: &str, value: &str) {
    if element.find_property(property).is_some() {
        element.set_property_from_str(property, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hardware_encoders_come_first() {
        let first_software = H264_ENCODERS
            .iter()
            .position(|(_, hw)| !hw)
            .unwrap();
        assert!(H264_ENCODERS[first_software..].iter().all(|(_, hw)| !hw));
        assert_eq!(H264_ENCODERS[0].0, "vah264enc");
    }

    #[test]
    fn test_aac_preferred_over_opus() {
        assert_eq!(AUDIO_ENCODERS.last(), Some(&"opusenc"));
        assert_eq!(AUDIO_ENCODERS[0], "avenc_aac");
    }
}
