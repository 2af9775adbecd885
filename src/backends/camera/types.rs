// SPDX-License-Identifier: GPL-3.0-only
// Shared types for the camera controller abstraction

//! Shared types for camera controllers

use crate::errors::{CameraError, PhotoError, RecordingError};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// Which physical camera the controller should bind to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CameraSelector {
    /// World-facing camera
    #[default]
    Back,
    /// User-facing (selfie) camera
    Front,
}

impl CameraSelector {
    pub const ALL: [CameraSelector; 2] = [CameraSelector::Back, CameraSelector::Front];

    /// The other camera
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            CameraSelector::Back => CameraSelector::Front,
            CameraSelector::Front => CameraSelector::Back,
        }
    }

    /// Map a libcamera `api.libcamera.location` value to a selector.
    ///
    /// "external" cameras have no facing and return `None`.
    pub fn from_location(location: &str) -> Option<Self> {
        match location.trim().to_ascii_lowercase().as_str() {
            "front" => Some(CameraSelector::Front),
            "back" => Some(CameraSelector::Back),
            _ => None,
        }
    }
}

impl std::fmt::Display for CameraSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraSelector::Back => write!(f, "back"),
            CameraSelector::Front => write!(f, "front"),
        }
    }
}

impl std::str::FromStr for CameraSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_location(s).ok_or_else(|| format!("unknown camera '{}', use front or back", s))
    }
}

/// Set of controller use cases
///
/// Combine with `|`, e.g. `UseCases::IMAGE_CAPTURE | UseCases::VIDEO_CAPTURE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UseCases(u8);

impl UseCases {
    pub const NONE: UseCases = UseCases(0);
    pub const IMAGE_CAPTURE: UseCases = UseCases(1);
    pub const VIDEO_CAPTURE: UseCases = UseCases(1 << 1);

    /// Check whether every use case in `other` is enabled
    pub fn contains(self, other: UseCases) -> bool {
        self.0 & other.0 == other.0
    }
}

impl std::ops::BitOr for UseCases {
    type Output = UseCases;

    fn bitor(self, rhs: UseCases) -> UseCases {
        UseCases(self.0 | rhs.0)
    }
}

/// Sensor rotation in degrees (clockwise)
///
/// Camera sensors may be physically mounted at an angle relative to the display.
/// The value comes from libcamera's `api.libcamera.rotation` property in PipeWire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SensorRotation {
    /// No rotation (sensor is oriented correctly)
    #[default]
    None,
    /// 90 degrees clockwise
    Rotate90,
    /// 180 degrees (upside down)
    Rotate180,
    /// 270 degrees clockwise (90 degrees counter-clockwise)
    Rotate270,
}

impl SensorRotation {
    /// Create rotation from an integer degree value (normalised to 0-360).
    pub fn from_degrees_int(degrees: i32) -> Self {
        match degrees.rem_euclid(360) {
            90 => SensorRotation::Rotate90,
            180 => SensorRotation::Rotate180,
            270 => SensorRotation::Rotate270,
            _ => SensorRotation::None,
        }
    }

    /// Parse rotation from a string value (degrees)
    pub fn from_degrees(degrees: &str) -> Self {
        degrees
            .trim()
            .parse::<i32>()
            .map(Self::from_degrees_int)
            .unwrap_or_default()
    }

    /// Get the rotation in degrees
    pub fn degrees(&self) -> u32 {
        match self {
            SensorRotation::None => 0,
            SensorRotation::Rotate90 => 90,
            SensorRotation::Rotate180 => 180,
            SensorRotation::Rotate270 => 270,
        }
    }

    /// Check if rotation swaps width and height
    pub fn swaps_dimensions(&self) -> bool {
        matches!(self, SensorRotation::Rotate90 | SensorRotation::Rotate270)
    }
}

impl std::fmt::Display for SensorRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// Represents a camera device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraDevice {
    pub name: String,
    /// Stable identifier (PipeWire serial or device path)
    pub path: String,
    /// Physical facing, if the device reports one
    pub facing: Option<CameraSelector>,
    pub rotation: SensorRotation,
}

/// A single RGBA frame from the preview stream
#[derive(Clone)]
pub struct CameraFrame {
    pub width: u32,
    pub height: u32,
    /// Bytes per row (may be larger than `width * 4`)
    pub stride: u32,
    pub data: Arc<[u8]>,
    /// Orientation of the sensor that produced this frame
    pub rotation: SensorRotation,
}

impl CameraFrame {
    /// Copy the frame into a tightly packed RGBA image, dropping row padding
    pub fn to_rgba_image(&self) -> Result<RgbaImage, PhotoError> {
        let row_bytes = self.width as usize * 4;
        let stride = self.stride as usize;
        let height = self.height as usize;

        if stride < row_bytes {
            return Err(PhotoError::InvalidFrame(format!(
                "stride {} smaller than row size {}",
                stride, row_bytes
            )));
        }
        if height > 0 && self.data.len() < stride * (height - 1) + row_bytes {
            return Err(PhotoError::InvalidFrame(format!(
                "buffer of {} bytes too small for {}x{} (stride {})",
                self.data.len(),
                self.width,
                self.height,
                stride
            )));
        }

        let pixels = if stride == row_bytes {
            self.data[..row_bytes * height].to_vec()
        } else {
            let mut pixels = Vec::with_capacity(row_bytes * height);
            for row in self.data.chunks(stride).take(height) {
                pixels.extend_from_slice(&row[..row_bytes]);
            }
            pixels
        };

        RgbaImage::from_raw(self.width, self.height, pixels)
            .ok_or_else(|| PhotoError::InvalidFrame("pixel buffer size mismatch".to_string()))
    }
}

impl std::fmt::Debug for CameraFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("bytes", &self.data.len())
            .field("rotation", &self.rotation)
            .finish()
    }
}

/// Identifier of one recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordingId(pub u64);

impl std::fmt::Display for RecordingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where and how a recording is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingOptions {
    /// Output file, truncated if it already exists
    pub output: PathBuf,
    /// Record the default microphone alongside video
    pub audio: bool,
}

/// Lifecycle events emitted by an active recording
#[derive(Debug, Clone)]
pub enum VideoRecordEvent {
    /// The pipeline reached PLAYING and is writing to `output`
    Start {
        recording: RecordingId,
        output: PathBuf,
    },
    /// The recording ended; `error` is set when the file may be unusable
    Finalize {
        recording: RecordingId,
        output: PathBuf,
        error: Option<RecordingError>,
    },
}

/// Sender half used by recorders to publish lifecycle events
pub type RecordEventSender = tokio::sync::broadcast::Sender<VideoRecordEvent>;

/// Latest preview frame, `None` until the first frame arrives
pub type PreviewReceiver = tokio::sync::watch::Receiver<Option<Arc<CameraFrame>>>;

/// Result type for controller operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Error types for controller operations
#[derive(Debug, Clone)]
pub enum BackendError {
    /// Camera-level failure
    Camera(CameraError),
    /// Recording could not be started
    Recording(RecordingError),
    /// Photo frame could not be produced
    Photo(PhotoError),
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendError::Camera(e) => write!(f, "{}", e),
            BackendError::Recording(e) => write!(f, "{}", e),
            BackendError::Photo(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BackendError {}

impl From<CameraError> for BackendError {
    fn from(err: CameraError) -> Self {
        BackendError::Camera(err)
    }
}

impl From<RecordingError> for BackendError {
    fn from(err: RecordingError) -> Self {
        BackendError::Recording(err)
    }
}

impl From<PhotoError> for BackendError {
    fn from(err: PhotoError) -> Self {
        BackendError::Photo(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(width: u32, height: u32, stride: u32, data: Vec<u8>) -> CameraFrame {
        CameraFrame {
            width,
            height,
            stride,
            data: Arc::from(data),
            rotation: SensorRotation::None,
        }
    }

    #[test]
    fn test_selector_toggle_is_involution() {
        for selector in CameraSelector::ALL {
            assert_ne!(selector.toggled(), selector);
            assert_eq!(selector.toggled().toggled(), selector);
        }
    }

    #[test]
    fn test_selector_from_location() {
        assert_eq!(
            CameraSelector::from_location("front"),
            Some(CameraSelector::Front)
        );
        assert_eq!(
            CameraSelector::from_location(" Back "),
            Some(CameraSelector::Back)
        );
        assert_eq!(CameraSelector::from_location("external"), None);
        assert!("sideways".parse::<CameraSelector>().is_err());
    }

    #[test]
    fn test_use_cases_combine() {
        let both = UseCases::IMAGE_CAPTURE | UseCases::VIDEO_CAPTURE;
        assert!(both.contains(UseCases::IMAGE_CAPTURE));
        assert!(both.contains(UseCases::VIDEO_CAPTURE));
        assert!(!UseCases::IMAGE_CAPTURE.contains(UseCases::VIDEO_CAPTURE));
        assert!(UseCases::NONE.contains(UseCases::NONE));
    }

    #[test]
    fn test_rotation_parsing() {
        assert_eq!(SensorRotation::from_degrees("90"), SensorRotation::Rotate90);
        assert_eq!(
            SensorRotation::from_degrees("-90"),
            SensorRotation::Rotate270
        );
        assert_eq!(SensorRotation::from_degrees("bogus"), SensorRotation::None);
        assert!(SensorRotation::Rotate270.swaps_dimensions());
        assert!(!SensorRotation::Rotate180.swaps_dimensions());
    }

    #[test]
    fn test_to_rgba_image_strips_row_padding() {
        // 2x2 frame with 4 bytes of padding per row
        let mut data = Vec::new();
        for row in 0..2u8 {
            for col in 0..2u8 {
                data.extend_from_slice(&[row, col, 0, 255]);
            }
            data.extend_from_slice(&[9, 9, 9, 9]);
        }
        let image = frame(2, 2, 12, data).to_rgba_image().unwrap();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(1, 1).0, [1, 1, 0, 255]);
    }

    #[test]
    fn test_to_rgba_image_rejects_short_buffer() {
        let result = frame(4, 4, 16, vec![0; 20]).to_rgba_image();
        assert!(matches!(result, Err(PhotoError::InvalidFrame(_))));
    }
}
