// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture pipeline
//!
//! ```text
//! CameraFrame (RGBA, padded rows) → packed RgbaImage → rotate → mirror
//! ```
//!
//! The pixel work runs on the blocking pool so the preview never stalls.

pub mod transform;

pub use transform::orient_frame;

use crate::backends::camera::types::CameraFrame;
use crate::errors::PhotoError;
use image::RgbaImage;
use tracing::debug;

/// Turns a raw frame into an upright, optionally mirrored image
#[derive(Debug, Clone, Copy)]
pub struct PhotoPipeline {
    mirror: bool,
}

impl PhotoPipeline {
    pub fn new(mirror: bool) -> Self {
        Self { mirror }
    }

    /// Convert and orient `frame` off the async runtime
    pub async fn process(self, frame: CameraFrame) -> Result<RgbaImage, PhotoError> {
        tokio::task::spawn_blocking(move || self.process_blocking(&frame))
            .await
            .map_err(|e| PhotoError::CaptureFailed(format!("Photo task error: {}", e)))?
    }

    pub fn process_blocking(&self, frame: &CameraFrame) -> Result<RgbaImage, PhotoError> {
        let image = frame.to_rgba_image()?;
        let oriented = orient_frame(image, frame.rotation, self.mirror);
        debug!(
            width = oriented.width(),
            height = oriented.height(),
            rotation = %frame.rotation,
            mirror = self.mirror,
            "Photo oriented"
        );
        Ok(oriented)
    }
}
