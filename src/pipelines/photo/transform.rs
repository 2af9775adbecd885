// SPDX-License-Identifier: GPL-3.0-only

//! Orientation correction for captured stills
//!
//! Frames arrive in sensor orientation. They are rotated clockwise by the
//! sensor's mounting rotation, then mirrored horizontally so the saved photo
//! matches what the preview showed.

use crate::backends::camera::types::SensorRotation;
use image::RgbaImage;
use image::imageops;

/// Rotate then (optionally) mirror an image
pub fn orient_frame(image: RgbaImage, rotation: SensorRotation, mirror: bool) -> RgbaImage {
    let rotated = match rotation {
        SensorRotation::None => image,
        SensorRotation::Rotate90 => imageops::rotate90(&image),
        SensorRotation::Rotate180 => imageops::rotate180(&image),
        SensorRotation::Rotate270 => imageops::rotate270(&image),
    };

    if mirror {
        imageops::flip_horizontal(&rotated)
    } else {
        rotated
    }
}
