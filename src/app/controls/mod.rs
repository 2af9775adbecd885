// SPDX-License-Identifier: GPL-3.0-only

//! Capture controls
//!
//! - Photo button (white circle that dims while a photo is taken)
//! - Record button (turns red while recording)

pub mod capture_button;
pub mod record_button;
