// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstraction layer for camera and audio capture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  App Layer                   │
//! └────────────────────┬────────────────────────┘
//!                      │
//! ┌────────────────────┴────────────────────────┐
//! │              Backend Layer                   │
//! │  ┌─────────────┐    ┌──────────────────┐   │
//! │  │    Audio    │    │     Camera       │   │
//! │  │  (inputs)   │    │    (PipeWire)    │   │
//! │  └─────────────┘    └──────────────────┘   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! - [`audio`]: Microphone discovery, used by the permission check
//! - [`camera`]: Camera controller with preview, stills and recording

pub mod audio;
pub mod camera;
