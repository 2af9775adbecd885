// SPDX-License-Identifier: GPL-3.0-only

//! Processing pipelines for photo and video capture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Frame │ ──▶ │  Photo Pipeline   │ ──▶ │ Photo sheet  │
//! │   (RGBA)     │     │  rotate + mirror  │     │ (in memory)  │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//!
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │ Camera Device│ ──▶ │  Video Pipeline   │ ──▶ │   MP4 File   │
//! │  (PipeWire)  │     │  H.264 + AAC      │     │              │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//! ```

pub mod photo;
pub mod video;
