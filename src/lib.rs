// SPDX-License-Identifier: GPL-3.0-only

//! Pocket Camera - a single-screen camera for COSMIC and mobile Linux
//!
//! Live preview, front/back switching, photos collected in a bottom sheet,
//! and toggle video recording to one app-private file.
//!
//! # Architecture
//!
//! - [`app`]: libcosmic application, view and message handlers
//! - [`permissions`]: camera and microphone permission gate
//! - [`backends`]: camera controller and audio input discovery
//! - [`capture`]: photo and video capture orchestration
//! - [`gallery`]: observable in-memory photo collection
//! - [`pipelines`]: photo orientation and the MP4 recorder
//! - [`config`]: user configuration handling
//! - [`storage`]: location of the recording file

pub mod app;
pub mod backends;
pub mod capture;
pub mod config;
pub mod constants;
pub mod errors;
pub mod gallery;
pub mod i18n;
pub mod permissions;
pub mod pipelines;
pub mod storage;

pub use app::{AppModel, Message};
pub use config::Config;
