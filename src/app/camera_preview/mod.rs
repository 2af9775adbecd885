// SPDX-License-Identifier: GPL-3.0-only

//! Camera preview module
//!
//! Draws the latest preview frame, rotated upright, or a status message
//! while the camera is starting or unavailable.

use crate::app::state::{AppModel, Message};
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Background, ContentFit, Length, Radians, Rotation};
use cosmic::widget;

impl AppModel {
    /// Build the camera preview widget
    pub fn build_camera_preview(&self) -> Element<'_, Message> {
        let Some(preview) = &self.preview else {
            let status = if self.camera_error.is_some() {
                fl!("camera-unavailable")
            } else {
                fl!("initializing-camera")
            };
            return widget::container(widget::text(status).size(20))
                .width(Length::Fill)
                .height(Length::Fill)
                .center(Length::Fill)
                .style(|theme| widget::container::Style {
                    background: Some(Background::Color(theme.cosmic().bg_color().into())),
                    text_color: Some(theme.cosmic().on_bg_color().into()),
                    ..Default::default()
                })
                .into();
        };

        let angle = (preview.rotation_degrees as f32).to_radians();
        widget::image::Image::new(preview.handle.clone())
            .content_fit(ContentFit::Cover)
            .rotation(Rotation::Solid(Radians(angle)))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
