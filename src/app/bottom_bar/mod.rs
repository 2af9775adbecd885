// SPDX-License-Identifier: GPL-3.0-only

//! Bottom bar module
//!
//! This module handles the bottom control bar UI components:
//! - Gallery button (opens the photo sheet)
//! - Photo and record buttons
//! - Camera switcher (flip cameras)

pub mod camera_switcher;
pub mod gallery_button;

use crate::app::state::{AppModel, Message};
use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget;

/// Fixed height of the bottom bar
const BOTTOM_BAR_HEIGHT: f32 = 88.0;

impl AppModel {
    /// Build the complete bottom bar widget
    ///
    /// Three columns keep the capture controls centered regardless of the
    /// widths of the side buttons.
    pub fn build_bottom_bar(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let left_section = widget::row()
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .push(self.build_gallery_button())
            .push(widget::horizontal_space().width(spacing.space_l))
            .align_y(Alignment::Center);

        let center_section = widget::row()
            .push(self.build_capture_button())
            .push(self.build_record_button())
            .spacing(spacing.space_m)
            .align_y(Alignment::Center);

        let right_section = widget::row()
            .push(widget::horizontal_space().width(spacing.space_l))
            .push(self.build_camera_switcher())
            .push(widget::Space::new(Length::Fill, Length::Shrink))
            .align_y(Alignment::Center);

        let bottom_row = widget::row()
            .push(left_section)
            .push(center_section)
            .push(right_section)
            .padding(spacing.space_xs)
            .align_y(Alignment::Center);

        widget::container(bottom_row)
            .width(Length::Fill)
            .height(Length::Fixed(BOTTOM_BAR_HEIGHT))
            .center_y(BOTTOM_BAR_HEIGHT)
            .into()
    }
}
