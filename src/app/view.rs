// SPDX-License-Identifier: GPL-3.0-only

//! Main view composition
//!
//! The live preview fills the window. Capture controls and the photo sheet
//! are stacked on top of it, and toasts float above everything.

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use cosmic::Element;
use cosmic::iced::{Background, Color, Length};
use cosmic::widget;

/// Semi-transparent themed background for widgets drawn over the preview
pub fn overlay_container_style(theme: &cosmic::Theme) -> widget::container::Style {
    let cosmic = theme.cosmic();
    let mut background: Color = cosmic.bg_color().into();
    background.a = ui::OVERLAY_BACKGROUND_ALPHA;

    widget::container::Style {
        background: Some(Background::Color(background)),
        text_color: Some(cosmic.on_bg_color().into()),
        icon_color: Some(cosmic.on_bg_color().into()),
        border: cosmic::iced::Border {
            radius: cosmic.corner_radii.radius_m.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let camera_preview = self.build_camera_preview();

        let mut overlay = widget::column().push(widget::Space::new(Length::Fill, Length::Fill));
        if self.sheet_expanded {
            overlay = overlay.push(self.build_photo_sheet());
        }
        overlay = overlay.push(self.build_bottom_bar());

        let content = widget::container(
            cosmic::iced::widget::stack![camera_preview, overlay]
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::BLACK)),
            ..Default::default()
        });

        widget::toaster(&self.toasts, content)
    }
}
