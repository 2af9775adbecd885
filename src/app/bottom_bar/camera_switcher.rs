// SPDX-License-Identifier: GPL-3.0-only

//! Camera switcher button widget implementation

use crate::app::state::{AppModel, Message};
use crate::app::view::overlay_container_style;
use crate::fl;
use cosmic::Element;
use cosmic::iced::Length;
use cosmic::widget;

impl AppModel {
    /// Build the camera switcher button widget
    ///
    /// Always shown: with a single camera both selectors resolve to it.
    /// Disabled while recording.
    pub fn build_camera_switcher(&self) -> Element<'_, Message> {
        let icon_widget = widget::icon::from_name("camera-switch-symbolic").size(32);

        let icon_content = widget::container(icon_widget)
            .width(Length::Fixed(52.0))
            .height(Length::Fixed(52.0))
            .center(Length::Fixed(52.0));

        // Button::Text gives a transparent background with a themed icon color
        let mut btn = widget::button::custom(icon_content)
            .padding(0)
            .class(cosmic::theme::Button::Text);

        if !self.capture.is_recording() {
            btn = btn.on_press(Message::SwitchCamera);
        }

        widget::tooltip(
            widget::container(btn).style(overlay_container_style),
            widget::text(fl!("switch-camera")),
            widget::tooltip::Position::Top,
        )
        .into()
    }
}
