// SPDX-License-Identifier: GPL-3.0-only

//! Record button widget implementation

use crate::app::state::{AppModel, Message};
use crate::app::view::overlay_container_style;
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the record toggle
    ///
    /// A camera icon while idle; a red rounded square (stop) while recording
    /// or while a start is queued behind the previous file.
    pub fn build_record_button(&self) -> Element<'_, Message> {
        let recording = self.capture.is_recording() || self.capture.is_start_queued();

        let content: Element<'_, Message> = if recording {
            let size = ui::CAPTURE_BUTTON_INNER * 0.5;
            widget::container(
                widget::container(widget::Space::new(Length::Fixed(size), Length::Fixed(size)))
                    .style(|_theme| widget::container::Style {
                        background: Some(Background::Color(Color::from_rgb(0.9, 0.1, 0.1))),
                        border: cosmic::iced::Border {
                            radius: [6.0; 4].into(),
                            ..Default::default()
                        },
                        ..Default::default()
                    }),
            )
            .center(Length::Fixed(ui::CAPTURE_BUTTON_INNER))
            .into()
        } else {
            widget::container(widget::icon::from_name("camera-video-symbolic").size(32))
                .center(Length::Fixed(ui::CAPTURE_BUTTON_INNER))
                .into()
        };

        let button = widget::button::custom(content)
            .on_press(Message::ToggleRecording)
            .padding(0)
            .class(cosmic::theme::Button::Text);

        let tooltip = if recording {
            fl!("stop-video")
        } else {
            fl!("capture-video")
        };

        widget::tooltip(
            widget::container(button).style(overlay_container_style),
            widget::text(tooltip),
            widget::tooltip::Position::Top,
        )
        .into()
    }
}
