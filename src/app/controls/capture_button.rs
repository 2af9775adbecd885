// SPDX-License-Identifier: GPL-3.0-only

//! Photo capture button widget implementation

use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the photo capture button widget
    ///
    /// White circle, gray and pressed-in for a moment after each shot.
    pub fn build_capture_button(&self) -> Element<'_, Message> {
        let (color, inner_size) = if self.is_capturing {
            (Color::from_rgb(0.7, 0.7, 0.7), ui::CAPTURE_BUTTON_INNER * 0.85)
        } else {
            (Color::WHITE, ui::CAPTURE_BUTTON_INNER)
        };

        let button_inner = widget::container(widget::Space::new(
            Length::Fixed(inner_size),
            Length::Fixed(inner_size),
        ))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(color)),
            border: cosmic::iced::Border {
                radius: [ui::CAPTURE_BUTTON_RADIUS * (inner_size / ui::CAPTURE_BUTTON_INNER); 4]
                    .into(),
                ..Default::default()
            },
            ..Default::default()
        });

        let button = widget::button::custom(button_inner)
            .on_press(Message::TakePhoto)
            .padding(0)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER));

        // Fixed-size wrapper so the press effect doesn't shift the layout
        let button_wrapper = widget::container(button)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .center(Length::Fixed(ui::CAPTURE_BUTTON_OUTER));

        widget::tooltip(
            button_wrapper,
            widget::text(fl!("take-photo")),
            widget::tooltip::Position::Top,
        )
        .into()
    }
}
