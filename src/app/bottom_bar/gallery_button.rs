// SPDX-License-Identifier: GPL-3.0-only

//! Gallery button widget implementation

use crate::app::state::{AppModel, Message};
use crate::fl;
use cosmic::Element;
use cosmic::iced::{ContentFit, Length};
use cosmic::widget::{self, icon};

const BUTTON_SIZE: f32 = 40.0;

impl AppModel {
    /// Build the gallery button widget
    ///
    /// Shows the newest photo as a thumbnail, or a folder icon before the
    /// first capture. Pressing it toggles the photo sheet.
    pub fn build_gallery_button(&self) -> Element<'_, Message> {
        let button_content: Element<'_, Message> = match self.photo_snapshot.first() {
            Some(photo) => widget::image::Image::new(photo.handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fixed(BUTTON_SIZE - 2.0))
                .height(Length::Fixed(BUTTON_SIZE - 2.0))
                .into(),
            None => widget::container(icon::from_name("folder-pictures-symbolic").size(24))
                .center(Length::Fixed(BUTTON_SIZE))
                .into(),
        };

        let (message, label) = if self.sheet_expanded {
            (Message::CollapsePhotoSheet, fl!("close-gallery"))
        } else {
            (Message::ExpandPhotoSheet, fl!("open-gallery"))
        };

        let btn = widget::button::custom(button_content)
            .on_press(message)
            .padding(0)
            .width(Length::Fixed(BUTTON_SIZE))
            .height(Length::Fixed(BUTTON_SIZE))
            .class(cosmic::theme::Button::Image);

        widget::tooltip(btn, widget::text(label), widget::tooltip::Position::Top).into()
    }
}
