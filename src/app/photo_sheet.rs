// SPDX-License-Identifier: GPL-3.0-only

//! Collapsible bottom sheet listing captured photos, newest first

use crate::app::state::{AppModel, Message};
use crate::app::view::overlay_container_style;
use crate::constants::ui;
use crate::fl;
use cosmic::Element;
use cosmic::iced::{Alignment, ContentFit, Length};
use cosmic::widget;

impl AppModel {
    /// Build the expanded photo sheet
    pub fn build_photo_sheet(&self) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();
        let count = self.photo_snapshot.len();

        let header = widget::row()
            .push(widget::text::heading(fl!("photo-count", count = count)).width(Length::Fill))
            .push(
                widget::button::icon(widget::icon::from_name("go-down-symbolic"))
                    .on_press(Message::CollapsePhotoSheet),
            )
            .align_y(Alignment::Center);

        let body: Element<'_, Message> = if count == 0 {
            widget::container(widget::text::body(fl!("no-photos")))
                .width(Length::Fill)
                .height(Length::Fill)
                .center(Length::Fill)
                .into()
        } else {
            let thumbnails: Vec<Element<'_, Message>> = self
                .photo_snapshot
                .iter()
                .map(|photo| {
                    widget::image::Image::new(photo.handle.clone())
                        .content_fit(ContentFit::Cover)
                        .width(Length::Fixed(ui::THUMBNAIL_SIZE))
                        .height(Length::Fixed(ui::THUMBNAIL_SIZE))
                        .into()
                })
                .collect();
            widget::scrollable::horizontal(
                widget::row::with_children(thumbnails)
                    .spacing(ui::THUMBNAIL_SPACING),
            )
            .width(Length::Fill)
            .into()
        };

        widget::container(
            widget::column()
                .push(header)
                .push(body)
                .spacing(spacing.space_s),
        )
        .width(Length::Fill)
        .height(Length::Fixed(ui::SHEET_HEIGHT))
        .padding(spacing.space_m)
        .style(|theme| {
            let mut style = overlay_container_style(theme);
            style.border.radius = [ui::SHEET_RADIUS, ui::SHEET_RADIUS, 0.0, 0.0].into();
            style
        })
        .into()
    }
}
