// SPDX-License-Identifier: GPL-3.0-only

//! UI navigation handlers

use crate::app::state::{AppModel, ContextPage, Message};
use cosmic::Task;
use cosmic::widget::toaster::ToastId;
use tracing::{debug, error};

impl AppModel {
    pub(crate) fn handle_launch_url(&self, url: String) -> Task<cosmic::Action<Message>> {
        if let Err(err) = open::that_detached(&url) {
            error!(url = %url, error = %err, "Failed to open URL");
        }
        Task::none()
    }

    pub(crate) fn handle_toggle_context_page(
        &mut self,
        context_page: ContextPage,
    ) -> Task<cosmic::Action<Message>> {
        if self.context_page == context_page {
            self.core.window.show_context = !self.core.window.show_context;
        } else {
            self.context_page = context_page;
            self.core.window.show_context = true;
        }
        Task::none()
    }

    /// Expand or collapse the photo sheet
    pub(crate) fn handle_set_sheet_expanded(
        &mut self,
        expanded: bool,
    ) -> Task<cosmic::Action<Message>> {
        if self.sheet_expanded != expanded {
            debug!(expanded, "Photo sheet toggled");
        }
        self.sheet_expanded = expanded;
        Task::none()
    }

    pub(crate) fn handle_close_toast(&mut self, id: ToastId) -> Task<cosmic::Action<Message>> {
        self.toasts.remove(id);
        Task::none()
    }
}
