// SPDX-License-Identifier: GPL-3.0-only

//! In-memory photo collection
//!
//! Captured photos live only for the lifetime of the process. The newest
//! photo is always first. Every change publishes a fresh immutable snapshot
//! on a watch channel, so subscribers never see a half-updated list.

use cosmic::widget::image::Handle;
use image::RgbaImage;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// One photo shown in the gallery sheet
#[derive(Debug, Clone)]
pub struct CapturedPhoto {
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

impl CapturedPhoto {
    pub fn from_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            handle: Handle::from_rgba(width, height, image.into_raw()),
        }
    }
}

/// Immutable view of the collection, newest first
pub type PhotoSnapshot = Arc<Vec<CapturedPhoto>>;

/// Observable, process-local photo list
#[derive(Debug, Clone)]
pub struct PhotoStore {
    sender: watch::Sender<PhotoSnapshot>,
}

impl Default for PhotoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Arc::new(Vec::new()));
        Self { sender }
    }

    /// Insert `photo` at the front and notify subscribers
    pub fn prepend(&self, photo: CapturedPhoto) {
        self.sender.send_modify(|photos| {
            let mut next = Vec::with_capacity(photos.len() + 1);
            next.push(photo);
            next.extend(photos.iter().cloned());
            *photos = Arc::new(next);
        });
        debug!(count = self.len(), "Photo added to collection");
    }

    pub fn snapshot(&self) -> PhotoSnapshot {
        Arc::clone(&self.sender.borrow())
    }

    pub fn len(&self) -> usize {
        self.sender.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sender.borrow().is_empty()
    }

    /// Receiver that yields each new snapshot; the current one is marked seen
    pub fn subscribe(&self) -> watch::Receiver<PhotoSnapshot> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(width: u32) -> CapturedPhoto {
        CapturedPhoto::from_image(RgbaImage::new(width, 1))
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let store = PhotoStore::new();
        assert!(store.is_empty());
        store.prepend(photo(1));
        store.prepend(photo(2));
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].width, 2);
        assert_eq!(snapshot[1].width, 1);
    }

    #[test]
    fn test_old_snapshot_is_unchanged() {
        let store = PhotoStore::new();
        store.prepend(photo(1));
        let before = store.snapshot();
        store.prepend(photo(2));
        assert_eq!(before.len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_are_notified() {
        let store = PhotoStore::new();
        let mut rx = store.subscribe();
        store.prepend(photo(3));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update()[0].width, 3);
    }
}
