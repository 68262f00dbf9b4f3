/// Per-card image state for the photo grid
///
/// Tracks one [`ThumbnailState`] per image URL of the photo list currently on
/// screen and owns the abort handles of the outstanding downloads.

use std::collections::HashMap;
use std::future::Future;

use chrono::{DateTime, Local};
use futures::future::{AbortHandle, Abortable, Aborted};
use futures::FutureExt;
use iced::widget::image::Handle;
use tracing::{debug, warn};

use crate::state::data::{ImageSize, Photo};
use crate::thumbnail::{Thumbnail, ThumbnailError, ThumbnailLoader};

/// What a grid card currently shows
#[derive(Debug, Clone)]
pub enum ThumbnailState {
    /// Placeholder while the download runs
    Loading,
    /// Decoded image
    Ready(Handle),
    /// Broken-image fallback
    Failed,
}

/// Result of one thumbnail download
#[derive(Debug, Clone)]
pub enum ThumbnailOutcome {
    Finished {
        url: String,
        result: Result<Thumbnail, ThumbnailError>,
    },
    Cancelled,
}

pub struct Gallery {
    photo_host: String,
    image_size: ImageSize,
    thumbnails: HashMap<String, ThumbnailState>,
    loads: Vec<AbortHandle>,
    updated_at: Option<DateTime<Local>>,
}

impl Gallery {
    pub fn new(photo_host: String, image_size: ImageSize) -> Self {
        Self {
            photo_host,
            image_size,
            thumbnails: HashMap::new(),
            loads: Vec::new(),
            updated_at: None,
        }
    }

    /// URL of the file shown on a photo's card
    pub fn image_url(&self, photo: &Photo) -> String {
        photo.image_url(&self.photo_host, self.image_size)
    }

    /// Current state of a card, if its URL belongs to the shown list
    pub fn thumbnail(&self, url: &str) -> Option<&ThumbnailState> {
        self.thumbnails.get(url)
    }

    /// When the shown list was fetched
    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }

    /// Replace the shown list and return one download per distinct URL
    ///
    /// Downloads for the previous list are aborted.
    pub fn show(
        &mut self,
        photos: &[Photo],
        loader: &ThumbnailLoader,
    ) -> Vec<impl Future<Output = ThumbnailOutcome> + Send + 'static> {
        self.clear();
        self.updated_at = Some(Local::now());

        let mut downloads = Vec::with_capacity(photos.len());
        for photo in photos {
            let url = self.image_url(photo);
            debug!(url = %url, "Image URL");

            if self.thumbnails.contains_key(&url) {
                continue;
            }
            self.thumbnails.insert(url.clone(), ThumbnailState::Loading);

            let (handle, registration) = AbortHandle::new_pair();
            self.loads.push(handle);

            let loader = loader.clone();
            let download = async move {
                let result = loader.load(url.clone()).await;
                (url, result)
            };

            downloads.push(Abortable::new(download, registration).map(|result| match result {
                Ok((url, result)) => ThumbnailOutcome::Finished { url, result },
                Err(Aborted) => ThumbnailOutcome::Cancelled,
            }));
        }

        downloads
    }

    /// Abort outstanding downloads and forget every card
    pub fn clear(&mut self) {
        for handle in self.loads.drain(..) {
            handle.abort();
        }
        self.thumbnails.clear();
    }

    /// Apply a finished download
    ///
    /// Returns false when the URL is no longer on screen.
    pub fn finish(&mut self, outcome: ThumbnailOutcome) -> bool {
        let ThumbnailOutcome::Finished { url, result } = outcome else {
            return false;
        };

        let Some(slot) = self.thumbnails.get_mut(&url) else {
            debug!(url = %url, "dropping thumbnail for a photo no longer shown");
            return false;
        };

        *slot = match result {
            Ok(thumbnail) => {
                ThumbnailState::Ready(Handle::from_rgba(thumbnail.width, thumbnail.height, thumbnail.pixels))
            }
            Err(err) => {
                warn!(url = %url, error = %err, "⚠️  Failed to load image");
                ThumbnailState::Failed
            }
        };
        true
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        for handle in self.loads.drain(..) {
            handle.abort();
        }
    }
}
