/// Photo repository
///
/// The controller depends on this trait instead of the HTTP client, so it
/// can be driven by test doubles.

use std::future::Future;

use crate::api::{ApiError, FlickrClient};
use crate::state::data::Photo;

/// Source of the photo list
pub trait PhotoRepository: Send + Sync + 'static {
    /// Fetch the current photo list
    fn get_photos(&self) -> impl Future<Output = Result<Vec<Photo>, ApiError>> + Send;
}

/// Repository backed by the Flickr REST API
#[derive(Debug, Clone)]
pub struct NetworkPhotoRepository {
    client: FlickrClient,
}

impl NetworkPhotoRepository {
    pub fn new(client: FlickrClient) -> Self {
        Self { client }
    }
}

impl PhotoRepository for NetworkPhotoRepository {
    async fn get_photos(&self) -> Result<Vec<Photo>, ApiError> {
        self.client.fetch_photos().await
    }
}
