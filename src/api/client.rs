/// HTTP client for the Flickr REST API.

use tracing::{debug, info};

use super::error::ApiError;
use super::response::parse_photos;
use crate::config::Config;
use crate::state::data::Photo;

/// REST method returning a user's public photos
pub const PEOPLE_GET_PHOTOS: &str = "flickr.people.getPhotos";

/// Flickr REST client
///
/// Issues a single fixed GET per call. No retries, no caching, and no
/// timeout beyond what the transport applies by default.
#[derive(Debug, Clone)]
pub struct FlickrClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    user_id: String,
}

impl FlickrClient {
    /// Create a client with a default HTTP transport
    pub fn new(config: &Config) -> Self {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Create a client on top of an existing HTTP transport
    pub fn with_http(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            user_id: config.user_id.clone(),
        }
    }

    /// The underlying transport, shared with the thumbnail loader
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetch the configured user's photo list
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] if the request cannot be sent or the body cannot be read
    /// - [`ApiError::Status`] for any non-2xx response
    /// - [`ApiError::Api`] if Flickr reports `stat: fail`
    /// - [`ApiError::Decode`] if the body is not the expected JSON
    pub async fn fetch_photos(&self) -> Result<Vec<Photo>, ApiError> {
        debug!(url = %self.base_url, user_id = %self.user_id, "requesting photo list");

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("method", PEOPLE_GET_PHOTOS),
                ("api_key", self.api_key.as_str()),
                ("user_id", self.user_id.as_str()),
                ("format", "json"),
                ("nojsoncallback", "1"),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let photos = parse_photos(&body)?;
        info!(count = photos.len(), "📷 Fetched photo list");

        Ok(photos)
    }
}
