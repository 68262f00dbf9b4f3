/// Flickr REST API module
///
/// This module handles:
/// - Building the `flickr.people.getPhotos` request (client.rs)
/// - Decoding the JSON response into photo records (response.rs)
/// - The error taxonomy surfaced to the controller (error.rs)

pub mod client;
pub mod error;
pub mod response;

pub use client::FlickrClient;
pub use error::ApiError;
