/// JSON response shapes for `flickr.people.getPhotos`
///
/// Only the fields needed to build image URLs are declared. Anything else
/// Flickr sends (paging counters, owner, flags) is ignored by serde.

use serde::Deserialize;

use super::error::ApiError;
use crate::state::data::Photo;

/// Top-level response body
///
/// Flickr reports API failures in-band with HTTP 200:
/// `{"stat":"fail","code":100,"message":"Invalid API Key"}`
#[derive(Debug, Deserialize)]
pub struct PhotosResponse {
    #[serde(default)]
    pub photos: Option<PhotoPage>,
    #[serde(default)]
    pub stat: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// The `photos` object wrapping the list
#[derive(Debug, Deserialize)]
pub struct PhotoPage {
    pub photo: Vec<Photo>,
}

impl PhotosResponse {
    /// Flatten the nested response into the photo list
    pub fn into_photos(self) -> Result<Vec<Photo>, ApiError> {
        if self.stat.as_deref() == Some("fail") {
            return Err(ApiError::Api {
                code: self.code.unwrap_or_default(),
                message: self.message.unwrap_or_default(),
            });
        }

        self.photos
            .map(|page| page.photo)
            .ok_or_else(|| ApiError::Decode("response has no `photos` object".to_string()))
    }
}

/// Decode a response body into the photo list
pub fn parse_photos(body: &str) -> Result<Vec<Photo>, ApiError> {
    let response: PhotosResponse = serde_json::from_str(body)?;
    response.into_photos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{ImageSize, DEFAULT_PHOTO_HOST};

    #[test]
    fn test_single_photo() {
        let body = r#"{"photos":{"photo":[{"id":"1","secret":"abc","server":"100"}]}}"#;
        let photos = parse_photos(body).unwrap();

        assert_eq!(photos.len(), 1);
        assert_eq!(
            photos[0].image_url(DEFAULT_PHOTO_HOST, ImageSize::Large),
            "https://live.staticflickr.com/100/1_abc_b.jpg"
        );
    }

    #[test]
    fn test_real_response_with_extra_fields() {
        let body = r#"{
            "photos": {
                "page": 1, "pages": 1, "perpage": 100, "total": 3,
                "photo": [
                    {"id":"53500001","owner":"201970008@N08","secret":"a1","server":"65535","farm":66,"title":"Dunes","ispublic":1,"isfriend":0,"isfamily":0},
                    {"id":"53500002","owner":"201970008@N08","secret":"b2","server":"65535","farm":66,"title":"","ispublic":1,"isfriend":0,"isfamily":0},
                    {"id":"53500003","owner":"201970008@N08","secret":"c3","server":"65534","farm":66,"title":"Harbour","ispublic":1,"isfriend":0,"isfamily":0}
                ]
            },
            "stat": "ok"
        }"#;
        let photos = parse_photos(body).unwrap();

        assert_eq!(photos.len(), 3);
        assert_eq!(photos[0].title, "Dunes");
        assert_eq!(photos[2].server, "65534");
        let urls: Vec<String> = photos
            .iter()
            .map(|p| p.image_url(DEFAULT_PHOTO_HOST, ImageSize::Large))
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://live.staticflickr.com/65535/53500001_a1_b.jpg",
                "https://live.staticflickr.com/65535/53500002_b2_b.jpg",
                "https://live.staticflickr.com/65534/53500003_c3_b.jpg",
            ]
        );
    }

    #[test]
    fn test_empty_photo_array() {
        let body = r#"{"photos":{"photo":[]},"stat":"ok"}"#;
        assert_eq!(parse_photos(body).unwrap(), Vec::new());
    }

    #[test]
    fn test_stat_fail_is_api_error() {
        let body = r#"{"stat":"fail","code":100,"message":"Invalid API Key (Key has invalid format)"}"#;
        assert_eq!(
            parse_photos(body),
            Err(ApiError::Api {
                code: 100,
                message: "Invalid API Key (Key has invalid format)".to_string(),
            })
        );
    }

    #[test]
    fn test_malformed_bodies_are_decode_errors() {
        assert!(matches!(parse_photos("jsonFlickrApi({})"), Err(ApiError::Decode(_))));
        assert!(matches!(parse_photos(r#"{"stat":"ok"}"#), Err(ApiError::Decode(_))));
        // Numeric ids are not accepted: ids are opaque strings
        assert!(matches!(
            parse_photos(r#"{"photos":{"photo":[{"id":1,"secret":"a","server":"b"}]}}"#),
            Err(ApiError::Decode(_))
        ));
    }
}
