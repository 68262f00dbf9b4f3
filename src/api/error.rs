/// Errors that can occur while fetching the photo list.
///
/// Variants carry plain strings and status codes so the error can be
/// cloned into UI messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// No connectivity, DNS failure, connection reset and similar I/O failures.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Flickr answered `stat: fail` inside a 200 response.
    #[error("Flickr API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The body was not the expected JSON shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
