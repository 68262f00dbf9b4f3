use image::imageops::FilterType;
use std::fmt;
use tokio::task;

/// Longest side of grid thumbnails, in pixels
pub const THUMBNAIL_SIZE: u32 = 256;

/// Why a grid image could not be shown
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThumbnailError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Decoded, downsized RGBA pixels ready for the image widget
#[derive(Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

// Pixel buffers are far too large to print
impl fmt::Debug for Thumbnail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thumbnail")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Downloads photo files and turns them into grid thumbnails
#[derive(Debug, Clone)]
pub struct ThumbnailLoader {
    http: reqwest::Client,
}

impl ThumbnailLoader {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Download one image and downsize it
    pub async fn load(&self, url: String) -> Result<Thumbnail, ThumbnailError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ThumbnailError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ThumbnailError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ThumbnailError::Transport(e.to_string()))?;

        // Spawn blocking because decoding and resizing are CPU-intensive
        task::spawn_blocking(move || decode_thumbnail(&bytes))
            .await
            .map_err(|e| ThumbnailError::Decode(format!("Task join error: {}", e)))?
    }
}

/// Decode an encoded image (JPEG, PNG, ...) and fit it into the thumbnail box
pub fn decode_thumbnail(data: &[u8]) -> Result<Thumbnail, ThumbnailError> {
    let img = image::load_from_memory(data).map_err(|e| ThumbnailError::Decode(e.to_string()))?;

    // Resize to thumbnail size, preserving aspect ratio
    let thumbnail = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Triangle);
    let rgba = thumbnail.to_rgba8();

    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one canned HTTP response for `/photo.jpg`
    async fn serve_once(status_line: &'static str, body: Vec<u8>) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: image/jpeg\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            let _ = socket.shutdown().await;
        });

        (format!("http://{}/photo.jpg", addr), handle)
    }

    fn loader() -> ThumbnailLoader {
        ThumbnailLoader::new(reqwest::Client::builder().no_proxy().build().unwrap())
    }

    fn encode(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 40, 10])));
        let mut data = Vec::new();
        img.write_to(&mut Cursor::new(&mut data), format).unwrap();
        data
    }

    #[test]
    fn test_landscape_fits_box() {
        let thumbnail = decode_thumbnail(&encode(1024, 512, ImageFormat::Png)).unwrap();

        assert_eq!((thumbnail.width, thumbnail.height), (256, 128));
        assert_eq!(thumbnail.pixels.len(), 256 * 128 * 4);
        assert_eq!(thumbnail.pixels[3], 255);
    }

    #[test]
    fn test_jpeg_portrait() {
        let thumbnail = decode_thumbnail(&encode(300, 600, ImageFormat::Jpeg)).unwrap();
        assert_eq!((thumbnail.width, thumbnail.height), (128, 256));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let result = decode_thumbnail(b"<html>404 Not Found</html>");
        assert!(matches!(result, Err(ThumbnailError::Decode(_))));
    }

    #[test]
    fn test_debug_omits_pixels() {
        let thumbnail = Thumbnail {
            width: 2,
            height: 1,
            pixels: vec![0; 8],
        };
        assert_eq!(
            format!("{:?}", thumbnail),
            "Thumbnail { width: 2, height: 1, bytes: 8 }"
        );
    }

    #[tokio::test]
    async fn test_load_downsizes_served_image() {
        let (url, server) = serve_once("200 OK", encode(512, 512, ImageFormat::Png)).await;

        let thumbnail = loader().load(url).await.unwrap();
        server.await.unwrap();

        assert_eq!((thumbnail.width, thumbnail.height), (256, 256));
    }

    #[tokio::test]
    async fn test_load_not_found_is_status_error() {
        let (url, server) = serve_once("404 Not Found", Vec::new()).await;

        let result = loader().load(url).await;
        server.await.unwrap();

        assert_eq!(result, Err(ThumbnailError::Status(404)));
    }

    #[tokio::test]
    async fn test_load_non_image_body_is_decode_error() {
        let (url, server) = serve_once("200 OK", b"<html>rate limited</html>".to_vec()).await;

        let result = loader().load(url).await;
        server.await.unwrap();

        assert!(matches!(result, Err(ThumbnailError::Decode(_))));
    }

    #[tokio::test]
    async fn test_load_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = loader().load(format!("http://{}/photo.jpg", addr)).await;

        assert!(matches!(result, Err(ThumbnailError::Transport(_))));
    }
}
