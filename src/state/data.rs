/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer, the controller and the UI layer.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Host serving photo files
pub const DEFAULT_PHOTO_HOST: &str = "live.staticflickr.com";

/// Represents a single photo in the user's photo list
///
/// All identifiers are opaque strings. Flickr may change their format,
/// so they are never parsed as numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Photo {
    /// Photo ID
    pub id: String,
    /// Secret used to build the file URL
    pub secret: String,
    /// Server ID used to build the file URL
    pub server: String,
    /// Title, empty when the API omits it
    #[serde(default)]
    pub title: String,
}

impl Photo {
    /// Build the static file URL for this photo:
    /// `https://<host>/<server>/<id>_<secret>_<size>.jpg`
    pub fn image_url(&self, host: &str, size: ImageSize) -> String {
        format!(
            "https://{}/{}/{}_{}_{}.jpg",
            host,
            self.server,
            self.id,
            self.secret,
            size.suffix()
        )
    }
}

/// Flickr size suffixes for static photo files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    /// 75x75 square
    SmallSquare,
    /// 150x150 square
    LargeSquare,
    /// 100px on the longest side
    Thumbnail,
    /// 240px
    Small,
    /// 320px
    Small320,
    /// 400px
    Small400,
    /// 640px
    Medium640,
    /// 800px
    Medium800,
    /// 1024px
    #[default]
    Large,
}

impl ImageSize {
    /// The single-letter suffix used in file URLs
    pub fn suffix(self) -> char {
        match self {
            ImageSize::SmallSquare => 's',
            ImageSize::LargeSquare => 'q',
            ImageSize::Thumbnail => 't',
            ImageSize::Small => 'm',
            ImageSize::Small320 => 'n',
            ImageSize::Small400 => 'w',
            ImageSize::Medium640 => 'z',
            ImageSize::Medium800 => 'c',
            ImageSize::Large => 'b',
        }
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "s" => Ok(ImageSize::SmallSquare),
            "q" => Ok(ImageSize::LargeSquare),
            "t" => Ok(ImageSize::Thumbnail),
            "m" => Ok(ImageSize::Small),
            "n" => Ok(ImageSize::Small320),
            "w" => Ok(ImageSize::Small400),
            "z" => Ok(ImageSize::Medium640),
            "c" => Ok(ImageSize::Medium800),
            "b" => Ok(ImageSize::Large),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

/// Status of the most recent photo list request
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    /// A fetch is in flight
    #[default]
    Loading,
    /// The last fetch succeeded (the list may be empty)
    Success(Vec<Photo>),
    /// The last fetch failed; waiting for a retry
    Error,
}
