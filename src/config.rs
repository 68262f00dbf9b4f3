/// Application configuration.
///
/// Credentials are never compiled in. Settings are resolved from, in
/// increasing precedence:
/// - built-in defaults
/// - an optional JSON file (`<config_dir>/flickr-photos/config.json`, or the
///   path in `FLICKR_PHOTOS_CONFIG`)
/// - environment variables
///
/// Environment variables:
/// - `FLICKR_API_KEY` -- API key (required)
/// - `FLICKR_USER_ID` -- user whose photos are listed, e.g. `201970008@N08` (required)
/// - `FLICKR_API_URL` -- REST endpoint
/// - `FLICKR_PHOTO_HOST` -- host serving photo files
/// - `FLICKR_IMAGE_SIZE` -- size suffix letter (`s q t m n w z c b`)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::state::data::{ImageSize, DEFAULT_PHOTO_HOST};

/// Default Flickr REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.flickr.com/services/rest/";

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_VAR: &str = "FLICKR_PHOTOS_CONFIG";

/// Errors raised while resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required setting was found in no source
    #[error("missing required setting `{0}` (set it in the config file or the environment)")]
    Missing(&'static str),

    /// `image_size` is not a known Flickr size suffix
    #[error("invalid image size `{0}` (expected one of s, q, t, m, n, w, z, c, b)")]
    InvalidImageSize(String),

    /// The config file could not be read
    #[error("failed to read config file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub user_id: String,
    /// REST endpoint the photo list is requested from
    pub base_url: String,
    /// Host serving the static photo files
    pub photo_host: String,
    /// Size suffix used for grid images
    pub image_size: ImageSize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            user_id: String::new(),
            base_url: DEFAULT_API_URL.to_string(),
            photo_host: DEFAULT_PHOTO_HOST.to_string(),
            image_size: ImageSize::default(),
        }
    }
}

/// On-disk config file; every field is optional
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub user_id: Option<String>,
    pub base_url: Option<String>,
    pub photo_host: Option<String>,
    pub image_size: Option<String>,
}

impl ConfigFile {
    /// Read and parse a config file
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::File {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl Config {
    /// Load configuration from the process environment and config file
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var_os(CONFIG_PATH_VAR) {
            // An explicitly named file must exist
            Some(path) => Some(ConfigFile::read(Path::new(&path))?),
            None => match Self::default_path() {
                Some(path) if path.is_file() => {
                    tracing::info!(path = %path.display(), "📁 Using config file");
                    Some(ConfigFile::read(&path)?)
                }
                _ => None,
            },
        };

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Get the default config file location
    ///
    /// - Linux: ~/.config/flickr-photos/config.json
    /// - macOS: ~/Library/Application Support/flickr-photos/config.json
    /// - Windows: %APPDATA%\flickr-photos\config.json
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("flickr-photos");
        path.push("config.json");
        Some(path)
    }

    /// Merge defaults, the config file and environment lookups
    ///
    /// Empty values count as unset.
    pub fn resolve<F>(file: Option<ConfigFile>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let pick = |var: &str, from_file: Option<String>| {
            env(var)
                .filter(|v| !v.trim().is_empty())
                .or(from_file.filter(|v| !v.trim().is_empty()))
        };

        let defaults = Config::default();

        let api_key = pick("FLICKR_API_KEY", file.api_key).ok_or(ConfigError::Missing("api_key"))?;
        let user_id = pick("FLICKR_USER_ID", file.user_id).ok_or(ConfigError::Missing("user_id"))?;
        let base_url = pick("FLICKR_API_URL", file.base_url).unwrap_or(defaults.base_url);
        let photo_host = pick("FLICKR_PHOTO_HOST", file.photo_host).unwrap_or(defaults.photo_host);
        let image_size = match pick("FLICKR_IMAGE_SIZE", file.image_size) {
            Some(raw) => raw.parse().map_err(ConfigError::InvalidImageSize)?,
            None => defaults.image_size,
        };

        Ok(Config {
            api_key,
            user_id,
            base_url,
            photo_host,
            image_size,
        })
    }
}
