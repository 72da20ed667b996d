use std::path::PathBuf;

use thiserror::Error;

/// Audio playback refused by the platform.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PlaybackError {
    #[error("audio device is not ready")]
    DeviceUnavailable,
    #[error("music stream did not start: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no image files found in directory {0:?}")]
    NoImages(PathBuf),
    #[error("failed to decode image {path:?}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("failed to create texture for {path:?}: {message}")]
    Texture { path: PathBuf, message: String },
    #[error("failed to open music {path:?}: {message}")]
    Music { path: PathBuf, message: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
