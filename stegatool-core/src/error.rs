use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegaError {
    #[error("Failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("PNG encoding error: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("PNG decoding error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Failed to load font {}: {reason}", .path.display())]
    Font { path: PathBuf, reason: String },
}

impl StegaError {
    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, StegaError>;
