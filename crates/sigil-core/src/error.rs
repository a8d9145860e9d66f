//! Error types shared across the workspace.
//!
//! Every failure here is recoverable: the session converts it into a
//! notice and keeps running. Expected no-ops (an empty drawing, a pointer
//! sample outside the surface) are not errors and never appear here.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Decoding or sizing an image failed.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("unrecognized image format")]
    UnsupportedFormat,

    #[error("image is {width}x{height}, larger than the {max}px limit")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("image is {width}x{height}, smaller than the {min}px minimum")]
    TooSmall { width: u32, height: u32, min: u32 },

    #[error("image load timed out after {0:?}")]
    Timeout(Duration),

    #[error("could not read image: {0}")]
    Io(#[from] io::Error),

    #[error("cannot allocate a {width}x{height} surface")]
    Surface { width: u32, height: u32 },
}

/// Reading a file from disk failed.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("failed to read file: {0}")]
    Io(#[from] io::Error),

    #[error("file read timed out after {0:?}")]
    Timeout(Duration),
}

/// An upload was rejected before any decode was attempted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("file too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("file too small: {size} bytes (min {min})")]
    FileTooSmall { size: u64, min: u64 },

    #[error("unsupported file type {0:?}")]
    UnsupportedType(String),

    #[error("invalid file name")]
    InvalidFileName,

    #[error("invalid file extension")]
    InvalidExtension,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no background selected")]
    NoBackground,

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("invalid project data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Umbrella error for session-level operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Persist(#[from] PersistError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl ValidationError {
    /// Message shown to the user when an upload is rejected.
    pub fn notice_text(&self) -> &'static str {
        match self {
            Self::FileTooLarge { .. } => "File too large. Maximum size is 5MB",
            Self::FileTooSmall { .. } => "File too small. Please select a valid image",
            Self::UnsupportedType(_) => {
                "Invalid file type. Please select a valid image file (JPEG, PNG, GIF, WebP, BMP)"
            }
            Self::InvalidFileName => "Invalid file name",
            Self::InvalidExtension => "Invalid file extension",
        }
    }
}

impl Error {
    /// The recoverable, user-facing message for this failure.
    pub fn notice_text(&self) -> &'static str {
        match self {
            Self::Load(_) => "Failed to load image",
            Self::Read(_) => "Failed to read file",
            Self::Validation(e) => e.notice_text(),
            Self::Export(ExportError::NoBackground) => "Please select a background first",
            Self::Export(_) => "Failed to export image",
            Self::Persist(_) => "An error occurred. Please try again.",
        }
    }
}
