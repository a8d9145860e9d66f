//! Upload validation, run before any byte of the file is decoded.

use sigil_core::{FileLimits, ValidationError};

const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
];

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// What the host knows about a picked file before reading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

impl UploadCandidate {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }

    /// Check size, MIME type, name, then extension, in that order.
    pub fn validate(&self, limits: &FileLimits) -> Result<(), ValidationError> {
        if self.size > limits.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size: self.size,
                max: limits.max_file_size,
            });
        }
        if self.size < limits.min_file_size {
            return Err(ValidationError::FileTooSmall {
                size: self.size,
                min: limits.min_file_size,
            });
        }

        let mime = self.mime_type.to_ascii_lowercase();
        if !ALLOWED_MIME_TYPES.contains(&mime.as_str()) {
            return Err(ValidationError::UnsupportedType(self.mime_type.clone()));
        }

        let name = &self.file_name;
        if name.contains("..") || name.contains('/') || name.contains('\\') {
            return Err(ValidationError::InvalidFileName);
        }

        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .ok_or(ValidationError::InvalidExtension)?;
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(ValidationError::InvalidExtension);
        }

        Ok(())
    }
}
