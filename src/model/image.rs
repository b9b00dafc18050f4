//! Image references held by covers and block items.
//!
//! An image is either staged locally (a base64 data URI that still has to be
//! uploaded) or already resolved to a remote object key.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Errors raised while interpreting a staged image.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("not a data URI")]
    NotDataUri,

    #[error("data URI is not base64 encoded")]
    NotBase64,

    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Reference to an image used by a cover or an item slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Local image waiting for upload.
    Staged(StagedImage),
    /// Uploaded image: object key plus the URL it is served from.
    Remote { key: String, url: String },
}

impl ImageRef {
    /// Remote reference for an object key served by the backend at `base_url`.
    pub fn remote(base_url: &str, key: impl Into<String>) -> Self {
        let key = key.into();
        let url = file_url(base_url, &key);
        ImageRef::Remote { key, url }
    }

    pub fn is_staged(&self) -> bool {
        matches!(self, ImageRef::Staged(_))
    }

    /// Object key, if the image has been uploaded.
    pub fn object_key(&self) -> Option<&str> {
        match self {
            ImageRef::Remote { key, .. } => Some(key),
            ImageRef::Staged(_) => None,
        }
    }

    /// Something a renderer can point at: the remote URL or the data URI.
    pub fn display_url(&self) -> &str {
        match self {
            ImageRef::Remote { url, .. } => url,
            ImageRef::Staged(staged) => staged.data_uri(),
        }
    }
}

/// Build the public URL of an uploaded object.
pub fn file_url(base_url: &str, key: &str) -> String {
    format!("{}/api/v1/files/{}", base_url.trim_end_matches('/'), key)
}

/// A locally staged image encoded as `data:<mime>;base64,<payload>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedImage {
    data_uri: String,
    mime_type: String,
}

impl StagedImage {
    /// Parse and validate a data URI.
    pub fn from_data_uri(uri: impl Into<String>) -> Result<Self, ImageError> {
        let data_uri = uri.into();
        let rest = data_uri.strip_prefix("data:").ok_or(ImageError::NotDataUri)?;
        let (header, payload) = rest.split_once(',').ok_or(ImageError::NotDataUri)?;

        let mut parts = header.split(';');
        let mime = parts.next().unwrap_or_default();
        if !parts.any(|p| p.eq_ignore_ascii_case("base64")) {
            return Err(ImageError::NotBase64);
        }
        STANDARD.decode(payload.trim())?;

        let mime_type = if mime.is_empty() {
            "application/octet-stream".to_string()
        } else {
            mime.to_ascii_lowercase()
        };

        Ok(Self {
            data_uri,
            mime_type,
        })
    }

    /// Stage raw bytes with the given MIME type.
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            data_uri: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
            mime_type: mime_type.to_string(),
        }
    }

    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Decode the payload into the bytes to upload.
    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        let (_, payload) = self
            .data_uri
            .split_once(',')
            .ok_or(ImageError::NotDataUri)?;
        Ok(STANDARD.decode(payload.trim())?)
    }

    /// File name for multipart uploads, e.g. `cover.png`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, extension_for(&self.mime_type))
    }
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/avif" => "avif",
        _ => "bin",
    }
}

/// Guess an image MIME type from a file extension.
pub fn mime_for_extension(extension: &str) -> Option<&'static str> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        "avif" => Some("image/avif"),
        _ => None,
    }
}
