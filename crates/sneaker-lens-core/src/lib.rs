#![warn(missing_docs)]
//! # sneaker-lens-core
//!
//! ## Purpose
//! Defines the pure data model shared across the `sneaker-lens` workspace.
//!
//! ## Responsibilities
//! - Validate user-selected files as images ([`SelectedImage`]).
//! - Produce a displayable [`ImagePreview`] for the selection.
//! - Encode the image as a data URI and package it into [`AnalyzeRequest`].
//!
//! ## Data flow
//! File input -> [`ImageInput`] -> [`SelectedImage::from_input`] ->
//! [`SelectedImage::to_data_uri`] -> [`AnalyzeRequest`] JSON bytes.
//!
//! ## Ownership and lifetimes
//! Images own their byte buffers (`Vec<u8>`) so a selection can outlive the
//! input event that produced it.
//!
//! ## Error model
//! Non-image inputs return [`CoreError::InvalidFile`]; JSON failures return
//! [`CoreError::Codec`].
//!
//! ## Security and privacy notes
//! Image bytes and data URIs must never reach logs. Use
//! [`SelectedImage::fingerprint`] when a selection needs to be identified.
//!
//! ## Example
//! ```rust
//! use sneaker_lens_core::{ImageInput, SelectedImage};
//!
//! let input = ImageInput::new("shoe.png", Some("image/png"), vec![1, 2, 3]);
//! let image = SelectedImage::from_input(input).expect("declared image type");
//! assert!(image.to_data_uri().starts_with("data:image/png;base64,"));
//! ```

use std::io::Cursor;

use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Media type prefix every accepted selection must carry.
pub const IMAGE_MEDIA_PREFIX: &str = "image/";

/// One file delivered by a file input or drop event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    /// File name as reported by the input source.
    pub file_name: String,
    /// Declared media type, when the source provides one.
    pub media_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl ImageInput {
    /// Creates an input record.
    pub fn new(
        file_name: impl Into<String>,
        media_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.map(str::to_string),
            bytes,
        }
    }
}

/// A validated image chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    file_name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl SelectedImage {
    /// Validates an input as an image.
    ///
    /// A declared media type must start with `image/`. Without one, the type
    /// is sniffed from the file signature.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidFile`] for empty files, non-image media
    /// types, and unrecognised signatures.
    pub fn from_input(input: ImageInput) -> Result<Self, CoreError> {
        if input.bytes.is_empty() {
            return Err(CoreError::InvalidFile("file is empty".to_string()));
        }

        let media_type = match input.media_type.as_deref() {
            Some(declared) => {
                let normalized = declared.trim().to_ascii_lowercase();
                if !is_image_media_type(&normalized) {
                    return Err(CoreError::InvalidFile(format!(
                        "media type '{normalized}' is not an image"
                    )));
                }
                normalized
            }
            None => sniff_media_type(&input.bytes).ok_or_else(|| {
                CoreError::InvalidFile("file signature is not a known image format".to_string())
            })?,
        };

        Ok(Self {
            file_name: input.file_name,
            media_type,
            bytes: input.bytes,
        })
    }

    /// Returns the file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the normalized media type.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Returns the raw image bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encodes the image as a `data:` URI with base64 transport encoding.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    /// Hex SHA-256 of the image bytes, safe to log.
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }

    /// Builds the display preview.
    ///
    /// Dimensions are probed from the header only; formats the decoder does
    /// not understand still preview, without dimensions.
    pub fn preview(&self) -> ImagePreview {
        ImagePreview {
            file_name: self.file_name.clone(),
            media_type: self.media_type.clone(),
            byte_len: self.bytes.len(),
            dimensions: probe_dimensions(&self.bytes),
        }
    }
}

/// Display summary of a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePreview {
    /// File name shown under the preview.
    pub file_name: String,
    /// Media type of the selection.
    pub media_type: String,
    /// Size of the file in bytes.
    pub byte_len: usize,
    /// Pixel `(width, height)` when decodable.
    pub dimensions: Option<(u32, u32)>,
}

/// Body of `POST /api/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// Data URI of the selected image.
    pub image: String,
}

impl AnalyzeRequest {
    /// Builds the request for one selection.
    pub fn for_image(image: &SelectedImage) -> Self {
        Self {
            image: image.to_data_uri(),
        }
    }

    /// Serializes the request to compact JSON bytes.
    ///
    /// # Errors
    /// Returns [`CoreError::Codec`] when JSON serialization fails.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self).map_err(CoreError::Codec)
    }
}

/// Returns `true` for `image/*` media types (case-insensitive).
pub fn is_image_media_type(media_type: &str) -> bool {
    media_type
        .trim()
        .to_ascii_lowercase()
        .strip_prefix(IMAGE_MEDIA_PREFIX)
        .is_some_and(|subtype| !subtype.is_empty())
}

/// Sniffs an image media type from the file signature.
pub fn sniff_media_type(bytes: &[u8]) -> Option<String> {
    image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type().to_string())
        .filter(|media_type| is_image_media_type(media_type))
}

fn probe_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Error type for selection validation and request encoding.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The selected file is not an image.
    #[error("invalid file: {0}")]
    InvalidFile(String),
    /// JSON encoding failure.
    #[error("request codec failure: {0}")]
    Codec(#[from] serde_json::Error),
}
