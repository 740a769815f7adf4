//! Product form extraction and image storage
//!
//! - [`ProductForm`] - multipart / urlencoded body → text fields + optional image
//! - [`ImageStore`] - writes accepted images under the upload directory

mod form;
mod storage;

pub use form::{ImageUpload, ProductForm};
pub use storage::ImageStore;

/// Maximum image size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Request body ceiling: one image plus room for text fields and multipart framing
pub const MAX_BODY_SIZE: usize = MAX_FILE_SIZE + 1024 * 1024;

/// Declared content types accepted for `image`
pub const SUPPORTED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// File extensions kept as-is from the uploaded filename
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Multipart field carrying the image
pub const IMAGE_FIELD: &str = "image";
