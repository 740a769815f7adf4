//! Image storage on the local filesystem

use std::path::{Path, PathBuf};

use uuid::Uuid;

use super::ImageUpload;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Public URL prefix the upload directory is served under
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Writes uploaded images as `image-<uuid>.<ext>`
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if missing
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Persist an image and return its public path (`/uploads/<file>`)
    pub async fn save(&self, image: &ImageUpload) -> AppResult<String> {
        let filename = format!("image-{}.{}", Uuid::new_v4(), image.ext);
        let path = self.dir.join(&filename);

        self.ensure_dir().await.map_err(|e| storage_error("create upload directory", e))?;
        tokio::fs::write(&path, &image.bytes)
            .await
            .map_err(|e| storage_error("write image", e))?;

        tracing::info!(
            file = %filename,
            size = image.bytes.len(),
            original_name = ?image.original_name,
            content_type = %image.content_type,
            format = ?image.format,
            "Image stored"
        );
        Ok(format!("{PUBLIC_PREFIX}/{filename}"))
    }

    /// Remove a file previously returned by [`ImageStore::save`]
    ///
    /// Used when the database write that should reference it fails.
    pub async fn discard(&self, public_path: &str) {
        let Some(filename) = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|p| p.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
        else {
            return;
        };
        if let Err(e) = tokio::fs::remove_file(self.dir.join(filename)).await {
            tracing::warn!(file = %filename, error = %e, "Failed to remove orphaned image");
        }
    }
}

fn storage_error(action: &str, err: std::io::Error) -> AppError {
    AppError::with_message(ErrorCode::FileStorageFailed, format!("Failed to {action}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageFormat;

    fn upload(ext: &str) -> ImageUpload {
        ImageUpload {
            original_name: Some(format!("photo.{ext}")),
            content_type: "image/png".into(),
            format: ImageFormat::Png,
            ext: ext.into(),
            bytes: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn test_save_writes_unique_files() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path().join("uploads"));

        let first = store.save(&upload("png")).await.unwrap();
        let second = store.save(&upload("png")).await.unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("/uploads/image-"));
        assert!(first.ends_with(".png"));

        let name = first.trim_start_matches("/uploads/");
        let written = std::fs::read(store.dir().join(name)).unwrap();
        assert_eq!(written, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_discard_removes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());

        let path = store.save(&upload("webp")).await.unwrap();
        store.discard(&path).await;

        let name = path.trim_start_matches("/uploads/");
        assert!(!store.dir().join(name).exists());
    }

    #[tokio::test]
    async fn test_discard_ignores_foreign_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path().join("uploads"));
        let outside = tmp.path().join("keep.txt");
        std::fs::write(&outside, b"x").unwrap();

        store.discard("/uploads/../keep.txt").await;
        store.discard("/elsewhere/keep.txt").await;
        assert!(outside.exists());
    }
}
