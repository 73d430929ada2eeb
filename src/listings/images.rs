//! Listing Images
//!
//! Uploaded images are previewed through a [`PreviewRegistry`]. Each preview is owned by a
//! [`PreviewHandle`] which revokes it when dropped, so removing an image, clearing a draft or
//! dropping the wizard always releases the preview.

use std::{
    fmt,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::{
    limits::{MAX_IMAGE_BYTES, SUPPORTED_IMAGE_TYPES},
    listings::DraftError,
};

new_key_type! {
    /// Image Key
    pub struct ImageKey;
}

/// Image chosen by the seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    /// File name
    pub name: String,

    /// MIME type, e.g. `image/png`
    pub mime_type: String,

    /// File size in bytes
    pub size_bytes: u64,
}

impl ImageUpload {
    /// Create an upload description.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    /// Guess the MIME type from the file extension.
    pub fn from_file_name(name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        let extension = name
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_lowercase())
            .unwrap_or_default();

        let mime_type = match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        };

        Self::new(name, mime_type, size_bytes)
    }

    /// Check the type and size limits.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::UnsupportedImageType`] or [`DraftError::ImageTooLarge`].
    pub fn validate(&self) -> Result<(), DraftError> {
        if !SUPPORTED_IMAGE_TYPES.contains(&self.mime_type.as_str()) {
            return Err(DraftError::UnsupportedImageType(self.mime_type.clone()));
        }

        if self.size_bytes > MAX_IMAGE_BYTES {
            return Err(DraftError::ImageTooLarge {
                name: self.name.clone(),
                size_bytes: self.size_bytes,
            });
        }

        Ok(())
    }
}

/// Creates and revokes image preview URLs.
pub trait PreviewRegistry: fmt::Debug + Send + Sync {
    /// Create a preview URL for an upload.
    fn create(&self, upload: &ImageUpload) -> String;

    /// Release a preview URL created by this registry.
    fn revoke(&self, url: &str);
}

/// Owns one preview URL and revokes it on drop.
#[derive(Debug)]
pub struct PreviewHandle {
    url: String,
    registry: Arc<dyn PreviewRegistry>,
}

impl PreviewHandle {
    /// Create a preview for `upload` in `registry`.
    pub fn create(registry: &Arc<dyn PreviewRegistry>, upload: &ImageUpload) -> Self {
        Self {
            url: registry.create(upload),
            registry: Arc::clone(registry),
        }
    }

    /// Preview URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        self.registry.revoke(&self.url);
    }
}

/// Image held by a draft together with its preview.
#[derive(Debug)]
pub struct DraftImage {
    upload: ImageUpload,
    preview: PreviewHandle,
}

impl DraftImage {
    pub(crate) fn new(upload: ImageUpload, preview: PreviewHandle) -> Self {
        Self { upload, preview }
    }

    /// Uploaded file
    pub fn upload(&self) -> &ImageUpload {
        &self.upload
    }

    /// Preview URL
    pub fn preview_url(&self) -> &str {
        self.preview.url()
    }
}

/// Preview registry that hands out `blob:` style URLs and tracks which are still live.
#[derive(Debug, Default)]
pub struct InMemoryPreviews {
    next: AtomicU64,
    live: Mutex<FxHashSet<String>>,
}

impl InMemoryPreviews {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared registry.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Number of previews not yet revoked.
    pub fn live_count(&self) -> usize {
        self.live.lock().map_or(0, |live| live.len())
    }

    /// Check if a preview URL is still live.
    pub fn is_live(&self, url: &str) -> bool {
        self.live.lock().is_ok_and(|live| live.contains(url))
    }
}

impl PreviewRegistry for InMemoryPreviews {
    fn create(&self, upload: &ImageUpload) -> String {
        let id = self.next.fetch_add(1, Ordering::Relaxed);
        let url = format!("blob:nab-market/{id}/{}", upload.name);

        if let Ok(mut live) = self.live.lock() {
            live.insert(url.clone());
        }

        url
    }

    fn revoke(&self, url: &str) {
        if let Ok(mut live) = self.live.lock() {
            live.remove(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_rejects_unsupported_type() {
        let upload = ImageUpload::new("notes.pdf", "application/pdf", 1024);

        assert_eq!(
            upload.validate(),
            Err(DraftError::UnsupportedImageType("application/pdf".to_string()))
        );
    }

    #[test]
    fn upload_rejects_oversize_file() {
        let upload = ImageUpload::new("huge.png", "image/png", MAX_IMAGE_BYTES + 1);

        assert!(matches!(
            upload.validate(),
            Err(DraftError::ImageTooLarge { size_bytes, .. }) if size_bytes == MAX_IMAGE_BYTES + 1
        ));
    }

    #[test]
    fn mime_type_from_extension() {
        assert_eq!(ImageUpload::from_file_name("desk.JPG", 10).mime_type, "image/jpeg");
        assert_eq!(ImageUpload::from_file_name("desk.webp", 10).mime_type, "image/webp");
        assert_eq!(
            ImageUpload::from_file_name("desk", 10).mime_type,
            "application/octet-stream"
        );
    }

    #[test]
    fn handle_revokes_on_drop() {
        let previews = InMemoryPreviews::shared();
        let registry: Arc<dyn PreviewRegistry> = previews.clone();
        let upload = ImageUpload::new("desk.png", "image/png", 10);

        let handle = PreviewHandle::create(&registry, &upload);
        let url = handle.url().to_string();

        assert!(previews.is_live(&url));

        drop(handle);

        assert!(!previews.is_live(&url));
        assert_eq!(previews.live_count(), 0);
    }
}
