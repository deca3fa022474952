//! Local storage for uploaded service icons
//!
//! Files land in `{upload_dir}/service-icons/` and are served back under
//! `/uploads/service-icons/`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use legal_common::StorageConfig;
use rand::Rng;
use tracing::{debug, instrument};

use crate::dto::IconUpload;

use super::error::{ServiceError, ServiceResult};

/// Sub-directory of the upload root holding icons
pub const ICON_DIR: &str = "service-icons";

/// Public URL prefix the upload root is mounted at
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Extension used when neither the file name nor the content type tells us one
const FALLBACK_EXTENSION: &str = "img";

/// Extensions kept from the uploaded file name; anything else is re-derived
const RASTER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];

/// SVG can carry script and `/uploads` is served same-origin
const SVG_CONTENT_TYPE: &str = "image/svg+xml";

fn is_image(content_type: Option<&str>) -> bool {
    content_type
        .map(|ct| ct.trim().to_ascii_lowercase())
        .is_some_and(|ct| ct.starts_with("image/") && !ct.starts_with(SVG_CONTENT_TYPE))
}

/// Extension for the stored file: the uploaded name's when it is a known
/// raster type, else one derived from the content type
fn icon_extension(file_name: Option<&str>, content_type: Option<&str>) -> String {
    let from_name = file_name
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|ext| RASTER_EXTENSIONS.contains(&ext.as_str()));

    from_name.unwrap_or_else(|| {
        match content_type.map(|ct| ct.trim().to_ascii_lowercase()).as_deref() {
            Some("image/jpeg" | "image/jpg") => "jpg",
            Some("image/png") => "png",
            Some("image/gif") => "gif",
            Some("image/webp") => "webp",
            Some("image/bmp") => "bmp",
            _ => FALLBACK_EXTENSION,
        }
        .to_string()
    })
}

fn icon_file_name(millis: i64, suffix: u32, extension: &str) -> String {
    format!("service-icon-{millis}-{suffix}.{extension}")
}

/// Writes uploaded icons below the configured upload root
pub struct IconStorage<'a> {
    config: &'a StorageConfig,
}

impl<'a> IconStorage<'a> {
    pub fn new(config: &'a StorageConfig) -> Self {
        Self { config }
    }

    fn icon_dir(&self) -> PathBuf {
        Path::new(&self.config.upload_dir).join(ICON_DIR)
    }

    /// Check an upload before anything touches the disk
    pub fn validate(&self, upload: &IconUpload) -> ServiceResult<()> {
        if !is_image(upload.content_type.as_deref()) {
            return Err(ServiceError::bad_request("INVALID_FILE_TYPE", "Only image files are allowed"));
        }
        if upload.bytes.is_empty() {
            return Err(ServiceError::validation("Service icon file is required"));
        }
        if upload.bytes.len() > self.config.max_file_size_bytes() {
            return Err(ServiceError::bad_request(
                "FILE_TOO_LARGE",
                format!("Icon file must be at most {} MB", self.config.max_file_size_mb),
            ));
        }
        Ok(())
    }

    /// Store the icon and return its public path
    #[instrument(skip(self, upload), fields(size = upload.bytes.len()))]
    pub async fn save(&self, upload: &IconUpload) -> ServiceResult<String> {
        self.validate(upload)?;

        let dir = self.icon_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| ServiceError::internal(format!("Failed to create upload directory: {e}")))?;

        let extension = icon_extension(upload.file_name.as_deref(), upload.content_type.as_deref());
        let suffix = rand::thread_rng().gen_range(0..1_000_000_000);
        let file_name = icon_file_name(Utc::now().timestamp_millis(), suffix, &extension);

        tokio::fs::write(dir.join(&file_name), &upload.bytes)
            .await
            .map_err(|e| ServiceError::internal(format!("Failed to store icon: {e}")))?;

        debug!(%file_name, "Service icon stored");

        Ok(format!("{PUBLIC_PREFIX}/{ICON_DIR}/{file_name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &Path) -> StorageConfig {
        StorageConfig {
            upload_dir: dir.to_string_lossy().into_owned(),
            max_file_size_mb: 1,
        }
    }

    fn upload(content_type: &str, bytes: Vec<u8>) -> IconUpload {
        IconUpload {
            file_name: Some("Scales.PNG".into()),
            content_type: Some(content_type.into()),
            bytes,
        }
    }

    #[test]
    fn test_icon_file_name_format() {
        assert_eq!(icon_file_name(1_700_000_000_000, 42, "png"), "service-icon-1700000000000-42.png");
    }

    #[test]
    fn test_extension_prefers_file_name() {
        assert_eq!(icon_extension(Some("logo.JPEG"), Some("image/png")), "jpeg");
        assert_eq!(icon_extension(Some("noext"), Some("image/png")), "png");
        assert_eq!(icon_extension(Some("weird.p@g"), None), FALLBACK_EXTENSION);
    }

    #[test]
    fn test_markup_extensions_are_not_kept() {
        assert_eq!(icon_extension(Some("icon.svg"), Some("image/png")), "png");
        assert_eq!(icon_extension(Some("page.html"), Some("image/gif")), "gif");
        assert_eq!(icon_extension(Some("icon.svg"), None), FALLBACK_EXTENSION);
    }

    #[test]
    fn test_only_images_are_accepted() {
        assert!(is_image(Some("image/png")));
        assert!(is_image(Some("Image/WebP")));
        assert!(!is_image(Some("application/pdf")));
        assert!(!is_image(Some("image/svg+xml")));
        assert!(!is_image(Some("Image/SVG+XML; charset=utf-8")));
        assert!(!is_image(None));
    }

    #[test]
    fn test_validate_rejects_oversized_and_non_images() {
        let dir = std::env::temp_dir();
        let cfg = config(&dir);
        let storage = IconStorage::new(&cfg);

        assert!(storage.validate(&upload("image/png", vec![1, 2, 3])).is_ok());

        let err = storage.validate(&upload("text/plain", vec![1])).unwrap_err();
        assert_eq!(err.to_string(), "Only image files are allowed");

        let err = storage.validate(&upload("image/svg+xml", b"<svg/>".to_vec())).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_FILE_TYPE");

        let err = storage.validate(&upload("image/png", vec![0; 1024 * 1024 + 1])).unwrap_err();
        assert_eq!(err.error_code(), "FILE_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_save_writes_under_icon_dir() {
        let dir = std::env::temp_dir().join(format!("legal-icons-{}", rand::thread_rng().gen::<u32>()));
        let cfg = config(&dir);
        let storage = IconStorage::new(&cfg);

        let public = storage.save(&upload("image/png", vec![137, 80, 78, 71])).await.unwrap();
        assert!(public.starts_with("/uploads/service-icons/service-icon-"));
        assert!(public.ends_with(".png"));

        let stored = dir.join(ICON_DIR).join(public.rsplit('/').next().unwrap());
        assert_eq!(tokio::fs::read(&stored).await.unwrap(), vec![137, 80, 78, 71]);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
