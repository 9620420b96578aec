//! Local file storage for uploaded assets.
//!
//! Two buckets live under the upload root: `cv-files` for the resume PDF
//! and `project-images` for covers and screenshots. Upload validation
//! (size, extension, magic bytes) happens before anything touches disk,
//! so a rejected upload leaves no partial files behind.

use std::path::{Path, PathBuf};

use rand::Rng;
use uuid::Uuid;

use crate::error::AppError;

pub const MAX_UPLOAD_SIZE: usize = 5 * 1024 * 1024;
pub const CV_BUCKET: &str = "cv-files";
pub const IMAGE_BUCKET: &str = "project-images";
pub const IMAGE_FOLDERS: &[&str] = &["covers", "screenshots"];

const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Storage root, shared with the `/uploads` static file service.
pub fn upload_root() -> PathBuf {
    PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()))
}

pub fn public_url(bucket: &str, relative: &str) -> String {
    format!("/uploads/{}/{}", bucket, relative)
}

/// Recovers the bucket-relative path from a public URL, absolute or not.
/// Returns `None` for URLs outside the bucket or with unsafe segments.
pub fn relative_path_from_url(bucket: &str, url: &str) -> Option<String> {
    let marker = format!("/uploads/{}/", bucket);
    let (_, relative) = url.split_once(&marker)?;
    if is_safe_relative_path(relative) {
        Some(relative.to_string())
    } else {
        None
    }
}

fn is_safe_relative_path(path: &str) -> bool {
    !path.is_empty()
        && !path.starts_with('/')
        && !path.contains("..")
        && !path.contains('\\')
        && !path.contains('\0')
}

pub fn extension_for(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

pub fn is_allowed_image_extension(ext: &str) -> bool {
    ALLOWED_IMAGE_EXTENSIONS.contains(&ext)
}

fn image_mime_type(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Checks that the file content matches what the extension claims.
fn matches_image_magic(ext: &str, data: &[u8]) -> bool {
    match ext {
        "jpg" | "jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        "png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
        "gif" => data.starts_with(b"GIF8"),
        "webp" => data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP",
        _ => false,
    }
}

fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF")
}

fn random_suffix() -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..7)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

fn image_relative_path(folder: &str, ext: &str) -> String {
    format!(
        "{}/{}-{}.{}",
        folder,
        chrono::Utc::now().timestamp_millis(),
        random_suffix(),
        ext
    )
}

fn cv_filename(profile_id: Uuid) -> String {
    format!("cv-{}-{}.pdf", profile_id, chrono::Utc::now().timestamp_millis())
}

/// A file that made it to disk.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub relative_path: String,
    pub url: String,
    pub size: usize,
    pub mime_type: String,
}

pub async fn store_image(
    folder: &str,
    original_name: &str,
    bytes: &[u8],
) -> Result<StoredFile, AppError> {
    store_image_at(&upload_root(), folder, original_name, bytes).await
}

/// Full pre-write check for an image upload. Returns the normalized
/// extension the stored file will use.
pub fn validate_image(
    folder: &str,
    original_name: &str,
    bytes: &[u8],
) -> Result<String, AppError> {
    if !IMAGE_FOLDERS.contains(&folder) {
        return Err(AppError::UploadRejected("Invalid upload folder".to_string()));
    }

    if bytes.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::UploadRejected(
            "File size must be less than 5MB".to_string(),
        ));
    }

    let ext = extension_for(original_name)
        .filter(|ext| is_allowed_image_extension(ext))
        .ok_or_else(|| {
            AppError::UploadRejected(format!(
                "Unsupported image type. Allowed: {}",
                ALLOWED_IMAGE_EXTENSIONS.join(", ")
            ))
        })?;

    if !matches_image_magic(&ext, bytes) {
        return Err(AppError::UploadRejected(
            "File content does not match its type".to_string(),
        ));
    }

    Ok(ext)
}

/// Full pre-write check for a CV upload.
pub fn validate_cv(content_type: Option<&str>, bytes: &[u8]) -> Result<(), AppError> {
    if content_type != Some("application/pdf") || !is_pdf(bytes) {
        return Err(AppError::UploadRejected("File must be a PDF".to_string()));
    }

    if bytes.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::UploadRejected(
            "File size must be less than 5MB".to_string(),
        ));
    }

    Ok(())
}

pub async fn store_image_at(
    root: &Path,
    folder: &str,
    original_name: &str,
    bytes: &[u8],
) -> Result<StoredFile, AppError> {
    let ext = validate_image(folder, original_name, bytes)?;

    let relative = image_relative_path(folder, &ext);
    let dest = root.join(IMAGE_BUCKET).join(&relative);
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&dest, bytes).await?;

    Ok(StoredFile {
        url: public_url(IMAGE_BUCKET, &relative),
        relative_path: relative,
        size: bytes.len(),
        mime_type: image_mime_type(&ext).to_string(),
    })
}

pub async fn store_cv(
    profile_id: Uuid,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<StoredFile, AppError> {
    store_cv_at(&upload_root(), profile_id, content_type, bytes).await
}

pub async fn store_cv_at(
    root: &Path,
    profile_id: Uuid,
    content_type: Option<&str>,
    bytes: &[u8],
) -> Result<StoredFile, AppError> {
    validate_cv(content_type, bytes)?;

    let relative = cv_filename(profile_id);
    let dest = root.join(CV_BUCKET).join(&relative);
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&dest, bytes).await?;

    Ok(StoredFile {
        url: public_url(CV_BUCKET, &relative),
        relative_path: relative,
        size: bytes.len(),
        mime_type: "application/pdf".to_string(),
    })
}

pub async fn delete_file(bucket: &str, relative: &str) -> Result<bool, AppError> {
    delete_file_at(&upload_root(), bucket, relative).await
}

/// Removes a stored file. A file that is already gone is not an error.
pub async fn delete_file_at(
    root: &Path,
    bucket: &str,
    relative: &str,
) -> Result<bool, AppError> {
    if !is_safe_relative_path(relative) {
        return Err(AppError::UploadRejected("Invalid file path".to_string()));
    }

    match tokio::fs::remove_file(root.join(bucket).join(relative)).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(AppError::Storage(e)),
    }
}

/// Creates the bucket directories. Called at startup and from the
/// readiness probe.
pub async fn ensure_layout() -> Result<(), std::io::Error> {
    let root = upload_root();
    tokio::fs::create_dir_all(root.join(CV_BUCKET)).await?;
    for folder in IMAGE_FOLDERS {
        tokio::fs::create_dir_all(root.join(IMAGE_BUCKET).join(folder)).await?;
    }
    Ok(())
}

pub async fn health_check() -> Result<(), std::io::Error> {
    ensure_layout().await
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 1, 2, 3];
    const PDF_BYTES: &[u8] = b"%PDF-1.7 fake document body";

    fn count_files(dir: &Path) -> usize {
        match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .flatten()
                .map(|entry| {
                    if entry.path().is_dir() {
                        count_files(&entry.path())
                    } else {
                        1
                    }
                })
                .sum(),
            Err(_) => 0,
        }
    }

    #[tokio::test]
    async fn test_store_image_writes_under_folder() {
        let dir = tempfile::tempdir().unwrap();
        let stored = store_image_at(dir.path(), "covers", "shot.PNG", PNG_BYTES)
            .await
            .unwrap();

        assert!(stored.relative_path.starts_with("covers/"));
        assert!(stored.relative_path.ends_with(".png"));
        assert_eq!(stored.url, format!("/uploads/project-images/{}", stored.relative_path));
        assert_eq!(stored.mime_type, "image/png");
        assert_eq!(stored.size, PNG_BYTES.len());

        let name = stored.relative_path.strip_prefix("covers/").unwrap();
        let (millis, rest) = name.split_once('-').unwrap();
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(rest.len(), 7 + ".png".len());

        let on_disk = std::fs::read(dir.path().join(IMAGE_BUCKET).join(&stored.relative_path))
            .unwrap();
        assert_eq!(on_disk, PNG_BYTES);
    }

    #[tokio::test]
    async fn test_oversized_image_rejected_before_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut bytes = vec![0x89, 0x50, 0x4E, 0x47];
        bytes.resize(MAX_UPLOAD_SIZE + 1, 0);

        let err = store_image_at(dir.path(), "covers", "big.png", &bytes)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UploadRejected(_)));
        assert_eq!(count_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_mismatched_magic_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_image_at(dir.path(), "covers", "fake.png", b"GIF89a...")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UploadRejected(_)));
        assert_eq!(count_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_unknown_folder_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_image_at(dir.path(), "secrets", "shot.png", PNG_BYTES)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UploadRejected(_)));
    }

    #[tokio::test]
    async fn test_store_cv_names_file_after_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profile_id = Uuid::new_v4();
        let stored = store_cv_at(dir.path(), profile_id, Some("application/pdf"), PDF_BYTES)
            .await
            .unwrap();

        assert!(stored
            .relative_path
            .starts_with(&format!("cv-{}-", profile_id)));
        assert!(stored.relative_path.ends_with(".pdf"));
        assert!(dir
            .path()
            .join(CV_BUCKET)
            .join(&stored.relative_path)
            .exists());
    }

    #[tokio::test]
    async fn test_cv_must_be_pdf_in_type_and_content() {
        let dir = tempfile::tempdir().unwrap();

        let err = store_cv_at(dir.path(), Uuid::new_v4(), Some("image/png"), PDF_BYTES)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UploadRejected(_)));

        let err = store_cv_at(dir.path(), Uuid::new_v4(), Some("application/pdf"), PNG_BYTES)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UploadRejected(_)));

        assert_eq!(count_files(dir.path()), 0);
    }

    #[test]
    fn test_relative_path_from_url() {
        assert_eq!(
            relative_path_from_url(IMAGE_BUCKET, "/uploads/project-images/covers/a.png"),
            Some("covers/a.png".to_string())
        );
        assert_eq!(
            relative_path_from_url(
                IMAGE_BUCKET,
                "https://example.com/uploads/project-images/screenshots/b.webp"
            ),
            Some("screenshots/b.webp".to_string())
        );
        assert_eq!(relative_path_from_url(IMAGE_BUCKET, "/other/c.png"), None);
        assert_eq!(
            relative_path_from_url(IMAGE_BUCKET, "/uploads/project-images/../secret"),
            None
        );
        assert_eq!(relative_path_from_url(CV_BUCKET, "/uploads/cv-files/"), None);
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let deleted = delete_file_at(dir.path(), CV_BUCKET, "cv-gone.pdf")
            .await
            .unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_delete_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let err = delete_file_at(dir.path(), CV_BUCKET, "../outside.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UploadRejected(_)));
    }
}
