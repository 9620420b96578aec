/**
 * Admin Image Upload Routes
 * Covers and screenshots for the project gallery. The files land on
 * disk; the URLs are attached to projects through the project payload.
 */
use axum::extract::{Multipart, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::AdminContext;
use crate::error::AppError;
use crate::routes::SuccessResponse;
use crate::storage;

#[derive(Debug, Deserialize)]
pub struct FolderQuery {
    #[serde(default)]
    pub folder: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    url: String,
    filename: String,
    size: usize,
    mime_type: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUploadRequest {
    pub url: String,
}

/// POST /api/admin/uploads?folder=covers|screenshots
pub async fn upload_image(
    _ctx: AdminContext,
    Query(query): Query<FolderQuery>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let folder = match query.folder.as_deref() {
        None | Some("") => {
            return Err(AppError::validation("folder", "Folder is required"));
        }
        Some(folder) if !storage::IMAGE_FOLDERS.contains(&folder) => {
            return Err(AppError::validation(
                "folder",
                "Folder must be one of: covers, screenshots",
            ));
        }
        Some(folder) => folder.to_string(),
    };

    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::UploadRejected("Invalid multipart body".to_string()))?
    {
        if field.name() == Some("file") {
            let original_name = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| AppError::UploadRejected("Failed to read upload".to_string()))?;
            file = Some((original_name, data));
            break;
        }
    }

    let (original_name, data) =
        file.ok_or_else(|| AppError::validation("file", "File is required"))?;

    let stored = storage::store_image(&folder, &original_name, &data).await?;

    tracing::info!(path = %stored.relative_path, "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            url: stored.url,
            filename: stored.relative_path,
            size: stored.size,
            mime_type: stored.mime_type,
        }),
    ))
}

/// DELETE /api/admin/uploads
/// Takes the public URL the client has and maps it back onto the bucket.
/// Deleting a file that is already gone still succeeds.
pub async fn delete_image(
    _ctx: AdminContext,
    Json(payload): Json<DeleteUploadRequest>,
) -> Result<impl IntoResponse, AppError> {
    let relative = storage::relative_path_from_url(storage::IMAGE_BUCKET, &payload.url)
        .ok_or_else(|| AppError::validation("url", "Not an uploaded image URL"))?;

    storage::delete_file(storage::IMAGE_BUCKET, &relative).await?;

    tracing::info!(path = %relative, "Image deleted");

    Ok(SuccessResponse::ok())
}
