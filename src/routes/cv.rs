/**
 * Admin CV Routes
 * One PDF per profile. Uploading replaces the previous file; the upload
 * is validated before the old file is touched, so a rejected request
 * leaves everything as it was.
 */
use axum::extract::Multipart;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::auth::AdminContext;
use crate::cache;
use crate::db::repo;
use crate::error::AppError;
use crate::routes::SuccessResponse;
use crate::storage;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CvResponse {
    cv_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CvUploadResponse {
    success: bool,
    cv_url: Option<String>,
}

/// GET /api/admin/cv
pub async fn get_cv(ctx: AdminContext) -> impl IntoResponse {
    Json(CvResponse {
        cv_url: ctx.profile.cv_url,
    })
}

/// POST /api/admin/cv
pub async fn upload_cv(
    ctx: AdminContext,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::UploadRejected("Invalid multipart body".to_string()))?
    {
        if field.name() == Some("file") {
            let content_type = field.content_type().map(|value| value.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|_| AppError::UploadRejected("Failed to read upload".to_string()))?;
            file = Some((content_type, data));
            break;
        }
    }

    let (content_type, data) =
        file.ok_or_else(|| AppError::validation("file", "File is required"))?;

    // Reject before removing anything.
    storage::validate_cv(content_type.as_deref(), &data)?;

    if let Some(old_url) = ctx.profile.cv_url.as_deref() {
        if let Some(relative) = storage::relative_path_from_url(storage::CV_BUCKET, old_url) {
            let _ = storage::delete_file(storage::CV_BUCKET, &relative).await;
        }
    }

    let stored = storage::store_cv(ctx.profile.id, content_type.as_deref(), &data).await?;
    let profile = repo::set_profile_cv_url(&ctx.pool, ctx.profile.id, Some(&stored.url)).await?;

    cache::bump_version();
    tracing::info!("CV uploaded");

    Ok(Json(CvUploadResponse {
        success: true,
        cv_url: profile.cv_url,
    }))
}

/// DELETE /api/admin/cv
pub async fn delete_cv(ctx: AdminContext) -> Result<impl IntoResponse, AppError> {
    let Some(old_url) = ctx.profile.cv_url.as_deref() else {
        return Err(AppError::NotFound);
    };

    if let Some(relative) = storage::relative_path_from_url(storage::CV_BUCKET, old_url) {
        let _ = storage::delete_file(storage::CV_BUCKET, &relative).await;
    }

    repo::set_profile_cv_url(&ctx.pool, ctx.profile.id, None).await?;

    cache::bump_version();
    tracing::info!("CV removed");

    Ok(SuccessResponse::ok())
}
