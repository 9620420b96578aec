/**
 * Admin Work History Routes
 */
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::cache;
use crate::db::models::Work;
use crate::db::repo;
use crate::error::AppError;
use crate::routes::SuccessResponse;
use crate::validation::{self, WorkPayload};

#[derive(Debug, Serialize)]
struct WorksResponse {
    works: Vec<Work>,
}

#[derive(Debug, Serialize)]
struct WorkEnvelope {
    work: Work,
}

/// GET /api/admin/works
/// Includes unpublished entries, in the admin's manual order.
pub async fn list_works(ctx: AdminContext) -> Result<impl IntoResponse, AppError> {
    let works = repo::list_all_works(&ctx.pool).await?;
    Ok(Json(WorksResponse { works }))
}

/// POST /api/admin/works
pub async fn create_work(
    ctx: AdminContext,
    Json(payload): Json<WorkPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (start_date, end_date) = validation::validate_work(&payload)?;

    let work = repo::insert_work(&ctx.pool, &payload, start_date, end_date).await?;

    cache::bump_version();
    tracing::info!(company = %work.company_or_client, "Work entry created");

    Ok((StatusCode::CREATED, Json(WorkEnvelope { work })))
}

/// PUT /api/admin/works/{id}
pub async fn update_work(
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<WorkPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (start_date, end_date) = validation::validate_work(&payload)?;

    let work = repo::update_work(&ctx.pool, id, &payload, start_date, end_date)
        .await?
        .ok_or(AppError::NotFound)?;

    cache::bump_version();
    tracing::info!(company = %work.company_or_client, "Work entry updated");

    Ok(Json(WorkEnvelope { work }))
}

/// DELETE /api/admin/works/{id}
pub async fn delete_work(
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !repo::delete_work(&ctx.pool, id).await? {
        return Err(AppError::NotFound);
    }

    cache::bump_version();
    tracing::info!(%id, "Work entry deleted");

    Ok(SuccessResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn works_router() -> Router {
        Router::new()
            .route("/api/admin/works", get(list_works).post(create_work))
            .route(
                "/api/admin/works/{id}",
                axum::routing::put(update_work).delete(delete_work),
            )
    }

    #[tokio::test]
    async fn test_works_routes_require_session() {
        let res = works_router()
            .oneshot(
                Request::get("/api/admin/works")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_delete_requires_session_too() {
        let res = works_router()
            .oneshot(
                Request::delete(format!("/api/admin/works/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
