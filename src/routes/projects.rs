/**
 * Admin Project Routes
 * CRUD over projects plus their tech links and screenshots. Child
 * collections are replaced wholesale in the same transaction as the
 * parent row, and every successful write bumps the content version.
 */
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::cache;
use crate::db::models::{Project, ProjectDetail, ProjectWithTech};
use crate::db::repo;
use crate::error::{is_unique_violation, AppError};
use crate::routes::SuccessResponse;
use crate::validation::{self, ProjectPayload};

#[derive(Debug, Serialize)]
struct ProjectsResponse {
    projects: Vec<ProjectWithTech>,
}

#[derive(Debug, Serialize)]
struct ProjectEnvelope {
    project: ProjectDetail,
}

async fn load_detail(pool: &PgPool, project: Project) -> Result<ProjectDetail, AppError> {
    let tech = repo::tech_for_project(pool, project.id).await?;
    let screenshots = repo::screenshots_for_project(pool, project.id).await?;
    Ok(ProjectDetail {
        project,
        tech,
        screenshots,
    })
}

fn map_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::Conflict("Slug")
    } else {
        AppError::from(e)
    }
}

/// GET /api/admin/projects
/// Unlike the public list, this includes unpublished projects.
pub async fn list_projects(ctx: AdminContext) -> Result<impl IntoResponse, AppError> {
    let projects = repo::list_projects(&ctx.pool, false).await?;
    let ids: Vec<Uuid> = projects.iter().map(|project| project.id).collect();
    let mut tech_map = repo::tech_map_for_projects(&ctx.pool, &ids).await?;

    let projects = projects
        .into_iter()
        .map(|project| {
            let tech = tech_map.remove(&project.id).unwrap_or_default();
            ProjectWithTech { project, tech }
        })
        .collect();

    Ok(Json(ProjectsResponse { projects }))
}

/// GET /api/admin/projects/{id}
pub async fn get_project(
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let project = repo::find_project_by_id(&ctx.pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    let detail = load_detail(&ctx.pool, project).await?;
    Ok(Json(ProjectEnvelope { project: detail }))
}

/// POST /api/admin/projects
pub async fn create_project(
    ctx: AdminContext,
    Json(payload): Json<ProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_project(&payload)?;

    let project = repo::create_project(&ctx.pool, &payload)
        .await
        .map_err(map_write_error)?;

    cache::bump_version();
    tracing::info!(slug = %project.slug, "Project created");

    let detail = load_detail(&ctx.pool, project).await?;
    Ok((StatusCode::CREATED, Json(ProjectEnvelope { project: detail })))
}

/// PUT /api/admin/projects/{id}
pub async fn update_project(
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    validation::validate_project(&payload)?;

    let project = repo::update_project(&ctx.pool, id, &payload)
        .await
        .map_err(map_write_error)?
        .ok_or(AppError::NotFound)?;

    cache::bump_version();
    tracing::info!(slug = %project.slug, "Project updated");

    let detail = load_detail(&ctx.pool, project).await?;
    Ok(Json(ProjectEnvelope { project: detail }))
}

/// DELETE /api/admin/projects/{id}
pub async fn delete_project(
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !repo::delete_project(&ctx.pool, id).await? {
        return Err(AppError::NotFound);
    }

    cache::bump_version();
    tracing::info!(%id, "Project deleted");

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

    fn admin_router() -> Router {
        Router::new()
            .route(
                "/api/admin/projects",
                get(list_projects).post(create_project),
            )
            .route(
                "/api/admin/projects/{id}",
                get(get_project).put(update_project).delete(delete_project),
            )
    }

    #[tokio::test]
    async fn test_admin_routes_require_a_session_cookie() {
        let res = admin_router()
            .oneshot(
                Request::get("/api/admin/projects")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Not authenticated");
    }

    #[tokio::test]
    async fn test_mutations_check_auth_before_anything_else() {
        // Invalid payload, but no cookie: authentication wins.
        let res = admin_router()
            .oneshot(
                Request::post("/api/admin/projects")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_cookie_without_database_is_unavailable() {
        // The extractor found a cookie and went looking for the pool.
        let res = admin_router()
            .oneshot(
                Request::get("/api/admin/projects")
                    .header("cookie", "session=sometoken")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_duplicate_slug_maps_to_conflict() {
        let dup = sqlx::Error::Protocol(
            "duplicate key value violates unique constraint \"idx_projects_slug\"".to_string(),
        );
        assert!(matches!(map_write_error(dup), AppError::Conflict("Slug")));
        assert!(matches!(
            map_write_error(sqlx::Error::RowNotFound),
            AppError::Database(_)
        ));
    }
}
