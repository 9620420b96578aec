/**
 * Admin Dashboard Stats
 */
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::auth::AdminContext;
use crate::db::repo;
use crate::error::AppError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub projects: i64,
    pub works: i64,
    pub new_messages: i64,
}

/// GET /api/admin/stats
/// The three dashboard counters, fetched concurrently.
pub async fn get_stats(ctx: AdminContext) -> Result<impl IntoResponse, AppError> {
    let (projects, works, new_messages) = tokio::try_join!(
        repo::count_projects(&ctx.pool),
        repo::count_works(&ctx.pool),
        repo::count_new_messages(&ctx.pool),
    )?;

    Ok(Json(StatsResponse {
        projects,
        works,
        new_messages,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_stats_require_session() {
        let app = Router::new().route("/api/admin/stats", get(get_stats));
        let res = app
            .oneshot(
                Request::get("/api/admin/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
