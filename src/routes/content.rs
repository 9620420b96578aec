/**
 * Public Content Routes
 * Locale dictionaries, the assembled home feed, and the published
 * projects/works/tech catalog. Everything here is read-only and served
 * with a content ETag, except the dictionaries which never change at
 * runtime and get plain Cache-Control.
 */
use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cache;
use crate::db::models::{ProjectDetail, ProjectWithTech, Tech, Work};
use crate::db::{self, repo};
use crate::error::AppError;
use crate::i18n::{self, Dictionary, Locale};

#[derive(Debug, Deserialize)]
pub struct LocaleQuery {
    #[serde(default)]
    pub locale: Option<String>,
}

fn parse_locale_param(tag: Option<&str>) -> Result<Locale, AppError> {
    match tag {
        None | Some("") => Ok(Locale::default()),
        Some(tag) => {
            Locale::parse(tag).ok_or_else(|| AppError::validation("locale", "Unsupported locale"))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DictionaryResponse {
    pub locale: Locale,
    pub direction: &'static str,
    pub dictionary: &'static Dictionary,
}

/// GET /api/i18n/{locale}
pub async fn dictionary(Path(tag): Path<String>) -> Result<impl IntoResponse, AppError> {
    let locale = Locale::parse(&tag).ok_or(AppError::NotFound)?;

    Ok((
        [(header::CACHE_CONTROL, "public, max-age=3600")],
        Json(DictionaryResponse {
            locale,
            direction: locale.direction(),
            dictionary: i18n::dictionary(locale),
        }),
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    pub locale: Locale,
    pub direction: &'static str,
    pub projects: Vec<ProjectWithTech>,
    pub works: Vec<Work>,
    pub cv_url: Option<String>,
}

async fn published_projects_with_tech(
    pool: &sqlx::PgPool,
) -> Result<Vec<ProjectWithTech>, AppError> {
    let projects = repo::list_projects(pool, true).await?;
    let ids: Vec<Uuid> = projects.iter().map(|project| project.id).collect();
    let mut tech_map = repo::tech_map_for_projects(pool, &ids).await?;

    Ok(projects
        .into_iter()
        .map(|project| {
            let tech = tech_map.remove(&project.id).unwrap_or_default();
            ProjectWithTech { project, tech }
        })
        .collect())
}

/// GET /api/content/home
/// One round trip for the landing page: published projects with their
/// tech, published works newest first, and the owner's CV link.
pub async fn home(
    headers: HeaderMap,
    Query(query): Query<LocaleQuery>,
) -> Result<Response, AppError> {
    let locale = parse_locale_param(query.locale.as_deref())?;
    let pool = db::get_pool().ok_or(AppError::Unavailable)?;

    let projects = published_projects_with_tech(&pool).await?;
    let works = repo::list_published_works(&pool).await?;
    let cv_url = repo::find_admin_profile(&pool)
        .await?
        .and_then(|profile| profile.cv_url);

    let body = HomeContent {
        locale,
        direction: locale.direction(),
        projects,
        works,
        cv_url,
    };
    Ok(cache::with_etag(&headers, &body))
}

#[derive(Debug, Serialize)]
struct ProjectsResponse {
    projects: Vec<ProjectWithTech>,
}

/// GET /api/projects
pub async fn list_projects(headers: HeaderMap) -> Result<Response, AppError> {
    let pool = db::get_pool().ok_or(AppError::Unavailable)?;
    let projects = published_projects_with_tech(&pool).await?;
    Ok(cache::with_etag(&headers, &ProjectsResponse { projects }))
}

#[derive(Debug, Serialize)]
struct ProjectResponse {
    project: Option<ProjectDetail>,
}

/// GET /api/projects/{slug}
/// A missing or unpublished slug is part of the normal page flow, so the
/// response is a 200 with a null project and the client renders its own
/// not-found state.
pub async fn get_project(
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> Result<Response, AppError> {
    let pool = db::get_pool().ok_or(AppError::Unavailable)?;

    let project = match repo::find_published_project_by_slug(&pool, &slug).await? {
        Some(project) => {
            let tech = repo::tech_for_project(&pool, project.id).await?;
            let screenshots = repo::screenshots_for_project(&pool, project.id).await?;
            Some(ProjectDetail {
                project,
                tech,
                screenshots,
            })
        }
        None => None,
    };

    Ok(cache::with_etag(&headers, &ProjectResponse { project }))
}

#[derive(Debug, Serialize)]
struct WorksResponse {
    works: Vec<Work>,
}

/// GET /api/works
pub async fn list_works(headers: HeaderMap) -> Result<Response, AppError> {
    let pool = db::get_pool().ok_or(AppError::Unavailable)?;
    let works = repo::list_published_works(&pool).await?;
    Ok(cache::with_etag(&headers, &WorksResponse { works }))
}

#[derive(Debug, Serialize)]
struct TechResponse {
    tech: Vec<Tech>,
}

/// GET /api/tech
pub async fn list_tech(headers: HeaderMap) -> Result<Response, AppError> {
    let pool = db::get_pool().ok_or(AppError::Unavailable)?;
    let tech = repo::list_tech(&pool).await?;
    Ok(cache::with_etag(&headers, &TechResponse { tech }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CvResponse {
    cv_url: Option<String>,
}

/// GET /api/cv
/// Public CV link, from whichever profile owns the site.
pub async fn get_cv(headers: HeaderMap) -> Result<Response, AppError> {
    let pool = db::get_pool().ok_or(AppError::Unavailable)?;
    let cv_url = repo::find_admin_profile(&pool)
        .await?
        .and_then(|profile| profile.cv_url);
    Ok(cache::with_etag(&headers, &CvResponse { cv_url }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn content_router() -> Router {
        Router::new()
            .route("/api/i18n/{locale}", get(dictionary))
            .route("/api/content/home", get(home))
            .route("/api/projects", get(list_projects))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let res = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_dictionary_arabic_is_rtl() {
        let (status, body) = get_json(content_router(), "/api/i18n/ar").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["locale"], "ar");
        assert_eq!(body["direction"], "rtl");
        assert_eq!(body["dictionary"]["nav"]["home"], "الرئيسية");
    }

    #[tokio::test]
    async fn test_dictionary_english_is_ltr() {
        let (status, body) = get_json(content_router(), "/api/i18n/en").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["direction"], "ltr");
        assert_eq!(body["dictionary"]["nav"]["home"], "Home");
    }

    #[tokio::test]
    async fn test_dictionary_unknown_locale_is_not_found() {
        let (status, _) = get_json(content_router(), "/api/i18n/fr").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_home_rejects_unknown_locale_param() {
        let (status, body) = get_json(content_router(), "/api/content/home?locale=xx").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"]["locale"].is_string());
    }

    #[tokio::test]
    async fn test_home_without_database_returns_unavailable() {
        let (status, _) = get_json(content_router(), "/api/content/home").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_locale_param_defaults_to_arabic() {
        assert_eq!(parse_locale_param(None).unwrap(), Locale::Ar);
        assert_eq!(parse_locale_param(Some("")).unwrap(), Locale::Ar);
        assert_eq!(parse_locale_param(Some("en")).unwrap(), Locale::En);
        assert!(parse_locale_param(Some("de")).is_err());
    }

    #[test]
    fn test_missing_project_serializes_as_null_not_error() {
        let body = serde_json::to_value(ProjectResponse { project: None }).unwrap();
        assert_eq!(body, serde_json::json!({ "project": null }));
    }
}
