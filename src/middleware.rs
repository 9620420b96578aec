//! Locale and admin routing gate.
//!
//! Every page request passes through here before routing. API and asset
//! paths are left alone; admin pages require a live session; everything
//! else must carry a locale prefix or gets redirected to the default
//! locale.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::auth;
use crate::i18n::{DEFAULT_LOCALE, LOCALES};

/// Outcome of the gate for one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Pass,
    Redirect(String),
}

const SKIP_PREFIXES: &[&str] = &["/api", "/auth", "/health", "/uploads", "/_next", "/static"];

/// Pure decision function. Session resolution happens outside so that
/// paths which never need it never hit the database.
pub fn decide(path: &str, has_session: bool) -> RouteDecision {
    if SKIP_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) || path.contains('.') {
        return RouteDecision::Pass;
    }

    if path == "/admin/login" {
        return RouteDecision::Pass;
    }
    if path.starts_with("/admin") {
        return if has_session {
            RouteDecision::Pass
        } else {
            RouteDecision::Redirect("/admin/login".to_string())
        };
    }

    let has_locale = LOCALES.iter().any(|locale| {
        let tag = locale.as_str();
        path == format!("/{}", tag) || path.starts_with(&format!("/{}/", tag))
    });
    if has_locale {
        return RouteDecision::Pass;
    }

    RouteDecision::Redirect(format!("/{}{}", DEFAULT_LOCALE.as_str(), path))
}

pub async fn locale_gate(jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    // Only admin pages need to know whether a session exists.
    let needs_session =
        path.starts_with("/admin") && path != "/admin/login" && !path.contains('.');
    let has_session = if needs_session {
        auth::resolve_session(&jar).await.is_some()
    } else {
        false
    };

    match decide(&path, has_session) {
        RouteDecision::Pass => next.run(request).await,
        RouteDecision::Redirect(target) => {
            let target = match request.uri().query() {
                Some(query) => format!("{}?{}", target, query),
                None => target,
            };
            Redirect::temporary(&target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn redirect(target: &str) -> RouteDecision {
        RouteDecision::Redirect(target.to_string())
    }

    #[test]
    fn test_api_and_asset_paths_pass() {
        assert_eq!(decide("/api/projects", false), RouteDecision::Pass);
        assert_eq!(decide("/auth/login", false), RouteDecision::Pass);
        assert_eq!(decide("/health", false), RouteDecision::Pass);
        assert_eq!(decide("/uploads/cv-files/cv.pdf", false), RouteDecision::Pass);
        assert_eq!(decide("/_next/chunk.js", false), RouteDecision::Pass);
        assert_eq!(decide("/static/logo.svg", false), RouteDecision::Pass);
        assert_eq!(decide("/favicon.ico", false), RouteDecision::Pass);
    }

    #[test]
    fn test_localized_paths_pass() {
        assert_eq!(decide("/ar", false), RouteDecision::Pass);
        assert_eq!(decide("/en", false), RouteDecision::Pass);
        assert_eq!(decide("/ar/projects", false), RouteDecision::Pass);
        assert_eq!(decide("/en/works/acme", false), RouteDecision::Pass);
    }

    #[test]
    fn test_unprefixed_paths_redirect_to_default_locale() {
        assert_eq!(decide("/", false), redirect("/ar/"));
        assert_eq!(decide("/projects", false), redirect("/ar/projects"));
        assert_eq!(decide("/works/acme", false), redirect("/ar/works/acme"));
        // Unknown locale tags are plain path segments.
        assert_eq!(decide("/fr/page", false), redirect("/ar/fr/page"));
    }

    #[test]
    fn test_admin_gate() {
        assert_eq!(decide("/admin/login", false), RouteDecision::Pass);
        assert_eq!(decide("/admin/login", true), RouteDecision::Pass);
        assert_eq!(decide("/admin", false), redirect("/admin/login"));
        assert_eq!(decide("/admin/projects", false), redirect("/admin/login"));
        assert_eq!(decide("/admin", true), RouteDecision::Pass);
        assert_eq!(decide("/admin/messages", true), RouteDecision::Pass);
    }

    fn gated_app() -> Router {
        Router::new()
            .route("/ar", get(|| async { "ok" }))
            .route("/ar/{*rest}", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn(locale_gate))
    }

    #[tokio::test]
    async fn test_gate_redirects_with_307() {
        let response = gated_app()
            .oneshot(HttpRequest::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get("location").unwrap(), "/ar/");
    }

    #[tokio::test]
    async fn test_gate_preserves_query_string() {
        let response = gated_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/projects?tag=web")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/ar/projects?tag=web"
        );
    }

    #[tokio::test]
    async fn test_admin_page_without_session_redirects_to_login() {
        let response = gated_app()
            .oneshot(
                HttpRequest::builder()
                    .uri("/admin/projects")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get("location").unwrap(), "/admin/login");
    }
}
