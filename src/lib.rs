//! Bilingual portfolio CMS backend - library for app logic and testing

pub mod auth;
pub mod cache;
pub mod db;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod storage;
pub mod validation;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer,
    services::ServeDir, trace::TraceLayer,
};

/// Request bodies above this are rejected outright. Uploads cap at 5 MB,
/// plus headroom for multipart framing.
const MAX_REQUEST_BODY: usize = 8 * 1024 * 1024;

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN.
/// Falls back to the local frontend dev servers.
pub fn configure_cors() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .and_then(|s| {
            let origins: Vec<HeaderValue> = s
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        })
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            if std::env::var("ENVIRONMENT").as_deref() == Ok("production") {
                tracing::warn!(
                    "No ALLOWED_ORIGINS or FRONTEND_ORIGIN set; CORS falls back to localhost"
                );
            }
            vec![
                "http://localhost:3000".parse().unwrap(),
                "http://127.0.0.1:3000".parse().unwrap(),
            ]
        });

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::IF_NONE_MATCH,
        ])
        .allow_credentials(true)
}

async fn not_found() -> error::AppError {
    error::AppError::NotFound
}

/// Create and configure the application router.
pub fn create_app() -> Router {
    let cors = configure_cors();
    tracing::info!("CORS configured");

    let mut app = Router::new()
        // Public content
        .route("/api/i18n/{locale}", get(routes::content::dictionary))
        .route("/api/content/home", get(routes::content::home))
        .route("/api/projects", get(routes::content::list_projects))
        .route("/api/projects/{slug}", get(routes::content::get_project))
        .route("/api/works", get(routes::content::list_works))
        .route("/api/tech", get(routes::content::list_tech))
        .route("/api/cv", get(routes::content::get_cv))
        .route("/api/contact", post(routes::contact::submit))
        // Session auth
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .route("/api/auth/me", get(routes::auth::me))
        // Admin CMS
        .route("/api/admin/stats", get(routes::stats::get_stats))
        .route(
            "/api/admin/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/api/admin/projects/{id}",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/api/admin/works",
            get(routes::works::list_works).post(routes::works::create_work),
        )
        .route(
            "/api/admin/works/{id}",
            axum::routing::put(routes::works::update_work).delete(routes::works::delete_work),
        )
        .route("/api/admin/messages", get(routes::messages::list_messages))
        .route(
            "/api/admin/messages/{id}",
            axum::routing::patch(routes::messages::update_message_status)
                .delete(routes::messages::delete_message),
        )
        .route(
            "/api/admin/cv",
            get(routes::cv::get_cv)
                .post(routes::cv::upload_cv)
                .delete(routes::cv::delete_cv),
        )
        .route(
            "/api/admin/uploads",
            post(routes::uploads::upload_image).delete(routes::uploads::delete_image),
        )
        // Health probes
        .route("/health", get(routes::health::health_ping))
        .route("/health/detailed", get(routes::health::health_detailed))
        .route("/health/database", get(routes::health::health_database))
        .route("/health/storage", get(routes::health::health_storage))
        .route("/health/ready", get(routes::health::health_ready))
        // Uploaded files are served straight off disk
        .nest_service("/uploads", ServeDir::new(storage::upload_root()));

    // Page requests fall through to the exported frontend when one is
    // mounted, otherwise to a JSON 404.
    app = match std::env::var("STATIC_DIR") {
        Ok(dir) if std::path::Path::new(&dir).is_dir() => app.fallback_service(ServeDir::new(dir)),
        _ => app.fallback(not_found),
    };

    app.layer(logging::middleware::propagate_request_id_layer())
        .layer(axum::middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        // Compress responses with gzip/br/zstd automatically
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY))
        .layer(cors)
        // Outermost so locale redirects fire before routing
        .layer(axum::middleware::from_fn(middleware::locale_gate))
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    // Guards MUST be held for the lifetime of the process; dropping them
    // early shuts down the log-writer threads and loses buffered lines.
    let _log_guards = logging::init();

    routes::health::init_start_time();

    // Refuse to start in production with the insecure default salt.
    let environment = std::env::var("ENVIRONMENT").unwrap_or_default();
    if environment == "production" {
        let salt = std::env::var("IP_HASH_SALT").unwrap_or_default();
        if salt.is_empty() || salt == "dev-ip-salt" {
            panic!(
                "FATAL: IP_HASH_SALT must be set to a secure, unique value in production. \
                 Refusing to start with the default salt."
            );
        }

        if std::env::var("COOKIE_SECURE").as_deref() == Ok("false") {
            tracing::warn!(
                "SECURITY: COOKIE_SECURE=false in production. \
                 Session cookies will be sent over plain HTTP."
            );
        }
    }

    if let Err(e) = storage::ensure_layout().await {
        tracing::warn!("Failed to prepare upload directories: {}", e);
    }

    if std::env::var("DATABASE_URL").is_ok() {
        match db::init_pool(None).await {
            Ok(pool) => {
                if let Err(e) = db::run_migrations(&pool).await {
                    tracing::error!("Failed to run database migrations: {}", e);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to initialize database pool: {}. Continuing without database.",
                    e
                );
            }
        }
    } else {
        tracing::info!("DATABASE_URL not set. Running without database connection.");
    }

    let app = create_app();

    // Bind address is configurable via HOST / PORT env vars, defaulting to
    // 127.0.0.1:3001 so existing dev setups keep working unchanged.
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3001);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST/PORT configuration");
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        create_app().layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))))
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dictionary_route_serves_cacheable_json() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/i18n/en")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(header::CACHE_CONTROL));
    }

    #[tokio::test]
    async fn test_admin_routes_require_session() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/admin/stats")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_root_redirects_to_default_locale() {
        let app = test_app();
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            &HeaderValue::from_static("/ar/")
        );
    }

    #[tokio::test]
    async fn test_contact_rejects_invalid_payload() {
        let app = test_app();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/contact")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"name":"A","email":"nope","subject":"Hi","message":"short"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
