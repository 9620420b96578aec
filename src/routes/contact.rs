/**
 * Contact Routes
 * Public contact form intake with salted IP hashing
 */
use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use sha2::{Digest, Sha256};

use crate::db::{self, repo};
use crate::error::AppError;
use crate::routes::SuccessResponse;
use crate::validation::{self, ContactPayload};

lazy_static::lazy_static! {
    /// Salt for IP hashing. Startup refuses to run in production without it.
    static ref IP_HASH_SALT: String = std::env::var("IP_HASH_SALT")
        .unwrap_or_else(|_| "dev-ip-salt".to_string());
}

/// Truncated salted hash. Enough to correlate repeat senders without
/// storing anything that maps back to an address.
pub fn hash_ip(ip: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hasher.update(salt.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..32].to_string()
}

/// Proxy headers first, then the socket peer.
fn client_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        })
        .unwrap_or_else(|| addr.ip().to_string())
}

/// POST /api/contact
pub async fn submit(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<ContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    let locale = validation::validate_contact(&payload)?;

    let pool = db::get_pool().ok_or(AppError::Unavailable)?;

    let ip = client_ip(&headers, addr);
    let ip_hash = hash_ip(&ip, &IP_HASH_SALT);

    repo::insert_message(
        &pool,
        &payload.name,
        &payload.email,
        &payload.subject,
        &payload.message,
        locale.as_str(),
        Some(&ip_hash),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to store contact message: {}", e);
        AppError::Upstream("Failed to send message")
    })?;

    tracing::info!("Contact message received");

    Ok(SuccessResponse::ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::connect_info::MockConnectInfo;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    #[test]
    fn test_hash_ip_is_32_hex_chars() {
        let hash = hash_ip("203.0.113.9", "salt");
        assert_eq!(hash.len(), 32);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_ip_depends_on_ip_and_salt() {
        let base = hash_ip("203.0.113.9", "salt");
        assert_eq!(base, hash_ip("203.0.113.9", "salt"));
        assert_ne!(base, hash_ip("203.0.113.10", "salt"));
        assert_ne!(base, hash_ip("203.0.113.9", "other-salt"));
    }

    fn peer() -> SocketAddr {
        SocketAddr::from(([10, 0, 0, 7], 40000))
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.9, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "198.51.100.2".parse().unwrap());
        assert_eq!(client_ip(&headers, peer()), "203.0.113.9");
    }

    #[test]
    fn test_client_ip_falls_back_to_real_ip_then_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-real-ip", "198.51.100.2".parse().unwrap());
        assert_eq!(client_ip(&headers, peer()), "198.51.100.2");

        assert_eq!(client_ip(&HeaderMap::new(), peer()), "10.0.0.7");
    }

    fn contact_router() -> Router {
        Router::new()
            .route("/api/contact", post(submit))
            .layer(MockConnectInfo(peer()))
    }

    async fn post_json(
        app: Router,
        uri: &str,
        json: &impl serde::Serialize,
    ) -> (StatusCode, serde_json::Value) {
        let body = Body::from(serde_json::to_vec(json).unwrap());
        let req = Request::post(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_submit_rejects_invalid_fields_with_details() {
        let (status, body) = post_json(
            contact_router(),
            "/api/contact",
            &serde_json::json!({
                "name": "A",
                "email": "not-an-email",
                "subject": "Hi",
                "message": "short"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid input");
        for field in ["name", "email", "subject", "message"] {
            assert!(body["details"][field].is_string(), "missing {}", field);
        }
    }

    #[tokio::test]
    async fn test_submit_without_database_returns_unavailable() {
        let (status, _) = post_json(
            contact_router(),
            "/api/contact",
            &serde_json::json!({
                "name": "Ali Hassan",
                "email": "ali@example.com",
                "subject": "Project inquiry",
                "message": "I would like to talk about a mobile app."
            }),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
