/**
 * Admin Message Routes
 * Inbox for contact form submissions
 */
use axum::extract::{Path, Query};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AdminContext;
use crate::db::models::Message;
use crate::db::repo;
use crate::error::AppError;
use crate::routes::SuccessResponse;
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct StatusQuery {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
struct MessagesResponse {
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct MessageEnvelope {
    message: Message,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// GET /api/admin/messages
pub async fn list_messages(
    ctx: AdminContext,
    Query(query): Query<StatusQuery>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(status) = query.status.as_deref() {
        if !validation::is_valid_message_status(status) {
            return Err(AppError::validation("status", "Unknown message status"));
        }
    }

    let messages = repo::list_messages(&ctx.pool, query.status.as_deref()).await?;
    Ok(Json(MessagesResponse { messages }))
}

/// PATCH /api/admin/messages/{id}
pub async fn update_message_status(
    ctx: AdminContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !validation::is_valid_message_status(&payload.status) {
        return Err(AppError::validation("status", "Unknown message status"));
    }

    let message = repo::set_message_status(&ctx.pool, id, &payload.status)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(MessageEnvelope { message }))
}

/// DELETE /api/admin/messages/{id}
pub async fn delete_message(
    ctx: AdminContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !repo::delete_message(&ctx.pool, id).await? {
        return Err(AppError::NotFound);
    }

    Ok(SuccessResponse::ok())
}
