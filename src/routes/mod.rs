/**
 * Routes Module
 * API route handlers
 */

pub mod auth;
pub mod contact;
pub mod content;
pub mod cv;
pub mod health;
pub mod messages;
pub mod projects;
pub mod stats;
pub mod uploads;
pub mod works;

use serde::{Deserialize, Serialize};

/// Standard success envelope for mutations with nothing else to say.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> axum::Json<Self> {
        axum::Json(Self { success: true })
    }
}
