//! Database Models - structs representing database tables (used by sqlx/serde).

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Admin profile
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub role: String,
    pub cv_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public-safe projection of a profile for auth responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
    pub cv_url: Option<String>,
}

impl From<&Profile> for ProfileSummary {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id,
            email: profile.email.clone(),
            full_name: profile.full_name.clone(),
            role: profile.role.clone(),
            cv_url: profile.cv_url.clone(),
        }
    }
}

/// Login session, stored hashed
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

/// Technology catalog entry
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tech {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub icon_url: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Portfolio project
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub slug: String,
    pub title_ar: String,
    pub title_en: String,
    pub summary_ar: String,
    pub summary_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub cover_image_path: Option<String>,
    pub repo_url: Option<String>,
    pub live_url: Option<String>,
    pub features_ar: Option<Vec<String>>,
    pub features_en: Option<Vec<String>>,
    pub featured: bool,
    pub published: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Project gallery image
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScreenshot {
    pub id: Uuid,
    pub project_id: Uuid,
    pub image_path: String,
    pub caption_ar: Option<String>,
    pub caption_en: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Work history entry
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: Uuid,
    pub company_or_client: String,
    pub role_title_ar: String,
    pub role_title_en: String,
    pub description_ar: Option<String>,
    pub description_en: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub published: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact form message
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub locale: String,
    pub status: String,
    pub ip_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Project list entry with its resolved tech stack
#[derive(Debug, Serialize)]
pub struct ProjectWithTech {
    #[serde(flatten)]
    pub project: Project,
    pub tech: Vec<Tech>,
}

/// Full project view for the detail page
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub tech: Vec<Tech>,
    pub screenshots: Vec<ProjectScreenshot>,
}
