//! Request payload schemas and field-level validation.
//! Every validator returns the shared `details` map shape on failure.

use chrono::NaiveDate;
use regex::Regex;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, FieldErrors};
use crate::i18n::Locale;

lazy_static::lazy_static! {
    /// Lowercase letters, digits and hyphens only.
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9-]+$").unwrap();
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

pub const MESSAGE_STATUSES: &[&str] = &["new", "read", "archived"];

pub fn is_valid_slug(slug: &str) -> bool {
    slug.chars().count() >= 3 && SLUG_REGEX.is_match(slug)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn is_valid_message_status(status: &str) -> bool {
    MESSAGE_STATUSES.contains(&status)
}

fn is_valid_url(value: &str) -> bool {
    (value.starts_with("http://") || value.starts_with("https://"))
        && !value.contains(char::is_whitespace)
        && value
            .split_once("://")
            .is_some_and(|(_, rest)| !rest.is_empty())
}

/// Treats `None` and `""` as absent; anything else must be a URL.
fn check_optional_url(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    if let Some(url) = value {
        if !url.is_empty() && !is_valid_url(url) {
            errors.insert(field.to_string(), "Invalid url".to_string());
        }
    }
}

// ----------------------------------------------------------------------------
// Contact form
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub locale: Option<String>,
}

/// Validates the contact form and resolves the message locale.
pub fn validate_contact(payload: &ContactPayload) -> Result<Locale, AppError> {
    let mut errors = FieldErrors::new();

    let name_len = payload.name.chars().count();
    if name_len < 2 {
        errors.insert(
            "name".to_string(),
            "Name must be at least 2 characters".to_string(),
        );
    } else if name_len > 100 {
        errors.insert(
            "name".to_string(),
            "Name must be at most 100 characters".to_string(),
        );
    }

    if !is_valid_email(&payload.email) {
        errors.insert("email".to_string(), "Invalid email address".to_string());
    }

    let subject_len = payload.subject.chars().count();
    if subject_len < 5 {
        errors.insert(
            "subject".to_string(),
            "Subject must be at least 5 characters".to_string(),
        );
    } else if subject_len > 200 {
        errors.insert(
            "subject".to_string(),
            "Subject must be at most 200 characters".to_string(),
        );
    }

    let message_len = payload.message.chars().count();
    if message_len < 10 {
        errors.insert(
            "message".to_string(),
            "Message must be at least 10 characters".to_string(),
        );
    } else if message_len > 2000 {
        errors.insert(
            "message".to_string(),
            "Message must be at most 2000 characters".to_string(),
        );
    }

    let locale = match payload.locale.as_deref() {
        None | Some("") => Locale::default(),
        Some(tag) => match Locale::parse(tag) {
            Some(locale) => locale,
            None => {
                errors.insert("locale".to_string(), "Unsupported locale".to_string());
                Locale::default()
            }
        },
    };

    if errors.is_empty() {
        Ok(locale)
    } else {
        Err(AppError::Validation(errors))
    }
}

// ----------------------------------------------------------------------------
// Login
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    pub email: String,
    pub password: String,
}

pub fn validate_login(payload: &LoginPayload) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();
    if !is_valid_email(&payload.email) {
        errors.insert("email".to_string(), "Invalid email address".to_string());
    }
    if payload.password.chars().count() < 6 {
        errors.insert(
            "password".to_string(),
            "Password must be at least 6 characters".to_string(),
        );
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

// ----------------------------------------------------------------------------
// Projects
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotPayload {
    pub image_path: String,
    #[serde(default)]
    pub caption_ar: Option<String>,
    #[serde(default)]
    pub caption_en: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPayload {
    pub title_ar: String,
    pub title_en: String,
    pub summary_ar: String,
    pub summary_en: String,
    #[serde(default)]
    pub description_ar: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    pub slug: String,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub cover_image_path: Option<String>,
    #[serde(default)]
    pub features_ar: Vec<String>,
    #[serde(default)]
    pub features_en: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_true")]
    pub published: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    pub tech_ids: Vec<Uuid>,
    #[serde(default)]
    pub screenshots: Vec<ScreenshotPayload>,
}

fn default_true() -> bool {
    true
}

pub fn validate_project(payload: &ProjectPayload) -> Result<(), AppError> {
    let mut errors = FieldErrors::new();

    for (field, value) in [
        ("titleAr", &payload.title_ar),
        ("titleEn", &payload.title_en),
    ] {
        if value.chars().count() < 3 {
            errors.insert(
                field.to_string(),
                "Title must be at least 3 characters".to_string(),
            );
        }
    }

    for (field, value) in [
        ("summaryAr", &payload.summary_ar),
        ("summaryEn", &payload.summary_en),
    ] {
        if value.chars().count() < 10 {
            errors.insert(
                field.to_string(),
                "Summary must be at least 10 characters".to_string(),
            );
        }
    }

    if !is_valid_slug(&payload.slug) {
        errors.insert(
            "slug".to_string(),
            "Slug must be lowercase letters, numbers, and hyphens".to_string(),
        );
    }

    check_optional_url(&mut errors, "repoUrl", payload.repo_url.as_deref());
    check_optional_url(&mut errors, "liveUrl", payload.live_url.as_deref());

    for (index, screenshot) in payload.screenshots.iter().enumerate() {
        if screenshot.image_path.is_empty() {
            errors.insert(
                format!("screenshots[{}].imagePath", index),
                "Image path is required".to_string(),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

// ----------------------------------------------------------------------------
// Works
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkPayload {
    pub company_or_client: String,
    pub role_title_ar: String,
    pub role_title_en: String,
    #[serde(default)]
    pub description_ar: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default = "default_true")]
    pub published: bool,
    #[serde(default)]
    pub sort_order: i32,
}

/// Validates a work entry and parses its dates. An empty end date means
/// an ongoing engagement and becomes `None`.
pub fn validate_work(payload: &WorkPayload) -> Result<(NaiveDate, Option<NaiveDate>), AppError> {
    let mut errors = FieldErrors::new();

    let company_len = payload.company_or_client.chars().count();
    if company_len < 2 {
        errors.insert(
            "companyOrClient".to_string(),
            "Company must be at least 2 characters".to_string(),
        );
    } else if company_len > 200 {
        errors.insert(
            "companyOrClient".to_string(),
            "Company must be at most 200 characters".to_string(),
        );
    }

    for (field, value) in [
        ("roleTitleAr", &payload.role_title_ar),
        ("roleTitleEn", &payload.role_title_en),
    ] {
        let len = value.chars().count();
        if len < 3 {
            errors.insert(
                field.to_string(),
                "Role title must be at least 3 characters".to_string(),
            );
        } else if len > 200 {
            errors.insert(
                field.to_string(),
                "Role title must be at most 200 characters".to_string(),
            );
        }
    }

    for (field, value) in [
        ("descriptionAr", payload.description_ar.as_deref()),
        ("descriptionEn", payload.description_en.as_deref()),
    ] {
        if value.is_some_and(|v| v.chars().count() > 2000) {
            errors.insert(
                field.to_string(),
                "Description must be at most 2000 characters".to_string(),
            );
        }
    }

    let start_date = match NaiveDate::parse_from_str(&payload.start_date, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.insert(
                "startDate".to_string(),
                "Start date must be YYYY-MM-DD".to_string(),
            );
            None
        }
    };

    let end_date = match payload.end_date.as_deref() {
        None | Some("") => None,
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.insert(
                    "endDate".to_string(),
                    "End date must be YYYY-MM-DD".to_string(),
                );
                None
            }
        },
    };

    match (errors.is_empty(), start_date) {
        (true, Some(start)) => Ok((start, end_date)),
        _ => Err(AppError::Validation(errors)),
    }
}
