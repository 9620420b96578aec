//! Typed query layer over the connection pool. Route handlers never build
//! SQL themselves; they call into here and map `sqlx::Error` upward.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::models::{Message, Profile, Project, ProjectScreenshot, Tech, Work};
use crate::validation::{ProjectPayload, ScreenshotPayload, WorkPayload};

/// Form fields arrive as empty strings for cleared optional values.
fn none_if_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn none_if_empty_vec(values: &[String]) -> Option<&[String]> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

// ----------------------------------------------------------------------------
// Profiles
// ----------------------------------------------------------------------------

pub async fn find_profile_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE LOWER(email) = LOWER($1)")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// The site owner. With a single-admin setup this is the only row.
pub async fn find_admin_profile(pool: &PgPool) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "SELECT * FROM profiles WHERE role = 'admin' ORDER BY created_at ASC LIMIT 1",
    )
    .fetch_optional(pool)
    .await
}

pub async fn count_profiles(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
        .fetch_one(pool)
        .await
}

pub async fn insert_profile(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
    full_name: Option<&str>,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (email, password_hash, full_name, role)
        VALUES ($1, $2, $3, 'admin')
        RETURNING *
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(full_name)
    .fetch_one(pool)
    .await
}

pub async fn set_profile_cv_url(
    pool: &PgPool,
    profile_id: Uuid,
    cv_url: Option<&str>,
) -> Result<Profile, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        "UPDATE profiles SET cv_url = $2, updated_at = now() WHERE id = $1 RETURNING *",
    )
    .bind(profile_id)
    .bind(cv_url)
    .fetch_one(pool)
    .await
}

// ----------------------------------------------------------------------------
// Sessions
// ----------------------------------------------------------------------------

pub async fn insert_session(
    pool: &PgPool,
    profile_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO sessions (profile_id, token_hash, expires_at) VALUES ($1, $2, $3)")
        .bind(profile_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(pool)
        .await?;
    Ok(())
}

/// Resolves a live session to its profile. Expired and revoked sessions
/// resolve to nothing.
pub async fn find_profile_by_session(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<Profile>, sqlx::Error> {
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT p.* FROM profiles p
        JOIN sessions s ON s.profile_id = p.id
        WHERE s.token_hash = $1 AND NOT s.revoked AND s.expires_at > now()
        "#,
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
}

pub async fn revoke_session(pool: &PgPool, token_hash: &str) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE sessions SET revoked = true WHERE token_hash = $1")
        .bind(token_hash)
        .execute(pool)
        .await?;
    Ok(())
}

// ----------------------------------------------------------------------------
// Tech
// ----------------------------------------------------------------------------

pub async fn list_tech(pool: &PgPool) -> Result<Vec<Tech>, sqlx::Error> {
    sqlx::query_as::<_, Tech>("SELECT * FROM tech ORDER BY sort_order ASC, name ASC")
        .fetch_all(pool)
        .await
}

pub async fn tech_for_project(
    pool: &PgPool,
    project_id: Uuid,
) -> Result<Vec<Tech>, sqlx::Error> {
    let tech_ids: Vec<Uuid> =
        sqlx::query_scalar("SELECT tech_id FROM project_tech WHERE project_id = $1")
            .bind(project_id)
            .fetch_all(pool)
            .await?;

    if tech_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, Tech>("SELECT * FROM tech WHERE id = ANY($1) ORDER BY sort_order ASC, name ASC")
        .bind(&tech_ids)
        .fetch_all(pool)
        .await
}

#[derive(Debug, sqlx::FromRow)]
struct ProjectTechRow {
    project_id: Uuid,
    tech_id: Uuid,
}

/// Batched tech lookup for project lists. Two queries regardless of how
/// many projects are on the page.
pub async fn tech_map_for_projects(
    pool: &PgPool,
    project_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Tech>>, sqlx::Error> {
    if project_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = sqlx::query_as::<_, ProjectTechRow>(
        "SELECT project_id, tech_id FROM project_tech WHERE project_id = ANY($1)",
    )
    .bind(project_ids)
    .fetch_all(pool)
    .await?;

    let tech_ids: Vec<Uuid> = links.iter().map(|link| link.tech_id).collect();
    if tech_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let tech = sqlx::query_as::<_, Tech>(
        "SELECT * FROM tech WHERE id = ANY($1) ORDER BY sort_order ASC, name ASC",
    )
    .bind(&tech_ids)
    .fetch_all(pool)
    .await?;

    Ok(group_tech(&links, tech))
}

/// Walking `tech` in catalog order keeps every per-project stack sorted.
fn group_tech(links: &[ProjectTechRow], tech: Vec<Tech>) -> HashMap<Uuid, Vec<Tech>> {
    let mut linked_projects: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for link in links {
        linked_projects
            .entry(link.tech_id)
            .or_default()
            .push(link.project_id);
    }

    let mut map: HashMap<Uuid, Vec<Tech>> = HashMap::new();
    for item in tech {
        if let Some(project_ids) = linked_projects.get(&item.id) {
            for project_id in project_ids {
                map.entry(*project_id).or_default().push(item.clone());
            }
        }
    }
    map
}

// ----------------------------------------------------------------------------
// Projects
// ----------------------------------------------------------------------------

// Public listings must carry the published filter; the admin listing is
// the one place that sees everything.
const PUBLIC_PROJECTS_SQL: &str =
    "SELECT * FROM projects WHERE published = true ORDER BY sort_order ASC, created_at DESC";
const ALL_PROJECTS_SQL: &str = "SELECT * FROM projects ORDER BY sort_order ASC, created_at DESC";
const PUBLIC_PROJECT_BY_SLUG_SQL: &str =
    "SELECT * FROM projects WHERE slug = $1 AND published = true";

pub async fn list_projects(
    pool: &PgPool,
    published_only: bool,
) -> Result<Vec<Project>, sqlx::Error> {
    let sql = if published_only {
        PUBLIC_PROJECTS_SQL
    } else {
        ALL_PROJECTS_SQL
    };
    sqlx::query_as::<_, Project>(sql).fetch_all(pool).await
}

pub async fn find_published_project_by_slug(
    pool: &PgPool,
    slug: &str,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(PUBLIC_PROJECT_BY_SLUG_SQL)
        .bind(slug)
        .fetch_optional(pool)
        .await
}

pub async fn find_project_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn screenshots_for_project(
    pool: &PgPool,
    project_id: Uuid,
) -> Result<Vec<ProjectScreenshot>, sqlx::Error> {
    sqlx::query_as::<_, ProjectScreenshot>(
        "SELECT * FROM project_screenshots WHERE project_id = $1 ORDER BY sort_order ASC",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await
}

/// Creates the project row and its child collections in one transaction.
pub async fn create_project(
    pool: &PgPool,
    payload: &ProjectPayload,
) -> Result<Project, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (
            slug, title_ar, title_en, summary_ar, summary_en,
            description_ar, description_en, cover_image_path, repo_url, live_url,
            features_ar, features_en, featured, published, sort_order
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
        RETURNING *
        "#,
    )
    .bind(&payload.slug)
    .bind(&payload.title_ar)
    .bind(&payload.title_en)
    .bind(&payload.summary_ar)
    .bind(&payload.summary_en)
    .bind(none_if_empty(payload.description_ar.as_deref()))
    .bind(none_if_empty(payload.description_en.as_deref()))
    .bind(none_if_empty(payload.cover_image_path.as_deref()))
    .bind(none_if_empty(payload.repo_url.as_deref()))
    .bind(none_if_empty(payload.live_url.as_deref()))
    .bind(none_if_empty_vec(&payload.features_ar))
    .bind(none_if_empty_vec(&payload.features_en))
    .bind(payload.featured)
    .bind(payload.published)
    .bind(payload.sort_order)
    .fetch_one(&mut *tx)
    .await?;

    replace_project_children(&mut tx, project.id, &payload.tech_ids, &payload.screenshots)
        .await?;

    tx.commit().await?;
    Ok(project)
}

/// Updates the project row and replaces both child collections in one
/// transaction. Returns `None` when the project does not exist.
pub async fn update_project(
    pool: &PgPool,
    id: Uuid,
    payload: &ProjectPayload,
) -> Result<Option<Project>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects SET
            slug = $2, title_ar = $3, title_en = $4, summary_ar = $5, summary_en = $6,
            description_ar = $7, description_en = $8, cover_image_path = $9,
            repo_url = $10, live_url = $11, features_ar = $12, features_en = $13,
            featured = $14, published = $15, sort_order = $16, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.slug)
    .bind(&payload.title_ar)
    .bind(&payload.title_en)
    .bind(&payload.summary_ar)
    .bind(&payload.summary_en)
    .bind(none_if_empty(payload.description_ar.as_deref()))
    .bind(none_if_empty(payload.description_en.as_deref()))
    .bind(none_if_empty(payload.cover_image_path.as_deref()))
    .bind(none_if_empty(payload.repo_url.as_deref()))
    .bind(none_if_empty(payload.live_url.as_deref()))
    .bind(none_if_empty_vec(&payload.features_ar))
    .bind(none_if_empty_vec(&payload.features_en))
    .bind(payload.featured)
    .bind(payload.published)
    .bind(payload.sort_order)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(project) = updated else {
        return Ok(None);
    };

    replace_project_children(&mut tx, project.id, &payload.tech_ids, &payload.screenshots)
        .await?;

    tx.commit().await?;
    Ok(Some(project))
}

/// Drops and rebuilds the tech links and screenshots. Screenshot sort
/// order is re-densified from payload order.
async fn replace_project_children(
    tx: &mut Transaction<'_, Postgres>,
    project_id: Uuid,
    tech_ids: &[Uuid],
    screenshots: &[ScreenshotPayload],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM project_tech WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut **tx)
        .await?;

    sqlx::query("DELETE FROM project_screenshots WHERE project_id = $1")
        .bind(project_id)
        .execute(&mut **tx)
        .await?;

    for tech_id in tech_ids {
        sqlx::query(
            "INSERT INTO project_tech (project_id, tech_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(project_id)
        .bind(tech_id)
        .execute(&mut **tx)
        .await?;
    }

    for (sort_order, screenshot) in densify_screenshots(screenshots) {
        sqlx::query(
            r#"
            INSERT INTO project_screenshots (project_id, image_path, caption_ar, caption_en, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(project_id)
        .bind(&screenshot.image_path)
        .bind(none_if_empty(screenshot.caption_ar.as_deref()))
        .bind(none_if_empty(screenshot.caption_en.as_deref()))
        .bind(sort_order)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}

/// Payload position wins; whatever sort_order values the client sent are
/// replaced by a dense 0-based sequence.
fn densify_screenshots(screenshots: &[ScreenshotPayload]) -> Vec<(i32, &ScreenshotPayload)> {
    screenshots
        .iter()
        .enumerate()
        .map(|(index, screenshot)| (index as i32, screenshot))
        .collect()
}

/// Removes screenshots and tech links explicitly before the project row,
/// all in one transaction. The schema cascades too, but the cleanup does
/// not depend on it.
pub async fn delete_project(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM project_screenshots WHERE project_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query("DELETE FROM project_tech WHERE project_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM projects WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(result.rows_affected() > 0)
}

// ----------------------------------------------------------------------------
// Works
// ----------------------------------------------------------------------------

const PUBLIC_WORKS_SQL: &str =
    "SELECT * FROM works WHERE published = true ORDER BY start_date DESC";

pub async fn list_published_works(pool: &PgPool) -> Result<Vec<Work>, sqlx::Error> {
    sqlx::query_as::<_, Work>(PUBLIC_WORKS_SQL)
        .fetch_all(pool)
        .await
}

pub async fn list_all_works(pool: &PgPool) -> Result<Vec<Work>, sqlx::Error> {
    sqlx::query_as::<_, Work>("SELECT * FROM works ORDER BY sort_order ASC, start_date DESC")
        .fetch_all(pool)
        .await
}

pub async fn insert_work(
    pool: &PgPool,
    payload: &WorkPayload,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<Work, sqlx::Error> {
    sqlx::query_as::<_, Work>(
        r#"
        INSERT INTO works (
            company_or_client, role_title_ar, role_title_en,
            description_ar, description_en, start_date, end_date, published, sort_order
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(&payload.company_or_client)
    .bind(&payload.role_title_ar)
    .bind(&payload.role_title_en)
    .bind(none_if_empty(payload.description_ar.as_deref()))
    .bind(none_if_empty(payload.description_en.as_deref()))
    .bind(start_date)
    .bind(end_date)
    .bind(payload.published)
    .bind(payload.sort_order)
    .fetch_one(pool)
    .await
}

pub async fn update_work(
    pool: &PgPool,
    id: Uuid,
    payload: &WorkPayload,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
) -> Result<Option<Work>, sqlx::Error> {
    sqlx::query_as::<_, Work>(
        r#"
        UPDATE works SET
            company_or_client = $2, role_title_ar = $3, role_title_en = $4,
            description_ar = $5, description_en = $6, start_date = $7, end_date = $8,
            published = $9, sort_order = $10, updated_at = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(&payload.company_or_client)
    .bind(&payload.role_title_ar)
    .bind(&payload.role_title_en)
    .bind(none_if_empty(payload.description_ar.as_deref()))
    .bind(none_if_empty(payload.description_en.as_deref()))
    .bind(start_date)
    .bind(end_date)
    .bind(payload.published)
    .bind(payload.sort_order)
    .fetch_optional(pool)
    .await
}

pub async fn delete_work(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM works WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ----------------------------------------------------------------------------
// Messages
// ----------------------------------------------------------------------------

pub async fn insert_message(
    pool: &PgPool,
    name: &str,
    email: &str,
    subject: &str,
    message: &str,
    locale: &str,
    ip_hash: Option<&str>,
) -> Result<Message, sqlx::Error> {
    sqlx::query_as::<_, Message>(
        r#"
        INSERT INTO messages (name, email, subject, message, locale, ip_hash)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(subject)
    .bind(message)
    .bind(locale)
    .bind(ip_hash)
    .fetch_one(pool)
    .await
}

pub async fn list_messages(
    pool: &PgPool,
    status: Option<&str>,
) -> Result<Vec<Message>, sqlx::Error> {
    match status {
        Some(status) => {
            sqlx::query_as::<_, Message>(
                "SELECT * FROM messages WHERE status = $1 ORDER BY created_at DESC",
            )
            .bind(status)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as::<_, Message>("SELECT * FROM messages ORDER BY created_at DESC")
                .fetch_all(pool)
                .await
        }
    }
}

pub async fn set_message_status(
    pool: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<Option<Message>, sqlx::Error> {
    sqlx::query_as::<_, Message>("UPDATE messages SET status = $2 WHERE id = $1 RETURNING *")
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
}

pub async fn delete_message(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM messages WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ----------------------------------------------------------------------------
// Dashboard counts
// ----------------------------------------------------------------------------

pub async fn count_projects(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
        .fetch_one(pool)
        .await
}

pub async fn count_works(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM works")
        .fetch_one(pool)
        .await
}

pub async fn count_new_messages(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM messages WHERE status = 'new'")
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_none_if_empty() {
        assert_eq!(none_if_empty(None), None);
        assert_eq!(none_if_empty(Some("")), None);
        assert_eq!(none_if_empty(Some("value")), Some("value"));
    }

    #[test]
    fn test_none_if_empty_vec() {
        assert_eq!(none_if_empty_vec(&[]), None);
        let features = vec!["offline mode".to_string()];
        assert_eq!(none_if_empty_vec(&features), Some(features.as_slice()));
    }

    fn tech_item(name: &str, sort_order: i32) -> Tech {
        Tech {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: "backend".to_string(),
            icon_url: None,
            sort_order,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_group_tech_keeps_catalog_order_per_project() {
        let rust = tech_item("Rust", 0);
        let postgres = tech_item("PostgreSQL", 1);
        let flutter = tech_item("Flutter", 2);

        let project_a = Uuid::new_v4();
        let project_b = Uuid::new_v4();

        // Link rows in arbitrary order.
        let links = vec![
            ProjectTechRow {
                project_id: project_a,
                tech_id: flutter.id,
            },
            ProjectTechRow {
                project_id: project_b,
                tech_id: postgres.id,
            },
            ProjectTechRow {
                project_id: project_a,
                tech_id: rust.id,
            },
        ];

        // Catalog arrives pre-sorted, as the query orders it.
        let map = group_tech(&links, vec![rust.clone(), postgres.clone(), flutter.clone()]);

        let stack_a: Vec<&str> = map[&project_a].iter().map(|t| t.name.as_str()).collect();
        assert_eq!(stack_a, vec!["Rust", "Flutter"]);

        let stack_b: Vec<&str> = map[&project_b].iter().map(|t| t.name.as_str()).collect();
        assert_eq!(stack_b, vec!["PostgreSQL"]);
    }

    #[test]
    fn test_group_tech_empty_inputs() {
        let map = group_tech(&[], vec![tech_item("Rust", 0)]);
        assert!(map.is_empty());
    }

    fn screenshot(path: &str, sort_order: i32) -> ScreenshotPayload {
        ScreenshotPayload {
            image_path: path.to_string(),
            caption_ar: None,
            caption_en: None,
            sort_order,
        }
    }

    #[test]
    fn test_screenshot_order_is_densified_from_payload_position() {
        // Client-sent sort_order values are stale after a reorder; only
        // the payload position counts.
        let screenshots = vec![
            screenshot("screenshots/login.png", 9),
            screenshot("screenshots/feed.png", 2),
            screenshot("screenshots/settings.png", 2),
        ];

        let pairs: Vec<(i32, &str)> = densify_screenshots(&screenshots)
            .into_iter()
            .map(|(order, s)| (order, s.image_path.as_str()))
            .collect();

        assert_eq!(
            pairs,
            vec![
                (0, "screenshots/login.png"),
                (1, "screenshots/feed.png"),
                (2, "screenshots/settings.png"),
            ]
        );
    }

    #[test]
    fn test_densify_screenshots_empty() {
        assert!(densify_screenshots(&[]).is_empty());
    }

    #[test]
    fn test_public_queries_exclude_unpublished_rows() {
        for sql in [
            PUBLIC_PROJECTS_SQL,
            PUBLIC_PROJECT_BY_SLUG_SQL,
            PUBLIC_WORKS_SQL,
        ] {
            assert!(sql.contains("published = true"), "missing filter: {}", sql);
        }
        // The admin listing is deliberately unfiltered.
        assert!(!ALL_PROJECTS_SQL.contains("published"));
    }
}
