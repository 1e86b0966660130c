//! Axum route handlers for the Portfolio Store: field setters, list-item
//! helpers, whole-document replace, and the publish/view pair.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::portfolio::{
    Contact, Experience, PortfolioDocument, Project, Skill, Testimonial, ThemeSettings,
};
use crate::state::AppState;
use crate::storage::PublishedPortfolio;
use crate::store::{ExperienceFields, ProjectFields, TestimonialFields};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub about_me: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SkillRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RemoveResponse {
    pub removed: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub published_at: chrono::DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RevisionQuery {
    /// Long-poll: hold the request until the revision advances past this.
    #[serde(default)]
    pub after: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct RevisionResponse {
    pub revision: u64,
}

/// Upper bound on a long-poll before answering with the current revision.
const REVISION_POLL_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(25);

// ────────────────────────────────────────────────────────────────────────────
// Document handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/portfolio/:session
///
/// Returns the session's current snapshot, seeding a fresh document on
/// first access.
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Json<PortfolioDocument> {
    Json(state.sessions.get_or_create(&session).snapshot())
}

/// PUT /api/v1/portfolio/:session
///
/// Atomically replaces the whole document (session restore).
pub async fn handle_replace_portfolio(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(document): Json<PortfolioDocument>,
) -> Result<Json<PortfolioDocument>, AppError> {
    let store = state.sessions.get_or_create(&session);
    store.replace_all(document)?;
    Ok(Json(store.snapshot()))
}

/// PATCH /api/v1/portfolio/:session/profile
pub async fn handle_patch_profile(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(patch): Json<ProfilePatch>,
) -> Json<PortfolioDocument> {
    let store = state.sessions.get_or_create(&session);
    if let Some(name) = patch.name {
        store.set_name(name);
    }
    if let Some(headline) = patch.headline {
        store.set_headline(headline);
    }
    if let Some(about_me) = patch.about_me {
        store.set_about_me(about_me);
    }
    Json(store.snapshot())
}

/// GET /api/v1/portfolio/:session/revision
///
/// The change-notification surface for live previews. Without `after` it
/// answers immediately with the current revision; with `?after=N` it holds
/// the request until a mutation moves the revision past N (or the poll
/// window elapses), then answers with whatever is current. Notifications
/// collapse under load — the caller re-reads the snapshot, it does not
/// replay edits.
pub async fn handle_get_revision(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Query(query): Query<RevisionQuery>,
) -> Json<RevisionResponse> {
    let store = state.sessions.get_or_create(&session);
    if let Some(after) = query.after {
        let mut rx = store.subscribe();
        let advanced = async {
            loop {
                if *rx.borrow_and_update() > after {
                    break;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        };
        let _ = tokio::time::timeout(REVISION_POLL_TIMEOUT, advanced).await;
    }
    Json(RevisionResponse {
        revision: store.revision(),
    })
}

/// PUT /api/v1/portfolio/:session/contact
pub async fn handle_put_contact(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(contact): Json<Contact>,
) -> Json<PortfolioDocument> {
    let store = state.sessions.get_or_create(&session);
    store.set_contact(contact);
    Json(store.snapshot())
}

/// PUT /api/v1/portfolio/:session/theme
pub async fn handle_put_theme(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(theme): Json<ThemeSettings>,
) -> Json<PortfolioDocument> {
    let store = state.sessions.get_or_create(&session);
    store.set_theme(theme);
    Json(store.snapshot())
}

// ────────────────────────────────────────────────────────────────────────────
// Whole-list setters
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/portfolio/:session/projects
pub async fn handle_put_projects(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(projects): Json<Vec<Project>>,
) -> Result<Json<PortfolioDocument>, AppError> {
    let store = state.sessions.get_or_create(&session);
    store.set_projects(projects)?;
    Ok(Json(store.snapshot()))
}

/// PUT /api/v1/portfolio/:session/skills
pub async fn handle_put_skills(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(skills): Json<Vec<Skill>>,
) -> Result<Json<PortfolioDocument>, AppError> {
    let store = state.sessions.get_or_create(&session);
    store.set_skills(skills)?;
    Ok(Json(store.snapshot()))
}

/// PUT /api/v1/portfolio/:session/experiences
pub async fn handle_put_experiences(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(experiences): Json<Vec<Experience>>,
) -> Result<Json<PortfolioDocument>, AppError> {
    let store = state.sessions.get_or_create(&session);
    store.set_experiences(experiences)?;
    Ok(Json(store.snapshot()))
}

/// PUT /api/v1/portfolio/:session/testimonials
pub async fn handle_put_testimonials(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(testimonials): Json<Vec<Testimonial>>,
) -> Result<Json<PortfolioDocument>, AppError> {
    let store = state.sessions.get_or_create(&session);
    store.set_testimonials(testimonials)?;
    Ok(Json(store.snapshot()))
}

// ────────────────────────────────────────────────────────────────────────────
// Project handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/portfolio/:session/projects
pub async fn handle_add_project(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(fields): Json<ProjectFields>,
) -> Result<Json<Project>, AppError> {
    if fields.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    let project = state.sessions.get_or_create(&session).add_project(fields)?;
    Ok(Json(project))
}

/// PATCH /api/v1/portfolio/:session/projects/:id
///
/// Replaces the project's fields, keeping id and position. Unknown id is a
/// no-op and returns null.
pub async fn handle_update_project(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, String)>,
    Json(fields): Json<ProjectFields>,
) -> Result<Json<Option<Project>>, AppError> {
    if fields.title.trim().is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }
    let updated = state
        .sessions
        .get_or_create(&session)
        .update_project(&id, fields)?;
    Ok(Json(updated))
}

/// DELETE /api/v1/portfolio/:session/projects/:id
pub async fn handle_remove_project(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, String)>,
) -> Json<RemoveResponse> {
    let removed = state.sessions.get_or_create(&session).remove_project(&id);
    Json(RemoveResponse { removed })
}

// ────────────────────────────────────────────────────────────────────────────
// Skill handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/portfolio/:session/skills
///
/// Rejects names that collide with an existing skill under case-insensitive
/// comparison, leaving the list unchanged.
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<SkillRequest>,
) -> Result<Json<Skill>, AppError> {
    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    let skill = state.sessions.get_or_create(&session).add_skill(name)?;
    Ok(Json(skill))
}

/// DELETE /api/v1/portfolio/:session/skills/:id
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, String)>,
) -> Json<RemoveResponse> {
    let removed = state.sessions.get_or_create(&session).remove_skill(&id);
    Json(RemoveResponse { removed })
}

// ────────────────────────────────────────────────────────────────────────────
// Experience handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/portfolio/:session/experiences
pub async fn handle_add_experience(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(fields): Json<ExperienceFields>,
) -> Result<Json<Experience>, AppError> {
    if fields.role.trim().is_empty() || fields.company.trim().is_empty() {
        return Err(AppError::Validation(
            "role and company cannot be empty".to_string(),
        ));
    }
    let experience = state.sessions.get_or_create(&session).add_experience(fields);
    Ok(Json(experience))
}

/// PATCH /api/v1/portfolio/:session/experiences/:id
///
/// Required fields are checked the same way the add path checks them; an
/// edit cannot blank out role or company.
pub async fn handle_update_experience(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, String)>,
    Json(fields): Json<ExperienceFields>,
) -> Result<Json<Option<Experience>>, AppError> {
    if fields.role.trim().is_empty() || fields.company.trim().is_empty() {
        return Err(AppError::Validation(
            "role and company cannot be empty".to_string(),
        ));
    }
    let updated = state
        .sessions
        .get_or_create(&session)
        .update_experience(&id, fields);
    Ok(Json(updated))
}

/// DELETE /api/v1/portfolio/:session/experiences/:id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, String)>,
) -> Json<RemoveResponse> {
    let removed = state
        .sessions
        .get_or_create(&session)
        .remove_experience(&id);
    Json(RemoveResponse { removed })
}

// ────────────────────────────────────────────────────────────────────────────
// Testimonial handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/portfolio/:session/testimonials
pub async fn handle_add_testimonial(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(fields): Json<TestimonialFields>,
) -> Result<Json<Testimonial>, AppError> {
    if fields.name.trim().is_empty() || fields.text.trim().is_empty() {
        return Err(AppError::Validation(
            "name and text cannot be empty".to_string(),
        ));
    }
    let testimonial = state
        .sessions
        .get_or_create(&session)
        .add_testimonial(fields);
    Ok(Json(testimonial))
}

/// PATCH /api/v1/portfolio/:session/testimonials/:id
pub async fn handle_update_testimonial(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, String)>,
    Json(fields): Json<TestimonialFields>,
) -> Result<Json<Option<Testimonial>>, AppError> {
    if fields.name.trim().is_empty() || fields.text.trim().is_empty() {
        return Err(AppError::Validation(
            "name and text cannot be empty".to_string(),
        ));
    }
    let updated = state
        .sessions
        .get_or_create(&session)
        .update_testimonial(&id, fields);
    Ok(Json(updated))
}

/// DELETE /api/v1/portfolio/:session/testimonials/:id
pub async fn handle_remove_testimonial(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, String)>,
) -> Json<RemoveResponse> {
    let removed = state
        .sessions
        .get_or_create(&session)
        .remove_testimonial(&id);
    Json(RemoveResponse { removed })
}

// ────────────────────────────────────────────────────────────────────────────
// Publish / read-only view
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/portfolio/:session/publish
///
/// Serializes the full current snapshot into the session's publish slot.
pub async fn handle_publish(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<PublishResponse>, AppError> {
    let document = state.sessions.get_or_create(&session).snapshot();
    let snapshot = PublishedPortfolio {
        document,
        published_at: Utc::now(),
    };
    state.storage.save(&session, &snapshot).await?;
    tracing::info!("Published portfolio for session {session}");
    Ok(Json(PublishResponse {
        published_at: snapshot.published_at,
    }))
}

/// GET /api/v1/portfolio/:session/published
///
/// The read-only view. Reads only the publish slot, never the live store;
/// missing and corrupt slots surface as distinct user-visible conditions.
pub async fn handle_view_published(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<PublishedPortfolio>, AppError> {
    let snapshot = state.storage.load(&session).await?;
    Ok(Json(snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::gateway::testing::CannedService;
    use crate::storage::MemorySnapshotStore;
    use crate::store::ids::SequentialIds;
    use crate::store::sessions::SessionManager;

    fn test_state() -> (AppState, Arc<MemorySnapshotStore>) {
        let storage = Arc::new(MemorySnapshotStore::new());
        let state = AppState {
            sessions: SessionManager::new(Arc::new(SequentialIds::new())),
            llm: Arc::new(CannedService::text("unused")),
            storage: storage.clone(),
            config: Config {
                gemini_api_key: "test-key".to_string(),
                redis_url: "redis://127.0.0.1/".to_string(),
                port: 0,
                rust_log: "info".to_string(),
            },
        };
        (state, storage)
    }

    #[tokio::test]
    async fn test_get_seeds_and_patch_profile_mutates() {
        let (state, _) = test_state();
        let doc = handle_get_portfolio(State(state.clone()), Path("s".to_string()))
            .await
            .0;
        assert_eq!(doc.projects.len(), 2);

        let doc = handle_patch_profile(
            State(state.clone()),
            Path("s".to_string()),
            Json(ProfilePatch {
                name: Some("Ada".to_string()),
                headline: None,
                about_me: Some("New about".to_string()),
            }),
        )
        .await
        .0;
        assert_eq!(doc.name, "Ada");
        assert_eq!(doc.about_me, "New about");
        assert_eq!(doc.headline, "Full-Stack Developer | AI Enthusiast");
    }

    #[tokio::test]
    async fn test_add_skill_duplicate_is_field_level_error() {
        let (state, _) = test_state();
        // Seed already contains "JavaScript".
        handle_get_portfolio(State(state.clone()), Path("s".to_string())).await;

        let result = handle_add_skill(
            State(state.clone()),
            Path("s".to_string()),
            Json(SkillRequest {
                name: "javascript".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let doc = state.sessions.get_or_create("s").snapshot();
        assert_eq!(doc.skills.len(), 8);
    }

    #[tokio::test]
    async fn test_add_project_rejects_empty_title_and_bad_link() {
        let (state, _) = test_state();
        let result = handle_add_project(
            State(state.clone()),
            Path("s".to_string()),
            Json(ProjectFields {
                title: "  ".to_string(),
                tech_stack: "Rust".to_string(),
                description: "d".to_string(),
                link: None,
                image_url: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = handle_add_project(
            State(state.clone()),
            Path("s".to_string()),
            Json(ProjectFields {
                title: "App".to_string(),
                tech_stack: "Rust".to_string(),
                description: "d".to_string(),
                link: Some("nope".to_string()),
                image_url: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_experience_rejects_blanked_required_fields() {
        let (state, _) = test_state();
        let store = state.sessions.get_or_create("s");
        let experience = store.add_experience(ExperienceFields {
            role: "Dev".to_string(),
            company: "Acme".to_string(),
            period: "2021".to_string(),
            description: "Built APIs.".to_string(),
        });

        let result = handle_update_experience(
            State(state.clone()),
            Path(("s".to_string(), experience.id.clone())),
            Json(ExperienceFields {
                role: "  ".to_string(),
                company: String::new(),
                period: "2021".to_string(),
                description: "Built APIs.".to_string(),
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        // An edit cannot blank out what the add path requires.
        let doc = store.snapshot();
        assert_eq!(doc.experiences[0].role, "Dev");
        assert_eq!(doc.experiences[0].company, "Acme");
    }

    #[tokio::test]
    async fn test_update_testimonial_rejects_blanked_required_fields() {
        let (state, _) = test_state();
        let store = state.sessions.get_or_create("s");
        let testimonial = store.add_testimonial(TestimonialFields {
            name: "Jane Doe".to_string(),
            role: "CTO".to_string(),
            text: "Great work.".to_string(),
            avatar_url: None,
        });

        let result = handle_update_testimonial(
            State(state.clone()),
            Path(("s".to_string(), testimonial.id.clone())),
            Json(TestimonialFields {
                name: "Jane Doe".to_string(),
                role: "CTO".to_string(),
                text: "  ".to_string(),
                avatar_url: None,
            }),
        )
        .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(store.snapshot().testimonials[0].text, "Great work.");
    }

    #[tokio::test]
    async fn test_revision_endpoint_reports_current_revision() {
        let (state, _) = test_state();
        let store = state.sessions.get_or_create("s");
        store.set_name("Ada".to_string());

        let response = handle_get_revision(
            State(state.clone()),
            Path("s".to_string()),
            Query(RevisionQuery { after: None }),
        )
        .await
        .0;
        assert_eq!(response.revision, store.revision());
    }

    #[tokio::test]
    async fn test_revision_long_poll_wakes_on_mutation() {
        let (state, _) = test_state();
        let store = state.sessions.get_or_create("s");
        let before = store.revision();

        let poll = tokio::spawn(handle_get_revision(
            State(state.clone()),
            Path("s".to_string()),
            Query(RevisionQuery {
                after: Some(before),
            }),
        ));

        tokio::task::yield_now().await;
        store.set_name("Ada".to_string());

        let response = poll.await.unwrap().0;
        assert!(response.revision > before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_revision_long_poll_times_out_to_current() {
        let (state, _) = test_state();
        let store = state.sessions.get_or_create("s");
        let current = store.revision();

        // No mutation arrives; the poll window elapses and the handler
        // answers with the unchanged revision.
        let response = handle_get_revision(
            State(state),
            Path("s".to_string()),
            Query(RevisionQuery {
                after: Some(current),
            }),
        )
        .await
        .0;
        assert_eq!(response.revision, current);
    }

    #[tokio::test]
    async fn test_publish_then_view_round_trips() {
        let (state, _) = test_state();
        let store = state.sessions.get_or_create("s");
        store.set_name("Ada".to_string());

        handle_publish(State(state.clone()), Path("s".to_string()))
            .await
            .unwrap();

        let view = handle_view_published(State(state.clone()), Path("s".to_string()))
            .await
            .unwrap()
            .0;
        assert_eq!(view.document.name, "Ada");

        // Later edits are not visible until the next publish.
        store.set_name("Grace".to_string());
        let view = handle_view_published(State(state.clone()), Path("s".to_string()))
            .await
            .unwrap()
            .0;
        assert_eq!(view.document.name, "Ada");
    }

    #[tokio::test]
    async fn test_view_unpublished_session_is_not_published() {
        let (state, _) = test_state();
        let result = handle_view_published(State(state), Path("ghost".to_string())).await;
        assert!(matches!(result, Err(AppError::NotPublished)));
    }

    #[tokio::test]
    async fn test_view_corrupt_slot_is_corrupted_error() {
        let (state, storage) = test_state();
        storage.insert_raw("s", "{broken");
        let result = handle_view_published(State(state), Path("s".to_string())).await;
        assert!(matches!(result, Err(AppError::Corrupted(_))));
    }
}
