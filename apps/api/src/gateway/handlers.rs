//! Axum route handlers for the Generation API.
//!
//! Results are applied to the store only after the call succeeds, through
//! the same update-by-id helpers manual edits use — so a result that lands
//! after the user deleted the target entity is dropped silently.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::gateway::drafts;
use crate::gateway::evaluate::{evaluate_portfolio, PortfolioEvaluation};
use crate::models::projection::PortfolioProjection;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutMeRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutMeResponse {
    pub about_me: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SkillSuggestionRequest {
    /// Comma-separated skill list; defaults to the session's current skills.
    #[serde(default)]
    pub skills: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSuggestionResponse {
    pub skill_tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExperienceDescriptionRequest {
    pub tasks: String,
}

#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub description: String,
    /// False when the target entity was deleted before the result arrived.
    pub applied: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImageResponse {
    pub image_url: String,
    pub applied: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Deserialize)]
pub struct TestimonialDraftRequest {
    pub name: String,
    pub role: String,
    pub traits: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialDraftResponse {
    pub testimonial_text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/portfolio/:session/generate/about-me
///
/// Drafts an about-me blurb from resume text and applies it to the store on
/// success. On failure the field keeps its pre-call value.
pub async fn handle_generate_about_me(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<AboutMeRequest>,
) -> Result<Json<AboutMeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resumeText cannot be empty".to_string(),
        ));
    }
    let store = state.sessions.get_or_create(&session);
    let about_me = drafts::draft_about_me(state.llm.as_ref(), &request.resume_text).await?;
    store.set_about_me(about_me.clone());
    Ok(Json(AboutMeResponse { about_me }))
}

/// POST /api/v1/portfolio/:session/generate/skill-suggestions
///
/// Suggestions are de-duplicated (case-insensitively) against the session's
/// existing skills before being returned; nothing is inserted here.
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<SkillSuggestionRequest>,
) -> Result<Json<SkillSuggestionResponse>, AppError> {
    let store = state.sessions.get_or_create(&session);
    let skills = match request.skills {
        Some(s) if !s.trim().is_empty() => s,
        _ => store
            .snapshot()
            .skills
            .iter()
            .map(|s| s.name.clone())
            .collect::<Vec<_>>()
            .join(", "),
    };
    if skills.trim().is_empty() {
        return Err(AppError::Validation("skills cannot be empty".to_string()));
    }

    let suggested = drafts::suggest_skill_tags(state.llm.as_ref(), &skills).await?;
    // Drop tags already in the session and case-variant repeats within the
    // response itself, keeping first occurrences in model order.
    let mut seen = std::collections::HashSet::new();
    let skill_tags = suggested
        .into_iter()
        .filter(|tag| !store.has_skill(tag) && seen.insert(tag.to_lowercase()))
        .collect();
    Ok(Json(SkillSuggestionResponse { skill_tags }))
}

/// POST /api/v1/portfolio/:session/experiences/:id/generate-description
pub async fn handle_generate_experience_description(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, String)>,
    Json(request): Json<ExperienceDescriptionRequest>,
) -> Result<Json<DescriptionResponse>, AppError> {
    if request.tasks.trim().is_empty() {
        return Err(AppError::Validation("tasks cannot be empty".to_string()));
    }
    let store = state.sessions.get_or_create(&session);
    let experience = store
        .snapshot()
        .experiences
        .into_iter()
        .find(|e| e.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Experience {id} not found")))?;

    let description = drafts::draft_experience_description(
        state.llm.as_ref(),
        &experience.role,
        &experience.company,
        &request.tasks,
    )
    .await?;
    let applied = store.set_experience_description(&id, description.clone());
    Ok(Json(DescriptionResponse {
        description,
        applied,
    }))
}

/// POST /api/v1/portfolio/:session/projects/:id/generate-description
pub async fn handle_generate_project_description(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, String)>,
) -> Result<Json<DescriptionResponse>, AppError> {
    let store = state.sessions.get_or_create(&session);
    let project = store
        .snapshot()
        .projects
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    let description = drafts::draft_project_description(
        state.llm.as_ref(),
        &project.title,
        &project.tech_stack,
    )
    .await?;
    let applied = store.set_project_description(&id, description.clone());
    Ok(Json(DescriptionResponse {
        description,
        applied,
    }))
}

/// POST /api/v1/portfolio/:session/projects/:id/generate-image
///
/// Fails explicitly if the service returns no image payload.
pub async fn handle_generate_project_image(
    State(state): State<AppState>,
    Path((session, id)): Path<(String, String)>,
) -> Result<Json<ProjectImageResponse>, AppError> {
    let store = state.sessions.get_or_create(&session);
    let project = store
        .snapshot()
        .projects
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Project {id} not found")))?;

    let image_url = drafts::generate_project_image(
        state.llm.as_ref(),
        &project.title,
        &project.description,
    )
    .await?;
    let applied = store.set_project_image(&id, image_url.clone());
    Ok(Json(ProjectImageResponse { image_url, applied }))
}

/// POST /api/v1/portfolio/:session/generate/cover-letter
///
/// Purely a formatting concern: the letter is returned, never stored.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "jobDescription cannot be empty".to_string(),
        ));
    }
    let store = state.sessions.get_or_create(&session);
    let projection = PortfolioProjection::of(&store.snapshot());
    let cover_letter = drafts::draft_cover_letter(
        state.llm.as_ref(),
        &request.job_description,
        &projection,
    )
    .await?;
    Ok(Json(CoverLetterResponse { cover_letter }))
}

/// POST /api/v1/portfolio/:session/generate/testimonial
pub async fn handle_generate_testimonial(
    State(state): State<AppState>,
    Path(session): Path<String>,
    Json(request): Json<TestimonialDraftRequest>,
) -> Result<Json<TestimonialDraftResponse>, AppError> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    // Session is touched only to keep get-or-create semantics uniform.
    state.sessions.get_or_create(&session);
    let testimonial_text = drafts::draft_testimonial(
        state.llm.as_ref(),
        &request.name,
        &request.role,
        &request.traits,
    )
    .await?;
    Ok(Json(TestimonialDraftResponse { testimonial_text }))
}

/// POST /api/v1/portfolio/:session/generate/evaluation
pub async fn handle_evaluate_portfolio(
    State(state): State<AppState>,
    Path(session): Path<String>,
) -> Result<Json<PortfolioEvaluation>, AppError> {
    let store = state.sessions.get_or_create(&session);
    let projection = PortfolioProjection::of(&store.snapshot());
    let evaluation = evaluate_portfolio(state.llm.as_ref(), &projection).await?;
    Ok(Json(evaluation))
}
