pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::gateway::handlers as generation;
use crate::state::AppState;
use crate::store::handlers as portfolio;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Portfolio store
        .route(
            "/api/v1/portfolio/:session",
            get(portfolio::handle_get_portfolio).put(portfolio::handle_replace_portfolio),
        )
        .route(
            "/api/v1/portfolio/:session/profile",
            patch(portfolio::handle_patch_profile),
        )
        .route(
            "/api/v1/portfolio/:session/revision",
            get(portfolio::handle_get_revision),
        )
        .route(
            "/api/v1/portfolio/:session/contact",
            put(portfolio::handle_put_contact),
        )
        .route(
            "/api/v1/portfolio/:session/theme",
            put(portfolio::handle_put_theme),
        )
        .route(
            "/api/v1/portfolio/:session/projects",
            post(portfolio::handle_add_project).put(portfolio::handle_put_projects),
        )
        .route(
            "/api/v1/portfolio/:session/projects/:id",
            patch(portfolio::handle_update_project).delete(portfolio::handle_remove_project),
        )
        .route(
            "/api/v1/portfolio/:session/skills",
            post(portfolio::handle_add_skill).put(portfolio::handle_put_skills),
        )
        .route(
            "/api/v1/portfolio/:session/skills/:id",
            delete(portfolio::handle_remove_skill),
        )
        .route(
            "/api/v1/portfolio/:session/experiences",
            post(portfolio::handle_add_experience).put(portfolio::handle_put_experiences),
        )
        .route(
            "/api/v1/portfolio/:session/experiences/:id",
            patch(portfolio::handle_update_experience)
                .delete(portfolio::handle_remove_experience),
        )
        .route(
            "/api/v1/portfolio/:session/testimonials",
            post(portfolio::handle_add_testimonial).put(portfolio::handle_put_testimonials),
        )
        .route(
            "/api/v1/portfolio/:session/testimonials/:id",
            patch(portfolio::handle_update_testimonial)
                .delete(portfolio::handle_remove_testimonial),
        )
        // Publish / read-only view
        .route(
            "/api/v1/portfolio/:session/publish",
            post(portfolio::handle_publish),
        )
        .route(
            "/api/v1/portfolio/:session/published",
            get(portfolio::handle_view_published),
        )
        // Generation gateway
        .route(
            "/api/v1/portfolio/:session/generate/about-me",
            post(generation::handle_generate_about_me),
        )
        .route(
            "/api/v1/portfolio/:session/generate/skill-suggestions",
            post(generation::handle_suggest_skills),
        )
        .route(
            "/api/v1/portfolio/:session/generate/cover-letter",
            post(generation::handle_generate_cover_letter),
        )
        .route(
            "/api/v1/portfolio/:session/generate/testimonial",
            post(generation::handle_generate_testimonial),
        )
        .route(
            "/api/v1/portfolio/:session/generate/evaluation",
            post(generation::handle_evaluate_portfolio),
        )
        .route(
            "/api/v1/portfolio/:session/projects/:id/generate-description",
            post(generation::handle_generate_project_description),
        )
        .route(
            "/api/v1/portfolio/:session/projects/:id/generate-image",
            post(generation::handle_generate_project_image),
        )
        .route(
            "/api/v1/portfolio/:session/experiences/:id/generate-description",
            post(generation::handle_generate_experience_description),
        )
        .with_state(state)
}
