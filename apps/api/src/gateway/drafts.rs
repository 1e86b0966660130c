//! Text and image drafting operations. Each takes a narrow input, renders a
//! prompt, and returns the parsed result; none of them touch the store.

use crate::gateway::{parse_json_payload, prompts, GenerativeService};
use crate::llm_client::GenerationError;
use crate::models::projection::PortfolioProjection;

/// Drafts a short about-me blurb from free-form resume text.
pub async fn draft_about_me(
    llm: &dyn GenerativeService,
    resume_text: &str,
) -> Result<String, GenerationError> {
    let prompt = prompts::ABOUT_ME_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
    llm.generate_text(prompts::ABOUT_ME_SYSTEM, &prompt).await
}

/// Suggests skill tags for a comma-separated skill list. Callers must
/// de-duplicate against existing skills before inserting any of these.
pub async fn suggest_skill_tags(
    llm: &dyn GenerativeService,
    skills: &str,
) -> Result<Vec<String>, GenerationError> {
    let prompt = prompts::SKILL_TAGS_PROMPT_TEMPLATE.replace("{skills}", skills);
    let text = llm.generate_text(prompts::SKILL_TAGS_SYSTEM, &prompt).await?;
    parse_json_payload(&text)
}

pub async fn draft_experience_description(
    llm: &dyn GenerativeService,
    role: &str,
    company: &str,
    tasks: &str,
) -> Result<String, GenerationError> {
    let prompt = prompts::EXPERIENCE_DESCRIPTION_PROMPT_TEMPLATE
        .replace("{role}", role)
        .replace("{company}", company)
        .replace("{tasks}", tasks);
    llm.generate_text(prompts::EXPERIENCE_DESCRIPTION_SYSTEM, &prompt)
        .await
}

pub async fn draft_project_description(
    llm: &dyn GenerativeService,
    title: &str,
    tech_stack: &str,
) -> Result<String, GenerationError> {
    let prompt = prompts::PROJECT_DESCRIPTION_PROMPT_TEMPLATE
        .replace("{title}", title)
        .replace("{tech_stack}", tech_stack);
    llm.generate_text(prompts::PROJECT_DESCRIPTION_SYSTEM, &prompt)
        .await
}

/// Generates an abstract project image; the result is an image reference
/// (data URI). Fails explicitly if the service returns no image payload.
pub async fn generate_project_image(
    llm: &dyn GenerativeService,
    title: &str,
    description: &str,
) -> Result<String, GenerationError> {
    let prompt = prompts::PROJECT_IMAGE_PROMPT_TEMPLATE
        .replace("{title}", title)
        .replace("{description}", description);
    llm.generate_image(&prompt).await
}

pub async fn draft_cover_letter(
    llm: &dyn GenerativeService,
    job_description: &str,
    portfolio: &PortfolioProjection,
) -> Result<String, GenerationError> {
    let prompt = prompts::COVER_LETTER_PROMPT_TEMPLATE
        .replace("{name}", &portfolio.name)
        .replace("{about_me}", &portfolio.about_me)
        .replace("{skills}", &bullet_list(&portfolio.skills))
        .replace("{experience}", &experience_list(portfolio))
        .replace("{projects}", &project_list(portfolio))
        .replace("{job_description}", job_description);
    llm.generate_text(prompts::COVER_LETTER_SYSTEM, &prompt)
        .await
}

pub async fn draft_testimonial(
    llm: &dyn GenerativeService,
    name: &str,
    role: &str,
    traits: &str,
) -> Result<String, GenerationError> {
    let prompt = prompts::TESTIMONIAL_PROMPT_TEMPLATE
        .replace("{name}", name)
        .replace("{role}", role)
        .replace("{traits}", traits);
    llm.generate_text(prompts::TESTIMONIAL_SYSTEM, &prompt).await
}

// ── prompt fragment rendering ───────────────────────────────────────────

pub(crate) fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "(none listed)".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn experience_list(portfolio: &PortfolioProjection) -> String {
    if portfolio.experience.is_empty() {
        return "(none listed)".to_string();
    }
    portfolio
        .experience
        .iter()
        .map(|e| {
            format!(
                "- Role: {} at {}. Description: {}",
                e.role, e.company, e.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn project_list(portfolio: &PortfolioProjection) -> String {
    if portfolio.projects.is_empty() {
        return "(none listed)".to_string();
    }
    portfolio
        .projects
        .iter()
        .map(|p| format!("- Project: {}. Description: {}", p.title, p.description))
        .collect::<Vec<_>>()
        .join("\n")
}
