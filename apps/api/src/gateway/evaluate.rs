//! Portfolio evaluation — asks the model for a score, a strengths summary,
//! and ordered suggestions. The score is the service's unchecked judgment;
//! it is surfaced verbatim, with no local range validation.

use serde::{Deserialize, Serialize};

use crate::gateway::drafts::{bullet_list, experience_list, project_list};
use crate::gateway::{parse_json_payload, prompts, GenerativeService};
use crate::llm_client::GenerationError;
use crate::models::projection::PortfolioProjection;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEvaluation {
    pub score: f64,
    pub strengths: String,
    pub suggestions: Vec<String>,
}

pub async fn evaluate_portfolio(
    llm: &dyn GenerativeService,
    portfolio: &PortfolioProjection,
) -> Result<PortfolioEvaluation, GenerationError> {
    let prompt = prompts::EVALUATE_PROMPT_TEMPLATE
        .replace("{name}", &portfolio.name)
        .replace("{headline}", &portfolio.headline)
        .replace("{about_me}", &portfolio.about_me)
        .replace("{skills}", &bullet_list(&portfolio.skills))
        .replace("{experience}", &experience_list(portfolio))
        .replace("{projects}", &project_list(portfolio));
    let text = llm.generate_text(prompts::EVALUATE_SYSTEM, &prompt).await?;
    parse_json_payload(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{CannedService, UnreachableService};

    fn projection() -> PortfolioProjection {
        PortfolioProjection {
            name: "Ada".to_string(),
            headline: "Engineer".to_string(),
            about_me: "I build things.".to_string(),
            skills: vec!["Rust".to_string()],
            experience: vec![],
            projects: vec![],
        }
    }

    #[tokio::test]
    async fn test_evaluation_surfaces_score_and_ordered_suggestions() {
        let llm = CannedService::text(
            r#"{"score": 92, "strengths": "Strong projects.", "suggestions": ["a", "b", "c"]}"#,
        );
        let evaluation = evaluate_portfolio(&llm, &projection()).await.unwrap();
        assert_eq!(evaluation.score, 92.0);
        assert_eq!(evaluation.strengths, "Strong projects.");
        assert_eq!(evaluation.suggestions, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_evaluation_accepts_out_of_range_scores() {
        // The score is the service's unchecked judgment.
        let llm = CannedService::text(r#"{"score": 120, "strengths": "s", "suggestions": []}"#);
        let evaluation = evaluate_portfolio(&llm, &projection()).await.unwrap();
        assert_eq!(evaluation.score, 120.0);
    }

    #[tokio::test]
    async fn test_evaluation_tolerates_code_fences() {
        let llm = CannedService::text(
            "```json\n{\"score\": 70, \"strengths\": \"ok\", \"suggestions\": [\"x\"]}\n```",
        );
        let evaluation = evaluate_portfolio(&llm, &projection()).await.unwrap();
        assert_eq!(evaluation.score, 70.0);
    }

    #[tokio::test]
    async fn test_evaluation_shape_mismatch_is_generation_failure() {
        let llm = CannedService::text(r#"{"grade": "A"}"#);
        assert!(evaluate_portfolio(&llm, &projection()).await.is_err());
    }

    #[tokio::test]
    async fn test_evaluation_unreachable_service_fails() {
        assert!(evaluate_portfolio(&UnreachableService, &projection())
            .await
            .is_err());
    }
}
