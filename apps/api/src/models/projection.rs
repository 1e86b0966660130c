//! Read-only projections of the portfolio document handed to generation
//! operations. Prompts only ever see these narrowed views, never the full
//! aggregate.

use serde::{Deserialize, Serialize};

use crate::models::portfolio::PortfolioDocument;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceSummary {
    pub role: String,
    pub company: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub title: String,
    pub description: String,
}

/// Everything the cover-letter and evaluation prompts may reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioProjection {
    pub name: String,
    pub headline: String,
    pub about_me: String,
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceSummary>,
    pub projects: Vec<ProjectSummary>,
}

impl PortfolioProjection {
    pub fn of(doc: &PortfolioDocument) -> Self {
        PortfolioProjection {
            name: doc.name.clone(),
            headline: doc.headline.clone(),
            about_me: doc.about_me.clone(),
            skills: doc.skills.iter().map(|s| s.name.clone()).collect(),
            experience: doc
                .experiences
                .iter()
                .map(|e| ExperienceSummary {
                    role: e.role.clone(),
                    company: e.company.clone(),
                    description: e.description.clone(),
                })
                .collect(),
            projects: doc
                .projects
                .iter()
                .map(|p| ProjectSummary {
                    title: p.title.clone(),
                    description: p.description.clone(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::PortfolioDocument;
    use crate::store::ids::SequentialIds;

    #[test]
    fn test_projection_narrows_the_document() {
        let ids = SequentialIds::new();
        let doc = PortfolioDocument::seed(&ids);
        let projection = PortfolioProjection::of(&doc);

        assert_eq!(projection.name, doc.name);
        assert_eq!(projection.skills.len(), doc.skills.len());
        assert_eq!(projection.skills[0], "JavaScript");
        assert_eq!(projection.projects.len(), 2);
        assert_eq!(projection.projects[0].title, "E-commerce Platform");
        assert!(projection.experience.is_empty());
    }
}
