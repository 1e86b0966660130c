//! The portfolio document — the aggregate every store and gateway operation
//! works against. Wire format is camelCase JSON; the published snapshot is
//! field-complete (optional fields serialize as null rather than vanishing).

use serde::{Deserialize, Deserializer, Serialize};

use crate::store::ids::IdGenerator;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    /// Comma-separated, free text ("React, Node.js, MongoDB").
    pub tech_stack: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    /// External URL or a `data:` URI for generated images.
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub role: String,
    pub company: String,
    /// Free text, e.g. "2021 – 2023".
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    pub text: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Deterministic initials avatar used when a testimonial has no avatar URL.
pub fn default_avatar_url(name: &str) -> String {
    format!("https://api.dicebear.com/8.x/initials/svg?seed={name}")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub linkedin: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Closed set of preview layouts. Matched exhaustively wherever a layout is
/// rendered; the unknown-input fallback lives in `Deserialize` alone.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    Standard,
    Minimal,
    Creative,
}

impl<'de> Deserialize<'de> for LayoutVariant {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "minimal" => LayoutVariant::Minimal,
            "creative" => LayoutVariant::Creative,
            // Unrecognized layouts render as the standard layout.
            _ => LayoutVariant::Standard,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThemeSettings {
    pub color_scheme: ColorScheme,
    pub layout: LayoutVariant,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        ThemeSettings {
            color_scheme: ColorScheme::Dark,
            layout: LayoutVariant::Standard,
        }
    }
}

/// The aggregate root. Always fully defined: a fresh document has empty
/// strings and lists and the default theme, never missing fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub about_me: String,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub theme: ThemeSettings,
}

impl PortfolioDocument {
    /// Demo content a fresh session starts from, so the editor and preview
    /// have something to show before the first manual edit.
    pub fn seed(ids: &dyn IdGenerator) -> Self {
        PortfolioDocument {
            name: "Your Name".to_string(),
            headline: "Full-Stack Developer | AI Enthusiast".to_string(),
            about_me: "I'm a passionate software developer with a knack for creating \
                       dynamic and intuitive web applications. I thrive on solving \
                       complex problems and turning ideas into reality through code."
                .to_string(),
            projects: vec![
                Project {
                    id: ids.next_id(),
                    title: "E-commerce Platform".to_string(),
                    tech_stack: "React, Node.js, MongoDB".to_string(),
                    description: "A full-stack e-commerce application with product \
                                  listings, a shopping cart, and a checkout process. \
                                  Integrated with Stripe for payments."
                        .to_string(),
                    link: Some("https://github.com".to_string()),
                    image_url: Some("https://placehold.co/600x400.png".to_string()),
                },
                Project {
                    id: ids.next_id(),
                    title: "Task Management App".to_string(),
                    tech_stack: "Next.js, Firebase, Tailwind CSS".to_string(),
                    description: "A responsive task management app that allows users to \
                                  create, organize, and track their daily tasks with a \
                                  clean, drag-and-drop interface."
                        .to_string(),
                    link: Some("https://github.com".to_string()),
                    image_url: Some("https://placehold.co/600x400.png".to_string()),
                },
            ],
            skills: [
                "JavaScript",
                "TypeScript",
                "React",
                "Next.js",
                "Node.js",
                "Python",
                "MongoDB",
                "Docker",
            ]
            .iter()
            .map(|name| Skill {
                id: ids.next_id(),
                name: name.to_string(),
            })
            .collect(),
            experiences: vec![],
            testimonials: vec![],
            contact: Contact::default(),
            theme: ThemeSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ids::SequentialIds;

    #[test]
    fn test_default_document_is_fully_defined() {
        let doc = PortfolioDocument::default();
        assert_eq!(doc.name, "");
        assert!(doc.projects.is_empty());
        assert!(doc.skills.is_empty());
        assert_eq!(doc.theme.color_scheme, ColorScheme::Dark);
        assert_eq!(doc.theme.layout, LayoutVariant::Standard);
    }

    #[test]
    fn test_seed_document_has_unique_ids() {
        let ids = SequentialIds::new();
        let doc = PortfolioDocument::seed(&ids);
        assert_eq!(doc.projects.len(), 2);
        assert_eq!(doc.skills.len(), 8);
        let mut seen: Vec<&str> = doc
            .projects
            .iter()
            .map(|p| p.id.as_str())
            .chain(doc.skills.iter().map(|s| s.id.as_str()))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_document_json_round_trip() {
        let ids = SequentialIds::new();
        let mut doc = PortfolioDocument::seed(&ids);
        doc.experiences.push(Experience {
            id: ids.next_id(),
            role: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            period: "2021 – 2023".to_string(),
            description: "Built services.".to_string(),
        });
        doc.testimonials.push(Testimonial {
            id: ids.next_id(),
            name: "Jane Doe".to_string(),
            role: "CTO".to_string(),
            text: "A pleasure to work with.".to_string(),
            avatar_url: None,
        });
        doc.contact.email = "me@example.com".to_string();

        let json = serde_json::to_string(&doc).unwrap();
        let back: PortfolioDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let ids = SequentialIds::new();
        let doc = PortfolioDocument::seed(&ids);
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("aboutMe").is_some());
        assert!(json["projects"][0].get("techStack").is_some());
        assert!(json["projects"][0].get("imageUrl").is_some());
        assert!(json["theme"].get("colorScheme").is_some());
    }

    #[test]
    fn test_unknown_layout_falls_back_to_standard() {
        let theme: ThemeSettings =
            serde_json::from_str(r#"{"colorScheme":"light","layout":"fancy"}"#).unwrap();
        assert_eq!(theme.layout, LayoutVariant::Standard);
    }

    #[test]
    fn test_known_layouts_round_trip() {
        for (raw, want) in [
            ("standard", LayoutVariant::Standard),
            ("minimal", LayoutVariant::Minimal),
            ("creative", LayoutVariant::Creative),
        ] {
            let json = format!(r#"{{"colorScheme":"dark","layout":"{raw}"}}"#);
            let theme: ThemeSettings = serde_json::from_str(&json).unwrap();
            assert_eq!(theme.layout, want);
            assert_eq!(
                serde_json::to_value(theme).unwrap()["layout"],
                serde_json::Value::String(raw.to_string())
            );
        }
    }

    #[test]
    fn test_default_avatar_is_keyed_by_name() {
        assert_eq!(
            default_avatar_url("Jane"),
            "https://api.dicebear.com/8.x/initials/svg?seed=Jane"
        );
    }
}
