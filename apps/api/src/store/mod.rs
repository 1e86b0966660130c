#![allow(dead_code)]

//! Portfolio Store — the single source of truth for one session's document.
//!
//! An injectable container, not a global: the session manager owns one store
//! per session and hands out `Arc`s. Mutations are synchronous and atomic
//! from the caller's perspective; every successful mutation bumps a `watch`
//! revision so dependent views know to re-read the snapshot.

pub mod handlers;
pub mod ids;
pub mod sessions;

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::watch;
use url::Url;

use crate::models::portfolio::{
    default_avatar_url, Contact, Experience, PortfolioDocument, Project, Skill, Testimonial,
    ThemeSettings,
};
use crate::store::ids::IdGenerator;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("A skill named '{0}' already exists")]
    DuplicateSkill(String),

    #[error("Duplicate item id '{0}'")]
    DuplicateId(String),

    #[error("'{0}' is not a valid URL")]
    InvalidLink(String),
}

// Incoming field sets for add/update. Ids are never caller-supplied.

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFields {
    pub title: String,
    pub tech_stack: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceFields {
    pub role: String,
    pub company: String,
    #[serde(default)]
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialFields {
    pub name: String,
    pub role: String,
    pub text: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

pub struct PortfolioStore {
    doc: RwLock<PortfolioDocument>,
    ids: Arc<dyn IdGenerator>,
    revision: watch::Sender<u64>,
}

impl PortfolioStore {
    /// An empty document (all defaults).
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_document(PortfolioDocument::default(), ids)
    }

    /// A fresh session document pre-populated with demo content.
    pub fn seeded(ids: Arc<dyn IdGenerator>) -> Self {
        let doc = PortfolioDocument::seed(ids.as_ref());
        Self::with_document(doc, ids)
    }

    pub fn with_document(doc: PortfolioDocument, ids: Arc<dyn IdGenerator>) -> Self {
        let (revision, _) = watch::channel(0);
        PortfolioStore {
            doc: RwLock::new(doc),
            ids,
            revision,
        }
    }

    /// Current immutable snapshot.
    pub fn snapshot(&self) -> PortfolioDocument {
        self.read().clone()
    }

    /// Revision stream for dependent views. Receivers see at least one
    /// change notification per mutation, collapsed under load.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    // ── whole-document and scalar fields ────────────────────────────────

    /// Atomically replaces the entire snapshot (seed / session restore).
    /// Rejects without mutating if any list breaks the id or skill-name
    /// uniqueness invariants or a project link is malformed.
    pub fn replace_all(&self, doc: PortfolioDocument) -> Result<(), StoreError> {
        validate_unique_ids(doc.projects.iter().map(|p| p.id.as_str()))?;
        validate_unique_ids(doc.skills.iter().map(|s| s.id.as_str()))?;
        validate_unique_ids(doc.experiences.iter().map(|e| e.id.as_str()))?;
        validate_unique_ids(doc.testimonials.iter().map(|t| t.id.as_str()))?;
        validate_unique_skill_names(&doc.skills)?;
        for project in &doc.projects {
            validate_link(project.link.as_deref())?;
        }
        *self.write() = doc;
        self.touch();
        Ok(())
    }

    pub fn set_name(&self, name: String) {
        self.write().name = name;
        self.touch();
    }

    pub fn set_headline(&self, headline: String) {
        self.write().headline = headline;
        self.touch();
    }

    pub fn set_about_me(&self, about_me: String) {
        self.write().about_me = about_me;
        self.touch();
    }

    pub fn set_contact(&self, contact: Contact) {
        self.write().contact = contact;
        self.touch();
    }

    pub fn set_theme(&self, theme: ThemeSettings) {
        self.write().theme = theme;
        self.touch();
    }

    /// Replaces the whole project list. Item ids must stay unique after the
    /// write; a violation is rejected with prior state unchanged.
    pub fn set_projects(&self, projects: Vec<Project>) -> Result<(), StoreError> {
        validate_unique_ids(projects.iter().map(|p| p.id.as_str()))?;
        for project in &projects {
            validate_link(project.link.as_deref())?;
        }
        self.write().projects = projects;
        self.touch();
        Ok(())
    }

    pub fn set_skills(&self, skills: Vec<Skill>) -> Result<(), StoreError> {
        validate_unique_ids(skills.iter().map(|s| s.id.as_str()))?;
        validate_unique_skill_names(&skills)?;
        self.write().skills = skills;
        self.touch();
        Ok(())
    }

    pub fn set_experiences(&self, experiences: Vec<Experience>) -> Result<(), StoreError> {
        validate_unique_ids(experiences.iter().map(|e| e.id.as_str()))?;
        self.write().experiences = experiences;
        self.touch();
        Ok(())
    }

    pub fn set_testimonials(&self, testimonials: Vec<Testimonial>) -> Result<(), StoreError> {
        validate_unique_ids(testimonials.iter().map(|t| t.id.as_str()))?;
        self.write().testimonials = testimonials;
        self.touch();
        Ok(())
    }

    // ── projects ────────────────────────────────────────────────────────

    pub fn add_project(&self, fields: ProjectFields) -> Result<Project, StoreError> {
        let link = normalize_optional(fields.link);
        validate_link(link.as_deref())?;
        let project = Project {
            id: self.ids.next_id(),
            title: fields.title,
            tech_stack: fields.tech_stack,
            description: fields.description,
            link,
            image_url: normalize_optional(fields.image_url),
        };
        self.write().projects.push(project.clone());
        self.touch();
        Ok(project)
    }

    /// Replaces the matching project's fields, keeping its id and position.
    /// Unknown id is a no-op (`Ok(None)`) — a generation callback may land
    /// after the user deleted the project.
    pub fn update_project(
        &self,
        id: &str,
        fields: ProjectFields,
    ) -> Result<Option<Project>, StoreError> {
        let link = normalize_optional(fields.link);
        validate_link(link.as_deref())?;
        let updated = {
            let mut doc = self.write();
            match doc.projects.iter_mut().find(|p| p.id == id) {
                Some(project) => {
                    project.title = fields.title;
                    project.tech_stack = fields.tech_stack;
                    project.description = fields.description;
                    project.link = link;
                    project.image_url = normalize_optional(fields.image_url);
                    Some(project.clone())
                }
                None => None,
            }
        };
        if updated.is_some() {
            self.touch();
        }
        Ok(updated)
    }

    pub fn remove_project(&self, id: &str) -> bool {
        let removed = {
            let mut doc = self.write();
            let before = doc.projects.len();
            doc.projects.retain(|p| p.id != id);
            doc.projects.len() != before
        };
        if removed {
            self.touch();
        }
        removed
    }

    pub fn set_project_description(&self, id: &str, description: String) -> bool {
        let hit = {
            let mut doc = self.write();
            match doc.projects.iter_mut().find(|p| p.id == id) {
                Some(project) => {
                    project.description = description;
                    true
                }
                None => false,
            }
        };
        if hit {
            self.touch();
        }
        hit
    }

    pub fn set_project_image(&self, id: &str, image_url: String) -> bool {
        let hit = {
            let mut doc = self.write();
            match doc.projects.iter_mut().find(|p| p.id == id) {
                Some(project) => {
                    project.image_url = Some(image_url);
                    true
                }
                None => false,
            }
        };
        if hit {
            self.touch();
        }
        hit
    }

    // ── skills ──────────────────────────────────────────────────────────

    /// Appends a skill unless one with the same name already exists under
    /// case-insensitive comparison. Rejection leaves the list untouched.
    pub fn add_skill(&self, name: String) -> Result<Skill, StoreError> {
        let skill = {
            let mut doc = self.write();
            if doc
                .skills
                .iter()
                .any(|s| s.name.to_lowercase() == name.to_lowercase())
            {
                return Err(StoreError::DuplicateSkill(name));
            }
            let skill = Skill {
                id: self.ids.next_id(),
                name,
            };
            doc.skills.push(skill.clone());
            skill
        };
        self.touch();
        Ok(skill)
    }

    pub fn has_skill(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.read()
            .skills
            .iter()
            .any(|s| s.name.to_lowercase() == name)
    }

    pub fn remove_skill(&self, id: &str) -> bool {
        let removed = {
            let mut doc = self.write();
            let before = doc.skills.len();
            doc.skills.retain(|s| s.id != id);
            doc.skills.len() != before
        };
        if removed {
            self.touch();
        }
        removed
    }

    // ── experiences ─────────────────────────────────────────────────────

    pub fn add_experience(&self, fields: ExperienceFields) -> Experience {
        let experience = Experience {
            id: self.ids.next_id(),
            role: fields.role,
            company: fields.company,
            period: fields.period,
            description: fields.description,
        };
        self.write().experiences.push(experience.clone());
        self.touch();
        experience
    }

    pub fn update_experience(&self, id: &str, fields: ExperienceFields) -> Option<Experience> {
        let updated = {
            let mut doc = self.write();
            match doc.experiences.iter_mut().find(|e| e.id == id) {
                Some(experience) => {
                    experience.role = fields.role;
                    experience.company = fields.company;
                    experience.period = fields.period;
                    experience.description = fields.description;
                    Some(experience.clone())
                }
                None => None,
            }
        };
        if updated.is_some() {
            self.touch();
        }
        updated
    }

    pub fn set_experience_description(&self, id: &str, description: String) -> bool {
        let hit = {
            let mut doc = self.write();
            match doc.experiences.iter_mut().find(|e| e.id == id) {
                Some(experience) => {
                    experience.description = description;
                    true
                }
                None => false,
            }
        };
        if hit {
            self.touch();
        }
        hit
    }

    pub fn remove_experience(&self, id: &str) -> bool {
        let removed = {
            let mut doc = self.write();
            let before = doc.experiences.len();
            doc.experiences.retain(|e| e.id != id);
            doc.experiences.len() != before
        };
        if removed {
            self.touch();
        }
        removed
    }

    // ── testimonials ────────────────────────────────────────────────────

    /// Appends a testimonial. An absent or empty avatar URL defaults to the
    /// deterministic initials avatar keyed by the reviewer's name.
    pub fn add_testimonial(&self, fields: TestimonialFields) -> Testimonial {
        let avatar_url = normalize_optional(fields.avatar_url)
            .unwrap_or_else(|| default_avatar_url(&fields.name));
        let testimonial = Testimonial {
            id: self.ids.next_id(),
            name: fields.name,
            role: fields.role,
            text: fields.text,
            avatar_url: Some(avatar_url),
        };
        self.write().testimonials.push(testimonial.clone());
        self.touch();
        testimonial
    }

    pub fn update_testimonial(&self, id: &str, fields: TestimonialFields) -> Option<Testimonial> {
        let avatar_url = normalize_optional(fields.avatar_url)
            .unwrap_or_else(|| default_avatar_url(&fields.name));
        let updated = {
            let mut doc = self.write();
            match doc.testimonials.iter_mut().find(|t| t.id == id) {
                Some(testimonial) => {
                    testimonial.name = fields.name;
                    testimonial.role = fields.role;
                    testimonial.text = fields.text;
                    testimonial.avatar_url = Some(avatar_url);
                    Some(testimonial.clone())
                }
                None => None,
            }
        };
        if updated.is_some() {
            self.touch();
        }
        updated
    }

    pub fn remove_testimonial(&self, id: &str) -> bool {
        let removed = {
            let mut doc = self.write();
            let before = doc.testimonials.len();
            doc.testimonials.retain(|t| t.id != id);
            doc.testimonials.len() != before
        };
        if removed {
            self.touch();
        }
        removed
    }

    // ── internals ───────────────────────────────────────────────────────

    fn read(&self) -> std::sync::RwLockReadGuard<'_, PortfolioDocument> {
        self.doc.read().expect("portfolio store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, PortfolioDocument> {
        self.doc.write().expect("portfolio store lock poisoned")
    }

    fn touch(&self) {
        self.revision.send_modify(|r| *r += 1);
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn validate_link(link: Option<&str>) -> Result<(), StoreError> {
    match link {
        Some(raw) => Url::parse(raw)
            .map(|_| ())
            .map_err(|_| StoreError::InvalidLink(raw.to_string())),
        None => Ok(()),
    }
}

fn validate_unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StoreError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

fn validate_unique_skill_names(skills: &[Skill]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for skill in skills {
        if !seen.insert(skill.name.to_lowercase()) {
            return Err(StoreError::DuplicateSkill(skill.name.clone()));
        }
    }
    Ok(())
}
