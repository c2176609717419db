use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::section::Section;

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub portfolio: String,
}

impl PersonalInfo {
    /// Non-empty email, phone and location, in that order.
    pub fn contact_items(&self) -> Vec<&str> {
        non_empty(&[&self.email, &self.phone, &self.location])
    }

    /// Non-empty LinkedIn and portfolio links. Empty when neither is set.
    pub fn link_items(&self) -> Vec<&str> {
        non_empty(&[&self.linkedin, &self.portfolio])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub responsibilities: String,
}

impl Experience {
    /// "Position - Company", or just the company when no position is set.
    pub fn title(&self) -> String {
        join_title(&self.position, &self.company)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub year: String,
    pub score: String,
}

impl Education {
    pub fn title(&self) -> String {
        join_title(&self.degree, &self.institution)
    }

    /// "Year | Score: X" with empty parts dropped. `None` when both are empty.
    pub fn meta(&self) -> Option<String> {
        let score = (!self.score.trim().is_empty()).then(|| format!("Score: {}", self.score.trim()));
        let parts: Vec<&str> = [Some(self.year.trim()), score.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" | "))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: String,
}

impl Project {
    pub fn technologies_line(&self) -> Option<String> {
        let tech = self.technologies.trim();
        (!tech.is_empty()).then(|| format!("Technologies: {tech}"))
    }
}

/// Repeatable entries are "filled" when their key field is non-empty.
/// Unfilled entries are placeholders and every renderer skips them.
pub trait KeyedEntry {
    fn key(&self) -> &str;

    fn is_filled(&self) -> bool {
        !self.key().trim().is_empty()
    }
}

impl KeyedEntry for Experience {
    fn key(&self) -> &str {
        &self.company
    }
}

impl KeyedEntry for Education {
    fn key(&self) -> &str {
        &self.institution
    }
}

impl KeyedEntry for Project {
    fn key(&self) -> &str {
        &self.name
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Record
// ────────────────────────────────────────────────────────────────────────────

/// The three repeatable collections of a résumé record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Experience,
    Education,
    Project,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
            EntryKind::Project => "project",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("No {kind} entry at index {index} (collection has {len})")]
    IndexOutOfRange {
        kind: EntryKind,
        index: usize,
        len: usize,
    },
}

/// A single résumé aggregate.
///
/// Invariant: `experiences`, `educations` and `projects` each hold at least one entry.
/// `new()` seeds one empty placeholder per collection and `remove_entry` refuses to
/// drop the last one. Records arriving from outside go through `ensure_placeholders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experiences: Vec<Experience>,
    pub educations: Vec<Education>,
    pub technical_skills: String,
    pub soft_skills: String,
    pub projects: Vec<Project>,
    pub certifications: String,
    pub languages: String,
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            summary: String::new(),
            experiences: vec![Experience::default()],
            educations: vec![Education::default()],
            technical_skills: String::new(),
            soft_skills: String::new(),
            projects: vec![Project::default()],
            certifications: String::new(),
            languages: String::new(),
        }
    }
}

impl ResumeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty placeholder entry to the given collection.
    pub fn add_entry(&mut self, kind: EntryKind) {
        match kind {
            EntryKind::Experience => self.experiences.push(Experience::default()),
            EntryKind::Education => self.educations.push(Education::default()),
            EntryKind::Project => self.projects.push(Project::default()),
        }
    }

    /// Removes the entry at `index`. Returns `false` (and changes nothing) when the
    /// collection has a single entry or the index is out of range.
    pub fn remove_entry(&mut self, kind: EntryKind, index: usize) -> bool {
        match kind {
            EntryKind::Experience => remove_keeping_one(&mut self.experiences, index),
            EntryKind::Education => remove_keeping_one(&mut self.educations, index),
            EntryKind::Project => remove_keeping_one(&mut self.projects, index),
        }
    }

    pub fn entry_count(&self, kind: EntryKind) -> usize {
        match kind {
            EntryKind::Experience => self.experiences.len(),
            EntryKind::Education => self.educations.len(),
            EntryKind::Project => self.projects.len(),
        }
    }

    pub fn experience_mut(&mut self, index: usize) -> Result<&mut Experience, RecordError> {
        entry_mut(&mut self.experiences, EntryKind::Experience, index)
    }

    pub fn education_mut(&mut self, index: usize) -> Result<&mut Education, RecordError> {
        entry_mut(&mut self.educations, EntryKind::Education, index)
    }

    pub fn project_mut(&mut self, index: usize) -> Result<&mut Project, RecordError> {
        entry_mut(&mut self.projects, EntryKind::Project, index)
    }

    /// Restores the length ≥ 1 invariant on every repeatable collection.
    pub fn ensure_placeholders(&mut self) {
        if self.experiences.is_empty() {
            self.experiences.push(Experience::default());
        }
        if self.educations.is_empty() {
            self.educations.push(Education::default());
        }
        if self.projects.is_empty() {
            self.projects.push(Project::default());
        }
    }

    pub fn filled_experiences(&self) -> impl Iterator<Item = &Experience> {
        self.experiences.iter().filter(|e| e.is_filled())
    }

    pub fn filled_educations(&self) -> impl Iterator<Item = &Education> {
        self.educations.iter().filter(|e| e.is_filled())
    }

    pub fn filled_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.is_filled())
    }

    /// Section-presence predicate. The header is always present.
    pub fn is_present(&self, section: Section) -> bool {
        match section {
            Section::Header => true,
            Section::Summary => has_text(&self.summary),
            Section::Experience => self.filled_experiences().next().is_some(),
            Section::Education => self.filled_educations().next().is_some(),
            Section::Skills => has_text(&self.technical_skills) || has_text(&self.soft_skills),
            Section::Projects => self.filled_projects().next().is_some(),
            Section::Certifications => has_text(&self.certifications),
            Section::Languages => has_text(&self.languages),
        }
    }

    /// Present sections in render order.
    pub fn present_sections(&self) -> Vec<Section> {
        Section::ALL
            .iter()
            .copied()
            .filter(|s| self.is_present(*s))
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn has_text(s: &str) -> bool {
    !s.trim().is_empty()
}

fn non_empty<'a>(fields: &[&'a String]) -> Vec<&'a str> {
    fields
        .iter()
        .copied()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect()
}

fn join_title(lead: &str, key: &str) -> String {
    match (lead.trim(), key.trim()) {
        ("", key) => key.to_string(),
        (lead, "") => lead.to_string(),
        (lead, key) => format!("{lead} - {key}"),
    }
}

fn remove_keeping_one<T>(entries: &mut Vec<T>, index: usize) -> bool {
    if entries.len() <= 1 || index >= entries.len() {
        return false;
    }
    entries.remove(index);
    true
}

fn entry_mut<T>(entries: &mut [T], kind: EntryKind, index: usize) -> Result<&mut T, RecordError> {
    let len = entries.len();
    entries
        .get_mut(index)
        .ok_or(RecordError::IndexOutOfRange { kind, index, len })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
