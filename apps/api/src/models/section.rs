use serde::{Deserialize, Serialize};

/// Résumé sections in render order. Every renderer walks them in this order and
/// skips a section entirely when the record's presence predicate is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Header,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
        Section::Languages,
    ];

    /// Heading text. The header has none; it is led by the candidate's name.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Header => "",
            Section::Summary => "Professional Summary",
            Section::Experience => "Work Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Certifications => "Certifications",
            Section::Languages => "Languages",
        }
    }
}

/// Deduplicates section tags, keeping first-seen order.
///
/// Renderers tag every emitted element with its section; this recovers the list of
/// sections an artifact actually contains.
pub fn distinct_sections(tags: impl IntoIterator<Item = Section>) -> Vec<Section> {
    let mut out: Vec<Section> = Vec::new();
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
