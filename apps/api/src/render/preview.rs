//! Interactive preview tree for the live résumé editor.
//!
//! Re-rendered on every edit, so it is a cheap pure walk of the record with the
//! same section order and skip rule as the export renderers.

use serde::Serialize;

use crate::models::resume::{has_text, ResumeRecord};
use crate::models::section::{distinct_sections, Section};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum PreviewNode {
    Document {
        children: Vec<PreviewNode>,
    },
    Header {
        name: String,
        contact: Vec<String>,
        links: Vec<String>,
    },
    Section {
        section: Section,
        title: String,
        children: Vec<PreviewNode>,
    },
    Entry {
        title: String,
        subtitle: Option<String>,
        body: Vec<String>,
    },
    Text {
        label: Option<String>,
        text: String,
    },
}

impl PreviewNode {
    /// Sections represented by the top-level children of a document node.
    pub fn sections_present(&self) -> Vec<Section> {
        let PreviewNode::Document { children } = self else {
            return Vec::new();
        };
        distinct_sections(children.iter().filter_map(|child| match child {
            PreviewNode::Header { .. } => Some(Section::Header),
            PreviewNode::Section { section, .. } => Some(*section),
            _ => None,
        }))
    }
}

/// Builds the preview tree for the current record snapshot.
pub fn render_preview(record: &ResumeRecord) -> PreviewNode {
    let children = record
        .present_sections()
        .into_iter()
        .map(|section| match section {
            Section::Header => header_node(record),
            other => PreviewNode::Section {
                section: other,
                title: other.title().to_string(),
                children: section_children(record, other),
            },
        })
        .collect();
    PreviewNode::Document { children }
}

fn header_node(record: &ResumeRecord) -> PreviewNode {
    let info = &record.personal_info;
    PreviewNode::Header {
        name: info.name.trim().to_string(),
        contact: owned_strings(info.contact_items()),
        links: owned_strings(info.link_items()),
    }
}

fn section_children(record: &ResumeRecord, section: Section) -> Vec<PreviewNode> {
    match section {
        Section::Header => Vec::new(),
        Section::Summary => vec![text(None, &record.summary)],
        Section::Experience => record
            .filled_experiences()
            .map(|exp| entry(exp.title(), Some(exp.duration.as_str()), &exp.responsibilities))
            .collect(),
        Section::Education => record
            .filled_educations()
            .map(|edu| entry(edu.title(), edu.meta().as_deref(), ""))
            .collect(),
        Section::Skills => [
            ("Technical Skills", &record.technical_skills),
            ("Soft Skills", &record.soft_skills),
        ]
        .into_iter()
        .filter(|(_, value)| has_text(value))
        .map(|(label, value)| text(Some(label), value))
        .collect(),
        Section::Projects => record
            .filled_projects()
            .map(|p| {
                entry(
                    p.name.trim().to_string(),
                    p.technologies_line().as_deref(),
                    &p.description,
                )
            })
            .collect(),
        Section::Certifications => vec![text(None, &record.certifications)],
        Section::Languages => vec![text(None, &record.languages)],
    }
}

fn entry(title: String, subtitle: Option<&str>, body: &str) -> PreviewNode {
    PreviewNode::Entry {
        title,
        subtitle: subtitle
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        body: body
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn text(label: Option<&str>, value: &str) -> PreviewNode {
    PreviewNode::Text {
        label: label.map(str::to_string),
        text: value.trim().to_string(),
    }
}

fn owned_strings(items: Vec<&str>) -> Vec<String> {
    items.into_iter().map(str::to_string).collect()
}
