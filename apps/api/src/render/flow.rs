//! Flow-layout (style-run) résumé renderer.
//!
//! Emits style-tagged paragraph and heading blocks with declarative spacing for a
//! word-processor backend. No positions and no pagination: the consuming format
//! reflows. Section order and the skip rule match the paginated renderer exactly.

use serde::Serialize;

use crate::models::resume::{has_text, ResumeRecord};
use crate::models::section::{distinct_sections, Section};
use crate::render::docx_file_name;

const TITLE_SIZE_PT: f32 = 22.0;
const HEADING_SIZE_PT: f32 = 14.0;
const ENTRY_TITLE_SIZE_PT: f32 = 12.0;
const BODY_SIZE_PT: f32 = 11.0;
const CONTACT_SIZE_PT: f32 = 10.0;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "level", rename_all = "snake_case")]
pub enum BlockKind {
    Title,
    Heading(u8),
    Paragraph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub size_pt: f32,
}

impl StyledRun {
    fn plain(text: impl Into<String>, size_pt: f32) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            size_pt,
        }
    }

    fn bold(text: impl Into<String>, size_pt: f32) -> Self {
        Self {
            bold: true,
            ..Self::plain(text, size_pt)
        }
    }

    fn italic(text: impl Into<String>, size_pt: f32) -> Self {
        Self {
            italic: true,
            ..Self::plain(text, size_pt)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledBlock {
    pub section: Section,
    #[serde(flatten)]
    pub kind: BlockKind,
    pub alignment: Alignment,
    pub runs: Vec<StyledRun>,
    pub spacing_before_pt: f32,
    pub spacing_after_pt: f32,
}

#[cfg(test)]
impl StyledBlock {
    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowDocument {
    pub file_name: String,
    pub blocks: Vec<StyledBlock>,
}

impl FlowDocument {
    /// Sections that actually produced blocks, in document order.
    pub fn sections_present(&self) -> Vec<Section> {
        distinct_sections(self.blocks.iter().map(|b| b.section))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Renders the record as a flat sequence of styled blocks.
pub fn render_flow(record: &ResumeRecord) -> FlowDocument {
    let mut blocks = Vec::new();
    for section in record.present_sections() {
        match section {
            Section::Header => push_header(&mut blocks, record),
            other => {
                blocks.push(StyledBlock {
                    section: other,
                    kind: BlockKind::Heading(1),
                    alignment: Alignment::Left,
                    runs: vec![StyledRun::bold(other.title(), HEADING_SIZE_PT)],
                    spacing_before_pt: 12.0,
                    spacing_after_pt: 6.0,
                });
                push_section_body(&mut blocks, record, other);
            }
        }
    }

    FlowDocument {
        file_name: docx_file_name(&record.personal_info.name),
        blocks,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn push_header(blocks: &mut Vec<StyledBlock>, record: &ResumeRecord) {
    let info = &record.personal_info;
    blocks.push(StyledBlock {
        section: Section::Header,
        kind: BlockKind::Title,
        alignment: Alignment::Center,
        runs: vec![StyledRun::bold(info.name.trim(), TITLE_SIZE_PT)],
        spacing_before_pt: 0.0,
        spacing_after_pt: 4.0,
    });

    for items in [info.contact_items(), info.link_items()] {
        if items.is_empty() {
            continue;
        }
        blocks.push(StyledBlock {
            section: Section::Header,
            kind: BlockKind::Paragraph,
            alignment: Alignment::Center,
            runs: vec![StyledRun::plain(items.join(" | "), CONTACT_SIZE_PT)],
            spacing_before_pt: 0.0,
            spacing_after_pt: 2.0,
        });
    }
}

fn push_section_body(blocks: &mut Vec<StyledBlock>, record: &ResumeRecord, section: Section) {
    let mut out = SectionBlocks { blocks, section };
    match section {
        Section::Header => {}
        Section::Summary => out.body_text(&record.summary),
        Section::Experience => {
            for exp in record.filled_experiences() {
                out.entry_title(&exp.title());
                out.meta(&exp.duration);
                out.body_text(&exp.responsibilities);
            }
        }
        Section::Education => {
            for edu in record.filled_educations() {
                out.entry_title(&edu.title());
                out.meta(&edu.meta().unwrap_or_default());
            }
        }
        Section::Skills => {
            for (label, value) in [
                ("Technical Skills", &record.technical_skills),
                ("Soft Skills", &record.soft_skills),
            ] {
                if has_text(value) {
                    out.push(vec![
                        StyledRun::bold(format!("{label}: "), BODY_SIZE_PT),
                        StyledRun::plain(value.trim(), BODY_SIZE_PT),
                    ]);
                }
            }
        }
        Section::Projects => {
            for project in record.filled_projects() {
                out.entry_title(&project.name);
                out.meta(&project.technologies_line().unwrap_or_default());
                out.body_text(&project.description);
            }
        }
        Section::Certifications => out.body_text(&record.certifications),
        Section::Languages => out.body_text(&record.languages),
    }
}

/// Appends left-aligned paragraph blocks tagged with one section.
struct SectionBlocks<'a> {
    blocks: &'a mut Vec<StyledBlock>,
    section: Section,
}

impl SectionBlocks<'_> {
    fn push(&mut self, runs: Vec<StyledRun>) {
        self.blocks.push(StyledBlock {
            section: self.section,
            kind: BlockKind::Paragraph,
            alignment: Alignment::Left,
            runs,
            spacing_before_pt: 0.0,
            spacing_after_pt: 4.0,
        });
    }

    fn entry_title(&mut self, title: &str) {
        if has_text(title) {
            self.push(vec![StyledRun::bold(title.trim(), ENTRY_TITLE_SIZE_PT)]);
        }
    }

    fn meta(&mut self, text: &str) {
        if has_text(text) {
            self.push(vec![StyledRun::italic(text.trim(), BODY_SIZE_PT)]);
        }
    }

    /// One paragraph per non-blank hard line; the target format wraps each itself.
    fn body_text(&mut self, text: &str) {
        for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            self.push(vec![StyledRun::plain(line, BODY_SIZE_PT)]);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::EntryKind;

    fn header_only_record() -> ResumeRecord {
        let mut record = ResumeRecord::new();
        record.personal_info.name = "Grace Hopper".to_string();
        record.personal_info.email = "grace@example.com".to_string();
        record
    }

    #[test]
    fn test_header_only_document() {
        let doc = render_flow(&header_only_record());
        assert_eq!(doc.sections_present(), vec![Section::Header]);
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[0].kind, BlockKind::Title);
        assert_eq!(doc.blocks[0].text(), "Grace Hopper");
        assert_eq!(doc.blocks[1].alignment, Alignment::Center);
        assert_eq!(doc.blocks[1].text(), "grace@example.com");
    }

    #[test]
    fn test_links_block_when_any_link_present() {
        let mut record = header_only_record();
        record.personal_info.linkedin = "linkedin.com/in/grace".to_string();
        record.personal_info.portfolio = "grace.dev".to_string();
        let doc = render_flow(&record);
        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[2].text(), "linkedin.com/in/grace | grace.dev");
    }

    #[test]
    fn test_experience_entry_runs() {
        let mut record = header_only_record();
        let exp = record.experience_mut(0).unwrap();
        exp.company = "US Navy".to_string();
        exp.position = "Rear Admiral".to_string();
        exp.duration = "1943 - 1986".to_string();
        exp.responsibilities = "Led COBOL standardization\nPopularized the term debugging".to_string();

        let doc = render_flow(&record);
        let section: Vec<&StyledBlock> = doc
            .blocks
            .iter()
            .filter(|b| b.section == Section::Experience)
            .collect();

        assert_eq!(section[0].kind, BlockKind::Heading(1));
        assert_eq!(section[0].text(), "Work Experience");
        assert!(section[1].runs[0].bold);
        assert_eq!(section[1].text(), "Rear Admiral - US Navy");
        assert!(section[2].runs[0].italic);
        assert_eq!(section[2].text(), "1943 - 1986");
        assert_eq!(section[3].text(), "Led COBOL standardization");
        assert_eq!(section[4].text(), "Popularized the term debugging");
        assert_eq!(section.len(), 5);
    }

    #[test]
    fn test_one_heading_per_repeatable_section() {
        let mut record = header_only_record();
        record.add_entry(EntryKind::Project);
        record.add_entry(EntryKind::Project);
        record.project_mut(0).unwrap().name = "A".to_string();
        record.project_mut(2).unwrap().name = "C".to_string();

        let doc = render_flow(&record);
        let headings = doc
            .blocks
            .iter()
            .filter(|b| matches!(b.kind, BlockKind::Heading(_)))
            .count();
        assert_eq!(headings, 1);
        let titles: Vec<String> = doc
            .blocks
            .iter()
            .filter(|b| b.section == Section::Projects && b.kind == BlockKind::Paragraph)
            .map(StyledBlock::text)
            .collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn test_skills_label_is_bold_run() {
        let mut record = header_only_record();
        record.technical_skills = "Rust, SQL".to_string();
        let doc = render_flow(&record);
        let skills = doc
            .blocks
            .iter()
            .find(|b| b.section == Section::Skills && b.kind == BlockKind::Paragraph)
            .unwrap();
        assert!(skills.runs[0].bold);
        assert!(!skills.runs[1].bold);
        assert_eq!(skills.text(), "Technical Skills: Rust, SQL");
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            render_flow(&header_only_record()).file_name,
            "Grace_Hopper_Resume.docx"
        );
    }

    #[test]
    fn test_block_kind_serialization() {
        let json = serde_json::to_value(BlockKind::Heading(1)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "heading", "level": 1}));
    }
}
