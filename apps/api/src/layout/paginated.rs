//! Fixed-layout (paginated) résumé renderer.
//!
//! Produces absolutely positioned draw instructions grouped into pages, enough to
//! drive a print/PDF backend. Layout is a pure function of the record and the page
//! config: a `LayoutCursor` value is threaded through every emission step, and the
//! page-break rule is applied before each wrapped line.

use serde::Serialize;

use crate::layout::cursor::LayoutCursor;
use crate::layout::font_metrics::{get_metrics, FontStyle, FontWeight, PageConfig};
use crate::layout::wrap::wrap_text;
use crate::models::resume::{has_text, ResumeRecord};
use crate::models::section::{distinct_sections, Section};
use crate::render::pdf_file_name;

/// Distance from a heading's baseline to its underline rule.
const HEADING_RULE_GAP_PT: f32 = 2.0;

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// One draw instruction. `y` is the text baseline (or rule position) in points
/// from the top edge of the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        size_pt: f32,
        weight: FontWeight,
        style: FontStyle,
        section: Section,
    },
    /// Horizontal rule under a section heading.
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        section: Section,
    },
}

impl DrawOp {
    pub fn section(&self) -> Section {
        match self {
            DrawOp::Text { section, .. } | DrawOp::Rule { section, .. } => *section,
        }
    }
}

#[cfg(test)]
impl DrawOp {
    pub fn y(&self) -> f32 {
        match self {
            DrawOp::Text { y, .. } | DrawOp::Rule { y, .. } => *y,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            DrawOp::Rule { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub index: usize,
    pub ops: Vec<DrawOp>,
}

/// The finished multi-page artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaginatedDocument {
    pub file_name: String,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub pages: Vec<Page>,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Sections that actually produced draw instructions, in document order.
    pub fn sections_present(&self) -> Vec<Section> {
        distinct_sections(
            self.pages
                .iter()
                .flat_map(|p| p.ops.iter())
                .map(DrawOp::section),
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the whole record synchronously and returns the finished document.
///
/// Sections run in fixed order and absent sections emit nothing (no heading,
/// no spacing). Assumes a minimally valid record; callers check the name.
pub fn render_paginated(record: &ResumeRecord, config: &PageConfig) -> PaginatedDocument {
    let mut sink = PageSink::new(config);
    let mut cursor = LayoutCursor::start(config);

    for section in record.present_sections() {
        cursor = match section {
            Section::Header => layout_header(&mut sink, cursor, record),
            other => {
                let cursor = cursor.advance(config.section_gap_pt);
                let cursor = sink.keep_heading_with_body(cursor, other);
                let cursor = sink.heading(cursor, other);
                layout_section_body(&mut sink, cursor, record, other)
            }
        };
    }

    sink.finish(pdf_file_name(&record.personal_info.name))
}

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

fn layout_header(sink: &mut PageSink, cursor: LayoutCursor, record: &ResumeRecord) -> LayoutCursor {
    let info = &record.personal_info;
    let name_font = TextFont::new(sink.config.name_size_pt, FontWeight::Bold, FontStyle::Normal);
    let body_font = sink.body_font(FontStyle::Normal);

    // The name line is always emitted so an unnamed record still has a header.
    let name = info.name.trim();
    let mut cursor = if name.is_empty() {
        sink.line(cursor, "", name_font, Align::Center, Section::Header)
    } else {
        sink.centered(cursor, name, name_font, Section::Header)
    };
    for line in [info.contact_items(), info.link_items()] {
        if !line.is_empty() {
            cursor = sink.centered(cursor, &line.join(" | "), body_font, Section::Header);
        }
    }
    cursor
}

fn layout_section_body(
    sink: &mut PageSink,
    cursor: LayoutCursor,
    record: &ResumeRecord,
    section: Section,
) -> LayoutCursor {
    let body = sink.body_font(FontStyle::Normal);
    let meta = sink.body_font(FontStyle::Italic);
    let title = TextFont::new(
        sink.config.entry_title_size_pt,
        FontWeight::Bold,
        FontStyle::Normal,
    );
    let entry_gap = sink.config.entry_gap_pt;

    match section {
        Section::Header => cursor,
        Section::Summary => sink.paragraph(cursor, &record.summary, body, section),
        Section::Experience => {
            record
                .filled_experiences()
                .enumerate()
                .fold(cursor, |cursor, (i, exp)| {
                    let cursor = if i > 0 { cursor.advance(entry_gap) } else { cursor };
                    let cursor = sink.paragraph(cursor, &exp.title(), title, section);
                    let cursor = sink.paragraph(cursor, &exp.duration, meta, section);
                    sink.paragraph(cursor, &exp.responsibilities, body, section)
                })
        }
        Section::Education => {
            record
                .filled_educations()
                .enumerate()
                .fold(cursor, |cursor, (i, edu)| {
                    let cursor = if i > 0 { cursor.advance(entry_gap) } else { cursor };
                    let cursor = sink.paragraph(cursor, &edu.title(), title, section);
                    sink.paragraph(cursor, &edu.meta().unwrap_or_default(), meta, section)
                })
        }
        Section::Skills => {
            let mut cursor = cursor;
            for (label, value) in [
                ("Technical Skills", &record.technical_skills),
                ("Soft Skills", &record.soft_skills),
            ] {
                if has_text(value) {
                    let line = format!("{label}: {}", value.trim());
                    cursor = sink.paragraph(cursor, &line, body, section);
                }
            }
            cursor
        }
        Section::Projects => {
            record
                .filled_projects()
                .enumerate()
                .fold(cursor, |cursor, (i, project)| {
                    let cursor = if i > 0 { cursor.advance(entry_gap) } else { cursor };
                    let cursor = sink.paragraph(cursor, &project.name, title, section);
                    let tech = project.technologies_line().unwrap_or_default();
                    let cursor = sink.paragraph(cursor, &tech, meta, section);
                    sink.paragraph(cursor, &project.description, body, section)
                })
        }
        Section::Certifications => sink.paragraph(cursor, &record.certifications, body, section),
        Section::Languages => sink.paragraph(cursor, &record.languages, body, section),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Emission
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct TextFont {
    size_pt: f32,
    weight: FontWeight,
    style: FontStyle,
}

impl TextFont {
    fn new(size_pt: f32, weight: FontWeight, style: FontStyle) -> Self {
        Self {
            size_pt,
            weight,
            style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// Collects draw instructions per page. Holds no layout position of its own;
/// positions come in and go out as `LayoutCursor` values.
struct PageSink<'a> {
    config: &'a PageConfig,
    pages: Vec<Page>,
}

impl<'a> PageSink<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            pages: Vec::new(),
        }
    }

    fn body_font(&self, style: FontStyle) -> TextFont {
        TextFont::new(self.config.body_size_pt, FontWeight::Normal, style)
    }

    /// Wraps `text` to the usable width and emits it left-aligned at the margin.
    fn paragraph(
        &mut self,
        cursor: LayoutCursor,
        text: &str,
        font: TextFont,
        section: Section,
    ) -> LayoutCursor {
        self.wrapped(cursor, text, font, Align::Left, section)
    }

    /// Wraps `text` and centers each line against the page width.
    fn centered(
        &mut self,
        cursor: LayoutCursor,
        text: &str,
        font: TextFont,
        section: Section,
    ) -> LayoutCursor {
        self.wrapped(cursor, text, font, Align::Center, section)
    }

    fn wrapped(
        &mut self,
        cursor: LayoutCursor,
        text: &str,
        font: TextFont,
        align: Align,
        section: Section,
    ) -> LayoutCursor {
        let metrics = get_metrics(font.weight);
        let lines = wrap_text(text, metrics, font.size_pt, self.config.usable_width_pt());
        lines
            .iter()
            .fold(cursor, |cursor, line| self.line(cursor, line, font, align, section))
    }

    /// Emits one already-wrapped line, breaking the page first if it would not fit.
    fn line(
        &mut self,
        cursor: LayoutCursor,
        text: &str,
        font: TextFont,
        align: Align,
        section: Section,
    ) -> LayoutCursor {
        let line_height = self.config.line_height_pt(font.size_pt);
        let cursor = cursor.ensure_room(line_height, self.config);

        let x = match align {
            Align::Left => self.config.margin_left_pt,
            Align::Center => {
                let width = get_metrics(font.weight).width_pt(text, font.size_pt);
                ((self.config.page_width_pt - width) / 2.0).max(self.config.margin_left_pt)
            }
        };

        self.page_mut(cursor.page).ops.push(DrawOp::Text {
            x,
            y: cursor.y + font.size_pt,
            text: text.to_string(),
            size_pt: font.size_pt,
            weight: font.weight,
            style: font.style,
            section,
        });
        cursor.advance(line_height)
    }

    fn heading_font(&self) -> TextFont {
        TextFont::new(
            self.config.heading_size_pt,
            FontWeight::Bold,
            FontStyle::Normal,
        )
    }

    /// Moves to the next page when the heading and the first line of its body
    /// would not both fit, so a heading never ends a page on its own.
    /// Mirrors the arithmetic of `heading` followed by `line`.
    fn keep_heading_with_body(&self, cursor: LayoutCursor, section: Section) -> LayoutCursor {
        if cursor.is_at_top(self.config) {
            return cursor;
        }
        let first_line_size = match section {
            Section::Experience | Section::Education | Section::Projects => {
                self.config.entry_title_size_pt
            }
            _ => self.config.body_size_pt,
        };
        let after_heading = cursor
            .advance(self.config.line_height_pt(self.heading_font().size_pt))
            .advance(HEADING_RULE_GAP_PT);
        let first_line = after_heading
            .ensure_room(self.config.line_height_pt(first_line_size), self.config);
        if first_line.page != cursor.page {
            cursor.next_page(self.config)
        } else {
            cursor
        }
    }

    /// Section heading followed by a rule just under its baseline.
    fn heading(&mut self, cursor: LayoutCursor, section: Section) -> LayoutCursor {
        let font = self.heading_font();
        let line_height = self.config.line_height_pt(font.size_pt);
        let next = self.line(cursor, section.title(), font, Align::Left, section);

        // The rule sits inside the heading's own line box, so it can never cross a page.
        let baseline = next.y - line_height + font.size_pt;
        let x1 = self.config.margin_left_pt;
        let x2 = self.config.page_width_pt - self.config.margin_right_pt;
        self.page_mut(next.page).ops.push(DrawOp::Rule {
            x1,
            x2,
            y: baseline + HEADING_RULE_GAP_PT,
            section,
        });
        next.advance(HEADING_RULE_GAP_PT)
    }

    fn page_mut(&mut self, index: usize) -> &mut Page {
        while self.pages.len() <= index {
            let next = self.pages.len();
            self.pages.push(Page {
                index: next,
                ops: Vec::new(),
            });
        }
        &mut self.pages[index]
    }

    fn finish(mut self, file_name: String) -> PaginatedDocument {
        self.page_mut(0);
        PaginatedDocument {
            file_name,
            page_width_pt: self.config.page_width_pt,
            page_height_pt: self.config.page_height_pt,
            pages: self.pages,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
