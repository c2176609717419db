//! Block parser for the constrained markdown subset used by AI output.
//!
//! One left-to-right pass over physical lines with no backtracking. Two pieces of
//! state carry across lines: the pending list buffer and the open code fence.
//! Malformed input never fails — unterminated constructs are flushed at end of input.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Block nodes
// ────────────────────────────────────────────────────────────────────────────

/// One structural unit of parsed text. Sequence order equals source line order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockNode {
    /// `#` through `####` followed by a space.
    Heading { level: u8, text: String },
    Paragraph { text: String },
    UnorderedList { items: Vec<String> },
    OrderedList { items: Vec<String> },
    /// Lines captured verbatim between fences. `language` is the opening fence's info string.
    CodeBlock {
        language: Option<String>,
        lines: Vec<String>,
    },
    Blockquote { text: String },
    HorizontalRule,
    /// Vertical rhythm only. Never the first node of a sequence.
    Spacer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Ordered,
    Unordered,
}

struct PendingList {
    kind: ListKind,
    items: Vec<String>,
}

impl PendingList {
    fn into_node(self) -> BlockNode {
        match self.kind {
            ListKind::Ordered => BlockNode::OrderedList { items: self.items },
            ListKind::Unordered => BlockNode::UnorderedList { items: self.items },
        }
    }
}

struct OpenFence {
    language: Option<String>,
    lines: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Line patterns
// ────────────────────────────────────────────────────────────────────────────

static FENCE_OPEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*`{3,}\s*([^`\s]*)\s*$").expect("Failed to compile fence regex")
});
static FENCE_CLOSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*`{3,}\s*$").expect("Failed to compile fence close regex"));
static HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#{1,4})[ \t]+(.*)$").expect("Failed to compile heading regex"));
static RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").expect("Failed to compile rule regex"));
static ORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s+(.*)$").expect("Failed to compile ordered item regex"));
static UNORDERED_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*+]\s+(.*)$").expect("Failed to compile unordered item regex"));

// ────────────────────────────────────────────────────────────────────────────
// Parser
// ────────────────────────────────────────────────────────────────────────────

/// Parses a text blob into an ordered sequence of block nodes.
///
/// Always terminates; an empty input yields an empty sequence.
pub fn parse(text: &str) -> Vec<BlockNode> {
    let mut parser = Parser::default();
    // `lines()` also drops a trailing `\r` from each line.
    for line in text.lines() {
        parser.push_line(line);
    }
    parser.finish()
}

#[derive(Default)]
struct Parser {
    nodes: Vec<BlockNode>,
    list: Option<PendingList>,
    fence: Option<OpenFence>,
}

impl Parser {
    fn push_line(&mut self, raw: &str) {
        if let Some(fence) = self.fence.as_mut() {
            if FENCE_CLOSE.is_match(raw) {
                self.close_fence();
            } else {
                fence.lines.push(raw.to_string());
            }
            return;
        }

        if let Some(caps) = FENCE_OPEN.captures(raw) {
            self.flush_list();
            let language = caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            self.fence = Some(OpenFence {
                language,
                lines: Vec::new(),
            });
            return;
        }

        let line = raw.trim();

        if line.is_empty() {
            self.flush_list();
            if !self.nodes.is_empty() {
                self.nodes.push(BlockNode::Spacer);
            }
            return;
        }

        if let Some(caps) = HEADING.captures(line) {
            self.flush_list();
            self.nodes.push(BlockNode::Heading {
                level: caps[1].len() as u8,
                text: caps[2].trim().to_string(),
            });
            return;
        }

        // Checked before list items so `***` and `---` never open a list.
        if RULE.is_match(line) {
            self.flush_list();
            self.nodes.push(BlockNode::HorizontalRule);
            return;
        }

        if let Some(caps) = ORDERED_ITEM.captures(line) {
            self.push_item(ListKind::Ordered, &caps[1]);
            return;
        }

        if let Some(caps) = UNORDERED_ITEM.captures(line) {
            self.push_item(ListKind::Unordered, &caps[1]);
            return;
        }

        if let Some(rest) = line.strip_prefix("> ").or_else(|| (line == ">").then_some("")) {
            self.flush_list();
            self.nodes.push(BlockNode::Blockquote {
                text: rest.trim().to_string(),
            });
            return;
        }

        let indented = raw.starts_with(' ') || raw.starts_with('\t');
        if indented {
            if let Some(last) = self.list.as_mut().and_then(|l| l.items.last_mut()) {
                if !last.is_empty() {
                    last.push(' ');
                }
                last.push_str(line);
                return;
            }
        }

        self.flush_list();
        self.nodes.push(BlockNode::Paragraph {
            text: line.to_string(),
        });
    }

    fn push_item(&mut self, kind: ListKind, text: &str) {
        if self.list.as_ref().is_some_and(|l| l.kind != kind) {
            self.flush_list();
        }
        self.list
            .get_or_insert_with(|| PendingList {
                kind,
                items: Vec::new(),
            })
            .items
            .push(text.trim().to_string());
    }

    fn flush_list(&mut self) {
        if let Some(list) = self.list.take() {
            self.nodes.push(list.into_node());
        }
    }

    fn close_fence(&mut self) {
        if let Some(fence) = self.fence.take() {
            self.nodes.push(BlockNode::CodeBlock {
                language: fence.language,
                lines: fence.lines,
            });
        }
    }

    fn finish(mut self) -> Vec<BlockNode> {
        self.close_fence();
        self.flush_list();
        self.nodes
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
