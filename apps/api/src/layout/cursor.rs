//! Explicit layout cursor for the fixed-layout renderer.
//!
//! The cursor is a plain value: every emission step takes one and returns the
//! advanced one. Page breaks happen only in `ensure_room`, i.e. at line boundaries.

use serde::Serialize;

use crate::layout::font_metrics::PageConfig;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutCursor {
    /// Zero-based page index.
    pub page: usize,
    /// Top of the next line, in points from the top edge.
    pub y: f32,
}

impl LayoutCursor {
    pub fn start(config: &PageConfig) -> Self {
        Self {
            page: 0,
            y: config.margin_top_pt,
        }
    }

    pub fn advance(self, dy: f32) -> Self {
        Self {
            page: self.page,
            y: self.y + dy,
        }
    }

    /// Page-break rule: if a line of `line_height` would cross the bottom margin,
    /// returns a cursor at the top margin of the next page.
    ///
    /// A cursor already at the top margin never breaks, so a line taller than the
    /// usable height cannot produce an endless run of blank pages.
    pub fn ensure_room(self, line_height: f32, config: &PageConfig) -> Self {
        if !self.is_at_top(config) && self.y + line_height > config.bottom_limit_pt() {
            self.next_page(config)
        } else {
            self
        }
    }

    pub fn is_at_top(self, config: &PageConfig) -> bool {
        self.y <= config.margin_top_pt
    }

    /// Top margin of the following page.
    pub fn next_page(self, config: &PageConfig) -> Self {
        Self {
            page: self.page + 1,
            y: config.margin_top_pt,
        }
    }
}
