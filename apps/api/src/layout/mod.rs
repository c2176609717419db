// Fixed-layout (paginated) rendering of the résumé record.
// Implements: glyph-width measurement, greedy wrap, explicit cursor, page-break rule.
// Pure and CPU-bound; HTTP handlers run it inside tokio::task::spawn_blocking.

pub mod cursor;
pub mod font_metrics;
pub mod paginated;
pub mod wrap;

// Re-export the public API consumed by other modules (render handlers, main).
pub use font_metrics::{default_page_config, PageConfig, PaperSize};
pub use paginated::{render_paginated, PaginatedDocument};
