// Markdown-subset rendering for free-text AI output (cover letters, interview prep, advice).
// Pure and synchronous: no logging, no I/O. Not a CommonMark implementation.

pub mod handlers;
pub mod html;
pub mod inline;
pub mod parser;

pub use html::render_html;
pub use parser::{parse, BlockNode};
