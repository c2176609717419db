// AI content generation: request-type validation, the single gateway call, and
// conversion of the returned text into rendered blocks.
// All gateway calls go through llm_client; nothing here talks HTTP directly.

pub mod handlers;
pub mod kind;
pub mod service;

pub use kind::GenerationKind;
pub use service::{generate_content, GeneratedContent};
