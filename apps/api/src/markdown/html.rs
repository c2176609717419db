//! Presentational tree step: maps each block node 1:1 to an HTML element.

use crate::markdown::inline::{escape_html, resolve_inline};
use crate::markdown::parser::BlockNode;

/// Renders parsed blocks as an HTML fragment, one element per node, newline-separated.
///
/// Inline runs are resolved for paragraphs, list items and block quotes only.
/// Headings are escaped but not resolved; code lines are emitted verbatim.
pub fn render_html(blocks: &[BlockNode]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &BlockNode) -> String {
    match block {
        BlockNode::Heading { level, text } => {
            format!("<h{level}>{}</h{level}>", escape_html(text))
        }
        BlockNode::Paragraph { text } => format!("<p>{}</p>", resolve_inline(text)),
        BlockNode::UnorderedList { items } => format!("<ul>{}</ul>", render_items(items)),
        BlockNode::OrderedList { items } => format!("<ol>{}</ol>", render_items(items)),
        BlockNode::CodeBlock { language, lines } => {
            let class = language
                .as_deref()
                .map(|lang| format!(" class=\"language-{}\"", escape_html(lang)))
                .unwrap_or_default();
            let body = lines
                .iter()
                .map(|l| escape_html(l))
                .collect::<Vec<_>>()
                .join("\n");
            format!("<pre><code{class}>{body}</code></pre>")
        }
        BlockNode::Blockquote { text } => {
            format!("<blockquote>{}</blockquote>", resolve_inline(text))
        }
        BlockNode::HorizontalRule => "<hr />".to_string(),
        BlockNode::Spacer => "<div class=\"spacer\"></div>".to_string(),
    }
}

fn render_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", resolve_inline(item)))
        .collect()
}
